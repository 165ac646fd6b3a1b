use thiserror::Error;

/// Errors raised while loading or validating a [`GridConfig`](crate::config::GridConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`{field}` = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("`{field}` = {value} is not a whole number of hundredths")]
    FractionPrecision { field: &'static str, value: f32 },
    #[error("min_dangerous_fraction ({min}) exceeds max_dangerous_fraction ({max})")]
    InvertedDangerBounds { min: f32, max: f32 },
    #[error("environment variable `{key}` has invalid value `{value}`")]
    InvalidEnv { key: String, value: String },
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors raised while generating a level layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("could not place {requested} dangerous tiles on {free} free cells")]
    HazardSamplingExhausted { requested: usize, free: usize },
}
