use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

pub const MIN_GRID_SIZE: u32 = 2;
pub const MAX_GRID_SIZE: u32 = 20;

/// Generation settings. Every field has a default, so a JSON file only needs
/// the values it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Width and length of the first level's grid.
    pub grid_size: u32,
    /// Seconds between two spawn emissions.
    pub spawn_delay_secs: f32,
    /// Height of items above their tile.
    pub item_spawn_offset: f32,
    /// Height at which the player is placed above the start tile.
    pub player_spawn_offset: f32,
    /// Lower danger bound in `[0, 0.5]`, in whole hundredths (`0.25`, not `0.255`).
    pub min_dangerous_fraction: f32,
    /// Upper danger bound in `[0, 0.5]`, in whole hundredths.
    pub max_dangerous_fraction: f32,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Random walks tried before falling back to a straight route.
    pub max_route_attempts: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            grid_size: 8,
            spawn_delay_secs: 0.025,
            item_spawn_offset: 1.0,
            player_spawn_offset: 1.0,
            min_dangerous_fraction: 0.25,
            max_dangerous_fraction: 0.30,
            seed: None,
            max_route_attempts: 256,
        }
    }
}

impl GridConfig {
    /// Parse and validate a JSON config descriptor.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GridConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Apply `DASH_NINJA_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup, then re-validate.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_var(&lookup, "DASH_NINJA_GRID_SIZE")? {
            self.grid_size = v;
        }
        if let Some(v) = parse_var(&lookup, "DASH_NINJA_SPAWN_DELAY")? {
            self.spawn_delay_secs = v;
        }
        if let Some(v) = parse_var(&lookup, "DASH_NINJA_ITEM_OFFSET")? {
            self.item_spawn_offset = v;
        }
        if let Some(v) = parse_var(&lookup, "DASH_NINJA_PLAYER_OFFSET")? {
            self.player_spawn_offset = v;
        }
        if let Some(v) = parse_var(&lookup, "DASH_NINJA_MIN_DANGEROUS")? {
            self.min_dangerous_fraction = v;
        }
        if let Some(v) = parse_var(&lookup, "DASH_NINJA_MAX_DANGEROUS")? {
            self.max_dangerous_fraction = v;
        }
        if let Some(v) = parse_var(&lookup, "DASH_NINJA_SEED")? {
            self.seed = Some(v);
        }
        if let Some(v) = parse_var(&lookup, "DASH_NINJA_MAX_ROUTE_ATTEMPTS")? {
            self.max_route_attempts = v;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "grid_size",
            self.grid_size as f64,
            MIN_GRID_SIZE as f64,
            MAX_GRID_SIZE as f64,
        )?;
        check_range("spawn_delay_secs", self.spawn_delay_secs as f64, 0.0, 0.5)?;
        check_range("item_spawn_offset", self.item_spawn_offset as f64, 0.5, 3.0)?;
        check_range("player_spawn_offset", self.player_spawn_offset as f64, 0.0, 5.0)?;
        check_range(
            "min_dangerous_fraction",
            self.min_dangerous_fraction as f64,
            0.0,
            0.5,
        )?;
        check_range(
            "max_dangerous_fraction",
            self.max_dangerous_fraction as f64,
            0.0,
            0.5,
        )?;
        check_hundredths("min_dangerous_fraction", self.min_dangerous_fraction)?;
        check_hundredths("max_dangerous_fraction", self.max_dangerous_fraction)?;
        check_range(
            "max_route_attempts",
            self.max_route_attempts as f64,
            1.0,
            u32::MAX as f64,
        )?;
        if self.min_dangerous_fraction > self.max_dangerous_fraction {
            return Err(ConfigError::InvertedDangerBounds {
                min: self.min_dangerous_fraction,
                max: self.max_dangerous_fraction,
            });
        }
        Ok(())
    }

    pub fn spawn_delay(&self) -> Duration {
        Duration::from_secs_f32(self.spawn_delay_secs)
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    // NaN lands in the error branch.
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Difficulty tracks danger bounds in hundredths; finer values would be rounded away.
fn check_hundredths(field: &'static str, value: f32) -> Result<(), ConfigError> {
    let scaled = value as f64 * 100.0;
    if (scaled - scaled.round()).abs() < 1e-3 {
        Ok(())
    } else {
        Err(ConfigError::FractionPrecision { field, value })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv {
                key: key.to_string(),
                value: raw,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        let config = GridConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_size, 8);
        assert_eq!(config.spawn_delay(), Duration::from_secs_f32(0.025));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GridConfig::from_json_str(r#"{ "grid_size": 12, "seed": 7 }"#).unwrap();
        assert_eq!(config.grid_size, 12);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_dangerous_fraction, 0.30);
    }

    #[test]
    fn test_rejects_small_grid() {
        let err = GridConfig::from_json_str(r#"{ "grid_size": 1 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "grid_size",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_out_of_range_delay_and_offset() {
        assert!(GridConfig::from_json_str(r#"{ "spawn_delay_secs": 0.75 }"#).is_err());
        assert!(GridConfig::from_json_str(r#"{ "item_spawn_offset": 0.1 }"#).is_err());
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let err = GridConfig::from_json_str(
            r#"{ "min_dangerous_fraction": 0.4, "max_dangerous_fraction": 0.3 }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvertedDangerBounds { .. }));
    }

    #[test]
    fn test_rejects_sub_hundredth_fractions() {
        let err = GridConfig::from_json_str(r#"{ "min_dangerous_fraction": 0.255 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::FractionPrecision {
                field: "min_dangerous_fraction",
                ..
            }
        ));
        assert!(GridConfig::from_json_str(r#"{ "max_dangerous_fraction": 0.33 }"#).is_ok());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GridConfig::from_json_str("{ grid_size: }"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_overrides_from_lookup() {
        let vars: HashMap<&str, &str> =
            [("DASH_NINJA_GRID_SIZE", "10"), ("DASH_NINJA_SEED", " 42 ")]
                .into_iter()
                .collect();
        let config = GridConfig::default()
            .with_overrides_from(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.grid_size, 10);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_invalid_override() {
        let err = GridConfig::default()
            .with_overrides_from(|key| {
                (key == "DASH_NINJA_SPAWN_DELAY").then(|| "soon".to_string())
            })
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { .. }));
    }

    #[test]
    fn test_override_is_validated() {
        let result = GridConfig::default()
            .with_overrides_from(|key| (key == "DASH_NINJA_GRID_SIZE").then(|| "25".to_string()));
        assert!(result.is_err());
    }
}
