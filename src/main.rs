use dash_ninja::{spawner, GameEvent, GameSession, GridConfig, GridLayout, TileKind};
use std::io::{self, Write};
use std::process;

const USAGE: &str = "usage: dash-ninja [LEVELS] [--seed N] [--config PATH] [--json] [--paced]";

#[derive(Debug, Default)]
struct CliArgs {
    levels: u32,
    seed: Option<u64>,
    config_path: Option<String>,
    json: bool,
    paced: bool,
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs {
        levels: 3,
        ..CliArgs::default()
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => cli.json = true,
            "--paced" => cli.paced = true,
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                cli.seed = Some(value.parse().map_err(|_| format!("bad seed `{value}`"))?);
            }
            "--config" => {
                cli.config_path = Some(iter.next().ok_or("--config needs a path")?.clone());
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            other => {
                cli.levels = other
                    .parse()
                    .map_err(|_| format!("unexpected argument `{other}`\n{USAGE}"))?;
            }
        }
    }
    Ok(cli)
}

fn load_config(cli: &CliArgs) -> Result<GridConfig, String> {
    let base = match &cli.config_path {
        Some(path) => GridConfig::from_file(path).map_err(|e| format!("{path}: {e}"))?,
        None => GridConfig::default(),
    };
    let mut config = base.with_env_overrides().map_err(|e| e.to_string())?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    Ok(config)
}

fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Set up logging
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("{message}");
            process::exit(2);
        }
    };

    if let Err(e) = run(&cli) {
        eprintln!("❌ {e}");
        process::exit(1);
    }
}

fn run(cli: &CliArgs) -> Result<(), String> {
    let config = load_config(cli)?;
    let delay = config.spawn_delay();
    let mut session = GameSession::new(config);

    if !cli.json {
        session.bus_mut().subscribe(|event| {
            if let GameEvent::LayoutGenerated {
                level,
                start_position,
            } = event
            {
                println!("\n🥷 Level {level}: player spawns at {start_position}");
            }
        });
    }

    let runtime = tokio::runtime::Runtime::new().map_err(|e| e.to_string())?;

    for _ in 0..cli.levels {
        let layout = session.load_next_level().map_err(|e| e.to_string())?;
        if cli.json {
            println!("{}", layout.to_json().map_err(|e| e.to_string())?);
        } else if cli.paced {
            runtime.block_on(print_paced(layout, delay));
        } else {
            print!("{}", layout.render_ascii());
        }
    }
    Ok(())
}

/// Prints the grid starting from the start row, one cell per emission.
async fn print_paced(layout: &GridLayout, delay: std::time::Duration) {
    let last = layout.grid_size() - 1;
    spawner::emit_paced(layout.spawn_sequence(), delay, |cell| {
        let glyph = cell.item.map_or(cell.tile.glyph(), |item| item.glyph());
        print!("{glyph}");
        if cell.coordinate.x == last {
            println!();
        } else {
            print!(" ");
        }
        io::stdout().flush().ok();
    })
    .await;
    let dangerous = layout.count(TileKind::Dangerous);
    println!(
        "   {} route cells, {dangerous} dangerous, {} items",
        layout.route().len(),
        layout.items().len()
    );
}
