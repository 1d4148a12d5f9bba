use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use imageit::host;
use imageit::OptionsStore;
use imageit_core::{builtin_operators, Dimensions, ImagePanel, PixelPosition};
use imageit_types::PanelOptions;
use log::{error, info, warn};
use std::path::PathBuf;

/// ImageIt - background image panel with data-driven sensor overlays
#[derive(Parser, Debug)]
#[command(name = "imageit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0", global = true)]
    debug: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the panel presentation as JSON
    Render {
        /// Panel options file (defaults to the user config location)
        #[arg(short = 'o', long = "options", value_name = "FILE")]
        options: Option<PathBuf>,

        /// Series data file
        #[arg(long = "data", value_name = "FILE")]
        data: PathBuf,

        /// Rendered image width in pixels
        #[arg(long = "width")]
        width: f64,

        /// Rendered image height in pixels
        #[arg(long = "height")]
        height: f64,

        /// Dashboard variable (e.g., --var room=boiler)
        #[arg(long = "var", value_name = "NAME=VALUE", value_parser = host::parse_variable)]
        vars: Vec<(String, String)>,
    },

    /// Move a sensor to a pixel position and save the options
    MoveSensor {
        #[arg(short = 'o', long = "options", value_name = "FILE")]
        options: Option<PathBuf>,

        /// Sensor index (0-based)
        #[arg(long = "index")]
        index: usize,

        /// Drop position X in pixels
        #[arg(long = "x")]
        x: f64,

        /// Drop position Y in pixels
        #[arg(long = "y")]
        y: f64,

        #[arg(long = "width")]
        width: f64,

        #[arg(long = "height")]
        height: f64,
    },

    /// List mapping operators
    Operators,

    /// Write default options
    Init {
        /// Target file (defaults to the user config location)
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long = "force")]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info, Level 2: debug, Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting ImageIt v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli.command) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Render {
            options,
            data,
            width,
            height,
            vars,
        } => {
            let store = OptionsStore::at_or_default(options.as_deref())?;
            let options = store.load()?;
            let series = host::load_series(&data)?;
            let variables = host::variables(&vars);

            let mut panel = ImagePanel::new(options, |_: PanelOptions| {});
            panel.on_image_load(Dimensions::new(width, height));
            let presentation = panel.render(builtin_operators(), &series, &variables);

            println!("{}", serde_json::to_string_pretty(&presentation)?);
        }

        Command::MoveSensor {
            options,
            index,
            x,
            y,
            width,
            height,
        } => {
            let store = OptionsStore::at_or_default(options.as_deref())?;
            let mut updated = None;
            {
                let mut panel = ImagePanel::new(store.load()?, |o: PanelOptions| updated = Some(o));
                panel.on_image_load(Dimensions::new(width, height));
                panel
                    .on_sensor_drag_stop(index, PixelPosition::new(x, y))
                    .with_context(|| format!("Cannot move sensor {}", index))?;
            }
            if let Some(options) = updated {
                store.save(&options)?;
                let position = options.sensors[index].position;
                println!("Sensor {} at {:.2}%, {:.2}%", index, position.x, position.y);
            }
        }

        Command::Operators => {
            for op in builtin_operators().iter() {
                println!(
                    "{:<12} {:<3} {}",
                    op.id,
                    op.operator,
                    op.description.unwrap_or("")
                );
            }
        }

        Command::Init { path, force } => {
            let store = OptionsStore::at_or_default(path.as_deref())?;
            if store.path().exists() && !force {
                warn!("Not overwriting {}", store.path().display());
                anyhow::bail!("{} already exists (use --force)", store.path().display());
            }
            store.save(&PanelOptions::default())?;
            println!("Wrote {}", store.path().display());
        }
    }

    Ok(())
}
