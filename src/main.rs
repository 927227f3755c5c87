//! Pi-cam-still binary: validate options and take pictures with raspistill.

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

use pi_cam_still::{registry, BoundsPolicy, Config, OptionValue};

#[derive(Parser, Debug)]
#[command(name = "pi-cam-still", version, about = "Validated still capture via raspistill")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Take a picture named <FILE_NAME>.jpg
    Capture {
        /// Picture name without the .jpg extension
        file_name: String,

        /// Capture option, repeatable; switches take no value
        #[arg(short = 's', long = "set", value_name = "NAME[=VALUE]")]
        set: Vec<String>,

        /// Capture binary to run
        #[arg(long)]
        program: Option<PathBuf>,

        /// Directory to write the picture to
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Only apply range bounds when a non-zero minimum is registered
        #[arg(long)]
        legacy_bounds: bool,
    },

    /// Check an option value without capturing
    Check {
        /// Option name
        name: String,

        /// Candidate value; omitted means no value
        #[arg(allow_hyphen_values = true)]
        value: Option<String>,

        /// Only apply range bounds when a non-zero minimum is registered
        #[arg(long)]
        legacy_bounds: bool,
    },

    /// List supported options
    Options,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::from_file(path).context("failed to load configuration"),
        None => Ok(Config::default()),
    }
}

/// Split `NAME[=VALUE]`; a bare name is a value-less switch.
fn parse_setting(setting: &str) -> (&str, OptionValue) {
    match setting.split_once('=') {
        Some((name, value)) => (name, OptionValue::from(value)),
        None => (setting, OptionValue::Null),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Capture {
            file_name,
            set,
            program,
            output_dir,
            legacy_bounds,
        } => {
            if let Some(program) = program {
                config.program = program;
            }
            if output_dir.is_some() {
                config.output_dir = output_dir;
            }
            if legacy_bounds {
                config.bounds = BoundsPolicy::Legacy;
            }

            log::debug!("using {:?} range bounds", config.validator().bounds());
            let mut options = config.capture_options()?;
            for setting in &set {
                let (name, value) = parse_setting(setting);
                options.set(name, value)?;
            }

            let path = config
                .camera()
                .capture_with(&file_name, &options)
                .await
                .with_context(|| format!("could not capture '{file_name}'"))?;
            println!("{}", path.display());
        }
        Command::Check {
            name,
            value,
            legacy_bounds,
        } => {
            if legacy_bounds {
                config.bounds = BoundsPolicy::Legacy;
            }
            let value = value.map_or(OptionValue::Undefined, OptionValue::from);
            config.validator().ensure_valid(&name, &value)?;
            println!("ok");
        }
        Command::Options => {
            for (name, registered) in registry::options() {
                println!("{name:<12} {:<6} --{name}", registered.short_flag);
            }
        }
    }

    Ok(())
}
