use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use libviet::{
    create_engine, input_method_names, rebuild_composition, Engine, Mode, ToneStyle, VietConfig,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "libviet")]
#[command(about = "A Vietnamese input method engine (Telex, VNI)")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Input method name, overrides the configuration
    #[arg(long = "im", global = true)]
    input_method: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Single key sequence for quick testing
    input: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive REPL mode: each line of stdin is typed from scratch
    Repl,
    /// Type a key sequence and print the result
    Type {
        keys: String,
        /// Print the raw keys instead of the composed text
        #[arg(long)]
        english: bool,
    },
    /// Rebuild the composition of already-composed text
    Rebuild {
        text: String,
        /// Tone placement, defaults to the configured one
        #[arg(long, value_enum)]
        style: Option<StyleArg>,
        /// Dump the composition as JSON
        #[arg(long)]
        json: bool,
    },
    /// List built-in input methods
    List,
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum StyleArg {
    Old,
    Modern,
}

impl From<StyleArg> for ToneStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Old => ToneStyle::Old,
            StyleArg::Modern => ToneStyle::Modern,
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}

fn load_config(cli: &Cli) -> Result<VietConfig> {
    let mut config = match &cli.config {
        Some(path) => VietConfig::load_toml(path)
            .map_err(|e| anyhow!("failed to load config {}: {}", path.display(), e))?,
        None => VietConfig::default(),
    };
    if let Some(name) = &cli.input_method {
        config.input_method = name.clone();
    }
    Ok(config)
}

fn build_engine(config: &VietConfig) -> Result<Engine> {
    match create_engine(config) {
        Some(engine) => Ok(engine),
        None => bail!(
            "unknown input method '{}' (available: {})",
            config.input_method,
            input_method_names().join(", ")
        ),
    }
}

fn run_repl(mut engine: Engine) -> Result<()> {
    println!(
        "libviet {}: type keys and press Enter",
        engine.input_method().name
    );
    println!("Example: vieetj nam -> việt nam");
    println!("Ctrl-D to exit.");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("error reading stdin")?;
        engine.reset();
        engine.process_str(&line, Mode::Vietnamese);
        println!("{}", engine.processed_string(Mode::Vietnamese));
    }
    Ok(())
}

fn handle_type(mut engine: Engine, keys: &str, english: bool) {
    let mode = if english {
        Mode::English
    } else {
        Mode::Vietnamese
    };
    engine.process_str(keys, Mode::Vietnamese);
    println!("{}", engine.processed_string(mode));
}

fn handle_rebuild(
    config: &VietConfig,
    text: &str,
    style: Option<StyleArg>,
    json: bool,
) -> Result<()> {
    let style = style.map_or(config.base().tone_style, ToneStyle::from);
    let composition = rebuild_composition(text, style);
    if json {
        let dump = serde_json::to_string_pretty(&composition)
            .context("failed to serialize composition")?;
        println!("{dump}");
    } else {
        println!("{}", composition.render(Mode::Vietnamese));
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Some(Commands::Repl) => run_repl(build_engine(&config)?),
        Some(Commands::Type { keys, english }) => {
            handle_type(build_engine(&config)?, keys, *english);
            Ok(())
        }
        Some(Commands::Rebuild { text, style, json }) => {
            handle_rebuild(&config, text, *style, *json)
        }
        Some(Commands::List) => {
            for name in input_method_names() {
                println!("{name}");
            }
            for im in &config.custom_input_methods {
                println!("{} (custom)", im.name);
            }
            Ok(())
        }
        // Legacy behavior: a bare argument is typed once, nothing starts the REPL
        None => match cli.input.as_deref() {
            Some(keys) => {
                handle_type(build_engine(&config)?, keys, false);
                Ok(())
            }
            None => run_repl(build_engine(&config)?),
        },
    }
}
