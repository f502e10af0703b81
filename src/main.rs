//! Conquest -- an interactive territory-conquest game.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Logs go to stderr.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use conquest::config::GameConfig;
use conquest::engine::{Engine, EngineError, Flow};

#[derive(Parser, Debug)]
#[command(name = "conquest")]
#[command(about = "Turn-based territory conquest with a built-in map editor")]
struct Args {
    /// Directory map files are read from and saved to
    #[arg(long)]
    maps_dir: Option<PathBuf>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for randomized country ids (sequential ids when omitted)
    #[arg(long)]
    id_seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn load_config(args: &Args) -> Result<GameConfig, conquest::config::ConfigError> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(dir) = &args.maps_dir {
        config.maps_dir = dir.clone();
    }
    if let Some(seed) = args.id_seed {
        config.id_seed = Some(seed);
    }
    Ok(config)
}

/// Runs the command loop until `exit` or end of input.
fn run(config: &GameConfig) -> Result<(), EngineError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new(config);

    writeln!(out, "Welcome to Conquest. Type 'showcommands' for help.")?;
    engine.prompt(&mut out)?;

    for line in stdin.lock().lines() {
        let line = line?;
        if engine.handle_line(&line, &mut out)? == Flow::Exit {
            break;
        }
        engine.prompt(&mut out)?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = std::str::FromStr::from_str(&args.log_level).unwrap_or(log::LevelFilter::Warn);
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    let config = match load_config(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };
    log::info!("maps directory: {}", config.maps_dir.display());

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("fatal: {}", e);
            ExitCode::FAILURE
        }
    }
}
