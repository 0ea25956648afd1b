//! schedics library root.
//! Exposes the CLI parser, the high-level run() function, and the extraction
//! engine modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod server;
pub mod sheet;
pub mod source;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Build { .. } => cli::commands::build::handle(cli, cfg),
        Commands::Print => cli::commands::print::handle(cli, cfg),
        Commands::Events { .. } => cli::commands::events::handle(cli, cfg),
        Commands::Inspect { .. } => cli::commands::inspect::handle(cli, cfg),
        Commands::Serve { .. } => cli::commands::serve::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(cli, cfg),
    }
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // 2️⃣ load + validate the config once
    let cfg = Config::load(&cli.config)?;

    // 3️⃣ hand everything to the dispatcher
    dispatch(&cli, &cfg)
}
