use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::server::{AppState, serve};
use crate::source::{WorkbookSource, source_for};
use crate::ui::messages::info;
use std::sync::Arc;

/// Handle the `serve` subcommand
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Serve { bind } = &cli.command {
        let bind = bind.clone().unwrap_or_else(|| cfg.server.bind.clone());
        let source: Arc<dyn WorkbookSource> = Arc::from(source_for(cfg, cli.xlsx.as_deref()));
        info(format!("Serving {} on http://{bind}", source.describe()));

        let state = AppState::new(cfg.clone(), source);
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(serve(state, &bind))?;
    }
    Ok(())
}
