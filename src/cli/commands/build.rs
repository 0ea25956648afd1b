use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::feed::fetch_feed;
use crate::errors::AppResult;
use crate::export::write_output;
use crate::source::source_for;
use crate::ui::messages::{info, warning};

/// Handle the `build` subcommand
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Build { output, force } = &cli.command {
        let source = source_for(cfg, cli.xlsx.as_deref());
        info(format!("Reading timetable from {}", source.describe()));

        let feed = fetch_feed(source.as_ref(), cfg)?;
        if feed.is_empty() {
            warning("No events found: the calendar will be empty.");
        }

        write_output(output, &feed.ics, &format!("Calendar ({} events)", feed.len()), *force)?;
    }
    Ok(())
}
