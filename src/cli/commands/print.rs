use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::feed::fetch_feed;
use crate::errors::AppResult;
use crate::source::source_for;
use std::io::{self, Write};

/// Handle the `print` subcommand: the raw feed, nothing else, on stdout
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let source = source_for(cfg, cli.xlsx.as_deref());
    let feed = fetch_feed(source.as_ref(), cfg)?;

    let mut out = io::stdout().lock();
    out.write_all(feed.ics.as_bytes())?;
    out.flush()?;
    Ok(())
}
