use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::feed::{Feed, fetch_feed};
use crate::errors::AppResult;
use crate::source::source_for;
use crate::utils::colors::{RESET, color_for_event};
use crate::utils::table::{Column, Table};
use crate::utils::to_a1;

/// Handle the `events` subcommand
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Events { table } = &cli.command {
        let source = source_for(cfg, cli.xlsx.as_deref());
        let feed = fetch_feed(source.as_ref(), cfg)?;

        if *table {
            print_table(&feed);
        } else {
            let view = feed.to_json_view(&cfg.highlight_color);
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }
    Ok(())
}

fn print_table(feed: &Feed) {
    if feed.is_empty() {
        println!("No events.");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("Date", 10),
        Column::new("Time", 11),
        Column::new("Cell", 4),
        Column::new("Summary", 7),
        Column::new("Description", 11),
    ]);
    for e in &feed.events {
        table.add_row(vec![
            e.date_str(),
            e.time_str(),
            to_a1(e.row, e.col),
            e.summary.clone(),
            e.description.replace('\n', " / "),
        ]);
    }
    table.fit();

    let rendered = table.render();
    let mut lines = rendered.lines();
    if let Some(header) = lines.next() {
        println!("{header}");
    }
    for (line, e) in lines.zip(&feed.events) {
        println!("{}{line}{RESET}", color_for_event(e.special));
    }
    println!("\n{} events", feed.len());
}
