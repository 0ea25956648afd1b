use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::feed::fetch_sheet;
use crate::core::inspect::inspect_cell;
use crate::errors::AppResult;
use crate::source::source_for;
use crate::ui::messages::header;
use crate::utils::parse_a1;
use crate::utils::table::{Column, Table};

/// Handle the `inspect` subcommand
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Inspect { cell } = &cli.command {
        let (row, col) = parse_a1(cell)?;
        let source = source_for(cfg, cli.xlsx.as_deref());
        let sheet = fetch_sheet(source.as_ref(), cfg)?;

        let report = inspect_cell(&sheet, cfg, row, col)?;

        header(format!("Cell {} on sheet '{}'", report.reference, sheet.name()));
        let mut table = Table::new(vec![Column::new("Field", 0), Column::new("Value", 0)]);
        for (label, value) in report.lines() {
            table.add_row(vec![label.to_string(), value.replace('\n', " / ")]);
        }
        table.fit();
        print!("{}", table.render());
    }
    Ok(())
}
