use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for schedics
/// Turns a spreadsheet timetable into an iCalendar feed
#[derive(Parser)]
#[command(
    name = "schedics",
    version = env!("CARGO_PKG_VERSION"),
    about = "Convert a spreadsheet timetable into an iCalendar feed and serve it over HTTP",
    long_about = None
)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(
        global = true,
        long = "config",
        env = "SCHEDICS_CONFIG",
        default_value = "config.yml",
        value_name = "FILE"
    )]
    pub config: PathBuf,

    /// Read the workbook from a local xlsx file instead of the public link
    #[arg(global = true, long = "xlsx", value_name = "FILE")]
    pub xlsx: Option<PathBuf>,

    /// Verbose logging (debug level) on stderr
    #[arg(global = true, long = "verbose", short = 'v')]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the .ics file
    Build {
        /// Output file path
        #[arg(long, short = 'o', value_name = "FILE")]
        output: PathBuf,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the .ics feed to stdout
    Print,

    /// Print the extracted events as JSON, or as a table with --table
    Events {
        #[arg(long = "table", help = "Human-readable table instead of JSON")]
        table: bool,
    },

    /// Show how the extractor sees one cell (A1 notation, e.g. B5)
    Inspect {
        /// Cell reference, e.g. "B5"
        cell: String,
    },

    /// Serve the feed over HTTP
    Serve {
        /// Address to bind (overrides server.bind from the configuration)
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Show or validate the configuration file
    Config {
        #[arg(long = "print", help = "Print the effective configuration (defaults included)")]
        print_config: bool,

        #[arg(long = "check", help = "Validate the configuration file and exit")]
        check: bool,
    },
}
