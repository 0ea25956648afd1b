use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `config` subcommand.
///
/// The file was already loaded and validated before dispatch, so `--check`
/// only has to report it.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = &cli.command
    {
        if *print_config {
            info(format!("Current configuration ({}):\n", cli.config.display()));
            println!("{}", cfg.to_yaml()?);
        }

        if *check || !*print_config {
            success(format!(
                "Configuration '{}' is valid (year {}, timezone {})",
                cli.config.display(),
                cfg.year,
                cfg.timezone
            ));
        }
    }
    Ok(())
}
