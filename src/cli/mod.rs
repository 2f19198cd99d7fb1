pub mod commands;
pub mod logging;
pub mod types;

use clap::Parser;
use std::process::ExitCode;

/// Run the command-line interface
pub fn run() -> ExitCode {
    let cli = types::Cli::parse();

    // Initialize logging system
    logging::init_logging(cli.debug, cli.quiet);

    let succeeded = match &cli.command {
        types::Commands::Build { site, destination, data } => {
            commands::handle_build_command(site, destination.as_ref(), data.as_deref())
        }
        types::Commands::Page { key, site, data } => commands::handle_page_command(key, site, data.as_deref()),
        types::Commands::Clean { site, destination } => commands::handle_clean_command(site, destination.as_ref()),
    };

    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
