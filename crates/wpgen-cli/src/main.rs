//! wpgen CLI - webpack configuration for multi-page sites.
//!
//! Parses arguments, initializes logging, and dispatches to a command.

use clap::Parser;
use miette::Result;
use wpgen_cli::{cli, commands, error, logger, ui};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    ui::init_colors(args.no_color);
    ui::set_quiet(args.quiet);
    logger::init_logger(args.verbose, args.quiet, !ui::colors_enabled());

    let result = match args.command {
        cli::Command::Config(config_args) => commands::config_execute(config_args),
        cli::Command::Entries(entries_args) => commands::entries_execute(entries_args),
    };

    // Convert CLI errors to miette diagnostics for reporting
    result.map_err(error::cli_error_to_miette)
}
