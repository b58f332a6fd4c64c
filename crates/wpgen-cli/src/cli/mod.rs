//! Command-line interface definition for wpgen.
//!
//! # Command Structure
//!
//! - `wpgen config [SRC]` - Assemble and print (or write) the configuration
//! - `wpgen entries [SRC]` - List the pages that would be built

mod commands;
pub mod enums;
mod validation;

use clap::Parser;

pub use commands::{AssembleArgs, Command, ConfigArgs, EntriesArgs};
pub use enums::*;
pub use validation::parse_stage;

/// wpgen - webpack configuration for multi-page sites
#[derive(Parser, Debug)]
#[command(
    name = "wpgen",
    version,
    about = "Assemble webpack configuration for multi-page sites",
    long_about = "wpgen turns a pages directory and a handful of options into a complete\n\
                  webpack configuration: one entry per page, loader rules, plugins and an\n\
                  environment-dependent optimization policy."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows every probe the assembler makes: skipped pages, missing
    /// templates, absent pre-processors.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
