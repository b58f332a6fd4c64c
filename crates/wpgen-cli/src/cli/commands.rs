use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::*;
use crate::cli::validation::parse_stage;

/// Available wpgen subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Assemble the webpack configuration
    ///
    /// Prints the configuration as JSON on stdout, or writes it to a file
    /// with --write.
    Config(ConfigArgs),

    /// List the pages that would be built
    ///
    /// Prints one `name<TAB>path` line per entry, after the stage filter.
    Entries(EntriesArgs),
}

/// Options shared by every command that assembles
#[derive(Args, Debug, Clone, Default)]
pub struct AssembleArgs {
    /// Source directory
    ///
    /// Defaults to the first existing directory among `assets`, `src` and
    /// `static` in the working directory.
    #[arg(value_name = "SRC")]
    pub src: Option<PathBuf>,

    /// Output directory for the build
    #[arg(short = 'o', long = "out", value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Build environment (default: NODE_ENV, then development)
    #[arg(long, value_enum)]
    pub env: Option<EnvArg>,

    /// Public URL prefix for emitted assets
    #[arg(long, value_name = "URL")]
    pub public_path: Option<String>,

    /// Build only these pages (comma separated)
    ///
    /// Examples:
    ///   wpgen config --stage home
    ///   wpgen config --stage home,about
    #[arg(long, value_name = "PAGES", value_parser = parse_stage)]
    pub stage: Option<String>,

    /// Emit source maps outside development
    #[arg(long)]
    pub source_map: bool,

    /// Inject stylesheets at runtime instead of extracting them
    #[arg(long)]
    pub no_extract_css: bool,

    /// Do not emit an asset manifest
    #[arg(long)]
    pub no_manifest: bool,

    /// Do not generate a bundle size report
    #[arg(long)]
    pub no_bundle_analyzer: bool,

    /// Do not generate a service worker
    #[arg(long)]
    pub no_sw_precache: bool,

    /// Do not generate HTML pages
    #[arg(long)]
    pub no_html: bool,

    /// Options file (default: wpgen.toml, then package.json "wpgen" field)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Working directory
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub assemble: AssembleArgs,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,

    /// Write the configuration to FILE instead of stdout
    #[arg(short = 'w', long, value_name = "FILE")]
    pub write: Option<PathBuf>,
}

/// Arguments for the entries command
#[derive(Args, Debug, Clone)]
pub struct EntriesArgs {
    #[command(flatten)]
    pub assemble: AssembleArgs,
}
