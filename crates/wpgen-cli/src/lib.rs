//! wpgen CLI - webpack configuration for multi-page sites.
//!
//! This crate is the command-line front end of `wpgen-config`. It layers
//! options from defaults, an options file, `WPGEN_*` environment variables and
//! flags, then prints the assembled configuration or the discovered entries.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions (clap derive)
//! - [`config`] - Option layering with figment
//! - [`commands`] - `config` and `entries` command implementations
//! - [`error`] - Error types with actionable messages
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Colored status messages
//!
//! # Example
//!
//! ```rust,no_run
//! use wpgen_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
