//! Command implementations for the wpgen CLI.
//!
//! - [`config`] - Assemble and print or write the configuration
//! - [`entries`] - List discovered pages
//!
//! Each command provides an `execute` function that takes the parsed command
//! arguments and returns a Result.

pub mod config;
pub mod entries;
pub(crate) mod utils;

pub use config::execute as config_execute;
pub use entries::execute as entries_execute;
