//! Option loading for the CLI with multi-source layering.
//!
//! Priority: CLI flags > `WPGEN_*` environment variables > options file >
//! defaults.

mod loading;

pub use loading::{cli_layer, load_options, ENV_PREFIX};
