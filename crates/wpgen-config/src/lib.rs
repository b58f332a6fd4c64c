pub mod config;
pub mod discovery;
pub mod entry;
pub mod env;
pub mod error;
pub mod merge;
pub mod optimization;
pub mod options;
pub mod plugins;
pub mod probe;
pub mod rules;

// Re-export main types
pub use config::*;
pub use env::EnvContext;
pub use error::*;
pub use options::*;

pub use discovery::{load_value_from, OptionsDiscovery};
pub use entry::{apply_stage, discover_entries, EntryMap};
pub use merge::merge_values;
pub use optimization::{Optimization, SplitChunks};
pub use plugins::Plugin;
pub use rules::{Rule, UseEntry};
