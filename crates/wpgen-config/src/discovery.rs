//! File-based option discovery for CLI use
//!
//! Finds build options in `wpgen.toml` or in the `wpgen` field of
//! `package.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::options::BuildOptions;

pub const OPTIONS_FILE: &str = "wpgen.toml";
pub const PACKAGE_JSON_FIELD: &str = "wpgen";

/// File-based option discovery
///
/// # Example
///
/// ```no_run
/// use wpgen_config::OptionsDiscovery;
///
/// let discovery = OptionsDiscovery::new(".");
/// let options = discovery.load().unwrap();
/// ```
pub struct OptionsDiscovery {
    root: PathBuf,
}

impl OptionsDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find an options file in the root directory
    ///
    /// Searches in this order:
    /// 1. `wpgen.toml`
    /// 2. `package.json` with a non-null `wpgen` field
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(OPTIONS_FILE);
        if toml_path.is_file() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed: Value = serde_json::from_str(&content).ok()?;
        parsed
            .get(PACKAGE_JSON_FIELD)
            .filter(|field| !field.is_null())
            .map(|_| pkg_path)
    }

    /// Load the raw option document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no options file is found.
    pub fn load_value(&self) -> Result<Value> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        load_value_from(&path)
    }

    pub fn load(&self) -> Result<BuildOptions> {
        BuildOptions::from_value(self.load_value()?)
    }
}

/// Load an option document from a specific file.
///
/// `package.json` is read through its `wpgen` field; anything else is TOML.
pub fn load_value_from(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
        let parsed: Value = serde_json::from_str(&content)
            .map_err(|e| ConfigError::invalid_value("package.json", format!("Invalid JSON: {e}")))?;
        return match parsed.get(PACKAGE_JSON_FIELD) {
            Some(value) if !value.is_null() => Ok(value.clone()),
            _ => Err(ConfigError::invalid_value(
                PACKAGE_JSON_FIELD,
                "Add a 'wpgen' field to your package.json",
            )),
        };
    }

    let toml_val: toml::Value = toml::from_str(&content)
        .map_err(|e| ConfigError::invalid_value("toml", format!("Invalid TOML syntax: {e}")))?;
    serde_json::to_value(toml_val).map_err(|e| {
        ConfigError::invalid_value("toml", format!("TOML to JSON conversion failed: {e}"))
    })
}
