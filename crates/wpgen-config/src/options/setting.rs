use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConfigError;

/// Build environment tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn is_development(self) -> bool {
        self == Environment::Development
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            other => Err(ConfigError::invalid_value(
                "env",
                format!("expected 'development' or 'production', got '{other}'"),
            )),
        }
    }
}

/// Toggle for an optional plugin.
///
/// `false` disables the plugin, `true` enables it with its defaults, and an
/// object enables it with the given options layered over the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PluginSetting {
    Enabled(bool),
    Options(Map<String, Value>),
}

impl Default for PluginSetting {
    fn default() -> Self {
        PluginSetting::Enabled(true)
    }
}

impl PluginSetting {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, PluginSetting::Enabled(false))
    }

    /// Caller supplied options, if any.
    pub fn options(&self) -> Option<&Map<String, Value>> {
        match self {
            PluginSetting::Options(map) => Some(map),
            PluginSetting::Enabled(_) => None,
        }
    }

    /// Looks up a string option, e.g. the manifest `fileName`.
    pub fn string_option(&self, key: &str) -> Option<&str> {
        self.options()?.get(key)?.as_str()
    }
}

impl From<bool> for PluginSetting {
    fn from(enabled: bool) -> Self {
        PluginSetting::Enabled(enabled)
    }
}
