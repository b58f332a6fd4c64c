//! Explicit view of the ambient process environment.
//!
//! The assembler never reads `std::env` itself; callers capture an
//! [`EnvContext`] once and pass it in.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::PathBuf;

use tracing::debug;

use crate::options::Environment;

/// Variables with this prefix are forwarded to client code.
pub const CLIENT_ENV_PREFIX: &str = "REACT_APP_";

/// Variable naming the runtime mode.
pub const NODE_ENV: &str = "NODE_ENV";

#[derive(Debug, Clone, Default)]
pub struct EnvContext {
    /// Value of `NODE_ENV`, if set
    pub node_env: Option<String>,

    /// All captured variables
    pub vars: BTreeMap<String, String>,

    /// Working directory that relative paths resolve against
    pub cwd: PathBuf,
}

impl EnvContext {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            node_env: None,
            vars: BTreeMap::new(),
            cwd: cwd.into(),
        }
    }

    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> std::io::Result<Self> {
        let vars = collect_vars(std::env::vars_os());
        Ok(Self {
            node_env: vars.get(NODE_ENV).cloned(),
            vars,
            cwd: std::env::current_dir()?,
        })
    }

    pub fn with_node_env(mut self, node_env: Option<&str>) -> Self {
        self.node_env = node_env.map(str::to_string);
        self
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Variables baked into the bundle as `process.env`.
    ///
    /// `NODE_ENV` always reflects the resolved environment, not the ambient one.
    pub fn client_env(&self, env: Environment) -> BTreeMap<String, String> {
        let mut map: BTreeMap<String, String> = self
            .vars
            .iter()
            .filter(|(key, _)| key.starts_with(CLIENT_ENV_PREFIX))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        map.insert(NODE_ENV.to_string(), env.as_str().to_string());
        map
    }
}

fn collect_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> BTreeMap<String, String> {
    vars.into_iter()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some((key, value)),
            (Ok(key), Err(_)) => {
                debug!("Skipping environment variable {key}: value is not UTF-8");
                None
            }
            (Err(key), _) => {
                debug!("Skipping environment variable {}: name is not UTF-8", key.to_string_lossy());
                None
            }
        })
        .collect()
}
