//! Caller-facing build options and their normalized form.

mod assets;
mod helpers;
mod setting;

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

pub use assets::{AssetsDir, AssetsDirSpec};
pub use setting::{Environment, PluginSetting};

use crate::env::EnvContext;
use crate::error::ConfigError;
use helpers::{default_dist_path, default_src_path, default_true};

/// Options accepted by [`crate::assemble`].
///
/// Every field has a default, so an empty document is a valid request.
///
/// # Example
///
/// ```
/// use wpgen_config::{BuildOptions, Environment};
/// use serde_json::json;
///
/// let options = BuildOptions::from_value(json!({
///     "env": "production",
///     "src_path": "app",
///     "assets_dir": "assets",
///     "manifest": false
/// }))
/// .unwrap();
///
/// assert_eq!(options.env, Some(Environment::Production));
/// assert!(!options.manifest.is_enabled());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Explicit environment tag; falls back to `NODE_ENV`, then development
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Environment>,

    /// Project root used for lint config and `node_modules` probes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// Source root
    #[serde(default = "default_src_path")]
    pub src_path: PathBuf,

    /// Output root
    #[serde(default = "default_dist_path")]
    pub dist_path: PathBuf,

    /// Pages directory (default: `<src_path>/pages`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages_path: Option<PathBuf>,

    /// Public URL prefix (default: `/`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,

    /// Asset sub-directory prefixes
    #[serde(default)]
    pub assets_dir: AssetsDirSpec,

    /// Emit source maps outside development
    #[serde(default)]
    pub source_map: bool,

    /// Content-hashed filenames (default: on outside development)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<bool>,

    /// Extract stylesheets into separate files
    #[serde(default = "default_true")]
    pub extract_css: bool,

    /// HTML page generation, one page per entry
    #[serde(default)]
    pub html: PluginSetting,

    /// Asset manifest emission
    #[serde(default)]
    pub manifest: PluginSetting,

    /// Service-worker precache generation (production only)
    #[serde(default)]
    pub sw_precache: PluginSetting,

    /// Bundle size report (production only)
    #[serde(default)]
    pub bundle_analyzer: PluginSetting,

    /// Persistent module cache between builds
    #[serde(default)]
    pub hard_source: PluginSetting,

    /// Restrict the build to these page names
    #[serde(
        default,
        deserialize_with = "helpers::deserialize_stage",
        skip_serializing_if = "Option::is_none"
    )]
    pub stage: Option<Vec<String>>,

    /// Fragment deep-merged onto the assembled configuration
    #[serde(rename = "override", default, skip_serializing_if = "Option::is_none")]
    pub override_config: Option<Value>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            env: None,
            root: None,
            src_path: default_src_path(),
            dist_path: default_dist_path(),
            pages_path: None,
            public_path: None,
            assets_dir: AssetsDirSpec::default(),
            source_map: false,
            digest: None,
            extract_css: true,
            html: PluginSetting::default(),
            manifest: PluginSetting::default(),
            sw_precache: PluginSetting::default(),
            bundle_analyzer: PluginSetting::default(),
            hard_source: PluginSetting::default(),
            stage: None,
            override_config: None,
        }
    }
}

impl BuildOptions {
    /// Create from serde_json::Value (for programmatic use)
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        serde_json::from_value(value).map_err(|e| ConfigError::invalid_value("options", e))
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> Result<Value, ConfigError> {
        serde_json::to_value(self).map_err(|e| ConfigError::invalid_value("options", e))
    }

    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_src_path(mut self, src: impl Into<PathBuf>) -> Self {
        self.src_path = src.into();
        self
    }

    pub fn with_stage<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stage = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_override(mut self, fragment: Value) -> Self {
        self.override_config = Some(fragment);
        self
    }

    /// Normalize against an environment context.
    ///
    /// Nothing here touches the file system.
    pub fn resolve(&self, ctx: &EnvContext) -> ResolvedOptions {
        let env = self.env.unwrap_or_else(|| ambient_env(ctx));

        let root = match &self.root {
            Some(root) => absolutize(root, &ctx.cwd),
            None => ctx.cwd.clean(),
        };
        let src_path = absolutize(&self.src_path, &root);
        let dist_path = absolutize(&self.dist_path, &root);
        let pages_path = match &self.pages_path {
            Some(pages) => absolutize(pages, &root),
            None => src_path.join("pages"),
        };

        ResolvedOptions {
            env,
            root,
            src_path,
            dist_path,
            pages_path,
            public_path: self
                .public_path
                .clone()
                .unwrap_or_else(|| "/".to_string()),
            assets_dir: self.assets_dir.normalize(),
            digest: self.digest.unwrap_or(!env.is_development()),
            source_map: self.source_map,
            extract_css: self.extract_css,
            html: self.html.clone(),
            manifest: self.manifest.clone(),
            sw_precache: self.sw_precache.clone(),
            bundle_analyzer: self.bundle_analyzer.clone(),
            hard_source: self.hard_source.clone(),
        }
    }
}

/// Options after defaults and path resolution.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub env: Environment,
    pub root: PathBuf,
    pub src_path: PathBuf,
    pub dist_path: PathBuf,
    pub pages_path: PathBuf,
    pub public_path: String,
    pub assets_dir: AssetsDir,
    pub digest: bool,
    pub source_map: bool,
    pub extract_css: bool,
    pub html: PluginSetting,
    pub manifest: PluginSetting,
    pub sw_precache: PluginSetting,
    pub bundle_analyzer: PluginSetting,
    pub hard_source: PluginSetting,
}

fn ambient_env(ctx: &EnvContext) -> Environment {
    let Some(raw) = ctx.node_env.as_deref() else {
        return Environment::default();
    };
    match raw.parse() {
        Ok(env) => env,
        Err(_) => {
            warn!(node_env = raw, "unrecognized NODE_ENV, assuming development");
            Environment::default()
        }
    }
}

fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.clean()
    } else {
        base.join(path).clean()
    }
}
