//! The assembled build configuration and the assembler itself.

use std::fs;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::entry::{apply_stage, discover_entries, EntryMap};
use crate::env::EnvContext;
use crate::error::{ConfigError, Result};
use crate::merge::merge_values;
use crate::optimization::{build_optimization, Optimization};
use crate::options::{BuildOptions, Environment, ResolvedOptions};
use crate::plugins::{build_plugins, Plugin};
use crate::probe;
use crate::rules::{build_rules, Rule};

/// Alias that always points at the source root.
pub const SRC_ALIAS: &str = "@";

/// Configuration handed to the bundler.
///
/// Keys the assembler does not produce but an override introduces are kept in
/// `extra` and serialized alongside the known ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub mode: Mode,
    pub entry: EntryMap,
    pub devtool: Devtool,
    pub output: Output,
    pub module: ModuleConfig,
    pub plugins: Vec<Plugin>,
    pub optimization: Optimization,
    pub resolve: Resolve,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Bundler mode. Assembly always yields the build environment; `none` only
/// arrives through an override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
    None,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
            Mode::None => "none",
        }
    }
}

impl From<Environment> for Mode {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => Mode::Development,
            Environment::Production => Mode::Production,
        }
    }
}

impl PartialEq<Environment> for Mode {
    fn eq(&self, env: &Environment) -> bool {
        *self == Mode::from(*env)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source map mode, or `false` when disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Devtool {
    Mode(String),
    Flag(bool),
}

impl Devtool {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Devtool::Flag(false))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    pub path: PathBuf,
    pub filename: String,
    pub chunk_filename: String,
    pub public_path: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleConfig {
    pub rules: Vec<Rule>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolve {
    pub alias: IndexMap<String, PathBuf>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Assemble a configuration from `options`.
///
/// Reads the file system (entries, templates, conventional files) but writes
/// nothing. A fatal error is returned before any configuration is produced.
///
/// # Example
///
/// ```no_run
/// use wpgen_config::{assemble, BuildOptions, EnvContext, Environment};
///
/// let ctx = EnvContext::from_process().unwrap();
/// let options = BuildOptions::default().with_env(Environment::Production);
/// let config = assemble(options, &ctx).unwrap();
/// println!("{}", config.to_json_pretty().unwrap());
/// ```
pub fn assemble(options: BuildOptions, ctx: &EnvContext) -> Result<Configuration> {
    let resolved = options.resolve(ctx);
    debug!(
        env = %resolved.env,
        src = %resolved.src_path.display(),
        pages = %resolved.pages_path.display(),
        digest = resolved.digest,
        "resolved build options"
    );

    let entries = discover_entries(&resolved.pages_path)?;
    let entries = apply_stage(entries, options.stage.as_deref())?;

    let mut config = Configuration {
        mode: resolved.env.into(),
        devtool: devtool(&resolved),
        output: output(&resolved),
        module: ModuleConfig {
            rules: build_rules(&resolved),
            extra: Map::new(),
        },
        plugins: build_plugins(&resolved, &entries, ctx),
        optimization: build_optimization(&resolved),
        resolve: Resolve {
            alias: aliases(&resolved),
            extra: Map::new(),
        },
        entry: entries,
        extra: Map::new(),
    };

    if let Some(fragment) = &options.override_config {
        config = config.apply_override(fragment)?;
    }

    info!(
        mode = %config.mode,
        entries = config.entry.len(),
        rules = config.module.rules.len(),
        plugins = config.plugins.len(),
        "assembled configuration"
    );
    Ok(config)
}

impl Configuration {
    /// Deep-merge `fragment` onto this configuration.
    ///
    /// Arrays such as `plugins` and `module.rules` are concatenated, so every
    /// computed item survives.
    pub fn apply_override(self, fragment: &Value) -> Result<Self> {
        let mut base = self.to_value()?;
        merge_values(&mut base, fragment);
        serde_json::from_value(base).map_err(|err| ConfigError::InvalidOverride {
            message: err.to_string(),
        })
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::invalid_value("configuration", e))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::invalid_value("configuration", e))
    }

    /// Plugins provided by `package`, in order.
    pub fn plugins_from<'a>(&'a self, package: &'a str) -> impl Iterator<Item = &'a Plugin> {
        self.plugins.iter().filter(move |p| p.package == package)
    }
}

fn devtool(opts: &ResolvedOptions) -> Devtool {
    if opts.env.is_development() {
        Devtool::Mode("cheap-module-source-map".to_string())
    } else if opts.source_map {
        Devtool::Mode("source-map".to_string())
    } else {
        Devtool::Flag(false)
    }
}

fn output(opts: &ResolvedOptions) -> Output {
    let js = &opts.assets_dir.js;
    let filename = if opts.digest {
        format!("{js}[name].[chunkhash:8].js")
    } else {
        format!("{js}[name].js")
    };

    Output {
        path: opts.dist_path.clone(),
        filename,
        chunk_filename: format!("{js}[name]-[chunkhash:8].chunk.js"),
        public_path: opts.public_path.clone(),
        extra: Map::new(),
    }
}

/// `@` plus one alias per top-level source directory.
///
/// The pages and public directories are skipped, as is any directory whose
/// name would shadow an installed package.
fn aliases(opts: &ResolvedOptions) -> IndexMap<String, PathBuf> {
    let mut alias = IndexMap::new();
    alias.insert(SRC_ALIAS.to_string(), opts.src_path.clone());

    let children = match fs::read_dir(&opts.src_path) {
        Ok(children) => children,
        Err(err) => {
            debug!(src = %opts.src_path.display(), error = %err, "source root not listable");
            return alias;
        }
    };

    let public_dir = opts.src_path.join("public");
    let mut dirs: Vec<(String, PathBuf)> = children
        .filter_map(|child| child.ok())
        .map(|child| child.path())
        .filter(|path| probe::is_dir(path) && *path != opts.pages_path && *path != public_dir)
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?.to_string();
            (!probe::package_exists(&opts.root, &name)).then_some((name, path))
        })
        .collect();
    dirs.sort();

    alias.extend(dirs);
    alias
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::Path;

    fn assemble_in(root: &Path, options: BuildOptions) -> Configuration {
        assemble(options.with_root(root), &EnvContext::new(root)).unwrap()
    }

    #[test]
    fn development_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = assemble_in(dir.path(), BuildOptions::default());

        assert_eq!(config.mode, Environment::Development);
        assert!(config.entry.is_empty());
        assert_eq!(
            config.devtool,
            Devtool::Mode("cheap-module-source-map".to_string())
        );
        assert_eq!(config.output.filename, "static/js/[name].js");
        assert_eq!(
            config.output.chunk_filename,
            "static/js/[name]-[chunkhash:8].chunk.js"
        );
        assert_eq!(config.output.public_path, "/");
        assert_eq!(config.resolve.alias[SRC_ALIAS], dir.path().join("src"));
    }

    #[test]
    fn production_digests_and_disables_devtool() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = assemble_in(
            dir.path(),
            BuildOptions::default().with_env(Environment::Production),
        );
        assert_eq!(config.output.filename, "static/js/[name].[chunkhash:8].js");
        assert!(!config.devtool.is_enabled());

        let value = config.to_value().unwrap();
        assert_eq!(value["devtool"], json!(false));
        assert_eq!(value["mode"], json!("production"));
    }

    #[test]
    fn production_source_map_flag() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut options = BuildOptions::default().with_env(Environment::Production);
        options.source_map = true;
        let config = assemble_in(dir.path(), options);
        assert_eq!(config.devtool, Devtool::Mode("source-map".to_string()));
    }

    #[test]
    fn aliases_skip_pages_public_and_packages() {
        let dir = tempfile::TempDir::new().unwrap();
        let src = dir.path().join("src");
        for sub in ["pages", "public", "components", "react", "utils"] {
            fs::create_dir_all(src.join(sub)).unwrap();
        }
        fs::create_dir_all(dir.path().join("node_modules/react")).unwrap();

        let config = assemble_in(dir.path(), BuildOptions::default());
        let keys: Vec<&str> = config.resolve.alias.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["@", "components", "utils"]);
    }

    #[test]
    fn override_keeps_unknown_keys() {
        let dir = tempfile::TempDir::new().unwrap();
        let options = BuildOptions::default().with_override(json!({
            "devServer": { "port": 3000 },
            "resolve": { "extensions": [".js", ".jsx"] }
        }));
        let config = assemble_in(dir.path(), options);

        assert_eq!(config.extra["devServer"]["port"], json!(3000));
        assert_eq!(config.resolve.extra["extensions"], json!([".js", ".jsx"]));
        assert!(config.resolve.alias.contains_key(SRC_ALIAS));
    }

    #[test]
    fn malformed_override_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let options = BuildOptions::default().with_override(json!({ "plugins": [{ "x": 1 }] }));
        let err = assemble(options.with_root(dir.path()), &EnvContext::new(dir.path()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOverride { .. }));
    }
}
