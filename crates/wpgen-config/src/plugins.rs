//! Output-stage plugins.
//!
//! Each plugin is a [`Plugin`] descriptor naming the package that provides it
//! and the options its constructor receives. Toggle-able plugins take their
//! defaults from here and layer caller options on top.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::entry::EntryMap;
use crate::env::EnvContext;
use crate::options::{PluginSetting, ResolvedOptions};
use crate::probe;

pub const HTML_PLUGIN: &str = "html-webpack-plugin";
pub const CSS_EXTRACT_PLUGIN: &str = "mini-css-extract-plugin";
pub const COPY_PLUGIN: &str = "copy-webpack-plugin";
pub const MANIFEST_PLUGIN: &str = "webpack-manifest-plugin";
pub const HARD_SOURCE_PLUGIN: &str = "hard-source-webpack-plugin";
pub const SW_PRECACHE_PLUGIN: &str = "sw-precache-webpack-plugin";
pub const BUNDLE_ANALYZER_PLUGIN: &str = "webpack-bundle-analyzer";
pub const WEBPACK: &str = "webpack";

/// Chunk holding shared vendor code; see [`crate::optimization`].
pub const VENDOR_CHUNK: &str = "vendors";

pub const DEFAULT_MANIFEST_FILE: &str = "asset-manifest.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
    /// Package providing the plugin
    pub package: String,

    /// Named export of the package, when the plugin is not its default export
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<String>,

    /// Constructor options
    #[serde(default)]
    pub options: Value,

    /// Keys added by an override
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Plugin {
    pub fn new(package: impl Into<String>, options: Value) -> Self {
        Self {
            package: package.into(),
            export: None,
            options,
            extra: Map::new(),
        }
    }

    pub fn named(package: impl Into<String>, export: impl Into<String>, options: Value) -> Self {
        Self {
            package: package.into(),
            export: Some(export.into()),
            options,
            extra: Map::new(),
        }
    }

    /// Whether this descriptor is `package` (and `export`, when given).
    pub fn is(&self, package: &str, export: Option<&str>) -> bool {
        self.package == package && (export.is_none() || self.export.as_deref() == export)
    }
}

/// Build the plugin list in output order.
pub fn build_plugins(opts: &ResolvedOptions, entries: &EntryMap, ctx: &EnvContext) -> Vec<Plugin> {
    let mut list = Vec::new();

    if opts.html.is_enabled() {
        list.extend(html_plugins(opts, entries));
    }

    if opts.extract_css {
        list.push(css_extract_plugin(opts));
    }

    let public_dir = opts.src_path.join("public");
    if probe::is_dir(&public_dir) {
        list.push(Plugin::new(
            COPY_PLUGIN,
            json!({ "patterns": [{ "from": public_dir.display().to_string() }] }),
        ));
    }

    if opts.manifest.is_enabled() {
        list.push(Plugin::new(
            MANIFEST_PLUGIN,
            layered(
                json!({
                    "fileName": DEFAULT_MANIFEST_FILE,
                    "publicPath": opts.public_path
                }),
                &opts.manifest,
            ),
        ));
    }

    list.push(define_plugin(opts, ctx));

    if opts.hard_source.is_enabled() {
        list.push(Plugin::new(
            HARD_SOURCE_PLUGIN,
            layered(json!({}), &opts.hard_source),
        ));
    }

    if opts.env.is_production() {
        list.extend(production_plugins(opts));
    }

    list
}

fn html_plugins(opts: &ResolvedOptions, entries: &EntryMap) -> Vec<Plugin> {
    entries
        .keys()
        .filter_map(|name| {
            let entry_dir = opts.pages_path.join(name);
            match deduce_template(&entry_dir, &opts.src_path) {
                Some(template) => Some(html_plugin(opts, name, &template)),
                None => {
                    debug!(name = %name, "no html template, page skipped");
                    None
                }
            }
        })
        .collect()
}

/// First existing of `<entry>/index.html` and `<src>/template.html`.
pub fn deduce_template(entry_dir: &Path, src_path: &Path) -> Option<PathBuf> {
    [entry_dir.join("index.html"), src_path.join("template.html")]
        .into_iter()
        .find(|path| probe::is_file(path))
}

fn html_plugin(opts: &ResolvedOptions, name: &str, template: &Path) -> Plugin {
    let minify = if opts.env.is_development() {
        Value::Null
    } else {
        json!({
            "removeComments": true,
            "collapseWhitespace": true,
            "removeRedundantAttributes": true,
            "useShortDoctype": true,
            "removeEmptyAttributes": true,
            "removeStyleLinkTypeAttributes": true,
            "keepClosingSlash": true,
            "minifyJS": true,
            "minifyCSS": true,
            "minifyURLs": true
        })
    };

    Plugin::new(
        HTML_PLUGIN,
        layered(
            json!({
                "filename": format!("{name}.html"),
                "chunks": [VENDOR_CHUNK, name],
                "inject": true,
                "template": template.display().to_string(),
                "minify": minify
            }),
            &opts.html,
        ),
    )
}

fn css_extract_plugin(opts: &ResolvedOptions) -> Plugin {
    let css = &opts.assets_dir.css;
    let filename = if opts.digest {
        format!("{css}[name].[contenthash:8].css")
    } else {
        format!("{css}[name].css")
    };

    Plugin::new(
        CSS_EXTRACT_PLUGIN,
        json!({
            "filename": filename,
            "chunkFilename": format!("{css}[name].[contenthash:8].chunk.css")
        }),
    )
}

fn define_plugin(opts: &ResolvedOptions, ctx: &EnvContext) -> Plugin {
    let client_env: Map<String, Value> = ctx
        .client_env(opts.env)
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();

    Plugin::named(
        WEBPACK,
        "DefinePlugin",
        json!({ "process.env": Value::Object(client_env).to_string() }),
    )
}

fn production_plugins(opts: &ResolvedOptions) -> Vec<Plugin> {
    let mut plugins = vec![Plugin::named(
        WEBPACK,
        "IgnorePlugin",
        json!({
            "resourceRegExp": r"/^\.\/locale$/",
            "contextRegExp": "/moment$/"
        }),
    )];

    if opts.sw_precache.is_enabled() {
        plugins.push(Plugin::new(
            SW_PRECACHE_PLUGIN,
            layered(
                json!({
                    "dontCacheBustUrlsMatching": r"/\.\w{8}\./",
                    "filename": "service-worker.js",
                    "minify": true,
                    "staticFileGlobsIgnorePatterns": [r"/\.map$/", r"/asset-manifest\.json$/"]
                }),
                &opts.sw_precache,
            ),
        ));
    }

    if opts.bundle_analyzer.is_enabled() {
        plugins.push(Plugin::named(
            BUNDLE_ANALYZER_PLUGIN,
            "BundleAnalyzerPlugin",
            layered(json!({ "analyzerMode": "static" }), &opts.bundle_analyzer),
        ));
    }

    plugins
}

/// Shallow-merge caller options over plugin defaults.
fn layered(mut defaults: Value, setting: &PluginSetting) -> Value {
    if let (Value::Object(base), Some(extra)) = (&mut defaults, setting.options()) {
        for (key, value) in extra {
            base.insert(key.clone(), value.clone());
        }
    }
    defaults
}
