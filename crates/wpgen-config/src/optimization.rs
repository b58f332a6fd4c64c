//! Environment-dependent minimizer and chunk splitting policy.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::options::ResolvedOptions;
use crate::plugins::{Plugin, VENDOR_CHUNK};

pub const SCRIPT_MINIMIZER: &str = "terser-webpack-plugin";
pub const STYLE_MINIMIZER: &str = "optimize-css-assets-webpack-plugin";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Optimization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_chunks: Option<SplitChunks>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimize: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub minimizer: Vec<Plugin>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Shared-vendor chunk split thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitChunks {
    pub chunks: String,
    pub name: String,
    pub min_size: u64,
    pub max_size: u64,
    pub min_chunks: u32,
    pub max_async_requests: u32,
    pub max_initial_requests: u32,
}

impl Default for SplitChunks {
    fn default() -> Self {
        Self {
            chunks: "async".to_string(),
            name: VENDOR_CHUNK.to_string(),
            min_size: 30_000,
            max_size: 0,
            min_chunks: 1,
            max_async_requests: 5,
            max_initial_requests: 3,
        }
    }
}

impl Optimization {
    pub fn is_minimizing(&self) -> bool {
        self.minimize == Some(true) && !self.minimizer.is_empty()
    }
}

/// Development builds get an empty policy; production builds split vendor
/// code and minimize scripts and stylesheets.
pub fn build_optimization(opts: &ResolvedOptions) -> Optimization {
    if opts.env.is_development() {
        return Optimization::default();
    }

    Optimization {
        split_chunks: Some(SplitChunks::default()),
        minimize: Some(true),
        minimizer: vec![
            Plugin::new(
                SCRIPT_MINIMIZER,
                json!({
                    "cache": true,
                    "parallel": true,
                    "sourceMap": opts.source_map
                }),
            ),
            Plugin::new(
                STYLE_MINIMIZER,
                json!({
                    "cssProcessorOptions": {
                        "parser": "postcss-safe-parser",
                        "discardComments": { "removeAll": true }
                    }
                }),
            ),
        ],
        extra: Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::EnvContext;
    use crate::options::{BuildOptions, Environment};

    fn policy(env: Environment) -> Optimization {
        let opts = BuildOptions::default()
            .with_env(env)
            .resolve(&EnvContext::new("/site"));
        build_optimization(&opts)
    }

    #[test]
    fn development_is_empty() {
        let dev = policy(Environment::Development);
        assert_eq!(dev, Optimization::default());
        assert_eq!(serde_json::to_value(&dev).unwrap(), json!({}));
    }

    #[test]
    fn production_splits_and_minimizes() {
        let prod = policy(Environment::Production);
        assert!(prod.is_minimizing());

        let value = serde_json::to_value(&prod).unwrap();
        assert_eq!(value["splitChunks"]["minSize"], json!(30_000));
        assert_eq!(value["splitChunks"]["maxAsyncRequests"], json!(5));
        assert_eq!(value["splitChunks"]["maxInitialRequests"], json!(3));
        assert_eq!(value["minimizer"][0]["package"], json!(SCRIPT_MINIMIZER));
        assert_eq!(
            value["minimizer"][1]["options"]["cssProcessorOptions"]["parser"],
            json!("postcss-safe-parser")
        );
    }
}
