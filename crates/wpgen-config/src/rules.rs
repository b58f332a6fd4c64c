//! Transform rules, one group per asset category.
//!
//! Rule order is pipeline order: both script pre-rules and the compiler rule
//! match `.js`/`.jsx` and all of them apply.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::options::ResolvedOptions;
use crate::probe;

/// Browser support string handed to the script compiler.
pub const BROWSER_TARGETS: &str = "> 1%, last 2 versions";

const SCRIPT_PATTERN: &str = r"/\.(js|jsx|ts|tsx)$/";
const NODE_MODULES_PATTERN: &str = r"/[/\\]node_modules[/\\]/";
const EXTRACT_CSS_LOADER: &str = "mini-css-extract-plugin/dist/loader";

/// One transform rule. `test` and the other patterns are JavaScript regex
/// literals, e.g. `/\.css$/`.
///
/// Keys the assembler never sets (`loader`, `include`, `oneOf`, ...) land in
/// `extra` so an override can add them. `use` and `exclude` also accept a
/// single value in place of a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub test: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce: Option<Enforce>,

    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub exclude: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<Issuer>,

    #[serde(
        rename = "use",
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub uses: Vec<UseEntry>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Enforce {
    Pre,
    Post,
}

/// Condition on the module that imports the matched file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issuer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,

    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub not: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A loader applied by a rule. Deserializes from a bare loader name too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "UseEntryRepr")]
pub struct UseEntry {
    pub loader: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum UseEntryRepr {
    Loader(String),
    Full {
        loader: String,
        #[serde(default)]
        options: Option<Value>,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
}

impl From<UseEntryRepr> for UseEntry {
    fn from(repr: UseEntryRepr) -> Self {
        match repr {
            UseEntryRepr::Loader(loader) => UseEntry::new(loader),
            UseEntryRepr::Full {
                loader,
                options,
                extra,
            } => UseEntry {
                loader,
                options,
                extra,
            },
        }
    }
}

/// Accept `value` or `[value, ...]`.
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(items) => items,
        OneOrMany::One(item) => vec![item],
    })
}

impl UseEntry {
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            options: None,
            extra: Map::new(),
        }
    }

    pub fn with_options(loader: impl Into<String>, options: Value) -> Self {
        Self {
            loader: loader.into(),
            options: Some(options),
            extra: Map::new(),
        }
    }
}

impl Rule {
    pub fn new(test: impl Into<String>, uses: Vec<UseEntry>) -> Self {
        Self {
            test: test.into(),
            enforce: None,
            exclude: Vec::new(),
            issuer: None,
            uses,
            extra: Map::new(),
        }
    }

    fn pre(mut self) -> Self {
        self.enforce = Some(Enforce::Pre);
        self
    }

    fn exclude(mut self, pattern: &str) -> Self {
        self.exclude.push(pattern.to_string());
        self
    }

    fn issuer(mut self, issuer: Issuer) -> Self {
        self.issuer = Some(issuer);
        self
    }

    pub fn uses_loader(&self, loader: &str) -> bool {
        self.uses.iter().any(|entry| entry.loader == loader)
    }
}

/// Build the rule list for the resolved options.
pub fn build_rules(opts: &ResolvedOptions) -> Vec<Rule> {
    let mut rules = vec![
        Rule::new(r"/\.css$/", style_loaders(opts, None)),
        Rule::new(r"/\.scss$/", style_loaders(opts, Some("sass-loader"))),
        Rule::new(r"/\.less$/", style_loaders(opts, Some("less-loader"))),
        Rule::new(
            r"/\.(jpe?g|png|gif)$/i",
            vec![UseEntry::with_options(
                "file-loader",
                json!({ "name": format!("{}[name].[hash:8].[ext]", opts.assets_dir.media) }),
            )],
        ),
        Rule::new(r"/\.svg$/", vec![UseEntry::new("@svgr/webpack")]).issuer(Issuer {
            test: Some(SCRIPT_PATTERN.to_string()),
            not: Vec::new(),
            extra: Map::new(),
        }),
        Rule::new(r"/\.svg$/", vec![UseEntry::new("url-loader")]).issuer(Issuer {
            test: None,
            not: vec![SCRIPT_PATTERN.to_string()],
            extra: Map::new(),
        }),
        Rule::new(
            r"/\.(woff|woff2|eot|ttf)$/",
            vec![UseEntry::with_options("url-loader", json!({ "limit": 8192 }))],
        ),
        Rule::new(r"/\.tsx?$/", vec![UseEntry::new("ts-loader")]).exclude("/node_modules/"),
        Rule::new(r"/\.jsx?$/", vec![UseEntry::new("source-map-loader")])
            .pre()
            .exclude(NODE_MODULES_PATTERN),
    ];

    if probe::has_lint_config(&opts.root) {
        let eslint_path = opts.root.join("node_modules").join("eslint");
        rules.push(
            Rule::new(
                r"/\.jsx?$/",
                vec![UseEntry::with_options(
                    "eslint-loader",
                    json!({ "eslintPath": eslint_path.display().to_string() }),
                )],
            )
            .pre()
            .exclude(NODE_MODULES_PATTERN),
        );
    } else {
        debug!(root = %opts.root.display(), "no lint config, lint rule omitted");
    }

    rules.push(Rule::new(r"/\.jsx?$/", vec![babel_loader()]));
    rules
}

/// Loader chain for one stylesheet flavour.
///
/// The pre-processor layer is appended only when its package is installed.
fn style_loaders(opts: &ResolvedOptions, processor: Option<&str>) -> Vec<UseEntry> {
    let local_ident_name = if opts.env.is_development() {
        "[path][name]__[local]--[hash:base64:5]"
    } else {
        "[local]-[hash:base64:5]"
    };

    let mut loaders = vec![
        if opts.extract_css {
            UseEntry::new(EXTRACT_CSS_LOADER)
        } else {
            UseEntry::new("style-loader")
        },
        UseEntry::with_options(
            "css-loader",
            json!({
                "modules": {
                    "mode": "global",
                    "localIdentName": local_ident_name
                }
            }),
        ),
        UseEntry::with_options("postcss-loader", json!({ "plugins": ["autoprefixer"] })),
    ];

    if let Some(processor) = processor {
        if probe::package_exists(&opts.root, processor) {
            loaders.push(UseEntry::with_options(
                processor,
                json!({ "sourceMap": opts.env.is_development() || opts.source_map }),
            ));
        } else {
            debug!(processor, "pre-processor not installed, layer skipped");
        }
    }

    loaders
}

fn babel_loader() -> UseEntry {
    UseEntry::with_options(
        "babel-loader",
        json!({
            "presets": [
                ["@babel/preset-env", { "targets": { "browsers": BROWSER_TARGETS } }],
                "@babel/preset-react"
            ],
            "plugins": [
                "babel-plugin-transform-class-properties",
                "@babel/plugin-syntax-dynamic-import",
                ["@babel/plugin-transform-runtime", {
                    "corejs": false,
                    "helpers": false,
                    "regenerator": true
                }]
            ]
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::EnvContext;
    use crate::options::{BuildOptions, Environment};
    use std::fs;
    use tempfile::TempDir;

    fn resolved(root: &std::path::Path, env: Environment) -> ResolvedOptions {
        BuildOptions::default()
            .with_env(env)
            .resolve(&EnvContext::new(root))
    }

    #[test]
    fn style_chain_uses_extract_loader_by_default() {
        let dir = TempDir::new().unwrap();
        let rules = build_rules(&resolved(dir.path(), Environment::Development));
        assert_eq!(rules[0].test, r"/\.css$/");
        assert_eq!(rules[0].uses[0].loader, EXTRACT_CSS_LOADER);
        assert_eq!(rules[0].uses.len(), 3);
    }

    #[test]
    fn style_loader_when_not_extracting() {
        let dir = TempDir::new().unwrap();
        let mut opts = resolved(dir.path(), Environment::Development);
        opts.extract_css = false;
        let rules = build_rules(&opts);
        assert_eq!(rules[0].uses[0].loader, "style-loader");
    }

    #[test]
    fn missing_preprocessor_keeps_rule_without_layer() {
        let dir = TempDir::new().unwrap();
        let rules = build_rules(&resolved(dir.path(), Environment::Development));
        let scss = &rules[1];
        assert_eq!(scss.test, r"/\.scss$/");
        assert!(!scss.uses_loader("sass-loader"));
        assert_eq!(scss.uses.len(), 3);
    }

    #[test]
    fn installed_preprocessor_is_appended() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("node_modules/less-loader")).unwrap();
        let rules = build_rules(&resolved(dir.path(), Environment::Production));

        let less = &rules[2];
        let last = less.uses.last().unwrap();
        assert_eq!(last.loader, "less-loader");
        assert_eq!(last.options, Some(json!({ "sourceMap": false })));
    }

    #[test]
    fn media_prefix_lands_in_image_names() {
        let dir = TempDir::new().unwrap();
        let rules = build_rules(&resolved(dir.path(), Environment::Development));
        let image = rules
            .iter()
            .find(|rule| rule.uses_loader("file-loader"))
            .unwrap();
        assert_eq!(
            image.uses[0].options,
            Some(json!({ "name": "static/media/[name].[hash:8].[ext]" }))
        );
    }

    #[test]
    fn compiler_rule_is_last_and_targets_browsers() {
        let dir = TempDir::new().unwrap();
        let rules = build_rules(&resolved(dir.path(), Environment::Development));
        let babel = rules.last().unwrap();
        assert!(babel.uses_loader("babel-loader"));
        let options = babel.uses[0].options.as_ref().unwrap();
        assert_eq!(
            options["presets"][0][1]["targets"]["browsers"],
            json!(BROWSER_TARGETS)
        );
    }
}
