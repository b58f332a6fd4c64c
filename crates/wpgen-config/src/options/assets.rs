use serde::{Deserialize, Serialize};

use crate::options::helpers::{default_css_dir, default_js_dir, default_media_dir};

/// Asset sub-directory prefixes as written by the caller.
///
/// A single string applies to every asset kind; an object may name any subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssetsDirSpec {
    Uniform(String),
    Partial {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        js: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        css: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        media: Option<String>,
    },
}

impl Default for AssetsDirSpec {
    fn default() -> Self {
        AssetsDirSpec::Partial {
            js: None,
            css: None,
            media: None,
        }
    }
}

/// Normalized asset prefixes, each either empty or ending in `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetsDir {
    pub js: String,
    pub css: String,
    pub media: String,
}

impl Default for AssetsDir {
    fn default() -> Self {
        Self {
            js: default_js_dir(),
            css: default_css_dir(),
            media: default_media_dir(),
        }
    }
}

impl AssetsDirSpec {
    pub fn normalize(&self) -> AssetsDir {
        match self {
            AssetsDirSpec::Uniform(dir) => {
                let dir = as_prefix(dir);
                AssetsDir {
                    js: dir.clone(),
                    css: dir.clone(),
                    media: dir,
                }
            }
            AssetsDirSpec::Partial { js, css, media } => AssetsDir {
                js: js.as_deref().map(as_prefix).unwrap_or_else(default_js_dir),
                css: css.as_deref().map(as_prefix).unwrap_or_else(default_css_dir),
                media: media
                    .as_deref()
                    .map(as_prefix)
                    .unwrap_or_else(default_media_dir),
            },
        }
    }
}

fn as_prefix(dir: &str) -> String {
    if dir.is_empty() || dir.ends_with('/') {
        dir.to_string()
    } else {
        format!("{dir}/")
    }
}
