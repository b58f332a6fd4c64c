use std::path::PathBuf;

use serde::{Deserialize, Deserializer};

// Helper defaults
pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_src_path() -> PathBuf {
    PathBuf::from("src")
}

pub(crate) fn default_dist_path() -> PathBuf {
    PathBuf::from("dist")
}

pub(crate) fn default_js_dir() -> String {
    "static/js/".to_string()
}

pub(crate) fn default_css_dir() -> String {
    "static/css/".to_string()
}

pub(crate) fn default_media_dir() -> String {
    "static/media/".to_string()
}

/// Accepts a stage list as a sequence or a comma separated string.
///
/// An empty string yields an empty list, which the assembler rejects.
pub(crate) fn deserialize_stage<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StageInput {
        List(Vec<String>),
        Csv(String),
    }

    let input = Option::<StageInput>::deserialize(deserializer)?;
    Ok(input.map(|input| match input {
        StageInput::List(names) => names,
        StageInput::Csv(raw) => split_stage(&raw),
    }))
}

pub(crate) fn split_stage(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_stage_trims_and_drops_blanks() {
        assert_eq!(split_stage(" home, about ,,"), vec!["home", "about"]);
        assert!(split_stage("").is_empty());
        assert!(split_stage(" , ").is_empty());
    }
}
