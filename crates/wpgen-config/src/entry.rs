//! Entry point discovery from a pages directory.
//!
//! Each child of the pages directory names one page. A page resolves either to
//! a script file (`about.js`) or to the `index` script of a same-named
//! directory (`home/index.js`), trying extensions in [`SCRIPT_EXTENSIONS`]
//! order. Names that fail the page-name pattern, private names (leading `_`)
//! and names that resolve to nothing are dropped without error.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::error::{ConfigError, Result};
use crate::probe;

/// Extension priority for entry resolution.
pub const SCRIPT_EXTENSIONS: &[&str] = &[".js", ".jsx", ".ts", ".tsx"];

/// Page name to resolved source file, in discovery order.
pub type EntryMap = IndexMap<String, PathBuf>;

static PAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"^[-\w]+$")
        .unicode(false)
        .build()
        .expect("page name pattern is valid")
});

/// Whether `name` may name a page.
pub fn is_page_name(name: &str) -> bool {
    PAGE_NAME.is_match(name) && !name.starts_with('_')
}

/// List the pages directory and resolve every page to a file.
///
/// A missing pages directory yields an empty map.
pub fn discover_entries(pages_path: &Path) -> Result<EntryMap> {
    let mut entries = EntryMap::new();

    if !probe::is_dir(pages_path) {
        debug!(path = %pages_path.display(), "pages directory not found, no entries");
        return Ok(entries);
    }

    let read_err = |source| ConfigError::Read {
        path: pages_path.to_path_buf(),
        source,
    };
    let mut children = fs::read_dir(pages_path)
        .map_err(read_err)?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(read_err)?;
    children.sort_by_key(|child| child.file_name());

    for child in children {
        let Some(file_name) = child.file_name().to_str().map(str::to_string) else {
            continue;
        };
        let name = candidate_name(&child.path(), &file_name);

        if !is_page_name(&name) {
            debug!(name = %file_name, "skipping non-page entry");
            continue;
        }
        if entries.contains_key(&name) {
            continue;
        }

        match resolve_entry(pages_path, &name) {
            Some(path) => {
                debug!(name = %name, path = %path.display(), "resolved entry");
                entries.insert(name, path);
            }
            None => debug!(name = %name, "entry did not resolve to a script"),
        }
    }

    Ok(entries)
}

/// Resolve `<pages>/<name>` the way a module resolver would.
pub fn resolve_entry(pages_path: &Path, name: &str) -> Option<PathBuf> {
    let direct = SCRIPT_EXTENSIONS
        .iter()
        .map(|ext| pages_path.join(format!("{name}{ext}")));
    let index = SCRIPT_EXTENSIONS
        .iter()
        .map(|ext| pages_path.join(name).join(format!("index{ext}")));

    direct.chain(index).find(|path| probe::is_file(path))
}

/// Restrict entries to the stage filter, if one is given.
///
/// An empty filter is a fatal configuration error.
pub fn apply_stage(entries: EntryMap, stage: Option<&[String]>) -> Result<EntryMap> {
    let Some(stage) = stage else {
        return Ok(entries);
    };
    if stage.is_empty() {
        return Err(ConfigError::EmptyStage);
    }

    for name in stage {
        if !entries.contains_key(name) {
            warn!(name = %name, "stage names a page that does not exist");
        }
    }

    Ok(entries
        .into_iter()
        .filter(|(name, _)| stage.contains(name))
        .collect())
}

fn candidate_name(path: &Path, file_name: &str) -> String {
    if probe::is_file(path) {
        for ext in SCRIPT_EXTENSIONS {
            if let Some(stem) = file_name.strip_suffix(ext) {
                return stem.to_string();
            }
        }
    }
    file_name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_names() {
        assert!(is_page_name("home"));
        assert!(is_page_name("user-profile"));
        assert!(is_page_name("page2"));
        assert!(!is_page_name("_private"));
        assert!(!is_page_name("about.js"));
        assert!(!is_page_name(".hidden"));
        assert!(!is_page_name("café"));
        assert!(!is_page_name(""));
    }

    #[test]
    fn stage_none_keeps_everything() {
        let mut entries = EntryMap::new();
        entries.insert("home".into(), PathBuf::from("/p/home.js"));
        let kept = apply_stage(entries, None).unwrap();
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn stage_intersects() {
        let mut entries = EntryMap::new();
        entries.insert("home".into(), PathBuf::from("/p/home.js"));
        entries.insert("about".into(), PathBuf::from("/p/about.js"));

        let stage = vec!["about".to_string(), "missing".to_string()];
        let kept = apply_stage(entries, Some(stage.as_slice())).unwrap();
        assert_eq!(kept.keys().collect::<Vec<_>>(), vec!["about"]);
    }

    #[test]
    fn empty_stage_is_fatal() {
        let stage: Vec<String> = Vec::new();
        let err = apply_stage(EntryMap::new(), Some(stage.as_slice())).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyStage));
    }
}
