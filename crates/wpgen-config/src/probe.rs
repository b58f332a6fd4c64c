//! Existence checks for conventional project files.

use std::path::Path;

/// Lint configuration files recognized at the project root, in probe order.
pub const LINT_CONFIG_FILES: &[&str] = &[".eslintrc", ".eslintrc.js", ".eslintrc.json"];

pub fn is_file(path: &Path) -> bool {
    path.is_file()
}

pub fn is_dir(path: &Path) -> bool {
    path.is_dir()
}

/// Whether `<root>/node_modules/<name>` is installed.
pub fn package_exists(root: &Path, name: &str) -> bool {
    root.join("node_modules").join(name).is_dir()
}

pub fn has_lint_config(root: &Path) -> bool {
    LINT_CONFIG_FILES
        .iter()
        .any(|name| is_file(&root.join(name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn package_exists_checks_node_modules() {
        let dir = TempDir::new().unwrap();
        assert!(!package_exists(dir.path(), "sass-loader"));

        fs::create_dir_all(dir.path().join("node_modules/sass-loader")).unwrap();
        assert!(package_exists(dir.path(), "sass-loader"));
    }

    #[test]
    fn lint_config_detected_by_any_name() {
        let dir = TempDir::new().unwrap();
        assert!(!has_lint_config(dir.path()));

        fs::write(dir.path().join(".eslintrc.js"), "module.exports = {};").unwrap();
        assert!(has_lint_config(dir.path()));
    }

    #[test]
    fn lint_config_directory_does_not_count() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".eslintrc")).unwrap();
        assert!(!has_lint_config(dir.path()));
    }
}
