//! Shared utilities for command implementations.

use crate::error::{CliError, Result};
use path_clean::PathClean;
use std::fs;
use std::path::{Path, PathBuf};
use wpgen_config::EnvContext;

/// Source directory names tried, in order, when none is given.
pub const SRC_CANDIDATES: &[&str] = &["assets", "src", "static"];

/// Resolve a path relative to a working directory.
///
/// If the path is absolute, returns it unchanged. Otherwise, joins it with
/// the working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Get the working directory, honoring `--cwd`.
///
/// # Errors
///
/// Returns an I/O error if the process directory cannot be determined, and
/// `FileNotFound` if `--cwd` is not a directory.
pub fn get_cwd(explicit: Option<&Path>) -> Result<PathBuf> {
    let process_cwd = std::env::current_dir().map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to get current directory: {}", e),
        ))
    })?;

    let Some(explicit) = explicit else {
        return Ok(process_cwd);
    };
    let cwd = resolve_path(explicit, &process_cwd).clean();
    if !cwd.is_dir() {
        return Err(CliError::FileNotFound(cwd));
    }
    Ok(cwd)
}

/// First of [`SRC_CANDIDATES`] that is a directory under `cwd`.
pub fn guess_src_path(cwd: &Path) -> Option<PathBuf> {
    SRC_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|name| cwd.join(name).is_dir())
}

/// Snapshot the process environment, resolving paths against `cwd`.
pub fn env_context(cwd: &Path) -> Result<EnvContext> {
    let mut ctx = EnvContext::from_process()?;
    ctx.cwd = cwd.to_path_buf();
    Ok(ctx)
}

/// Write `contents` to `path`, creating parent directories.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_path() {
        let cwd = Path::new("/site");
        assert_eq!(resolve_path(Path::new("src"), cwd), PathBuf::from("/site/src"));
        assert_eq!(resolve_path(Path::new("/abs"), cwd), PathBuf::from("/abs"));
    }

    #[test]
    fn test_guess_src_path_order() {
        let dir = TempDir::new().unwrap();
        assert!(guess_src_path(dir.path()).is_none());

        fs::create_dir(dir.path().join("static")).unwrap();
        assert_eq!(guess_src_path(dir.path()), Some(PathBuf::from("static")));

        fs::create_dir(dir.path().join("src")).unwrap();
        assert_eq!(guess_src_path(dir.path()), Some(PathBuf::from("src")));

        fs::create_dir(dir.path().join("assets")).unwrap();
        assert_eq!(guess_src_path(dir.path()), Some(PathBuf::from("assets")));
    }

    #[test]
    fn test_guess_ignores_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("assets"), "").unwrap();
        fs::create_dir(dir.path().join("static")).unwrap();
        assert_eq!(guess_src_path(dir.path()), Some(PathBuf::from("static")));
    }

    #[test]
    fn test_get_cwd_rejects_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = get_cwd(Some(&dir.path().join("nope"))).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_write_output_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out/nested/webpack.config.json");
        write_output(&path, "{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }
}
