//! Discovery of the `.ocf/` directory holding codec configuration.
//!
//! The directory is found by walking up from a starting path, unless the
//! `OCF_DIR` environment variable names one explicitly.

use crate::config::ConfigError;
use std::path::{Path, PathBuf};

/// The name of the configuration directory.
pub const OCF_DIR_NAME: &str = ".ocf";

/// The environment variable that can override the configuration directory.
const OCF_DIR_ENV: &str = "OCF_DIR";

/// Walk up the directory tree from `start` looking for a `.ocf/` directory.
///
/// `OCF_DIR` is checked first. Returns `None` if the filesystem root is
/// reached without finding one.
pub fn find_ocf_dir(start: &Path) -> Option<PathBuf> {
    if let Ok(env_dir) = std::env::var(OCF_DIR_ENV) {
        let env_path = PathBuf::from(&env_dir);
        if env_path.is_dir() {
            return Some(env_path);
        }
        tracing::debug!(path = %env_path.display(), "OCF_DIR is not a directory, ignoring");
    }

    let start = start.canonicalize().ok()?;
    start
        .ancestors()
        .map(|dir| dir.join(OCF_DIR_NAME))
        .find(|candidate| candidate.is_dir())
}

/// Ensure a `.ocf/` directory exists at the given path.
///
/// If `path` is not itself called `.ocf`, a `.ocf/` subdirectory is created
/// under it. Returns the path to the `.ocf/` directory.
pub fn ensure_ocf_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let ocf_dir = if path.ends_with(OCF_DIR_NAME) {
        path.to_path_buf()
    } else {
        path.join(OCF_DIR_NAME)
    };

    std::fs::create_dir_all(&ocf_dir)?;
    Ok(ocf_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_dir_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let ocf = dir.path().join(OCF_DIR_NAME);
        std::fs::create_dir(&ocf).unwrap();

        let child = dir.path().join("schemas").join("deep");
        std::fs::create_dir_all(&child).unwrap();

        let found = find_ocf_dir(&child).unwrap().canonicalize().unwrap();
        assert_eq!(found, ocf.canonicalize().unwrap());
    }

    #[test]
    fn missing_start_path_finds_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        if std::env::var(OCF_DIR_ENV).is_err() {
            assert!(find_ocf_dir(&missing).is_none());
        }
    }

    #[test]
    fn ensure_creates_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let first = ensure_ocf_dir(dir.path()).unwrap();
        assert!(first.is_dir());
        assert!(first.ends_with(OCF_DIR_NAME));

        let second = ensure_ocf_dir(&first).unwrap();
        assert_eq!(first, second);
    }
}
