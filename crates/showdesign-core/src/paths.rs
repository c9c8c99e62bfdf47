use crate::error::{Result, ShowDesignError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const SHOWDESIGN_DIR: &str = ".showdesign";
pub const STORE_DIR: &str = ".showdesign/store";
pub const CONFIG_FILE: &str = ".showdesign/config.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn showdesign_dir(root: &Path) -> PathBuf {
    root.join(SHOWDESIGN_DIR)
}

pub fn store_dir(root: &Path) -> PathBuf {
    root.join(STORE_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn store_entry(store_dir: &Path, key: &str) -> PathBuf {
    store_dir.join(format!("{key}.json"))
}

// ---------------------------------------------------------------------------
// Storage key validation
// ---------------------------------------------------------------------------

static KEY_RE: OnceLock<Regex> = OnceLock::new();

fn key_re() -> &'static Regex {
    KEY_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_\-]{1,64}$").unwrap())
}

/// Keys become file names, so they are restricted to a portable character set.
pub fn validate_storage_key(key: &str) -> Result<()> {
    if !key_re().is_match(key) {
        return Err(ShowDesignError::InvalidStorageKey(key.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_keys() {
        for key in ["bandShows", "a", "shows-2025", "band_shows"] {
            validate_storage_key(key).unwrap_or_else(|_| panic!("expected valid: {key}"));
        }
    }

    #[test]
    fn invalid_keys() {
        let long = "k".repeat(65);
        for key in ["", "../escape", "has space", "dots.json", long.as_str()] {
            assert!(validate_storage_key(key).is_err(), "expected invalid: {key}");
        }
    }

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/band");
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/band/.showdesign/config.yaml")
        );
        assert_eq!(
            store_entry(&store_dir(root), "bandShows"),
            PathBuf::from("/tmp/band/.showdesign/store/bandShows.json")
        );
    }
}
