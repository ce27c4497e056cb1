//! Finding and reading Signal's `config.json`.
//!
//! The file lives at a fixed subpath of the per-user application-data root:
//!
//! | Platform | Root |
//! |----------|------|
//! | Windows  | `%APPDATA%` |
//! | macOS    | `$HOME/Library/Application Support` |
//! | other    | `$XDG_CONFIG_HOME`, else `$HOME/.config` |

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::core::constants::{APP_DIR, CONFIG_FILE};
use crate::error::{Error, Result};

/// Parsed contents of `config.json`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigRecord(Value);

impl ConfigRecord {
    /// Look up a top-level field. Non-object documents have no fields.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.as_object().and_then(|map| map.get(name))
    }
}

impl From<Value> for ConfigRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Resolves the path of Signal's config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigLocator {
    explicit: Option<PathBuf>,
}

impl ConfigLocator {
    /// Create a locator. An explicit path skips root resolution entirely.
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }

    /// Compute the config path without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns `Error::EnvironmentUnavailable` if the application-data root
    /// cannot be determined from the environment.
    pub fn resolve(&self) -> Result<PathBuf> {
        if let Some(path) = &self.explicit {
            debug!(path = %path.display(), "using explicit config path");
            return Ok(path.clone());
        }
        let root = app_data_root(|name| std::env::var_os(name))?;
        debug!(root = %root.display(), "resolved application data root");
        Ok(config_path(&root))
    }

    /// Resolve the config path and check that it exists.
    ///
    /// # Errors
    ///
    /// Returns `Error::EnvironmentUnavailable` as [`resolve`](Self::resolve)
    /// does, or `Error::ConfigNotFound` if nothing exists at the path.
    pub fn locate(&self) -> Result<PathBuf> {
        let path = self.resolve()?;
        ensure_exists(&path)?;
        Ok(path)
    }
}

/// `<root>/Signal/config.json`
pub fn config_path(root: &Path) -> PathBuf {
    root.join(APP_DIR).join(CONFIG_FILE)
}

/// Fail with `ConfigNotFound` unless `path` exists.
pub fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::ConfigNotFound(path.to_path_buf()))
    }
}

/// Read and parse a config file.
///
/// # Errors
///
/// Returns `Error::ConfigParse` for malformed JSON or non-UTF-8 content, and
/// `Error::Unexpected` for any other read failure.
pub fn load(path: &Path) -> Result<ConfigRecord> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::InvalidData => Error::ConfigParse {
            path: path.to_path_buf(),
            reason: "file is not valid UTF-8".to_string(),
        },
        _ => Error::Unexpected(format!("failed to read {}: {}", path.display(), e)),
    })?;

    let value: Value = serde_json::from_str(&text).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    debug!(path = %path.display(), "loaded Signal config");
    Ok(ConfigRecord(value))
}

/// Platform application-data root, read through `lookup`.
///
/// Unset and empty variables are treated the same.
#[cfg(windows)]
pub fn app_data_root<F>(lookup: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    non_empty(&lookup, "APPDATA").ok_or(Error::EnvironmentUnavailable("APPDATA"))
}

/// Platform application-data root, read through `lookup`.
///
/// Unset and empty variables are treated the same.
#[cfg(target_os = "macos")]
pub fn app_data_root<F>(lookup: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    non_empty(&lookup, "HOME")
        .map(|home| home.join("Library").join("Application Support"))
        .ok_or(Error::EnvironmentUnavailable("HOME"))
}

/// Platform application-data root, read through `lookup`.
///
/// Unset and empty variables are treated the same.
#[cfg(not(any(windows, target_os = "macos")))]
pub fn app_data_root<F>(lookup: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    if let Some(xdg) = non_empty(&lookup, "XDG_CONFIG_HOME") {
        return Ok(xdg);
    }
    non_empty(&lookup, "HOME")
        .map(|home| home.join(".config"))
        .ok_or(Error::EnvironmentUnavailable("HOME"))
}

fn non_empty<F>(lookup: &F, name: &str) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    lookup(name).filter(|v| !v.is_empty()).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;
    use tempfile::TempDir;

    fn env<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<OsString> + 'a {
        move |name| {
            vars.iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| OsString::from(v))
        }
    }

    #[test]
    fn test_missing_root_is_environment_unavailable() {
        let err = app_data_root(env(&[])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EnvironmentUnavailable);
    }

    #[cfg(windows)]
    #[test]
    fn test_root_from_appdata() {
        let root = app_data_root(env(&[("APPDATA", r"C:\Users\a\AppData\Roaming")])).unwrap();
        assert_eq!(root, PathBuf::from(r"C:\Users\a\AppData\Roaming"));
    }

    #[cfg(windows)]
    #[test]
    fn test_empty_appdata_is_unavailable() {
        let err = app_data_root(env(&[("APPDATA", "")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EnvironmentUnavailable);
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn test_root_from_home() {
        let root = app_data_root(env(&[("HOME", "/Users/a")])).unwrap();
        assert_eq!(root, PathBuf::from("/Users/a/Library/Application Support"));
    }

    #[cfg(not(any(windows, target_os = "macos")))]
    #[test]
    fn test_xdg_config_home_wins() {
        let root = app_data_root(env(&[
            ("XDG_CONFIG_HOME", "/tmp/xdg"),
            ("HOME", "/home/a"),
        ]))
        .unwrap();
        assert_eq!(root, PathBuf::from("/tmp/xdg"));
    }

    #[cfg(not(any(windows, target_os = "macos")))]
    #[test]
    fn test_home_fallback_when_xdg_empty() {
        let root = app_data_root(env(&[("XDG_CONFIG_HOME", ""), ("HOME", "/home/a")])).unwrap();
        assert_eq!(root, PathBuf::from("/home/a/.config"));
    }

    #[test]
    fn test_config_path_layout() {
        let path = config_path(Path::new("root"));
        assert_eq!(path, Path::new("root").join("Signal").join("config.json"));
    }

    #[test]
    fn test_explicit_path_is_returned_unchanged() {
        let locator = ConfigLocator::new(Some(PathBuf::from("somewhere/config.json")));
        assert_eq!(
            locator.resolve().unwrap(),
            PathBuf::from("somewhere/config.json")
        );
    }

    #[test]
    fn test_locate_missing_file() {
        let tmp = TempDir::new().unwrap();
        let locator = ConfigLocator::new(Some(tmp.path().join("config.json")));
        let err = locator.locate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigNotFound);
    }

    #[test]
    fn test_load_valid_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, r#"{"encryptedKey":"deadbeef","other":1}"#).unwrap();

        let record = load(&path).unwrap();
        assert_eq!(record.field("encryptedKey"), Some(&json!("deadbeef")));
        assert_eq!(record.field("missing"), None);
    }

    #[test]
    fn test_load_malformed_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigParse);
    }

    #[test]
    fn test_load_non_utf8() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, [0xff, 0xfe, 0x7b]).unwrap();

        let err = load(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigParse);
    }

    #[test]
    fn test_non_object_document_has_no_fields() {
        let record = ConfigRecord::from(json!(["encryptedKey"]));
        assert!(record.field("encryptedKey").is_none());
    }
}
