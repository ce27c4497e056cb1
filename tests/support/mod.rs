//! Test support utilities for sigkey integration tests.
//!
//! Provides an isolated application-data root and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with an isolated home directory.
///
/// No process-global state is mutated; child processes get their
/// environment through `.env()` so tests can run in parallel.
pub struct Test {
    /// Temporary home directory, also the working directory of commands
    pub home: TempDir,
}

impl Test {
    /// Create an empty test environment (no Signal config yet).
    pub fn new() -> Self {
        let home = TempDir::new().expect("failed to create temp home");
        Self { home }
    }

    /// Create a test environment whose config holds `encrypted_key`.
    pub fn with_encrypted_key(encrypted_key: &str) -> Self {
        let t = Self::new();
        t.write_config(&format!(r#"{{"encryptedKey":"{}"}}"#, encrypted_key));
        t
    }

    /// Application-data root the binary will compute for this home.
    pub fn app_data_root(&self) -> PathBuf {
        if cfg!(windows) {
            self.home.path().join("AppData").join("Roaming")
        } else if cfg!(target_os = "macos") {
            self.home.path().join("Library").join("Application Support")
        } else {
            self.home.path().join(".config")
        }
    }

    /// Directory holding Signal's config.json.
    pub fn signal_dir(&self) -> PathBuf {
        self.app_data_root().join("Signal")
    }

    pub fn config_path(&self) -> PathBuf {
        self.signal_dir().join("config.json")
    }

    /// Write raw contents to the default config location.
    pub fn write_config(&self, contents: &str) {
        fs::create_dir_all(self.signal_dir()).expect("failed to create Signal dir");
        fs::write(self.config_path(), contents).expect("failed to write config");
    }

    /// Write the safe-storage password file and return its path.
    pub fn write_password(&self, password: &str) -> PathBuf {
        let path = self.home.path().join("password.txt");
        fs::write(&path, password).expect("failed to write password file");
        path
    }
}
