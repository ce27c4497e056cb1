//! Run configuration shared by the pipeline stages.

use std::path::PathBuf;

/// Immutable settings for one run, built once from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Destination file; `None` means standard output.
    pub output: Option<PathBuf>,
    /// Emit progress lines on stderr.
    pub verbose: bool,
    /// Explicit `config.json`, bypassing application-data root resolution.
    pub config: Option<PathBuf>,
    /// Known safe-storage password instead of the OS secret store.
    pub password: Option<PasswordSource>,
}

/// Where to read a safe-storage password from, and how to stretch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordSource {
    pub path: PathBuf,
    pub iterations: u32,
}
