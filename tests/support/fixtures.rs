//! Test fixtures and constants.

/// Safe-storage password the fixtures were sealed with.
pub const PASSWORD: &str = "hunter2-safe-storage";

/// The database key hidden in `SEALED_KEY`.
pub const SIGNAL_KEY: &str = "c6d5e5b4bd0a5bbd8f7f3e0d3a5a9b2e4f1d7c8b6a5e4d3c2b1a09f8e7d6c5b4";

/// `SIGNAL_KEY` sealed with `PASSWORD`, v10 prefix, 1003 PBKDF2 rounds.
pub const SEALED_KEY: &str = "763130f9d9c6559d7e6b5c50f96271d46474a5c287723f46124cec4ec87000e047c1cfbfd30e5917c1283b802c02b16f07b1f9dc33056d3e4b25c46ef856ffeb7193417f98a0fe9366832fa3f60e5d28b47bbf";

/// An empty string sealed with `PASSWORD`, v10 prefix, 1003 PBKDF2 rounds.
pub const SEALED_EMPTY: &str = "763130fc18a5e380492a512781a5459e5ea5cc";
