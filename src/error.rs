use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not determine the application data directory: {0} is not set")]
    EnvironmentUnavailable(&'static str),

    #[error("secret storage is not available: {0}")]
    SecretStoreUnavailable(String),

    #[error("Signal config file not found at {}. Is Signal installed?", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("failed to parse Signal config {}: {reason}", .path.display())]
    ConfigParse { path: PathBuf, reason: String },

    #[error("no valid encryptedKey found in Signal config")]
    MissingField,

    #[error("encryptedKey is not a valid hex string: {0}")]
    InvalidEncoding(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("output directory does not exist: {}", .0.display())]
    OutputDirectoryMissing(PathBuf),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Failure category, without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EnvironmentUnavailable,
    SecretStoreUnavailable,
    ConfigNotFound,
    ConfigParse,
    MissingField,
    InvalidEncoding,
    DecryptionFailed,
    OutputDirectoryMissing,
    Unexpected,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EnvironmentUnavailable(_) => ErrorKind::EnvironmentUnavailable,
            Error::SecretStoreUnavailable(_) => ErrorKind::SecretStoreUnavailable,
            Error::ConfigNotFound(_) => ErrorKind::ConfigNotFound,
            Error::ConfigParse { .. } => ErrorKind::ConfigParse,
            Error::MissingField => ErrorKind::MissingField,
            Error::InvalidEncoding(_) => ErrorKind::InvalidEncoding,
            Error::DecryptionFailed(_) => ErrorKind::DecryptionFailed,
            Error::OutputDirectoryMissing(_) => ErrorKind::OutputDirectoryMissing,
            Error::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Unexpected(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
