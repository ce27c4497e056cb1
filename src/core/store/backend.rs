//! Backend selection.
//!
//! A password file, when given, always wins. Otherwise the native backend of
//! the build target is used; targets without one get a backend that reports
//! itself unavailable.

use tracing::debug;

use super::{PasswordFile, SafeStorage};
use crate::core::locator::ConfigLocator;
use crate::core::types::RunConfig;

/// Pick the backend for this run.
pub fn default_backend(config: &RunConfig, locator: &ConfigLocator) -> Box<dyn SafeStorage> {
    if let Some(source) = &config.password {
        debug!(path = %source.path.display(), "using password file backend");
        return Box::new(PasswordFile::new(source.clone()));
    }

    let backend = native_backend(locator);
    debug!(backend = backend.name(), "using native secret storage");
    backend
}

#[cfg(target_os = "macos")]
fn native_backend(_locator: &ConfigLocator) -> Box<dyn SafeStorage> {
    Box::new(super::keychain::Keychain::new())
}

#[cfg(target_os = "linux")]
fn native_backend(_locator: &ConfigLocator) -> Box<dyn SafeStorage> {
    Box::new(super::secret_service::SecretService::new())
}

#[cfg(windows)]
fn native_backend(locator: &ConfigLocator) -> Box<dyn SafeStorage> {
    Box::new(super::dpapi::Dpapi::new(locator.clone()))
}

#[cfg(not(any(target_os = "macos", target_os = "linux", windows)))]
fn native_backend(_locator: &ConfigLocator) -> Box<dyn SafeStorage> {
    Box::new(Unsupported)
}

#[cfg(not(any(target_os = "macos", target_os = "linux", windows)))]
struct Unsupported;

#[cfg(not(any(target_os = "macos", target_os = "linux", windows)))]
impl SafeStorage for Unsupported {
    fn name(&self) -> &'static str {
        "unsupported platform"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn decrypt_string(&self, _ciphertext: &[u8]) -> crate::error::Result<super::Plaintext> {
        Err(crate::error::Error::SecretStoreUnavailable(
            "no secret storage backend for this platform".to_string(),
        ))
    }
}
