//! Backend for a safe-storage password the user already has.
//!
//! Useful for opening a `config.json` copied off another machine, where the
//! password was exported from that machine's Keychain or keyring.

use std::fs;

use zeroize::Zeroizing;

use super::{Plaintext, SafeStorage};
use crate::core::os_crypt;
use crate::core::types::PasswordSource;
use crate::error::{Error, Result};

/// Reads the password from a file; surrounding whitespace is ignored.
pub struct PasswordFile {
    source: PasswordSource,
}

impl PasswordFile {
    pub fn new(source: PasswordSource) -> Self {
        Self { source }
    }

    fn password(&self) -> Result<Zeroizing<String>> {
        let path = &self.source.path;
        let raw = Zeroizing::new(fs::read_to_string(path).map_err(|e| {
            Error::SecretStoreUnavailable(format!(
                "cannot read password file {}: {}",
                path.display(),
                e
            ))
        })?);

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::SecretStoreUnavailable(format!(
                "password file {} is empty",
                path.display()
            )));
        }
        Ok(Zeroizing::new(trimmed.to_string()))
    }
}

impl SafeStorage for PasswordFile {
    fn name(&self) -> &'static str {
        "password file"
    }

    fn is_available(&self) -> bool {
        self.source.path.is_file()
    }

    fn decrypt_string(&self, ciphertext: &[u8]) -> Result<Plaintext> {
        let password = self.password()?;
        os_crypt::open_with_password(ciphertext, password.as_bytes(), self.source.iterations)
    }
}
