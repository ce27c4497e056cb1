//! Linux Secret Service backend (GNOME Keyring, KeePassXC, ...).
//!
//! Electron stores `v11` blobs under a password kept in the Secret Service
//! and tagged with an `application` attribute. `v10` blobs come from sessions
//! without a keyring and use a fixed password.

#![cfg(target_os = "linux")]

use std::collections::HashMap;

use secret_service::blocking::SecretService as Client;
use secret_service::EncryptionType;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::{Plaintext, SafeStorage};
use crate::core::constants::{
    KDF_ITERATIONS_LINUX, LINUX_FALLBACK_PASSWORD, SECRET_SERVICE_APPLICATIONS,
};
use crate::core::os_crypt::{self, Version};
use crate::error::{Error, Result};

pub struct SecretService;

impl SecretService {
    pub fn new() -> Self {
        Self
    }

    fn password(&self) -> Result<Zeroizing<Vec<u8>>> {
        let client = Client::connect(EncryptionType::Dh).map_err(|e| {
            Error::SecretStoreUnavailable(format!("cannot connect to the Secret Service: {}", e))
        })?;

        for application in SECRET_SERVICE_APPLICATIONS {
            let found = client
                .search_items(HashMap::from([("application", *application)]))
                .map_err(|e| {
                    Error::SecretStoreUnavailable(format!("Secret Service search failed: {}", e))
                })?;

            if let Some(item) = found.unlocked.first() {
                debug!(application = %application, "found unlocked keyring item");
                return item.get_secret().map(Zeroizing::new).map_err(|e| {
                    Error::SecretStoreUnavailable(format!("cannot read keyring item: {}", e))
                });
            }

            if let Some(item) = found.locked.first() {
                warn!(application = %application, "keyring item is locked, requesting unlock");
                item.unlock().map_err(|e| {
                    Error::SecretStoreUnavailable(format!("keyring is locked: {}", e))
                })?;
                return item.get_secret().map(Zeroizing::new).map_err(|e| {
                    Error::SecretStoreUnavailable(format!("cannot read keyring item: {}", e))
                });
            }

            debug!(application = %application, "no keyring item");
        }

        Err(Error::DecryptionFailed(
            "no Signal safe-storage password in the Secret Service".to_string(),
        ))
    }
}

impl Default for SecretService {
    fn default() -> Self {
        Self::new()
    }
}

impl SafeStorage for SecretService {
    fn name(&self) -> &'static str {
        "Secret Service"
    }

    fn is_available(&self) -> bool {
        match Client::connect(EncryptionType::Dh) {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "Secret Service unreachable");
                false
            }
        }
    }

    fn decrypt_string(&self, ciphertext: &[u8]) -> Result<Plaintext> {
        let (version, _) = os_crypt::split_version(ciphertext)?;
        match version {
            Version::V10 => {
                debug!("v10 blob, using the fixed fallback password");
                os_crypt::open_with_password(ciphertext, LINUX_FALLBACK_PASSWORD, KDF_ITERATIONS_LINUX)
            }
            Version::V11 => {
                let password = self.password()?;
                os_crypt::open_with_password(ciphertext, &password, KDF_ITERATIONS_LINUX)
            }
        }
    }
}
