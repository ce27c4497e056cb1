//! macOS Keychain backend.
//!
//! Signal's safe-storage password is a generic password in the login
//! Keychain under the service `Signal Safe Storage`. Reading it may show the
//! system's "allow access" prompt.

#![cfg(target_os = "macos")]

use security_framework::os::macos::keychain::SecKeychain;
use security_framework::passwords::get_generic_password;
use tracing::{debug, error};
use zeroize::Zeroizing;

use super::{Plaintext, SafeStorage};
use crate::core::constants::{KDF_ITERATIONS_MACOS, KEYCHAIN_ACCOUNTS, KEYCHAIN_SERVICE};
use crate::core::os_crypt;
use crate::error::{Error, Result};

/// errSecUserCanceled
const USER_CANCELED: i32 = -128;

/// errSecItemNotFound
const ITEM_NOT_FOUND: i32 = -25300;

pub struct Keychain {
    service: String,
}

impl Keychain {
    pub fn new() -> Self {
        Self {
            service: KEYCHAIN_SERVICE.to_string(),
        }
    }

    /// Fetch the safe-storage password, trying each known account name.
    fn password(&self) -> Result<Zeroizing<Vec<u8>>> {
        for account in KEYCHAIN_ACCOUNTS {
            match get_generic_password(&self.service, account) {
                Ok(bytes) => {
                    debug!(service = %self.service, account = %account, "found Keychain item");
                    return Ok(Zeroizing::new(bytes));
                }
                Err(e) if e.code() == ITEM_NOT_FOUND => {
                    debug!(service = %self.service, account = %account, "no Keychain item");
                }
                Err(e) if e.code() == USER_CANCELED => {
                    error!(service = %self.service, "Keychain access was denied");
                    return Err(Error::SecretStoreUnavailable(
                        "Keychain access was denied".to_string(),
                    ));
                }
                Err(e) => {
                    error!(service = %self.service, error_code = e.code(), "Keychain lookup failed");
                    return Err(Error::SecretStoreUnavailable(format!("Keychain error: {}", e)));
                }
            }
        }

        Err(Error::DecryptionFailed(format!(
            "no '{}' item in the Keychain",
            self.service
        )))
    }
}

impl Default for Keychain {
    fn default() -> Self {
        Self::new()
    }
}

impl SafeStorage for Keychain {
    fn name(&self) -> &'static str {
        "macOS Keychain"
    }

    fn is_available(&self) -> bool {
        SecKeychain::default().is_ok()
    }

    fn decrypt_string(&self, ciphertext: &[u8]) -> Result<Plaintext> {
        let password = self.password()?;
        os_crypt::open_with_password(ciphertext, &password, KDF_ITERATIONS_MACOS)
    }
}
