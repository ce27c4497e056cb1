//! Secret-storage backends.
//!
//! Each backend wraps the OS facility that protects Signal's safe-storage
//! secret and turns an `encryptedKey` blob into the plaintext database key.
//!
//! | Platform | Backend | Secret |
//! |----------|---------|--------|
//! | macOS    | [`keychain::Keychain`] | password in the login Keychain |
//! | Linux    | [`secret_service::SecretService`] | password in the Secret Service |
//! | Windows  | [`dpapi::Dpapi`] | DPAPI-protected master key in `Local State` |
//! | any      | [`PasswordFile`] | password supplied by the user |
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `SafeStorage` trait
//! 2. Add the implementation in a new file (e.g., `kwallet.rs`)
//! 3. Select it in `backend.rs`

use zeroize::Zeroizing;

use crate::error::{Error, Result};

mod backend;
mod password;

#[cfg(target_os = "macos")]
pub mod keychain;

#[cfg(target_os = "linux")]
pub mod secret_service;

#[cfg(windows)]
pub mod dpapi;

pub use backend::default_backend;
pub use password::PasswordFile;

/// Decrypted database key. Wiped from memory on drop.
pub type Plaintext = Zeroizing<String>;

/// OS-backed secret storage capability.
///
/// Implementations must never log the ciphertext or the plaintext.
pub trait SafeStorage {
    /// Human-readable backend name for diagnostics.
    fn name(&self) -> &'static str;

    /// Whether the capability is usable in the current session.
    ///
    /// Checked before any file is read so a run fails fast.
    fn is_available(&self) -> bool;

    /// Decrypt a safeStorage blob.
    ///
    /// # Errors
    ///
    /// Returns `Error::SecretStoreUnavailable` if the OS facility cannot be
    /// reached, or `Error::DecryptionFailed` if the blob cannot be opened.
    fn decrypt_string(&self, ciphertext: &[u8]) -> Result<Plaintext>;
}

/// Decrypt through `store`, refusing an empty result.
///
/// # Errors
///
/// Propagates backend errors, and returns `Error::DecryptionFailed` when the
/// backend produced an empty string.
pub fn decrypt(store: &dyn SafeStorage, ciphertext: &[u8]) -> Result<Plaintext> {
    let plaintext = store.decrypt_string(ciphertext)?;
    if plaintext.is_empty() {
        return Err(Error::DecryptionFailed(
            "decryption returned an empty result".to_string(),
        ));
    }
    Ok(plaintext)
}
