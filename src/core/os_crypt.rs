//! The safeStorage envelope around Signal's database key.
//!
//! Electron encrypts the key with Chromium's `os_crypt`. The blob starts
//! with a version prefix and is sealed in one of two ways:
//!
//! - **CBC** (macOS, Linux): AES-128-CBC under a PBKDF2-HMAC-SHA1 key derived
//!   from a password held by the OS secret store.
//! - **GCM** (Windows): AES-256-GCM under a 32-byte master key that is kept
//!   DPAPI-protected in the profile's `Local State` file.
//!
//! Only the symmetric layer lives here. Obtaining the password or master key
//! is the job of the [`store`](crate::core::store) backends.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, KeyIvInit};
use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use base64::Engine;
use serde::Deserialize;
use sha1::Sha1;
use zeroize::Zeroizing;

use crate::core::constants::{
    CBC_IV, CBC_KEY_LEN, DPAPI_PREFIX, GCM_NONCE_LEN, GCM_TAG_LEN, KDF_SALT, PREFIX_V10,
    PREFIX_V11,
};
use crate::error::{Error, Result};

type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

const BLOCK_LEN: usize = 16;

/// Envelope revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    V10,
    V11,
}

/// Split the version prefix off a blob.
///
/// # Errors
///
/// Returns `Error::DecryptionFailed` for blobs without a known prefix.
pub fn split_version(blob: &[u8]) -> Result<(Version, &[u8])> {
    if let Some(body) = blob.strip_prefix(PREFIX_V10) {
        Ok((Version::V10, body))
    } else if let Some(body) = blob.strip_prefix(PREFIX_V11) {
        Ok((Version::V11, body))
    } else {
        Err(Error::DecryptionFailed(
            "ciphertext has no recognized version prefix".to_string(),
        ))
    }
}

/// Stretch a safe-storage password into the AES-128 key.
pub fn derive_cbc_key(password: &[u8], iterations: u32) -> Zeroizing<[u8; CBC_KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; CBC_KEY_LEN]);
    pbkdf2::pbkdf2_hmac::<Sha1>(password, KDF_SALT, iterations, &mut key[..]);
    key
}

/// AES-128-CBC decrypt an envelope body (prefix already removed).
pub fn decrypt_cbc(key: &[u8], body: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    if body.is_empty() || body.len() % BLOCK_LEN != 0 {
        return Err(Error::DecryptionFailed(format!(
            "ciphertext length {} is not a whole number of blocks",
            body.len()
        )));
    }

    let cipher = Aes128CbcDec::new_from_slices(key, &CBC_IV)
        .map_err(|_| Error::DecryptionFailed("invalid key length".to_string()))?;

    let mut buf = Zeroizing::new(body.to_vec());
    let len = cipher
        .decrypt_padded_mut::<Pkcs7>(&mut buf[..])
        .map_err(|_| {
            Error::DecryptionFailed("bad padding, the password is probably wrong".to_string())
        })?
        .len();
    buf.truncate(len);
    Ok(buf)
}

/// AES-256-GCM decrypt an envelope body: nonce, ciphertext, tag.
pub fn decrypt_gcm(key: &[u8], body: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    if body.len() < GCM_NONCE_LEN + GCM_TAG_LEN {
        return Err(Error::DecryptionFailed("ciphertext too short".to_string()));
    }

    let (nonce, sealed) = body.split_at(GCM_NONCE_LEN);
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|_| Error::DecryptionFailed("master key must be 32 bytes".to_string()))?;

    cipher
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map(Zeroizing::new)
        .map_err(|_| Error::DecryptionFailed("authentication tag mismatch".to_string()))
}

/// Open a CBC-scheme blob with a known password.
pub fn open_with_password(
    blob: &[u8],
    password: &[u8],
    iterations: u32,
) -> Result<Zeroizing<String>> {
    let (_, body) = split_version(blob)?;
    let key = derive_cbc_key(password, iterations);
    into_string(decrypt_cbc(&key[..], body)?)
}

/// Open a GCM-scheme blob with the unwrapped master key.
pub fn open_with_master_key(blob: &[u8], master_key: &[u8]) -> Result<Zeroizing<String>> {
    match split_version(blob)? {
        (Version::V10, body) => into_string(decrypt_gcm(master_key, body)?),
        (Version::V11, _) => Err(Error::DecryptionFailed(
            "v11 ciphertext cannot be opened with a DPAPI master key".to_string(),
        )),
    }
}

/// Validate decrypted bytes as UTF-8 without leaving an unwiped copy.
pub fn into_string(bytes: Zeroizing<Vec<u8>>) -> Result<Zeroizing<String>> {
    let text = std::str::from_utf8(&bytes)
        .map_err(|_| Error::DecryptionFailed("plaintext is not valid UTF-8".to_string()))?;
    Ok(Zeroizing::new(text.to_owned()))
}

#[derive(Deserialize)]
struct LocalState {
    os_crypt: OsCryptState,
}

#[derive(Deserialize)]
struct OsCryptState {
    encrypted_key: String,
}

/// Extract the DPAPI blob protecting the master key from `Local State`.
///
/// # Errors
///
/// Returns `Error::DecryptionFailed` if the document lacks
/// `os_crypt.encrypted_key`, the value is not base64, or it does not carry
/// the `DPAPI` prefix.
pub fn wrapped_master_key(local_state: &str) -> Result<Vec<u8>> {
    let state: LocalState = serde_json::from_str(local_state).map_err(|e| {
        Error::DecryptionFailed(format!("Local State has no os_crypt.encrypted_key: {}", e))
    })?;

    let raw = base64::engine::general_purpose::STANDARD
        .decode(state.os_crypt.encrypted_key.trim())
        .map_err(|_| {
            Error::DecryptionFailed("Local State encrypted_key is not valid base64".to_string())
        })?;

    raw.strip_prefix(DPAPI_PREFIX)
        .map(<[u8]>::to_vec)
        .ok_or_else(|| {
            Error::DecryptionFailed(
                "Local State encrypted_key does not start with DPAPI".to_string(),
            )
        })
}
