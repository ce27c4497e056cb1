//! Windows DPAPI backend.
//!
//! The AES-256-GCM master key lives in `Local State` beside `config.json`,
//! wrapped with `CryptProtectData` for the current user.

#![cfg(windows)]

use std::fs;
use std::io;
use std::ptr;

use tracing::debug;
use windows_sys::Win32::Foundation::LocalFree;
use windows_sys::Win32::Security::Cryptography::{
    CryptUnprotectData, CRYPTPROTECT_UI_FORBIDDEN, CRYPT_INTEGER_BLOB,
};
use zeroize::Zeroizing;

use super::{Plaintext, SafeStorage};
use crate::core::constants::LOCAL_STATE_FILE;
use crate::core::locator::ConfigLocator;
use crate::core::os_crypt;
use crate::error::{Error, Result};

pub struct Dpapi {
    locator: ConfigLocator,
}

impl Dpapi {
    pub fn new(locator: ConfigLocator) -> Self {
        Self { locator }
    }

    fn master_key(&self) -> Result<Zeroizing<Vec<u8>>> {
        let local_state = self.locator.resolve()?.with_file_name(LOCAL_STATE_FILE);
        debug!(path = %local_state.display(), "reading Local State");

        let text = fs::read_to_string(&local_state).map_err(|e| {
            Error::DecryptionFailed(format!("cannot read {}: {}", local_state.display(), e))
        })?;
        let wrapped = os_crypt::wrapped_master_key(&text)?;
        unprotect(&wrapped)
    }
}

impl SafeStorage for Dpapi {
    fn name(&self) -> &'static str {
        "Windows DPAPI"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn decrypt_string(&self, ciphertext: &[u8]) -> Result<Plaintext> {
        let key = self.master_key()?;
        os_crypt::open_with_master_key(ciphertext, &key)
    }
}

/// `CryptUnprotectData` for the current user, never showing UI.
fn unprotect(data: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let len = u32::try_from(data.len())
        .map_err(|_| Error::DecryptionFailed("DPAPI blob too large".to_string()))?;
    let input = CRYPT_INTEGER_BLOB {
        cbData: len,
        pbData: data.as_ptr() as *mut u8,
    };
    let mut output = CRYPT_INTEGER_BLOB {
        cbData: 0,
        pbData: ptr::null_mut(),
    };

    // SAFETY: `input` describes `data`, which outlives the call and is only
    // read. `output` is allocated by the system and released below.
    let ok = unsafe {
        CryptUnprotectData(
            &input,
            ptr::null_mut(),
            ptr::null(),
            ptr::null(),
            ptr::null(),
            CRYPTPROTECT_UI_FORBIDDEN,
            &mut output,
        )
    };
    if ok == 0 {
        return Err(Error::DecryptionFailed(format!(
            "CryptUnprotectData failed: {}",
            io::Error::last_os_error()
        )));
    }

    // SAFETY: on success `output` points at `cbData` bytes owned by us until
    // LocalFree; they are copied, wiped, then freed exactly once.
    let key = unsafe {
        let len = output.cbData as usize;
        let key = std::slice::from_raw_parts(output.pbData, len).to_vec();
        ptr::write_bytes(output.pbData, 0, len);
        LocalFree(output.pbData.cast());
        key
    };

    Ok(Zeroizing::new(key))
}
