//! Constants used throughout sigkey.
//!
//! Centralizes file names, environment variables and the parameters of the
//! safeStorage envelope.

/// Signal's directory under the application-data root.
pub const APP_DIR: &str = "Signal";

/// Config file holding `encryptedKey`.
pub const CONFIG_FILE: &str = "config.json";

/// JSON field carrying the hex-encoded ciphertext.
pub const ENCRYPTED_KEY_FIELD: &str = "encryptedKey";

/// Chromium state file beside `config.json` (Windows key material).
pub const LOCAL_STATE_FILE: &str = "Local State";

/// Environment variable overriding the log filter.
pub const LOG_ENV: &str = "SIGKEY_LOG";

/// Version prefix of the first envelope revision.
pub const PREFIX_V10: &[u8] = b"v10";

/// Version prefix used on Linux when the password comes from a keyring.
pub const PREFIX_V11: &[u8] = b"v11";

/// PBKDF2 salt for the CBC scheme.
pub const KDF_SALT: &[u8] = b"saltysalt";

/// PBKDF2 rounds used by macOS builds.
pub const KDF_ITERATIONS_MACOS: u32 = 1003;

/// PBKDF2 rounds used by Linux builds.
pub const KDF_ITERATIONS_LINUX: u32 = 1;

/// AES-128 key length for the CBC scheme.
pub const CBC_KEY_LEN: usize = 16;

/// CBC initialization vector: sixteen ASCII spaces.
pub const CBC_IV: [u8; 16] = [b' '; 16];

/// Nonce length for the GCM scheme.
pub const GCM_NONCE_LEN: usize = 12;

/// Authentication tag length for the GCM scheme.
pub const GCM_TAG_LEN: usize = 16;

/// Prefix of the DPAPI-wrapped key in `Local State`.
pub const DPAPI_PREFIX: &[u8] = b"DPAPI";

/// Password used on Linux when no keyring backend was available.
pub const LINUX_FALLBACK_PASSWORD: &[u8] = b"peanuts";

/// Keychain service holding Signal's safe-storage password.
pub const KEYCHAIN_SERVICE: &str = "Signal Safe Storage";

/// Keychain accounts tried in order.
pub const KEYCHAIN_ACCOUNTS: &[&str] = &["Signal Key", "Signal"];

/// Values of the Secret Service `application` attribute tried in order.
pub const SECRET_SERVICE_APPLICATIONS: &[&str] = &["Signal", "signal"];

/// Native PBKDF2 rounds for this build target.
pub const fn native_kdf_iterations() -> u32 {
    if cfg!(target_os = "macos") {
        KDF_ITERATIONS_MACOS
    } else {
        KDF_ITERATIONS_LINUX
    }
}
