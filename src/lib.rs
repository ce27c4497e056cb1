//! Sigkey - recover the Signal Desktop database key from the OS secret store.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   └── output        # stderr diagnostics
//! └── core/             # Core library components
//!     ├── locator       # Finding and reading config.json
//!     ├── ciphertext    # encryptedKey validation
//!     ├── os_crypt      # safeStorage envelope (CBC / GCM)
//!     ├── store/        # Secret storage backends
//!     │   ├── mod       # SafeStorage trait
//!     │   ├── keychain  # macOS
//!     │   ├── secret_service  # Linux
//!     │   ├── dpapi     # Windows
//!     │   └── password  # user-supplied password
//!     ├── sink          # stdout / file output
//!     └── pipeline      # Stage sequencing
//! ```

pub mod cli;
pub mod core;
pub mod error;
