//! Core library components.
//!
//! This module contains the extraction pipeline and the pieces it runs:
//! locating the config, validating the ciphertext, decrypting through the
//! OS secret store and writing the result.

pub mod ciphertext;
pub mod constants;
pub mod locator;
pub mod os_crypt;
pub mod pipeline;
pub mod sink;
pub mod store;
pub mod types;
