//! Delivering the decrypted key.
//!
//! Standard output receives the key and a newline, nothing else. A file
//! receives exactly the key. Parent directories are never created.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Write `secret` to `destination`, or to `stdout` when there is none.
///
/// # Errors
///
/// Returns `Error::OutputDirectoryMissing` if the destination's parent
/// directory does not exist, and `Error::Unexpected` on I/O failure.
pub fn write(secret: &str, destination: Option<&Path>, stdout: &mut dyn Write) -> Result<()> {
    match destination {
        None => {
            stdout.write_all(secret.as_bytes())?;
            stdout.write_all(b"\n")?;
            stdout.flush()?;
            Ok(())
        }
        Some(path) => write_file(secret, path),
    }
}

fn write_file(secret: &str, path: &Path) -> Result<()> {
    let resolved = absolute(path)?;
    let parent = resolved
        .parent()
        .ok_or_else(|| Error::OutputDirectoryMissing(resolved.clone()))?;

    if !parent.is_dir() {
        return Err(Error::OutputDirectoryMissing(parent.to_path_buf()));
    }

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    // New key files are created 0600; existing ones are narrowed before writing
    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
        options.mode(0o600);
        if resolved.exists() {
            fs::set_permissions(&resolved, fs::Permissions::from_mode(0o600))?;
        }
    }

    let mut file = options.open(&resolved)?;
    file.write_all(secret.as_bytes())?;
    file.flush()?;

    debug!(path = %resolved.display(), "decrypted key written");
    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
