//! Terminal diagnostics.
//!
//! Everything here goes to stderr: stdout is reserved for the key.
//! Colors respect NO_COLOR.

use console::style;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::colors_enabled_stderr()
}

/// Format an error line.
///
/// Example: `✗ decryption failed: bad padding`
pub fn format_error(msg: &str) -> String {
    if colors_enabled() {
        format!("{} {}", style("✗").red().for_stderr(), msg)
    } else {
        format!("✗ {}", msg)
    }
}

/// Print an error line to stderr.
pub fn error(msg: &str) {
    eprintln!("{}", format_error(msg));
}
