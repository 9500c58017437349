//! Environment/runtime helpers
//!
//! Resolves where the backing file lives when no path is configured.

use std::path::PathBuf;

use tracing::info;

/// Resolve `file_name` next to the running executable, falling back to the
/// working directory when the executable location is unavailable.
pub fn beside_executable(file_name: &str) -> PathBuf {
    match std::env::current_exe() {
        Ok(exe) => match exe.parent() {
            Some(dir) => dir.join(file_name),
            // root-level executable; nothing to join onto
            None => PathBuf::from(file_name),
        },
        Err(e) => {
            info!(error = %e, "executable path unavailable; using working directory");
            PathBuf::from(file_name)
        }
    }
}
