//! Environment/runtime helpers
//!
//! Sanity checks to ensure the data file can be created at startup.

use std::path::Path;

use tracing::debug;

/// Ensure the parent directory of `data_file` exists.
///
/// Relative paths with no directory component (e.g. `users.json`) live in the
/// working directory and need nothing.
pub async fn ensure_data_dir(data_file: &Path) -> anyhow::Result<()> {
    let Some(parent) = data_file.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    debug!(dir = %parent.display(), "data directory ready");
    Ok(())
}
