//! Target-directory validation.
//! The tool renames files in place, so the only path to validate is the
//! working directory itself: it must exist, be a directory, and be readable.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Validate the directory the renamer will operate on.
pub fn ensure_target_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        bail!("Target directory does not exist: {}", dir.display());
    }
    if !dir.is_dir() {
        bail!("Target path is not a directory: {}", dir.display());
    }

    // readability probe
    fs::read_dir(dir).with_context(|| {
        format!(
            "Cannot read target directory '{}'; check permissions",
            dir.display()
        )
    })?;
    debug!("Target directory readable: {}", dir.display());
    Ok(())
}
