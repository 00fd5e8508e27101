//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
pub mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use validate::ensure_target_dir;
pub use xml::{create_template_config, load_config_from_xml, load_config_from_xml_path};

/// Default provider commands. The bulk tool reads capture timestamps for a
/// whole directory; the per-file tool is consulted when the bulk result has
/// no timestamp for a file.
pub const EXIFTOOL_CMD_DEFAULT: &str = "exiftool";
pub const FALLBACK_CMD_DEFAULT: &str = "GetFileInfo";

use anyhow::Result;
use std::env;
use std::path::PathBuf;

/// Outcome of the config bootstrap step.
#[derive(Debug)]
pub enum LoadResult {
    /// No config existed at the default path; a template was written there.
    CreatedTemplate(PathBuf),
    /// A config file exists (or an explicit EXIF_RENAME_CONFIG is in use).
    Existing,
}

/// Ensure a config file exists at the default path, creating a commented
/// template on first run. Never touches an explicit EXIF_RENAME_CONFIG path,
/// and template-creation failures are non-fatal (defaults still apply).
pub fn load_or_init() -> Result<LoadResult> {
    if env::var_os("EXIF_RENAME_CONFIG").is_some() {
        return Ok(LoadResult::Existing);
    }
    let Some(cfg_path) = default_config_path() else {
        return Ok(LoadResult::Existing);
    };
    if cfg_path.exists() {
        return Ok(LoadResult::Existing);
    }
    match create_template_config(&cfg_path) {
        Ok(()) => Ok(LoadResult::CreatedTemplate(cfg_path)),
        Err(e) => {
            tracing::debug!("Could not create template config at {}: {}", cfg_path.display(), e);
            Ok(LoadResult::Existing)
        }
    }
}
