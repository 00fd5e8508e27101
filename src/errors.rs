//! Typed error definitions for exif_rename.
//! Covers the fatal, run-aborting failure modes; per-record problems are
//! counted and logged where they occur, never raised as errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenameError {
    #[error("Metadata provider '{command}' failed: {reason}")]
    ProviderFailed { command: String, reason: String },

    #[error("Metadata provider returned malformed output: {0}")]
    MalformedOutput(String),

    #[error("No files found in '{0}'")]
    NoFilesFound(PathBuf),

    #[error("No supported files to rename in '{0}'")]
    NothingToRename(PathBuf),

    #[error("All files in '{0}' are already correctly named")]
    AlreadyNamed(PathBuf),
}

impl RenameError {
    /// Stable machine-readable discriminant for structured log fields.
    pub fn code(&self) -> &'static str {
        match self {
            RenameError::ProviderFailed { .. } => "provider_failed",
            RenameError::MalformedOutput(_) => "malformed_output",
            RenameError::NoFilesFound(_) => "no_files_found",
            RenameError::NothingToRename(_) => "nothing_to_rename",
            RenameError::AlreadyNamed(_) => "already_named",
        }
    }
}
