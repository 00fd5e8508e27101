//! Rename execution.
//! Walks the confirmed plan in order and performs one rename per entry with
//! overwrite protection: the destination is re-checked on disk at execution
//! time, not trusted from plan time. Failures are contained per record; the
//! caller receives structured outcomes and decides what to print.

use anyhow::anyhow;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::plan::PlannedRename;

/// What happened to one planned rename.
#[derive(Debug)]
pub enum RenameOutcome {
    /// The rename was performed (or would have been, under dry-run).
    Renamed,
    /// A file already exists at the destination; refused rather than clobber.
    DestinationExists,
    /// The underlying rename call failed.
    Failed(anyhow::Error),
}

/// One executed entry, consumed from the plan.
#[derive(Debug)]
pub struct ExecutedRename {
    pub planned: PlannedRename,
    pub outcome: RenameOutcome,
}

/// Aggregate counts over a batch of outcomes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExecReport {
    pub renamed: usize,
    pub skipped: usize,
}

impl ExecReport {
    pub fn tally(results: &[ExecutedRename]) -> Self {
        let mut report = ExecReport::default();
        for r in results {
            match r.outcome {
                RenameOutcome::Renamed => report.renamed += 1,
                RenameOutcome::DestinationExists | RenameOutcome::Failed(_) => {
                    report.skipped += 1
                }
            }
        }
        report
    }
}

/// Execute the confirmed plan against `dir`, one entry at a time.
/// Never overwrites: an on-disk destination (possibly created after the plan
/// was built) skips that entry and the batch continues.
pub fn execute(dir: &Path, entries: Vec<PlannedRename>, dry_run: bool) -> Vec<ExecutedRename> {
    let mut results = Vec::with_capacity(entries.len());

    for planned in entries {
        let src = dir.join(&planned.source);
        let dest = dir.join(&planned.dest);

        let outcome = if dest.exists() {
            warn!(dest = %dest.display(), "Destination already exists; refusing to overwrite");
            RenameOutcome::DestinationExists
        } else if dry_run {
            info!(src = %src.display(), dest = %dest.display(), "dry-run: would rename");
            RenameOutcome::Renamed
        } else {
            match fs::rename(&src, &dest) {
                Ok(()) => {
                    info!(src = %src.display(), dest = %dest.display(), "Renamed file");
                    RenameOutcome::Renamed
                }
                Err(e) => {
                    warn!(src = %src.display(), error = %e, "Rename failed; skipping record");
                    RenameOutcome::Failed(rename_error(&src, &dest, e))
                }
            }
        };

        results.push(ExecutedRename { planned, outcome });
    }

    debug!(count = results.len(), "Executed plan");
    results
}

/// Enrich a rename failure with an actionable, platform-aware hint.
fn rename_error(src: &Path, dest: &Path, e: io::Error) -> anyhow::Error {
    let mut msg = format!("rename '{}' -> '{}': {}", src.display(), dest.display(), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" — permission denied; check ownership and write permissions.");
                }
                libc::ENOENT => {
                    msg.push_str(" — path not found; the source may have moved since the scan.");
                }
                libc::EEXIST => {
                    msg.push_str(" — already exists; pick a unique name or remove the target.");
                }
                libc::EROFS => {
                    msg.push_str(" — read-only filesystem; cannot write here.");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str(" — filename or path too long; shorten path segments.");
                }
                _ => {}
            }
        }
        // Include OS code for diagnostics
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str(" — permission denied; check ownership and write permissions.");
            }
            io::ErrorKind::NotFound => {
                msg.push_str(" — path not found; the source may have moved since the scan.");
            }
            io::ErrorKind::AlreadyExists => {
                msg.push_str(" — already exists; remove or choose a unique name.");
            }
            _ => {}
        }
    }

    anyhow!(msg)
}
