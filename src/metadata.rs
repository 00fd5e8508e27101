//! Metadata extraction.
//! Capture timestamps come from external provider processes, not from parsing
//! proprietary metadata formats here. Two strategies sit behind narrow traits:
//! a bulk provider that reads a whole directory in one blocking call, and a
//! per-file fallback consulted for records the bulk result left empty.
//!
//! Both invocations are synchronous; a bulk failure aborts the run, a
//! fallback failure skips that single record.

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

use crate::errors::RenameError;

/// Timestamp layout used in destination names: second precision, with U+2236
/// RATIO instead of a colon so the name is legal on all target filesystems.
pub const CANONICAL_TIME_FORMAT: &str = "%Y-%m-%d %H∶%M∶%S";

/// Layout of the per-file fallback provider's output line.
const FALLBACK_TIME_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// One candidate file as reported by the bulk provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScannedFile {
    /// Path as reported by the provider (relative to the scanned directory),
    /// unique within a run.
    #[serde(rename = "SourceFile")]
    pub source: PathBuf,
    /// Canonical capture timestamp; None until filled by the fallback.
    #[serde(rename = "DateTimeOriginal")]
    pub captured_at: Option<String>,
}

/// Bulk strategy: one blocking call against the directory.
pub trait BulkProvider {
    fn fetch_all(&self, dir: &Path) -> Result<Vec<ScannedFile>, RenameError>;
}

/// Per-file strategy: one blocking call per file, returning the canonical
/// timestamp string.
pub trait FileProvider {
    fn fetch_one(&self, path: &Path) -> Result<String>;
}

/// Bulk provider backed by exiftool's JSON output.
#[derive(Debug, Clone)]
pub struct ExifTool {
    cmd: String,
}

impl ExifTool {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self { cmd: cmd.into() }
    }
}

impl BulkProvider for ExifTool {
    fn fetch_all(&self, dir: &Path) -> Result<Vec<ScannedFile>, RenameError> {
        let output = Command::new(&self.cmd)
            .args(["-DateTimeOriginal", "-ee", "-j", "-q", "-d", CANONICAL_TIME_FORMAT, "."])
            .current_dir(dir)
            .output()
            .map_err(|e| RenameError::ProviderFailed {
                command: self.cmd.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenameError::ProviderFailed {
                command: self.cmd.clone(),
                reason: format!("exit status {}: {}", output.status, stderr.trim()),
            });
        }

        let payload = String::from_utf8_lossy(&output.stdout);
        if payload.trim().is_empty() {
            return Err(RenameError::NoFilesFound(dir.to_path_buf()));
        }

        let records: Vec<ScannedFile> = serde_json::from_str(payload.trim())
            .map_err(|e| RenameError::MalformedOutput(e.to_string()))?;
        debug!(count = records.len(), dir = %dir.display(), "Bulk provider returned records");
        Ok(records)
    }
}

/// Per-file fallback backed by a `<tool> -d <path>` invocation printing a
/// `MM/DD/YYYY HH:MM:SS` line.
#[derive(Debug, Clone)]
pub struct FileInfoTool {
    cmd: String,
}

impl FileInfoTool {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self { cmd: cmd.into() }
    }
}

impl FileProvider for FileInfoTool {
    fn fetch_one(&self, path: &Path) -> Result<String> {
        let output = Command::new(&self.cmd)
            .arg("-d")
            .arg(path)
            .output()
            .with_context(|| format!("spawn fallback provider '{}'", self.cmd))?;
        if !output.status.success() {
            bail!(
                "fallback provider '{}' failed on '{}': {}",
                self.cmd,
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        parse_fallback_timestamp(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse the fallback provider's `<date> <time>` line into the canonical
/// timestamp layout. Tolerant of the separator characters inside each token,
/// strict about the field count and calendar validity.
pub fn parse_fallback_timestamp(line: &str) -> Result<String> {
    let mut tokens = line.split_whitespace();
    let (date, time) = tokens
        .next()
        .zip(tokens.next())
        .with_context(|| format!("expected '<date> <time>', got '{}'", line.trim()))?;

    fn digits(s: &str) -> Vec<&str> {
        s.split(|c: char| !c.is_ascii_digit())
            .filter(|t| !t.is_empty())
            .collect()
    }
    let d = digits(date);
    let t = digits(time);
    if d.len() != 3 || t.len() != 3 {
        bail!("expected 'MM/DD/YYYY HH:MM:SS', got '{}'", line.trim());
    }

    let normalized = format!("{}/{}/{} {}:{}:{}", d[0], d[1], d[2], t[0], t[1], t[2]);
    let parsed = NaiveDateTime::parse_from_str(&normalized, FALLBACK_TIME_FORMAT)
        .with_context(|| format!("invalid date/time '{}'", line.trim()))?;
    Ok(parsed.format(CANONICAL_TIME_FORMAT).to_string())
}

/// Records discovered for one run, with the pre-filter total every later
/// reconciliation is measured against.
#[derive(Debug)]
pub struct Discovery {
    /// Records that have a capture timestamp.
    pub records: Vec<ScannedFile>,
    /// Records dropped because the fallback also failed for them.
    pub skipped: usize,
    /// Count of records returned by the bulk provider before any filtering.
    pub total: usize,
}

/// Composes the bulk and fallback strategies: bulk first, then the per-file
/// tool for each record still lacking a timestamp.
#[derive(Debug)]
pub struct Extractor<B, F> {
    bulk: B,
    fallback: F,
}

impl<B: BulkProvider, F: FileProvider> Extractor<B, F> {
    pub fn new(bulk: B, fallback: F) -> Self {
        Self { bulk, fallback }
    }

    /// Obtain a capture timestamp for every discoverable file in `dir`.
    /// Bulk-provider trouble is fatal; a fallback failure skips only the
    /// record it concerns.
    pub fn discover(&self, dir: &Path) -> Result<Discovery, RenameError> {
        let scanned = self.bulk.fetch_all(dir)?;
        if scanned.is_empty() {
            return Err(RenameError::NoFilesFound(dir.to_path_buf()));
        }

        let total = scanned.len();
        let mut skipped = 0usize;
        let mut records = Vec::with_capacity(total);
        for mut rec in scanned {
            if rec.captured_at.is_none() {
                match self.fallback.fetch_one(&dir.join(&rec.source)) {
                    Ok(ts) => rec.captured_at = Some(ts),
                    Err(e) => {
                        warn!(source = %rec.source.display(), error = %e, "No capture timestamp; skipping record");
                        skipped += 1;
                        continue;
                    }
                }
            }
            records.push(rec);
        }

        Ok(Discovery { records, skipped, total })
    }
}
