//! Plan building.
//! Turns discovered records into an ordered set of (source, destination)
//! pairs: unsupported extensions are dropped, destination names are derived
//! from the capture timestamp, and collisions are disambiguated with a
//! numeric suffix in first-come-first-served input order.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::metadata::ScannedFile;

/// File types the renamer will touch. Everything else is skipped.
pub const SUPPORTED_EXTENSIONS: [&str; 7] =
    [".jpg", ".jpeg", ".tif", ".heic", ".png", ".mov", ".mp4"];

/// One proposed rename. Destinations are siblings of their source and are
/// computed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRename {
    pub source: PathBuf,
    pub dest: PathBuf,
}

/// The ordered plan plus the count of records dropped while building it.
#[derive(Debug, Default)]
pub struct RenamePlan {
    pub entries: Vec<PlannedRename>,
    pub skipped: usize,
}

impl RenamePlan {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop entries whose destination equals their source, counting them as
    /// skipped. Files already carrying their canonical name need no rename.
    pub fn without_noops(mut self) -> Self {
        let before = self.entries.len();
        self.entries.retain(|e| e.source != e.dest);
        self.skipped += before - self.entries.len();
        self
    }
}

/// Lowercased extension including the dot, or None when the path has none.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
}

/// Build the rename plan from extractor output.
///
/// Records are processed in input order against a frequency map that lives
/// for exactly one run: the first record claiming a given timestamp+extension
/// gets the unsuffixed name, later ones get " (2)", " (3)", … in processing
/// order. The tie-break is deliberately first-come-first-served, not sorted.
pub fn build_plan(records: &[ScannedFile]) -> RenamePlan {
    let mut plan = RenamePlan::default();
    let mut frequencies: HashMap<String, u32> = HashMap::new();

    for rec in records {
        let Some(ext) = extension_of(&rec.source) else {
            plan.skipped += 1;
            continue;
        };
        if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
            plan.skipped += 1;
            continue;
        }
        // The extractor only emits timestamped records; treat a gap as one
        // more skip rather than a crash.
        let Some(ts) = rec.captured_at.as_deref() else {
            plan.skipped += 1;
            continue;
        };

        let base = format!("{ts}{ext}");
        let count = frequencies.entry(base.clone()).or_insert(0);
        *count += 1;
        let n = *count;
        let name = if n == 1 { base } else { format!("{ts} ({n}){ext}") };

        plan.entries.push(PlannedRename {
            source: rec.source.clone(),
            dest: rec.source.with_file_name(name),
        });
    }

    plan
}
