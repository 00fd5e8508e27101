//! Application orchestrator.
//! Loads/merges config, initializes logging, validates the target directory,
//! then drives the pipeline: discover → plan → no-op filter → confirm →
//! execute → summary. All user-facing printing and fatal-error logging lives
//! here; the pipeline stages return structured results.

use anyhow::Result;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use crate::cli::Args;
use crate::config::{self, Config, LoadResult, default_config_path, ensure_target_dir};
use crate::confirm;
use crate::errors::RenameError;
use crate::executor::{self, ExecReport, RenameOutcome};
use crate::metadata::{ExifTool, Extractor, FileInfoTool};
use crate::output as out;
use crate::plan;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        if let Ok(cfg_env) = std::env::var("EXIF_RENAME_CONFIG") {
            out::print_info(&format!("Using EXIF_RENAME_CONFIG (explicit):\n  {}\n", cfg_env));
            out::print_info("To override, unset EXIF_RENAME_CONFIG or set it to another file.");
            return Ok(());
        }
        match default_config_path() {
            Some(p) => {
                out::print_info(&format!("Default exif_rename config path:\n  {}\n", p.display()));
                if p.exists() {
                    out::print_info("A config file already exists at that location.");
                } else {
                    out::print_info("No config file exists there yet. Run without --print-config to create a template.");
                }
            }
            None => {
                out::print_error("Could not determine a default config path.");
            }
        }
        return Ok(());
    }

    // Create template config if none exists (before logging init)
    if let LoadResult::CreatedTemplate(path) = config::load_or_init()? {
        out::print_success(&format!(
            "A template exif_rename config was written to: {}",
            path.display()
        ));
        out::print_info("Edit the file to adjust `exiftool_cmd`, `fallback_cmd`, `log_level` and `log_file`, then re-run this command. To use a different location set EXIF_RENAME_CONFIG.");
        return Ok(());
    }

    // Build config (may read XML). CLI args override config values.
    let mut cfg = config::load_config_from_xml()?.unwrap_or_else(Config::default);
    args.apply_overrides(&mut cfg);

    // Initialize logging; the guard must live until exit to flush the file layer.
    let _guard = crate::logging::init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json)
        .map_err(|e| {
            out::print_error(&format!("Failed to initialize logging: {}", e));
            e
        })?;

    debug!("Starting exif_rename: {:?}", args);

    let dir = args.target_dir();
    ensure_target_dir(&dir)?;

    run_pipeline(&cfg, &dir)
}

/// The pipeline proper, separated so logging/config setup stays in `run`.
fn run_pipeline(cfg: &Config, dir: &std::path::Path) -> Result<()> {
    // Discovery phase: bulk provider plus per-file fallback.
    let discovery_started = Instant::now();
    let extractor = Extractor::new(
        ExifTool::new(cfg.exiftool_cmd.clone()),
        FileInfoTool::new(cfg.fallback_cmd.clone()),
    );
    let discovery = match extractor.discover(dir) {
        Ok(d) => d,
        Err(e) => return Err(fatal(e)),
    };
    let total = discovery.total;
    let mut skipped = discovery.skipped;

    // Plan: extension filter, canonical names, collision suffixes.
    let built = plan::build_plan(&discovery.records);
    skipped += built.skipped;
    if built.is_empty() {
        return Err(fatal(RenameError::NothingToRename(dir.to_path_buf())));
    }

    // No-op filter: files already carrying their canonical name.
    let pending = built.without_noops();
    if pending.is_empty() {
        return Err(fatal(RenameError::AlreadyNamed(dir.to_path_buf())));
    }
    let discovery_elapsed = discovery_started.elapsed();
    info!(
        total,
        pending = pending.entries.len(),
        skipped,
        "Plan ready"
    );

    // Confirmation gate: the single suspension point.
    out::print_user(&confirm::preview_table(&pending.entries).to_string());
    let confirmed = cfg.assume_yes || confirm::ask(pending.entries.len())?;
    if !confirmed {
        skipped += pending.entries.len();
        info!("User declined; no files were renamed");
        out::print_info("Declined; no files were renamed.");
        print_summary(0, skipped, total, discovery_elapsed, Duration::ZERO);
        return Ok(());
    }

    // Execution phase.
    let exec_started = Instant::now();
    let results = executor::execute(dir, pending.entries, cfg.dry_run);
    let exec_elapsed = exec_started.elapsed();

    for r in &results {
        match &r.outcome {
            RenameOutcome::Renamed if cfg.dry_run => out::print_user(&format!(
                "Would rename: {} → {}",
                r.planned.source.display(),
                r.planned.dest.display()
            )),
            RenameOutcome::Renamed => out::print_user(&format!(
                "Renaming: {} → {}",
                r.planned.source.display(),
                r.planned.dest.display()
            )),
            RenameOutcome::DestinationExists => out::print_error(&format!(
                "A file {} already exists; skipping {}",
                r.planned.dest.display(),
                r.planned.source.display()
            )),
            RenameOutcome::Failed(e) => out::print_error(&format!("{e:#}")),
        }
    }

    let report = ExecReport::tally(&results);
    skipped += report.skipped;

    if report.renamed > 0 {
        out::print_rule();
    }
    print_summary(report.renamed, skipped, total, discovery_elapsed, exec_elapsed);
    Ok(())
}

/// Final reconciliation line: total == renamed + skipped always holds.
fn print_summary(
    renamed: usize,
    skipped: usize,
    total: usize,
    discovery: Duration,
    rename: Duration,
) {
    out::print_user(&format!("Renamed: {renamed}, Skipped: {skipped}, Total: {total}."));
    out::print_user(&format!(
        "Time: {:.1} sec discovery, {:.1} sec rename.",
        discovery.as_secs_f64(),
        rename.as_secs_f64()
    ));
}

/// Log a fatal condition with its stable code and surface it to the user.
fn fatal(e: RenameError) -> anyhow::Error {
    error!(code = e.code(), error = %e, "Run aborted");
    out::print_error(&e.to_string());
    e.into()
}
