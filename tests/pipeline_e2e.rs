#![cfg(unix)]

// End-to-end runs of the binary against stub metadata providers. The stubs
// stand in for exiftool/GetFileInfo so the tests exercise the full pipeline
// (bulk scan, fallback, plan, confirmation, execution) without either tool
// installed.

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Fixture {
    _td: TempDir,
    photos: PathBuf,
    config: PathBuf,
}

fn write_script(path: &Path, body: &str) {
    fs::write(path, body).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Lay out a photos dir, provider stubs with the given script bodies, and a
/// config file wiring the stubs in.
fn fixture(bulk_body: &str, fallback_body: &str) -> Fixture {
    let td = TempDir::new().unwrap();
    let photos = td.path().join("photos");
    fs::create_dir_all(&photos).unwrap();

    let bulk = td.path().join("exiftool-stub");
    write_script(&bulk, bulk_body);
    let fallback = td.path().join("getfileinfo-stub");
    write_script(&fallback, fallback_body);

    let log = td.path().join("run.log");
    let config = td.path().join("config.xml");
    fs::write(
        &config,
        format!(
            "<config>\n  <exiftool_cmd>{}</exiftool_cmd>\n  <fallback_cmd>{}</fallback_cmd>\n  <log_level>quiet</log_level>\n  <log_file>{}</log_file>\n</config>\n",
            bulk.display(),
            fallback.display(),
            log.display()
        ),
    )
    .unwrap();

    Fixture { _td: td, photos, config }
}

fn cmd(fx: &Fixture) -> Command {
    let mut c = Command::cargo_bin("exif_rename").unwrap();
    c.env("EXIF_RENAME_CONFIG", &fx.config).current_dir(&fx.photos);
    c
}

const BULK_THREE_FILES: &str = r#"#!/bin/sh
cat <<'JSON'
[{"SourceFile":"./IMG_1.jpg","DateTimeOriginal":"2023-05-01 12∶00∶00"},
 {"SourceFile":"./IMG_2.jpg","DateTimeOriginal":"2023-05-01 12∶00∶00"},
 {"SourceFile":"./note.txt"}]
JSON
"#;

const FALLBACK_FIXED: &str = "#!/bin/sh\necho '05/01/2023 09:00:00'\n";

#[test]
fn renames_with_collision_suffix_and_reconciles_counts() {
    let fx = fixture(BULK_THREE_FILES, FALLBACK_FIXED);
    fs::write(fx.photos.join("IMG_1.jpg"), "one").unwrap();
    fs::write(fx.photos.join("IMG_2.jpg"), "two").unwrap();
    fs::write(fx.photos.join("note.txt"), "text").unwrap();

    let out = cmd(&fx).arg("--yes").output().unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    // First claimant keeps the bare name, the second is suffixed.
    assert_eq!(fs::read_to_string(fx.photos.join("2023-05-01 12∶00∶00.jpg")).unwrap(), "one");
    assert_eq!(
        fs::read_to_string(fx.photos.join("2023-05-01 12∶00∶00 (2).jpg")).unwrap(),
        "two"
    );
    // The text file is skipped, never renamed.
    assert!(fx.photos.join("note.txt").exists());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("Renamed: 2, Skipped: 1, Total: 3."),
        "stdout: {stdout}"
    );
}

#[test]
fn declining_the_prompt_changes_nothing() {
    let fx = fixture(BULK_THREE_FILES, FALLBACK_FIXED);
    fs::write(fx.photos.join("IMG_1.jpg"), "one").unwrap();
    fs::write(fx.photos.join("IMG_2.jpg"), "two").unwrap();
    fs::write(fx.photos.join("note.txt"), "text").unwrap();

    let out = cmd(&fx).write_stdin("n\n").output().unwrap();
    assert!(out.status.success());

    assert!(fx.photos.join("IMG_1.jpg").exists());
    assert!(fx.photos.join("IMG_2.jpg").exists());
    assert!(!fx.photos.join("2023-05-01 12∶00∶00.jpg").exists());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Renamed: 0, Skipped: 3, Total: 3."), "stdout: {stdout}");
}

#[test]
fn a_full_word_answer_still_declines() {
    let fx = fixture(BULK_THREE_FILES, FALLBACK_FIXED);
    fs::write(fx.photos.join("IMG_1.jpg"), "one").unwrap();
    fs::write(fx.photos.join("IMG_2.jpg"), "two").unwrap();
    fs::write(fx.photos.join("note.txt"), "text").unwrap();

    // Only a bare "y" confirms; "yes" is treated as a decline.
    let out = cmd(&fx).write_stdin("yes\n").output().unwrap();
    assert!(out.status.success());
    assert!(fx.photos.join("IMG_1.jpg").exists());
}

#[test]
fn existing_destination_is_not_overwritten() {
    let bulk = r#"#!/bin/sh
cat <<'JSON'
[{"SourceFile":"./IMG_1.jpg","DateTimeOriginal":"2023-05-01 12∶00∶00"}]
JSON
"#;
    let fx = fixture(bulk, FALLBACK_FIXED);
    fs::write(fx.photos.join("IMG_1.jpg"), "new").unwrap();
    // Appears on disk after the scan would have happened; the executor must
    // re-check and refuse.
    fs::write(fx.photos.join("2023-05-01 12∶00∶00.jpg"), "old").unwrap();

    let out = cmd(&fx).arg("--yes").output().unwrap();
    assert!(out.status.success());

    assert_eq!(
        fs::read_to_string(fx.photos.join("2023-05-01 12∶00∶00.jpg")).unwrap(),
        "old"
    );
    assert!(fx.photos.join("IMG_1.jpg").exists());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Renamed: 0, Skipped: 1, Total: 1."), "stdout: {stdout}");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("already exists"), "stderr: {stderr}");
}

#[test]
fn dry_run_previews_without_renaming() {
    let fx = fixture(BULK_THREE_FILES, FALLBACK_FIXED);
    fs::write(fx.photos.join("IMG_1.jpg"), "one").unwrap();
    fs::write(fx.photos.join("IMG_2.jpg"), "two").unwrap();
    fs::write(fx.photos.join("note.txt"), "text").unwrap();

    let out = cmd(&fx).args(["--yes", "--dry-run"]).output().unwrap();
    assert!(out.status.success());
    assert!(fx.photos.join("IMG_1.jpg").exists());
    assert!(!fx.photos.join("2023-05-01 12∶00∶00.jpg").exists());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Would rename"), "stdout: {stdout}");
}

#[test]
fn empty_listing_is_fatal() {
    let fx = fixture("#!/bin/sh\ntrue\n", FALLBACK_FIXED);
    let out = cmd(&fx).arg("--yes").output().unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("No files found"), "stderr: {stderr}");
}

#[test]
fn bulk_provider_failure_is_fatal() {
    let fx = fixture("#!/bin/sh\necho 'boom' >&2\nexit 2\n", FALLBACK_FIXED);
    let out = cmd(&fx).arg("--yes").output().unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("failed"), "stderr: {stderr}");
}

#[test]
fn malformed_payload_is_fatal() {
    let fx = fixture("#!/bin/sh\necho 'not json at all'\n", FALLBACK_FIXED);
    let out = cmd(&fx).arg("--yes").output().unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("malformed"), "stderr: {stderr}");
}

#[test]
fn fully_canonical_directory_aborts_without_changes() {
    let bulk = r#"#!/bin/sh
cat <<'JSON'
[{"SourceFile":"./2023-05-01 12∶00∶00.jpg","DateTimeOriginal":"2023-05-01 12∶00∶00"}]
JSON
"#;
    let fx = fixture(bulk, FALLBACK_FIXED);
    fs::write(fx.photos.join("2023-05-01 12∶00∶00.jpg"), "already").unwrap();

    let out = cmd(&fx).arg("--yes").output().unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("already correctly named"), "stderr: {stderr}");
}

#[test]
fn fallback_fills_timestamp_for_record_the_bulk_scan_missed() {
    let bulk = r#"#!/bin/sh
cat <<'JSON'
[{"SourceFile":"./clip.mov"}]
JSON
"#;
    let fx = fixture(bulk, FALLBACK_FIXED);
    fs::write(fx.photos.join("clip.mov"), "video").unwrap();

    let out = cmd(&fx).arg("--yes").output().unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        fs::read_to_string(fx.photos.join("2023-05-01 09∶00∶00.mov")).unwrap(),
        "video"
    );
}
