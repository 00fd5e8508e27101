use exif_rename::config::load_config_from_xml;
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::tempdir;

// These tests mutate process-wide environment state, hence #[serial].

#[test]
#[serial]
fn env_override_points_at_explicit_file() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(
        &cfg_path,
        "<config>\n  <exiftool_cmd>/stub/exiftool</exiftool_cmd>\n  <log_level>quiet</log_level>\n</config>\n",
    )
    .unwrap();

    unsafe { env::set_var("EXIF_RENAME_CONFIG", &cfg_path) };
    let cfg = load_config_from_xml().unwrap().expect("config should load");
    unsafe { env::remove_var("EXIF_RENAME_CONFIG") };

    assert_eq!(cfg.exiftool_cmd, "/stub/exiftool");
}

#[test]
#[serial]
fn env_override_to_missing_file_is_a_hard_error() {
    let td = tempdir().unwrap();
    let missing = td.path().join("nope.xml");

    unsafe { env::set_var("EXIF_RENAME_CONFIG", &missing) };
    let result = load_config_from_xml();
    unsafe { env::remove_var("EXIF_RENAME_CONFIG") };

    assert!(result.is_err());
}
