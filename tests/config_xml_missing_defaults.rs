use exif_rename::config::{LogLevel, load_config_from_xml_path};
use std::fs;
use tempfile::tempdir;

#[test]
fn missing_fields_fall_back_to_defaults() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config>\n  <log_level>quiet</log_level>\n</config>\n").unwrap();

    let cfg = load_config_from_xml_path(&cfg_path).unwrap();
    assert_eq!(cfg.exiftool_cmd, "exiftool");
    assert_eq!(cfg.fallback_cmd, "GetFileInfo");
    assert_eq!(cfg.log_level, LogLevel::Quiet);
}

#[test]
fn whitespace_in_values_is_trimmed() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(
        &cfg_path,
        "<config>\n  <exiftool_cmd>  /opt/bin/exiftool  </exiftool_cmd>\n  <log_level> debug </log_level>\n</config>\n",
    )
    .unwrap();

    let cfg = load_config_from_xml_path(&cfg_path).unwrap();
    assert_eq!(cfg.exiftool_cmd, "/opt/bin/exiftool");
    assert_eq!(cfg.log_level, LogLevel::Debug);
}

#[test]
fn empty_log_file_stays_default() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config>\n  <log_file>   </log_file>\n</config>\n").unwrap();

    let cfg = load_config_from_xml_path(&cfg_path).unwrap();
    // Blank value keeps the platform default rather than becoming "".
    assert_ne!(cfg.log_file.as_deref().map(|p| p.as_os_str().is_empty()), Some(true));
}
