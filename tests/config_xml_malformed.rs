use exif_rename::config::load_config_from_xml_path;
use std::fs;
use tempfile::tempdir;

#[test]
fn malformed_xml_errors() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    // Missing closing tag for fallback_cmd
    let xml = r#"<config>
  <exiftool_cmd>exiftool</exiftool_cmd>
  <fallback_cmd>GetFileInfo
</config>"#;
    fs::write(&cfg_path, xml).unwrap();
    let err = load_config_from_xml_path(&cfg_path).unwrap_err();
    assert!(format!("{err}").contains("parse config xml"));
}

#[test]
fn unknown_field_errors() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    let xml = r#"<config>
  <exiftool_cmd>exiftool</exiftool_cmd>
  <picture_dir>/mnt/pictures</picture_dir>
</config>"#;
    fs::write(&cfg_path, xml).unwrap();
    assert!(load_config_from_xml_path(&cfg_path).is_err());
}
