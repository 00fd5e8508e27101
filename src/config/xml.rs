//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Creates a commented template with conservative permissions if missing.
//! - EXIF_RENAME_CONFIG overrides the default per-platform location.
//!
//! Notes:
//! - This module only reads/writes the config file; target-directory
//!   validation happens elsewhere.
//! - A malformed file at the default location is reported and ignored so the
//!   tool still runs with defaults; loading an explicit path errors instead.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use super::{EXIFTOOL_CMD_DEFAULT, FALLBACK_CMD_DEFAULT};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "exiftool_cmd")]
    exiftool_cmd: Option<String>,
    #[serde(rename = "fallback_cmd")]
    fallback_cmd: Option<String>,
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
}

// Map XmlConfig -> Config; unset fields keep their defaults.
fn xml_to_config(parsed: XmlConfig) -> Config {
    let mut cfg = Config::default();

    if let Some(s) = parsed.exiftool_cmd.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.exiftool_cmd = trimmed.to_string();
        }
    }
    if let Some(s) = parsed.fallback_cmd.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.fallback_cmd = trimmed.to_string();
        }
    }
    if let Some(s) = parsed.log_level.as_deref() {
        if let Ok(level) = s.trim().parse::<LogLevel>() {
            cfg.log_level = level;
        }
    }
    if let Some(s) = parsed.log_file.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(PathBuf::from(trimmed));
        }
    }

    cfg
}

/// Load a Config from a specific XML file path (quick_xml).
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig =
        from_xml_str(&contents).with_context(|| format!("parse config xml '{}'", path.display()))?;
    Ok(xml_to_config(parsed))
}

/// Read config from XML. EXIF_RENAME_CONFIG wins over the per-platform
/// default path. Returns Ok(None) when no usable file exists; an explicit
/// env-provided path that fails to load is a hard error.
pub fn load_config_from_xml() -> Result<Option<Config>> {
    if let Some(p) = env::var_os("EXIF_RENAME_CONFIG") {
        let path = PathBuf::from(p);
        let cfg = load_config_from_xml_path(&path)
            .with_context(|| format!("EXIF_RENAME_CONFIG points at '{}'", path.display()))?;
        return Ok(Some(cfg));
    }

    let Some(path) = default_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    match load_config_from_xml_path(&path) {
        Ok(cfg) => Ok(Some(cfg)),
        Err(e) => {
            crate::output::print_warn(&format!(
                "Ignoring unreadable config {}: {:#}",
                path.display(),
                e
            ));
            Ok(None)
        }
    }
}

/// Create default template config file and parent directory.
/// On Unix the directory is tightened to 0700 and the file to 0600.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        return Err(anyhow::anyhow!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        ));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        #[cfg(unix)]
        {
            let _ = fs::set_permissions(parent, fs::Permissions::from_mode(0o700));
        }
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "/path/to/exif_rename.log".into());

    let content = format!(
        "<!--\n  exif_rename configuration (XML)\n\n  Fields:\n    exiftool_cmd  -> bulk capture-timestamp provider invoked against the directory\n    fallback_cmd  -> per-file provider consulted when the bulk result has no timestamp\n    log_level     -> quiet | normal | info | debug\n    log_file      -> path to log file (optional; stdout/stderr still used)\n\n  Notes:\n    - CLI flags override XML values.\n    - Set EXIF_RENAME_CONFIG to use a config file at another location.\n-->\n<config>\n  <exiftool_cmd>{}</exiftool_cmd>\n  <fallback_cmd>{}</fallback_cmd>\n  <log_level>normal</log_level>\n  <log_file>{}</log_file>\n</config>\n",
        EXIFTOOL_CMD_DEFAULT, FALLBACK_CMD_DEFAULT, suggested_log
    );

    fs::write(path, content)?;
    #[cfg(unix)]
    {
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }

    info!("Created template config at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parses_all_fields() {
        let td = tempdir().unwrap();
        let p = td.path().join("config.xml");
        fs::write(
            &p,
            "<config>\n  <exiftool_cmd>/opt/bin/exiftool</exiftool_cmd>\n  <fallback_cmd>/usr/bin/GetFileInfo</fallback_cmd>\n  <log_level>debug</log_level>\n  <log_file>/tmp/er.log</log_file>\n</config>\n",
        )
        .unwrap();
        let cfg = load_config_from_xml_path(&p).unwrap();
        assert_eq!(cfg.exiftool_cmd, "/opt/bin/exiftool");
        assert_eq!(cfg.fallback_cmd, "/usr/bin/GetFileInfo");
        assert_eq!(cfg.log_level, LogLevel::Debug);
        assert_eq!(cfg.log_file.as_deref(), Some(Path::new("/tmp/er.log")));
    }

    #[test]
    fn template_roundtrips_through_loader() {
        let td = tempdir().unwrap();
        let p = td.path().join("nested").join("config.xml");
        create_template_config(&p).unwrap();
        let cfg = load_config_from_xml_path(&p).unwrap();
        assert_eq!(cfg.exiftool_cmd, EXIFTOOL_CMD_DEFAULT);
        assert_eq!(cfg.fallback_cmd, FALLBACK_CMD_DEFAULT);
        assert_eq!(cfg.log_level, LogLevel::Normal);
    }
}
