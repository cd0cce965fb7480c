//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - A missing default file means "use defaults"; a missing explicit
//!   `$RELOCATE_CONFIG` file, a malformed file or an unknown field is an error.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::CONFIG_ENV;
use super::paths::default_config_path;
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    log_level: Option<String>,
    log_file: Option<String>,
    #[serde(default, deserialize_with = "de_usize_trimmed_opt")]
    jobs: Option<usize>,
    preserve_metadata: Option<bool>,
    check_space: Option<bool>,
}

// Tolerate surrounding whitespace in numeric elements.
fn de_usize_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<usize>()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid jobs value '{s}': {e}"))),
    }
}

fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();
    if let Some(s) = parsed.log_level.as_deref() {
        cfg.log_level = s.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
    }
    if let Some(s) = parsed.log_file.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(PathBuf::from(trimmed));
        }
    }
    cfg.jobs = parsed.jobs.filter(|&n| n > 0);
    cfg.preserve_metadata = parsed.preserve_metadata.unwrap_or(cfg.preserve_metadata);
    cfg.check_space = parsed.check_space.unwrap_or(cfg.check_space);
    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in '{}'", path.display()))
}

/// Load the effective config file, if any.
/// Returns `Ok(None)` when no explicit path is set and the default file is absent.
pub fn load_config() -> Result<Option<(PathBuf, Config)>> {
    let explicit = env::var_os(CONFIG_ENV).is_some_and(|p| !p.is_empty());
    let Some(path) = default_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        if explicit {
            bail!("{} points to a missing file: {}", CONFIG_ENV, path.display());
        }
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(None);
    }
    let cfg = load_config_from_xml_path(&path)?;
    Ok(Some((path, cfg)))
}
