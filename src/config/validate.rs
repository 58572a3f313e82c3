// src/config/validate.rs

use regex::Regex;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{CoursedagError, Result};
use crate::types::StorageMode;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::CoursedagError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.layout, raw.catalog, raw.progress))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_layout(cfg)?;
    validate_catalog(cfg)?;
    validate_progress(cfg)?;
    Ok(())
}

fn validate_layout(cfg: &RawConfigFile) -> Result<()> {
    let layout = &cfg.layout;

    if layout.slots_per_row == 0 {
        return Err(CoursedagError::ConfigError(
            "[layout].slots_per_row must be >= 1 (got 0)".to_string(),
        ));
    }

    for (name, value) in [
        ("horizontal_spacing", layout.horizontal_spacing),
        ("level_spacing", layout.level_spacing),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(CoursedagError::ConfigError(format!(
                "[layout].{name} must be a positive number (got {value})"
            )));
        }
    }

    if let Some(ref pattern) = layout.level_pattern {
        Regex::new(pattern).map_err(|e| {
            CoursedagError::ConfigError(format!("invalid [layout].level_pattern: {e}"))
        })?;
    }

    Ok(())
}

fn validate_catalog(cfg: &RawConfigFile) -> Result<()> {
    if let Some(ref major) = cfg.catalog.major {
        if major.trim().is_empty() {
            return Err(CoursedagError::ConfigError(
                "[catalog].major must not be empty when set".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_progress(cfg: &RawConfigFile) -> Result<()> {
    if cfg.progress.storage == StorageMode::File && cfg.progress.path.as_os_str().is_empty() {
        return Err(CoursedagError::ConfigError(
            "[progress].path is required when storage = \"file\"".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_src: &str) -> Result<ConfigFile> {
        let raw: RawConfigFile = toml::from_str(toml_src)?;
        ConfigFile::try_from(raw)
    }

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.layout.slots_per_row, 5);
        assert_eq!(cfg.progress.storage, StorageMode::File);
        assert!(cfg.catalog.path.is_none());
    }

    #[test]
    fn zero_slots_rejected() {
        let err = parse("[layout]\nslots_per_row = 0\n").unwrap_err();
        assert!(matches!(err, CoursedagError::ConfigError(ref m) if m.contains("slots_per_row")));
    }

    #[test]
    fn non_positive_spacing_rejected() {
        let err = parse("[layout]\nlevel_spacing = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("level_spacing"));
    }

    #[test]
    fn bad_level_pattern_rejected() {
        let err = parse("[layout]\nlevel_pattern = \"(\"\n").unwrap_err();
        assert!(err.to_string().contains("level_pattern"));
    }

    #[test]
    fn unknown_storage_is_a_toml_error() {
        let err = parse("[progress]\nstorage = \"cloud\"\n").unwrap_err();
        assert!(matches!(err, CoursedagError::TomlError(_)));
    }

    #[test]
    fn file_storage_needs_a_path() {
        let err = parse("[progress]\nstorage = \"file\"\npath = \"\"\n").unwrap_err();
        assert!(err.to_string().contains("[progress].path"));
    }
}
