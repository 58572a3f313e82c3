// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
///
/// Relative `[catalog].path` and `[progress].path` values are resolved
/// against the directory containing the config file.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let raw_config = load_from_path(path)?;
    let mut config = ConfigFile::try_from(raw_config)?;

    let base = config_root_dir(path);
    if let Some(ref catalog) = config.catalog.path {
        config.catalog.path = Some(resolve_relative(&base, catalog));
    }
    config.progress.path = resolve_relative(&base, &config.progress.path);

    info!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Load the config at `path`, or fall back to defaults when `path` is the
/// default location and no such file exists.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    if path == default_config_path() && !path.exists() {
        info!("no {} found; using default configuration", path.display());
        return ConfigFile::try_from(RawConfigFile::default());
    }
    load_and_validate(path)
}

/// Default config location: `Coursedag.toml` in the current directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Coursedag.toml")
}

/// Directory a config file lives in; `.` for a bare file name.
fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn resolve_relative(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() || base == Path::new(".") {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_resolve_against_config_dir() {
        let base = config_root_dir(Path::new("configs/Coursedag.toml"));
        assert_eq!(base, PathBuf::from("configs"));
        assert_eq!(
            resolve_relative(&base, Path::new("data/catalog.json")),
            PathBuf::from("configs/data/catalog.json")
        );
    }

    #[test]
    fn bare_config_name_keeps_paths_as_is() {
        let base = config_root_dir(Path::new("Coursedag.toml"));
        assert_eq!(
            resolve_relative(&base, Path::new("data/catalog.json")),
            PathBuf::from("data/catalog.json")
        );
    }
}
