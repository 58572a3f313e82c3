// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! The graph core (levels, layout, availability) never returns these: it
//! resolves malformed input fail-soft. Errors only come from the edges of the
//! crate (config, catalog files, progress storage, CLI lookups).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoursedagError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Course not found: {0}")]
    UnknownCourse(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, CoursedagError>;
