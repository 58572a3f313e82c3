// src/fs/mod.rs

//! Filesystem seam for catalog files and the persisted completed set.

use std::fmt::Debug;
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

pub mod mock;

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    fn read_to_string(&self, path: &Path) -> Result<String>;
    /// Write `contents`, creating parent directories as needed.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("reading file {:?}", path))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating dir {:?}", parent))?;
            }
        }

        // Readers see either the old file or the new one, never a partial write.
        let tmp = path.with_extension("tmp");
        let mut file =
            fs::File::create(&tmp).with_context(|| format!("creating file {:?}", tmp))?;
        file.write_all(contents)
            .with_context(|| format!("writing to file {:?}", tmp))?;
        file.sync_all()
            .with_context(|| format!("syncing file {:?}", tmp))?;
        fs::rename(&tmp, path).with_context(|| format!("renaming {:?} to {:?}", tmp, path))?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
