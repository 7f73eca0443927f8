//! Persists materialized chunks as text artifacts.

use crate::error::Result;
use crate::materializer::Chunk;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes one artifact per chunk into a fixed output directory.
#[derive(Debug, Clone)]
pub struct ChunkWriter {
    output_dir: PathBuf,
}

impl ChunkWriter {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write `chunk` to `<output_dir>/<root>.txt`, creating the directory
    /// and overwriting any prior artifact for the same root, so re-runs
    /// from an unchanged store are idempotent. Returns the written path.
    pub fn persist(&self, chunk: &Chunk) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(chunk.root.file_name());
        fs::write(&path, chunk.text())?;
        log::info!("Chunk created for {}: {}", chunk.root, path.display());
        Ok(path)
    }
}
