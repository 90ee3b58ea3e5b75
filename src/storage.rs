use crate::export::ExportBundle;
use crate::overlay::TransformDocument;
use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// File I/O for the two input formats and the two export documents.
///
/// Failures here are whole-file load failures: they are reported to the
/// caller and leave any previously loaded state untouched.
pub struct Storage {
    out_dir: PathBuf,
}

impl Storage {
    pub fn new(out_dir: impl AsRef<Path>) -> Self {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Read a GEDCOM source file as raw bytes. Decoding happens in the load
    /// pipeline, which is tolerant of non-UTF-8 sequences.
    pub fn read_source(path: impl AsRef<Path>) -> Result<Vec<u8>> {
        let path = path.as_ref();
        fs::read(path).with_context(|| format!("failed to read {}", path.display()))
    }

    /// Load a `.gedTransform` JSON file
    pub fn load_transforms(path: impl AsRef<Path>) -> Result<TransformDocument> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let document: TransformDocument = serde_json::from_str(&content)
            .with_context(|| format!("{} is not a valid transformation file", path.display()))?;
        Ok(document)
    }

    /// Write both export documents with a shared timestamp. Returns the
    /// transformation file path and the merged dataset path.
    pub fn save_exports(&self, bundle: &ExportBundle) -> Result<(PathBuf, PathBuf)> {
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("failed to create {}", self.out_dir.display()))?;

        let stamp = Local::now().format("%Y-%m-%d-%H%M%S");

        let transform_path = self
            .out_dir
            .join(format!("transformations-{stamp}.gedTransform"));
        let transform_json = serde_json::to_string_pretty(&bundle.transform_document)?;
        fs::write(&transform_path, transform_json)
            .with_context(|| format!("failed to write {}", transform_path.display()))?;

        let data_path = self.out_dir.join(format!("data-{stamp}.json"));
        let data_json = serde_json::to_string_pretty(&bundle.merged)?;
        fs::write(&data_path, data_json)
            .with_context(|| format!("failed to write {}", data_path.display()))?;

        Ok((transform_path, data_path))
    }
}
