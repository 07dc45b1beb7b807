//! Loading type models from strings, files and directories.
//!
//! ```no_run
//! use annotation_schema_catalog::TypeModel;
//!
//! // A single YAML or JSON model file
//! let model = TypeModel::from_path("models/person.yaml").unwrap();
//!
//! // Every *.json, *.yaml and *.yml file in a directory, merged
//! let model = TypeModel::from_dir("models/").unwrap();
//! println!("loaded {} types", model.len());
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::document::ModelDocument;
use crate::error::{CatalogError, Result};
use crate::model::TypeModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModelFormat {
    Json,
    Yaml,
}

impl ModelFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(Self::Json),
            Some("yaml" | "yml") => Some(Self::Yaml),
            _ => None,
        }
    }
}

fn read_document(path: &Path, format: ModelFormat) -> Result<ModelDocument> {
    let raw = std::fs::read_to_string(path)?;
    let document = match format {
        ModelFormat::Json => serde_json::from_str(&raw)?,
        ModelFormat::Yaml => serde_yaml::from_str(&raw)?,
    };
    Ok(document)
}

impl TypeModel {
    /// Parses a model from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::JsonError`] if parsing fails, or any
    /// resolution error from [`TypeModel::from_documents`].
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let document: ModelDocument = serde_json::from_str(raw)?;
        Self::from_document(document)
    }

    /// Parses a model from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::YamlError`] if parsing fails, or any
    /// resolution error from [`TypeModel::from_documents`].
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let document: ModelDocument = serde_yaml::from_str(raw)?;
        Self::from_document(document)
    }

    /// Loads a model file, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnsupportedFormat`] for other extensions,
    /// [`CatalogError::IoError`] if the file cannot be read, or a parse or
    /// resolution error.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = ModelFormat::from_path(path)
            .ok_or_else(|| CatalogError::UnsupportedFormat(path.to_path_buf()))?;
        let model = Self::from_document(read_document(path, format)?)?;
        info!(path = %path.display(), types = model.len(), "Loaded type model");
        Ok(model)
    }

    /// Loads and merges every model file in a directory.
    ///
    /// Files are read in name order; files with other extensions are
    /// skipped. Subdirectories are not descended into.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::IoError`] if the directory or a file cannot
    /// be read, or a parse or resolution error.
    pub fn from_dir(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut files: Vec<(PathBuf, ModelFormat)> = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let file_path = entry?.path();
            if !file_path.is_file() {
                continue;
            }
            match ModelFormat::from_path(&file_path) {
                Some(format) => files.push((file_path, format)),
                None => debug!(path = %file_path.display(), "Skipping non-model file"),
            }
        }
        files.sort_by(|a, b| a.0.cmp(&b.0));

        let documents = files
            .iter()
            .map(|(file, format)| read_document(file, *format))
            .collect::<Result<Vec<_>>>()?;
        let model = Self::from_documents(documents)?;

        info!(
            path = %path.display(),
            files = files.len(),
            types = model.len(),
            "Loaded type model directory"
        );
        Ok(model)
    }
}
