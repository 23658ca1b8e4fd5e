use serde::{de::DeserializeOwned, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::log_debug;
use crate::shared::errors::{AppError, AppResult};

/// One JSON document on disk, read and written whole.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves either the old or the new document, never half of
/// one.
#[derive(Debug, Clone)]
pub struct JsonDocumentFile {
    path: PathBuf,
}

impl JsonDocumentFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `Ok(None)` when the document does not exist yet (or is an
    /// empty file), `MalformedData` when it exists but does not parse.
    pub async fn read<T: DeserializeOwned>(&self) -> AppResult<Option<T>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log_debug!("{} does not exist yet", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        if contents.trim().is_empty() {
            return Ok(None);
        }

        let value = serde_json::from_str(&contents).map_err(|e| {
            AppError::MalformedData(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(Some(value))
    }

    pub async fn write<T: Serialize + ?Sized>(&self, value: &T) -> AppResult<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| AppError::InternalError(format!("Failed to encode document: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, json.as_bytes()).await?;

        if let Err(e) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
