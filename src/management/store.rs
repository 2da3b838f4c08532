//! JSON file holding the credential document between runs.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;
use serde_json::Value;

use crate::error::{Res, ScrobblerError};

/// Credential document kept in a JSON file.
pub struct CredentialStore {
    path: PathBuf,
    document: Value,
}

impl CredentialStore {
    /// Reads the document at `path`.
    ///
    /// # Errors
    ///
    /// A file that cannot be read or does not hold JSON is a
    /// [`ScrobblerError::Config`]: the job cannot run without credentials.
    pub fn load(path: impl AsRef<Path>) -> Res<Self> {
        let path = path.as_ref().to_path_buf();
        let content = fs::read_to_string(&path).map_err(|e| {
            ScrobblerError::Config(format!(
                "cannot read credentials from {}: {}",
                path.display(),
                e
            ))
        })?;
        let document: Value = serde_json::from_str(&content).map_err(|e| {
            ScrobblerError::Config(format!("{} is not valid JSON: {}", path.display(), e))
        })?;

        debug!("loaded credentials from {}", path.display());
        Ok(Self { path, document })
    }

    /// Replaces the held document and writes it to disk.
    pub fn persist(&mut self, document: Value) -> Res<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| ScrobblerError::Config(e.to_string()))?;
        fs::write(&self.path, json)?;
        self.document = document;

        debug!("stored credentials in {}", self.path.display());
        Ok(())
    }

    /// The document as last loaded or persisted.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// File the document is read from and written to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
