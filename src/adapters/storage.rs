use crate::core::Storage;
use crate::utils::error::{Result, ShoppiesError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-backed key-value store: each key is one file under `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(ShoppiesError::InvalidConfigValueError {
                field: "storage.key".to_string(),
                value: key.to_string(),
                reason: "Keys must be non-empty and contain no path separators".to_string(),
            });
        }
        Ok(self.base_path.join(key))
    }
}

impl Storage for LocalStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No stored value for '{}'", key);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        tokio::fs::create_dir_all(&self.base_path).await?;
        tokio::fs::write(&path, value).await?;
        tracing::debug!("Stored '{}' ({} bytes)", key, value.len());
        Ok(())
    }
}
