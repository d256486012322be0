//! Vault file storage.
//!
//! Destination paths are vault-relative; `VaultFileStore` resolves them against a root
//! directory and refuses anything that would land outside it.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::types::errors::FileStoreError;

/// What a vault path currently points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

/// Host file storage: look up, create, and append to text files by vault path.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Returns `None` when nothing exists at `path`.
    async fn entry_kind(&self, path: &str) -> Result<Option<EntryKind>, FileStoreError>;
    /// Creates a new file with `content`. Fails if the file already exists.
    async fn create(&self, path: &str, content: &str) -> Result<(), FileStoreError>;
    /// Appends `content` to an existing file as one write.
    async fn append(&self, path: &str, content: &str) -> Result<(), FileStoreError>;
}

/// File store rooted at a vault directory on the local file system.
#[derive(Debug, Clone)]
pub struct VaultFileStore {
    root: PathBuf,
}

impl VaultFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a vault-relative path onto the file system.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, FileStoreError> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(FileStoreError::InvalidPath("path is empty".to_string()));
        }

        let mut resolved = self.root.clone();
        let mut has_name = false;
        for component in Path::new(trimmed).components() {
            match component {
                Component::Normal(part) => {
                    resolved.push(part);
                    has_name = true;
                }
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(FileStoreError::InvalidPath(trimmed.to_string()));
                }
            }
        }

        if !has_name {
            return Err(FileStoreError::InvalidPath(trimmed.to_string()));
        }
        Ok(resolved)
    }
}

#[async_trait]
impl FileStore for VaultFileStore {
    async fn entry_kind(&self, path: &str) -> Result<Option<EntryKind>, FileStoreError> {
        let full = self.resolve(path)?;
        match fs::metadata(&full).await {
            Ok(meta) if meta.is_file() => Ok(Some(EntryKind::File)),
            Ok(meta) if meta.is_dir() => Ok(Some(EntryKind::Directory)),
            Ok(_) => Ok(Some(EntryKind::Other)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FileStoreError::Io(format!("{}: {}", full.display(), e))),
        }
    }

    async fn create(&self, path: &str, content: &str) -> Result<(), FileStoreError> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| FileStoreError::Io(format!("{}: {}", parent.display(), e)))?;
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full)
            .await
            .map_err(|e| FileStoreError::Io(format!("{}: {}", full.display(), e)))?;
        file.write_all(content.as_bytes())
            .await
            .map_err(|e| FileStoreError::Io(format!("{}: {}", full.display(), e)))?;
        file.flush()
            .await
            .map_err(|e| FileStoreError::Io(format!("{}: {}", full.display(), e)))
    }

    async fn append(&self, path: &str, content: &str) -> Result<(), FileStoreError> {
        let full = self.resolve(path)?;
        let mut file = OpenOptions::new()
            .append(true)
            .open(&full)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => FileStoreError::NotFound(path.to_string()),
                _ => FileStoreError::Io(format!("{}: {}", full.display(), e)),
            })?;
        file.write_all(content.as_bytes())
            .await
            .map_err(|e| FileStoreError::Io(format!("{}: {}", full.display(), e)))?;
        file.flush()
            .await
            .map_err(|e| FileStoreError::Io(format!("{}: {}", full.display(), e)))
    }
}
