//! Core file-store logic: no Hyper types here.

use std::path::{Path, PathBuf};

use multer::{Field, Multipart};
use serde::Serialize;
use tokio::{
    fs,
    io::{self, AsyncWriteExt},
};

use crate::sys_fileapi::{error::StoreError, filename::FileName};

/// Multipart field that carries uploaded files.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub files: Vec<String>,
}

/// An opened stored file ready to be streamed back.
#[derive(Debug)]
pub struct StoredFile {
    pub name: FileName,
    pub file: fs::File,
    pub len: u64,
}

/// A flat directory of files keyed by name.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the store directory if it does not exist yet.
    pub async fn ensure_root(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    fn path_of(&self, name: &FileName) -> PathBuf {
        self.root.join(name.as_str())
    }

    /// Store every `file` part of `multipart` and return the stored names.
    ///
    /// Parts under other field names, and parts without a filename, are skipped.
    pub async fn store_multipart(
        &self,
        mut multipart: Multipart<'_>,
    ) -> Result<Vec<FileName>, StoreError> {
        let mut stored = Vec::new();
        while let Some(field) = multipart.next_field().await? {
            if field.name() != Some(UPLOAD_FIELD) {
                continue;
            }
            let name = match field.file_name() {
                Some(raw) if !raw.is_empty() => FileName::parse(raw)?,
                _ => continue,
            };
            self.save_field(&name, field).await?;
            stored.push(name);
        }

        if stored.is_empty() {
            return Err(StoreError::NoFileProvided);
        }
        Ok(stored)
    }

    /// Stream one part to disk under `name`, replacing any existing file.
    pub async fn save_field(&self, name: &FileName, field: Field<'_>) -> Result<u64, StoreError> {
        let path = self.path_of(name);
        match write_field(&path, field).await {
            Ok(written) => {
                tracing::info!(file = %name, bytes = written, "stored upload");
                Ok(written)
            }
            Err(e) => {
                if let Err(cleanup) = fs::remove_file(&path).await {
                    if cleanup.kind() != io::ErrorKind::NotFound {
                        tracing::warn!(file = %name, "could not remove partial upload: {cleanup}");
                    }
                }
                Err(e)
            }
        }
    }

    /// Names of every entry in the store directory, sorted.
    pub async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut dir = fs::read_dir(&self.root).await?;
        let mut names = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    /// Open a stored file for reading. Anything that is not a regular file is
    /// reported as missing.
    pub async fn open(&self, name: &FileName) -> Result<StoredFile, StoreError> {
        let path = self.path_of(name);
        let meta = fs::metadata(&path).await.map_err(not_found_or_io)?;
        if !meta.is_file() {
            return Err(StoreError::NotFound);
        }
        let file = fs::File::open(&path).await.map_err(not_found_or_io)?;
        Ok(StoredFile {
            name: name.clone(),
            file,
            len: meta.len(),
        })
    }

    /// Delete a stored file.
    pub async fn remove(&self, name: &FileName) -> Result<(), StoreError> {
        fs::remove_file(self.path_of(name))
            .await
            .map_err(not_found_or_io)?;
        tracing::info!(file = %name, "removed file");
        Ok(())
    }
}

async fn write_field(path: &Path, mut field: Field<'_>) -> Result<u64, StoreError> {
    let mut file = fs::File::create(path).await?;
    let mut written = 0u64;
    while let Some(chunk) = field.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    file.sync_all().await?;
    Ok(written)
}

fn not_found_or_io(e: io::Error) -> StoreError {
    if e.kind() == io::ErrorKind::NotFound {
        StoreError::NotFound
    } else {
        StoreError::Io(e)
    }
}
