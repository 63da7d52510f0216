//! Readable form of a content entry's storage locator.
//!
//! A handle is produced without touching storage. Each probe below hits the
//! filesystem at call time and is never cached, so repeated calls observe the
//! current state of the backing file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::ResolutionError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceHandle {
    locator: String,
    path: PathBuf,
    display_name: String,
}

/// Snapshot of a handle's probes taken at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceStatus {
    pub exists: bool,
    pub readable: bool,
    /// `None` when the object exists but its size cannot be determined.
    pub content_length: Option<u64>,
}

impl ResourceHandle {
    pub(crate) fn new(locator: &str, path: PathBuf) -> Self {
        let display_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| locator.to_string());

        Self {
            locator: locator.to_string(),
            path,
            display_name,
        }
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub async fn exists(&self) -> Result<bool, ResolutionError> {
        tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| ResolutionError::unavailable(&self.locator, e.to_string()))
    }

    /// A regular file that can be opened for reading.
    pub async fn is_readable(&self) -> Result<bool, ResolutionError> {
        match tokio::fs::metadata(&self.path).await {
            Ok(meta) if meta.is_file() => match tokio::fs::File::open(&self.path).await {
                Ok(_) => Ok(true),
                Err(e) if e.kind() == ErrorKind::PermissionDenied => Ok(false),
                Err(e) => Err(ResolutionError::unavailable(&self.locator, e.to_string())),
            },
            Ok(_) => Ok(false),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ResolutionError::unavailable(&self.locator, e.to_string())),
        }
    }

    /// Byte length of the object. Fails for missing objects and for anything
    /// that is not a regular file.
    pub async fn content_length(&self) -> Result<u64, ResolutionError> {
        let meta = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| ResolutionError::unavailable(&self.locator, e.to_string()))?;

        if !meta.is_file() {
            return Err(ResolutionError::unavailable(
                &self.locator,
                "size is indeterminate for a non-regular file",
            ));
        }
        Ok(meta.len())
    }

    /// Run every probe once. A missing object is a status, not an error; an
    /// I/O failure while checking existence or readability is returned as is.
    pub async fn probe(&self) -> Result<ResourceStatus, ResolutionError> {
        if !self.exists().await? {
            return Ok(ResourceStatus {
                exists: false,
                readable: false,
                content_length: None,
            });
        }

        Ok(ResourceStatus {
            exists: true,
            readable: self.is_readable().await?,
            content_length: self.content_length().await.ok(),
        })
    }
}
