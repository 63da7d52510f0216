//! Storage locator resolution
//!
//! Turns the opaque locator stored with a content entry into a
//! [`ResourceHandle`]. Only the locator's syntax is checked here; whether the
//! object exists is left to the handle's probes.
//!
//! Accepted forms:
//! - `file://` URLs naming a local path
//! - absolute filesystem paths
//! - relative paths, joined onto the configured media root

use std::path::{Component, Path, PathBuf};
use url::Url;

use crate::domain::ResourceHandle;
use crate::error::ResolutionError;

#[derive(Debug, Clone, Default)]
pub struct ResourceResolver {
    media_root: Option<PathBuf>,
}

impl ResourceResolver {
    pub fn new(media_root: Option<PathBuf>) -> Self {
        Self { media_root }
    }

    pub fn media_root(&self) -> Option<&Path> {
        self.media_root.as_deref()
    }

    pub fn resolve(&self, locator: &str) -> Result<ResourceHandle, ResolutionError> {
        if locator.trim().is_empty() {
            return Err(ResolutionError::malformed(locator, "empty locator"));
        }
        if locator.contains('\0') {
            return Err(ResolutionError::malformed(locator, "locator contains NUL"));
        }

        let path = if locator.contains("://") || locator.starts_with("file:") {
            Self::path_from_url(locator)?
        } else {
            self.path_from_fs(locator)?
        };

        Ok(ResourceHandle::new(locator, path))
    }

    fn path_from_url(locator: &str) -> Result<PathBuf, ResolutionError> {
        let url = Url::parse(locator)
            .map_err(|e| ResolutionError::malformed(locator, format!("invalid URL: {}", e)))?;

        if url.scheme() != "file" {
            return Err(ResolutionError::malformed(
                locator,
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        url.to_file_path()
            .map_err(|_| ResolutionError::malformed(locator, "file URL does not name a local path"))
    }

    fn path_from_fs(&self, locator: &str) -> Result<PathBuf, ResolutionError> {
        let path = Path::new(locator);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }

        if path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return Err(ResolutionError::malformed(
                locator,
                "relative locator escapes the media root",
            ));
        }

        match &self.media_root {
            Some(root) => Ok(root.join(path)),
            None => Err(ResolutionError::malformed(
                locator,
                "relative locator without a configured media root",
            )),
        }
    }
}
