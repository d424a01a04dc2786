//! Sync source backed by a saved response on disk.

use super::response::{SyncRequest, SyncResponse};
use super::{SyncError, SyncResult, SyncSource};
use std::path::{Path, PathBuf};

/// Serves the same saved sync response for every request.
#[derive(Debug, Clone)]
pub struct FileSyncSource {
    path: PathBuf,
}

impl FileSyncSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SyncSource for FileSyncSource {
    fn fetch(&self, _request: &SyncRequest) -> SyncResult<SyncResponse> {
        let bytes = std::fs::read(&self.path).map_err(|source| SyncError::Io {
            path: self.path.clone(),
            source,
        })?;
        SyncResponse::from_slice(&bytes)
    }
}
