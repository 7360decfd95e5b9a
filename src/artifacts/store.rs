// ABOUTME: Opaque artifact blob store abstraction and filesystem implementation
// ABOUTME: Distinguishes missing artifacts from unreadable ones for degraded reporting
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Opaque artifact storage seam.
//!
//! The engine treats persisted artifacts as named byte blobs; the physical
//! storage format is an external concern. [`FilesystemArtifactStore`] is the
//! default implementation, reading blobs from a configured directory.

use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Read-only store of named artifact blobs
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Read a named artifact in full.
    ///
    /// # Errors
    /// [`AppError::ArtifactMissing`] when the artifact does not exist,
    /// [`AppError::ArtifactLoad`] when it exists but cannot be read.
    async fn read(&self, name: &str) -> AppResult<Vec<u8>>;
}

/// Artifact store backed by a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct FilesystemArtifactStore {
    root: PathBuf,
}

impl FilesystemArtifactStore {
    /// Create a store rooted at the given directory
    #[must_use]
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Directory this store reads from
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ArtifactStore for FilesystemArtifactStore {
    async fn read(&self, name: &str) -> AppResult<Vec<u8>> {
        let path = self.root.join(name);
        tokio::fs::read(&path).await.map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                AppError::artifact_missing(name)
            } else {
                AppError::artifact_load(format!("failed to read {}: {err}", path.display()))
            }
        })
    }
}
