//! The binary artifact store seam.
//!
//! The pipeline does not know where artifacts end up. It talks to an
//! [`ArtifactStore`] trait object injected through the configuration — the
//! production deployment supplies a client for its object store (GridFS,
//! S3, …), tests supply in-memory mocks with failure knobs, and the CLI
//! uses the bundled [`FsStore`].
//!
//! The contract is deliberately small: one `put` that atomically owns the
//! write of bytes plus metadata and returns the store-assigned id, and one
//! best-effort `exists` used for post-write verification. `exists` is
//! infallible by design — an implementation that cannot answer reports
//! `false`, and the persistence stage treats that as a verification failure
//! rather than a distinct error channel.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::StoreError;

/// Receipt for one persisted artifact.
#[derive(Debug, Clone, Serialize)]
pub struct StoredRecord {
    /// Store-assigned opaque identifier; the pipeline's success value.
    pub id: String,
    /// Filename the artifact was stored under.
    pub filename: String,
    /// Flat metadata written alongside the bytes.
    pub metadata: BTreeMap<String, String>,
}

/// A content store that can persist one binary artifact with metadata.
///
/// Implementations must be safe for concurrent use; each pipeline run calls
/// `put` at most once.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Write `bytes` under `filename` with `metadata`, returning the
    /// store-assigned id.
    async fn put(
        &self,
        bytes: &[u8],
        filename: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<String, StoreError>;

    /// Best-effort existence check by id. Errors report as `false`.
    async fn exists(&self, id: &str) -> bool;
}

/// Content-addressed directory store.
///
/// The id is the SHA-1 digest of the artifact bytes; the artifact lands at
/// `<root>/<id>.pdf` with a `<root>/<id>.json` side file carrying the
/// filename and metadata. Identical bytes overwrite in place, which is
/// harmless because the content (and therefore the id) is equal.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

#[derive(Serialize)]
struct SideFile<'a> {
    filename: &'a str,
    metadata: &'a BTreeMap<String, String>,
}

impl FsStore {
    /// Open a store rooted at `root`. The directory is created on first
    /// `put`, not here, so opening is infallible.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn artifact_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.pdf"))
    }

    fn side_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }
}

#[async_trait]
impl ArtifactStore for FsStore {
    async fn put(
        &self,
        bytes: &[u8],
        filename: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<String, StoreError> {
        let write_err = |e: std::io::Error| StoreError::Write {
            detail: e.to_string(),
        };

        let mut sha = sha1_smol::Sha1::new();
        sha.update(bytes);
        let id = sha.digest().to_string();

        tokio::fs::create_dir_all(&self.root).await.map_err(write_err)?;
        tokio::fs::write(self.artifact_path(&id), bytes)
            .await
            .map_err(write_err)?;

        let side = serde_json::to_vec_pretty(&SideFile { filename, metadata })
            .map_err(|e| StoreError::Write {
                detail: e.to_string(),
            })?;
        tokio::fs::write(self.side_path(&id), side)
            .await
            .map_err(write_err)?;

        Ok(id)
    }

    async fn exists(&self, id: &str) -> bool {
        tokio::fs::try_exists(self.artifact_path(id))
            .await
            .unwrap_or(false)
    }
}
