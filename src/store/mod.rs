//! Flat-file JSON persistence.
//!
//! The whole database is one JSON document, read at startup and rewritten
//! wholesale on every mutation. Reads hand out snapshots (clones) so the
//! reporting core only ever sees immutable in-memory state; a single
//! in-process write lock serializes mutations. Cross-process writers are not
//! coordinated: last write wins, which is an accepted property of this
//! system's scale.

pub mod backup;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::models::{DispatchRecord, Material, Operator, Product, ProductionLogEntry};

pub use backup::BackupPolicy;

/// Errors from the flat-file store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The entire persisted dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Database {
    pub materials: Vec<Material>,
    pub products: Vec<Product>,
    pub operators: Vec<Operator>,
    pub production_logs: Vec<ProductionLogEntry>,
    pub dispatch_logs: Vec<DispatchRecord>,
}

/// Whole-document JSON store with snapshot reads and serialized writes.
pub struct JsonStore {
    path: PathBuf,
    backup: Option<BackupPolicy>,
    state: RwLock<Database>,
}

impl JsonStore {
    /// Opens the store, creating the data directory and an empty database
    /// file when none exists yet.
    pub async fn open(
        path: impl Into<PathBuf>,
        backup: Option<BackupPolicy>,
    ) -> Result<Self, StoreError> {
        let path = path.into();

        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        let state = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let db = Database::default();
                write_document(&path, &db).await?;
                info!(path = %path.display(), "initialized empty data file");
                db
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            path,
            backup,
            state: RwLock::new(state),
        })
    }

    /// Path of the backing data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Clones the current dataset for read-only computation.
    pub async fn snapshot(&self) -> Database {
        self.state.read().await.clone()
    }

    /// Re-parses the data file from disk, bypassing the in-memory state.
    ///
    /// Surfaces external corruption or deletion of the file; callers that
    /// must never fail (batch id allocation) degrade on the error.
    pub async fn read_from_disk(&self) -> Result<Database, StoreError> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Applies a mutation and rewrites the data file.
    ///
    /// Takes the daily backup of the previous on-disk state first
    /// (best-effort), then persists the mutated document. The in-memory
    /// state and the file move together under the write lock.
    pub async fn mutate<T>(
        &self,
        apply: impl FnOnce(&mut Database) -> T,
    ) -> Result<T, StoreError> {
        let mut state = self.state.write().await;

        if let Some(policy) = &self.backup {
            if let Err(err) = policy.snapshot_if_due(&self.path).await {
                warn!(error = %err, "daily backup failed; continuing with write");
            }
        }

        let result = apply(&mut state);
        write_document(&self.path, &state).await?;
        Ok(result)
    }
}

async fn write_document(path: &Path, db: &Database) -> Result<(), StoreError> {
    let body = serde_json::to_vec_pretty(db)?;
    tokio::fs::write(path, body).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_creates_an_empty_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("db.json");

        let store = JsonStore::open(&path, None).await.unwrap();
        assert!(path.exists());
        let snapshot = store.snapshot().await;
        assert!(snapshot.products.is_empty());
        assert!(snapshot.production_logs.is_empty());
    }

    #[tokio::test]
    async fn mutations_survive_a_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");

        {
            let store = JsonStore::open(&path, None).await.unwrap();
            store
                .mutate(|db| {
                    db.operators.push(Operator {
                        id: "OP-1".into(),
                        name: "Asha".into(),
                    });
                })
                .await
                .unwrap();
        }

        let reopened = JsonStore::open(&path, None).await.unwrap();
        let snapshot = reopened.snapshot().await;
        assert_eq!(snapshot.operators.len(), 1);
        assert_eq!(snapshot.operators[0].name, "Asha");
    }

    #[tokio::test]
    async fn legacy_documents_with_missing_collections_still_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        tokio::fs::write(&path, br#"{"products": [], "productionLogs": []}"#)
            .await
            .unwrap();

        let store = JsonStore::open(&path, None).await.unwrap();
        let snapshot = store.snapshot().await;
        assert!(snapshot.dispatch_logs.is_empty());
        assert!(snapshot.materials.is_empty());
    }
}
