//! Best-effort daily snapshots of the data file.
//!
//! Before the first overwrite of each calendar day, the current on-disk
//! document is copied to `backups/db-YYYY-MM-DD.json`. When a backup key is
//! configured, an HMAC-SHA256 tag sidecar (`.sha256`) is written alongside so
//! a restored snapshot can be checked for tampering or truncation. Backups
//! never block or fail a write; errors are reported to the caller and logged
//! there at `warn`.

use std::path::{Path, PathBuf};

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{debug, info};

use super::StoreError;

type HmacSha256 = Hmac<Sha256>;

/// Where and how daily snapshots are taken.
#[derive(Debug, Clone)]
pub struct BackupPolicy {
    dir: PathBuf,
    hmac_key: Option<Vec<u8>>,
}

impl BackupPolicy {
    /// Policy writing plain snapshots into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            hmac_key: None,
        }
    }

    /// Adds an integrity key; snapshots gain an HMAC-SHA256 sidecar.
    pub fn with_hmac_key(mut self, key: Vec<u8>) -> Self {
        self.hmac_key = Some(key);
        self
    }

    fn backup_path_for_today(&self) -> PathBuf {
        let today = Utc::now().date_naive();
        self.dir.join(format!("db-{today}.json"))
    }

    /// Copies `data_file` into the backup directory unless today's snapshot
    /// already exists. Returns the snapshot path when one was taken.
    pub async fn snapshot_if_due(&self, data_file: &Path) -> Result<Option<PathBuf>, StoreError> {
        let target = self.backup_path_for_today();

        if tokio::fs::try_exists(&target).await? {
            debug!(target = %target.display(), "daily backup already present");
            return Ok(None);
        }
        if !tokio::fs::try_exists(data_file).await? {
            return Ok(None);
        }

        tokio::fs::create_dir_all(&self.dir).await?;
        let body = tokio::fs::read(data_file).await?;
        tokio::fs::write(&target, &body).await?;

        if let Some(key) = &self.hmac_key {
            let tag = integrity_tag(key, &body);
            tokio::fs::write(target.with_extension("json.sha256"), tag).await?;
        }

        info!(target = %target.display(), "daily backup written");
        Ok(Some(target))
    }
}

/// Hex HMAC-SHA256 tag over a snapshot body.
pub fn integrity_tag(key: &[u8], body: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(key).expect("HMAC-SHA256 accepts keys of any length");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a snapshot body against its stored hex tag.
pub fn verify_integrity_tag(key: &[u8], body: &[u8], tag: &str) -> bool {
    integrity_tag(key, body) == tag
}
