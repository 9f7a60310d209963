use crate::error::{AppError, Result};
use crate::metrics::{record_store_operation, StoreOperation};
use crate::models::{Incident, IncidentSubmission};
use crate::state::{next_identifier, IncidentStore};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use validator::Validate;

/// Persisted identifier counter, kept next to the store document
#[derive(Debug, Default, Serialize, Deserialize)]
struct Sequence {
    last_id: u64,
}

/// Incident store backed by a single JSON document.
///
/// The document is a top-level array of incidents, rewritten in full on
/// every append. Writes go to a sibling `.tmp` file that is renamed over
/// the target, so a failed write leaves the previous content intact.
/// Identifiers come from a `<store>.seq` counter file rather than the
/// record count.
///
/// Appends on one instance are serialized; separate processes sharing the
/// same file are not coordinated.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store over the given document path. Nothing is touched on
    /// disk until the first append.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        tracing::info!(path = %path.display(), "Initialized JSON file store");

        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the store document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the identifier counter file
    pub fn sequence_path(&self) -> PathBuf {
        sibling(&self.path, ".seq")
    }

    async fn read_incidents(&self) -> Result<Vec<Incident>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Incident store is unreadable");
            AppError::StoreCorrupt {
                path: self.path.display().to_string(),
                message: e.to_string(),
            }
        })
    }

    async fn read_last_id(&self) -> Result<u64> {
        let path = self.sequence_path();
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let sequence: Sequence =
            serde_json::from_slice(&bytes).map_err(|e| AppError::StoreCorrupt {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Ok(sequence.last_id)
    }

    async fn write_incidents(&self, incidents: &[Incident]) -> Result<()> {
        let json = serde_json::to_vec_pretty(incidents)?;
        write_atomic(&self.path, &json).await
    }

    async fn write_last_id(&self, last_id: u64) -> Result<()> {
        let json = serde_json::to_vec(&Sequence { last_id })?;
        write_atomic(&self.sequence_path(), &json).await
    }
}

#[async_trait]
impl IncidentStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Incident>> {
        let start = Instant::now();
        let incidents = self.read_incidents().await?;

        record_store_operation(
            StoreOperation::Load,
            self.backend_name(),
            start.elapsed().as_secs_f64(),
        );
        Ok(incidents)
    }

    async fn append(&self, submission: IncidentSubmission) -> Result<Incident> {
        // Reject before any I/O so a bad submission never touches the store.
        submission.validate()?;

        let start = Instant::now();
        let _guard = self.write_lock.lock().await;

        let mut incidents = self.read_incidents().await?;
        let last_id = self.read_last_id().await?;
        let id = next_identifier(last_id, &incidents)?;

        let incident = submission.into_incident(id, Incident::timestamp_now())?;
        incidents.push(incident.clone());

        self.write_incidents(&incidents).await?;
        // The store already holds `id`; a lost counter write is recovered
        // from the highest stored id on the next append.
        if let Err(e) = self.write_last_id(id).await {
            tracing::warn!(
                path = %self.sequence_path().display(),
                error = %e,
                "Failed to persist identifier counter"
            );
        }

        record_store_operation(
            StoreOperation::Append,
            self.backend_name(),
            start.elapsed().as_secs_f64(),
        );
        tracing::debug!(incident_id = id, total = incidents.len(), "Incident saved to JSON store");
        Ok(incident)
    }

    fn backend_name(&self) -> &'static str {
        "json_file"
    }
}

/// `path` with `suffix` appended to its file name
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Replace `target` with `bytes` via a flushed temporary file and a rename
async fn write_atomic(target: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    let tmp = sibling(target, ".tmp");
    let result: std::io::Result<()> = async {
        let mut file = fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&tmp, target).await
    }
    .await;

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}
