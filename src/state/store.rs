use crate::error::{AppError, Result};
use crate::metrics::{record_store_operation, StoreOperation};
use crate::models::{Incident, IncidentSubmission};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use validator::Validate;

/// Trait for incident storage operations
///
/// A store is an ordered sequence of incidents; insertion order is kept and
/// is the chronological order callers fall back on.
#[async_trait]
pub trait IncidentStore: Send + Sync {
    /// Every persisted incident, in insertion order.
    ///
    /// A store that has never been written is empty, not an error.
    async fn load(&self) -> Result<Vec<Incident>>;

    /// Validate a submission, assign `id` and `timestamp`, and persist it.
    ///
    /// A submission missing a required field fails with
    /// `AppError::Validation` and leaves the store untouched.
    async fn append(&self, submission: IncidentSubmission) -> Result<Incident>;

    /// First incident with the given id, or `None`
    async fn get_by_id(&self, id: u64) -> Result<Option<Incident>> {
        let start = Instant::now();
        let found = self.load().await?.into_iter().find(|incident| incident.id == id);

        record_store_operation(
            StoreOperation::GetById,
            self.backend_name(),
            start.elapsed().as_secs_f64(),
        );
        Ok(found)
    }

    /// Short backend label for logs and metrics
    fn backend_name(&self) -> &'static str;
}

/// Identifier for the next appended incident.
///
/// Takes the larger of the persisted counter and the highest id present, so
/// ids keep increasing even if records are removed or the counter is lost.
/// Fails once `u64::MAX` has been issued.
pub fn next_identifier(last_issued: u64, incidents: &[Incident]) -> Result<u64> {
    let highest = incidents.iter().map(|incident| incident.id).max().unwrap_or(0);
    highest.max(last_issued).checked_add(1).ok_or_else(|| {
        AppError::Internal(format!("identifier space exhausted after {}", u64::MAX))
    })
}

/// Filter for listing incidents
///
/// Empty lists match everything; values compare exactly.
#[derive(Debug, Clone, Default)]
pub struct IncidentFilter {
    pub severities: Vec<String>,
    pub states: Vec<String>,
}

impl IncidentFilter {
    pub fn matches(&self, incident: &Incident) -> bool {
        let severity_match =
            self.severities.is_empty() || self.severities.contains(&incident.severity);
        let state_match = self.states.is_empty() || self.states.contains(&incident.state);

        severity_match && state_match
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    incidents: Vec<Incident>,
    last_id: u64,
}

/// In-memory incident store (for development and testing)
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<MemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IncidentStore for InMemoryStore {
    async fn load(&self) -> Result<Vec<Incident>> {
        let start = Instant::now();
        let incidents = self.inner.read().await.incidents.clone();

        record_store_operation(
            StoreOperation::Load,
            self.backend_name(),
            start.elapsed().as_secs_f64(),
        );
        Ok(incidents)
    }

    async fn append(&self, submission: IncidentSubmission) -> Result<Incident> {
        submission.validate()?;

        let start = Instant::now();
        let mut state = self.inner.write().await;

        let id = next_identifier(state.last_id, &state.incidents)?;
        let incident = submission.into_incident(id, Incident::timestamp_now())?;
        state.incidents.push(incident.clone());
        state.last_id = id;

        record_store_operation(
            StoreOperation::Append,
            self.backend_name(),
            start.elapsed().as_secs_f64(),
        );
        tracing::debug!(incident_id = id, "Incident saved");
        Ok(incident)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
