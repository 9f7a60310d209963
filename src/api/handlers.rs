use crate::analytics::{aggregate_counts, recent, IncidentReport, IncidentStatistics};
use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::metrics::record_submission;
use crate::models::{Incident, IncidentSubmission};
use crate::state::IncidentFilter;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Form, Json,
};
use serde::{Deserialize, Serialize};

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Submit an incident as JSON
pub async fn create_incident(
    State(state): State<AppState>,
    Json(submission): Json<IncidentSubmission>,
) -> Result<(StatusCode, Json<Incident>)> {
    submit(&state, submission).await
}

/// Submit an incident from the url-encoded report form
pub async fn submit_incident_form(
    State(state): State<AppState>,
    Form(submission): Form<IncidentSubmission>,
) -> Result<(StatusCode, Json<Incident>)> {
    submit(&state, submission).await
}

async fn submit(
    state: &AppState,
    submission: IncidentSubmission,
) -> Result<(StatusCode, Json<Incident>)> {
    match state.store.append(submission).await {
        Ok(incident) => {
            record_submission(Ok(()));
            tracing::info!(
                incident_id = incident.id,
                state = %incident.state,
                severity = %incident.severity,
                "Incident reported"
            );
            Ok((StatusCode::CREATED, Json(incident)))
        }
        Err(e) => {
            record_submission(Err(e.error_code()));
            Err(e)
        }
    }
}

/// Get an incident by ID
pub async fn get_incident(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Incident>> {
    state
        .store
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Incident {} not found", id)))
}

/// List incidents
pub async fn list_incidents(
    State(state): State<AppState>,
    Query(params): Query<ListIncidentsQuery>,
) -> Result<Json<ListIncidentsResponse>> {
    let filter = IncidentFilter {
        severities: params.severity.into_iter().collect(),
        states: params.state.into_iter().collect(),
    };

    let mut incidents: Vec<Incident> = state
        .store
        .load()
        .await?
        .into_iter()
        .filter(|incident| filter.matches(incident))
        .collect();
    let total = incidents.len() as u64;

    if params.newest_first.unwrap_or(false) {
        incidents = recent(&incidents, params.limit.unwrap_or(incidents.len()));
    } else if let Some(limit) = params.limit {
        incidents.truncate(limit);
    }

    Ok(Json(ListIncidentsResponse { incidents, total }))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListIncidentsQuery {
    pub severity: Option<String>,
    pub state: Option<String>,
    pub newest_first: Option<bool>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListIncidentsResponse {
    pub incidents: Vec<Incident>,
    /// Matching incidents before `limit` is applied
    pub total: u64,
}

/// Aggregate counts over every incident
pub async fn statistics(State(state): State<AppState>) -> Result<Json<IncidentStatistics>> {
    let incidents = state.store.load().await?;
    Ok(Json(aggregate_counts(&incidents)))
}

/// Statistics together with the full incident list
pub async fn report(State(state): State<AppState>) -> Result<Json<IncidentReport>> {
    let incidents = state.store.load().await?;
    Ok(Json(IncidentReport::new(incidents)))
}

/// Every incident as a JSON array, in store format
pub async fn export_incidents(State(state): State<AppState>) -> Result<Json<Vec<Incident>>> {
    Ok(Json(state.store.load().await?))
}

/// Prometheus metrics endpoint
///
/// Returns metrics in Prometheus text exposition format
pub async fn metrics() -> (StatusCode, String) {
    let metrics = crate::metrics::gather_metrics();
    (StatusCode::OK, metrics)
}
