use serde::{Deserialize, Serialize};
use validator::Validate;

/// Format of the server-assigned `timestamp` field
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One logged oil spill report
///
/// Field names are the JSON keys of the backing store and the export
/// endpoint. String fields missing from an externally edited store load as
/// empty strings; `id` is always required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    /// Positive identifier, never reused by this store
    pub id: u64,

    #[serde(default)]
    pub date_reported: String,
    #[serde(default)]
    pub time_reported: String,

    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub lga: String,
    #[serde(default)]
    pub coordinates: Coordinates,

    #[serde(default)]
    pub incident_type: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub cause: String,
    #[serde(default)]
    pub oil_type: String,
    #[serde(default)]
    pub estimated_volume: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub weather_conditions: String,

    #[serde(default)]
    pub water_body_affected: String,
    #[serde(default)]
    pub land_area_affected: String,
    #[serde(default)]
    pub population_affected: String,

    #[serde(default)]
    pub environmental_impact: String,
    #[serde(default)]
    pub response_actions: String,
    #[serde(default)]
    pub response_team: String,
    #[serde(default)]
    pub cleanup_status: String,
    #[serde(default)]
    pub reported_by: String,
    #[serde(default)]
    pub contact_info: String,

    #[serde(default)]
    pub company_responsible: String,
    #[serde(default)]
    pub additional_notes: String,

    /// Server-assigned creation time, `YYYY-MM-DD HH:MM:SS`
    #[serde(default)]
    pub timestamp: String,
}

/// Spill location as submitted; both halves are free text and may be empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
}

impl Incident {
    /// Creation timestamp formatted for storage, in local server time
    pub fn timestamp_now() -> String {
        chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Caller-supplied fields of a new incident
///
/// Deserialized from both the JSON API and the url-encoded report form, so
/// the coordinates arrive flat as `latitude` / `longitude`. Presence is the
/// only check: an empty string satisfies a required field. Unknown keys,
/// including a nested `coordinates` object, are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct IncidentSubmission {
    #[validate(required)]
    pub date_reported: Option<String>,
    #[validate(required)]
    pub time_reported: Option<String>,
    #[validate(required)]
    pub location: Option<String>,
    #[validate(required)]
    pub state: Option<String>,
    #[validate(required)]
    pub lga: Option<String>,

    pub latitude: Option<String>,
    pub longitude: Option<String>,

    #[validate(required)]
    pub incident_type: Option<String>,
    #[validate(required)]
    pub source: Option<String>,
    #[validate(required)]
    pub cause: Option<String>,
    #[validate(required)]
    pub oil_type: Option<String>,
    #[validate(required)]
    pub estimated_volume: Option<String>,
    #[validate(required)]
    pub severity: Option<String>,
    #[validate(required)]
    pub weather_conditions: Option<String>,

    pub water_body_affected: Option<String>,
    pub land_area_affected: Option<String>,
    pub population_affected: Option<String>,

    #[validate(required)]
    pub environmental_impact: Option<String>,
    #[validate(required)]
    pub response_actions: Option<String>,
    #[validate(required)]
    pub response_team: Option<String>,
    #[validate(required)]
    pub cleanup_status: Option<String>,
    #[validate(required)]
    pub reported_by: Option<String>,
    #[validate(required)]
    pub contact_info: Option<String>,

    pub company_responsible: Option<String>,
    pub additional_notes: Option<String>,
}

impl IncidentSubmission {
    /// Check required fields, then build the record with the given identity.
    ///
    /// Every missing required field is reported in a single error.
    pub fn into_incident(self, id: u64, timestamp: String) -> crate::error::Result<Incident> {
        self.validate()?;

        // Required fields are all `Some` past this point.
        Ok(Incident {
            id,
            date_reported: self.date_reported.unwrap_or_default(),
            time_reported: self.time_reported.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            lga: self.lga.unwrap_or_default(),
            coordinates: Coordinates {
                latitude: self.latitude.unwrap_or_default(),
                longitude: self.longitude.unwrap_or_default(),
            },
            incident_type: self.incident_type.unwrap_or_default(),
            source: self.source.unwrap_or_default(),
            cause: self.cause.unwrap_or_default(),
            oil_type: self.oil_type.unwrap_or_default(),
            estimated_volume: self.estimated_volume.unwrap_or_default(),
            severity: self.severity.unwrap_or_default(),
            weather_conditions: self.weather_conditions.unwrap_or_default(),
            water_body_affected: self.water_body_affected.unwrap_or_default(),
            land_area_affected: self.land_area_affected.unwrap_or_default(),
            population_affected: self.population_affected.unwrap_or_default(),
            environmental_impact: self.environmental_impact.unwrap_or_default(),
            response_actions: self.response_actions.unwrap_or_default(),
            response_team: self.response_team.unwrap_or_default(),
            cleanup_status: self.cleanup_status.unwrap_or_default(),
            reported_by: self.reported_by.unwrap_or_default(),
            contact_info: self.contact_info.unwrap_or_default(),
            company_responsible: self.company_responsible.unwrap_or_default(),
            additional_notes: self.additional_notes.unwrap_or_default(),
            timestamp,
        })
    }
}

/// A submission with every required field set to a plausible value
#[cfg(test)]
pub(crate) fn sample_submission() -> IncidentSubmission {
    IncidentSubmission {
        date_reported: Some("2024-03-15".to_string()),
        time_reported: Some("09:30".to_string()),
        location: Some("Bonny River estuary".to_string()),
        state: Some("Rivers".to_string()),
        lga: Some("Bonny".to_string()),
        latitude: None,
        longitude: None,
        incident_type: Some("Pipeline leak".to_string()),
        source: Some("Trunk line".to_string()),
        cause: Some("Corrosion".to_string()),
        oil_type: Some("Crude".to_string()),
        estimated_volume: Some("120 bbl".to_string()),
        severity: Some("High".to_string()),
        weather_conditions: Some("Clear".to_string()),
        water_body_affected: None,
        land_area_affected: None,
        population_affected: None,
        environmental_impact: Some("Sheen on creek surface".to_string()),
        response_actions: Some("Booms deployed".to_string()),
        response_team: Some("LZO field team".to_string()),
        cleanup_status: Some("In progress".to_string()),
        reported_by: Some("Field officer".to_string()),
        contact_info: Some("officer@example.org".to_string()),
        company_responsible: None,
        additional_notes: None,
    }
}
