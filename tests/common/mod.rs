//! Shared fixtures for integration tests

#![allow(dead_code)]

use spill_incident_manager::models::IncidentSubmission;

/// A submission with every required field present
pub fn submission(severity: &str, state: &str, date_reported: &str) -> IncidentSubmission {
    IncidentSubmission {
        date_reported: Some(date_reported.to_string()),
        time_reported: Some("14:20".to_string()),
        location: Some("Otuasega flow station".to_string()),
        state: Some(state.to_string()),
        lga: Some("Ogbia".to_string()),
        latitude: Some("4.87".to_string()),
        longitude: Some("6.28".to_string()),
        incident_type: Some("Wellhead leak".to_string()),
        source: Some("Flow line".to_string()),
        cause: Some("Equipment failure".to_string()),
        oil_type: Some("Crude".to_string()),
        estimated_volume: Some("35 bbl".to_string()),
        severity: Some(severity.to_string()),
        weather_conditions: Some("Rain".to_string()),
        water_body_affected: Some("Kolo Creek".to_string()),
        land_area_affected: None,
        population_affected: None,
        environmental_impact: Some("Mangrove contamination".to_string()),
        response_actions: Some("Source isolated".to_string()),
        response_team: Some("Joint investigation visit".to_string()),
        cleanup_status: Some("Pending".to_string()),
        reported_by: Some("Community liaison".to_string()),
        contact_info: Some("+234 800 000 0000".to_string()),
        company_responsible: Some("Operator".to_string()),
        additional_notes: None,
    }
}

/// Url-encoded body equivalent to `submission("High", "Bayelsa", "2024-05-02")`,
/// minus any listed fields
pub fn form_body(omit: &[&str]) -> String {
    let value = serde_json::to_value(submission("High", "Bayelsa", "2024-05-02")).unwrap();
    let mut pairs = Vec::new();
    for (key, value) in value.as_object().unwrap() {
        if omit.contains(&key.as_str()) {
            continue;
        }
        if let Some(value) = value.as_str() {
            let encoded = value.replace('+', "%2B").replace(' ', "+");
            pairs.push(format!("{}={}", key, encoded));
        }
    }
    pairs.join("&")
}
