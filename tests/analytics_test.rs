//! Aggregate counts over stored incidents

mod common;

use common::submission;
use spill_incident_manager::analytics::{aggregate_counts, recent, IncidentReport, UNKNOWN_KEY};
use spill_incident_manager::models::Incident;
use spill_incident_manager::state::{IncidentStore, JsonFileStore};
use std::collections::BTreeMap;
use tempfile::TempDir;

fn counts(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn test_severity_tally() {
    let incidents: Vec<Incident> = ["High", "High", "Low"]
        .iter()
        .enumerate()
        .map(|(i, severity)| {
            serde_json::from_value(serde_json::json!({ "id": i + 1, "severity": severity }))
                .unwrap()
        })
        .collect();

    let stats = aggregate_counts(&incidents);
    assert_eq!(stats.by_severity, counts(&[("High", 2), ("Low", 1)]));
    // No state on any record.
    assert_eq!(stats.by_state, counts(&[(UNKNOWN_KEY, 3)]));
}

#[tokio::test]
async fn test_statistics_over_json_store() {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp_dir.path().join("incidents.json"));

    for (severity, state, date) in [
        ("Severe", "Lagos", "2024-03-15"),
        ("High", "Rivers", "2024-03-02"),
        ("High", "Rivers", "2024-04-20"),
        ("Low", "Delta", "2024-13-40"),
        ("Low", "Delta", "20/04/2024"),
    ] {
        store.append(submission(severity, state, date)).await.unwrap();
    }

    let incidents = store.load().await.unwrap();
    let stats = aggregate_counts(&incidents);

    assert_eq!(stats.total_incidents, 5);
    assert_eq!(
        stats.by_severity,
        counts(&[("High", 2), ("Low", 2), ("Severe", 1)])
    );
    assert_eq!(
        stats.by_state,
        counts(&[("Delta", 2), ("Lagos", 1), ("Rivers", 2)])
    );
    assert_eq!(stats.by_month, counts(&[("2024-03", 2), ("2024-04", 1)]));

    let report = IncidentReport::new(incidents.clone());
    assert_eq!(report.stats, stats);

    let latest: Vec<u64> = recent(&incidents, 2).iter().map(|i| i.id).collect();
    assert_eq!(latest, vec![5, 4]);
}
