//! Report view combining statistics with the incident list

use crate::analytics::statistics::{aggregate_counts, IncidentStatistics};
use crate::models::Incident;
use serde::{Deserialize, Serialize};

/// Statistics plus every incident in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentReport {
    pub stats: IncidentStatistics,
    pub incidents: Vec<Incident>,
}

impl IncidentReport {
    pub fn new(incidents: Vec<Incident>) -> Self {
        Self {
            stats: aggregate_counts(&incidents),
            incidents,
        }
    }
}

/// The last `limit` incidents, newest first by insertion order
pub fn recent(incidents: &[Incident], limit: usize) -> Vec<Incident> {
    incidents.iter().rev().take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(id: u64, severity: &str) -> Incident {
        serde_json::from_value(serde_json::json!({ "id": id, "severity": severity })).unwrap()
    }

    #[test]
    fn test_report_carries_stats_and_list() {
        let report = IncidentReport::new(vec![incident(1, "High"), incident(2, "Low")]);

        assert_eq!(report.stats.total_incidents, 2);
        assert_eq!(report.incidents.len(), 2);
        assert_eq!(report.incidents[0].id, 1);
    }

    #[test]
    fn test_recent_is_newest_first() {
        let incidents: Vec<Incident> = (1..=5).map(|id| incident(id, "Low")).collect();

        let ids: Vec<u64> = recent(&incidents, 3).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![5, 4, 3]);
        assert_eq!(recent(&incidents, 10).len(), 5);
        assert!(recent(&[], 3).is_empty());
    }
}
