//! Frequency tables by severity, state and month

use crate::models::Incident;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key used when severity or state is absent or empty
pub const UNKNOWN_KEY: &str = "Unknown";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Aggregate counts over a sequence of incidents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentStatistics {
    pub total_incidents: u64,
    pub by_severity: BTreeMap<String, u64>,
    pub by_state: BTreeMap<String, u64>,
    /// Keyed `YYYY-MM`; incidents with an unparseable `date_reported` are
    /// left out of this table only
    pub by_month: BTreeMap<String, u64>,
}

/// Build the three frequency tables over `incidents`
pub fn aggregate_counts(incidents: &[Incident]) -> IncidentStatistics {
    let mut stats = IncidentStatistics {
        total_incidents: incidents.len() as u64,
        ..Default::default()
    };

    for incident in incidents {
        *stats
            .by_severity
            .entry(label_or_unknown(&incident.severity))
            .or_insert(0) += 1;

        *stats
            .by_state
            .entry(label_or_unknown(&incident.state))
            .or_insert(0) += 1;

        if let Some(month) = month_key(&incident.date_reported) {
            *stats.by_month.entry(month).or_insert(0) += 1;
        }
    }

    stats
}

/// `YYYY-MM` for a strict `YYYY-MM-DD` calendar date, otherwise `None`
pub fn month_key(date_reported: &str) -> Option<String> {
    // chrono accepts unpadded or signed fields; require the exact shape.
    let well_formed = date_reported.len() == 10
        && date_reported.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }

    let date = NaiveDate::parse_from_str(date_reported, DATE_FORMAT).ok()?;
    Some(format!("{:04}-{:02}", date.year(), date.month()))
}

fn label_or_unknown(value: &str) -> String {
    if value.is_empty() {
        UNKNOWN_KEY.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(severity: &str, state: &str, date_reported: &str) -> Incident {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "severity": severity,
            "state": state,
            "date_reported": date_reported,
        }))
        .unwrap()
    }

    #[test]
    fn test_counts_by_severity() {
        let incidents = vec![
            incident("High", "Rivers", "2024-01-02"),
            incident("High", "Delta", "2024-01-09"),
            incident("Low", "Rivers", "2024-02-11"),
        ];

        let stats = aggregate_counts(&incidents);
        assert_eq!(stats.total_incidents, 3);
        assert_eq!(
            stats.by_severity,
            BTreeMap::from([("High".to_string(), 2), ("Low".to_string(), 1)])
        );
        assert_eq!(stats.by_state["Rivers"], 2);
        assert_eq!(stats.by_month["2024-01"], 2);
        assert_eq!(stats.by_month["2024-02"], 1);
    }

    #[test]
    fn test_invalid_calendar_date_only_skips_month() {
        let incidents = vec![incident("Medium", "Bayelsa", "2024-13-40")];

        let stats = aggregate_counts(&incidents);
        assert!(stats.by_month.is_empty());
        assert_eq!(stats.by_severity["Medium"], 1);
        assert_eq!(stats.by_state["Bayelsa"], 1);
    }

    #[test]
    fn test_empty_fields_count_as_unknown() {
        let incidents = vec![incident("", "", "")];

        let stats = aggregate_counts(&incidents);
        assert_eq!(stats.by_severity[UNKNOWN_KEY], 1);
        assert_eq!(stats.by_state[UNKNOWN_KEY], 1);
        assert!(stats.by_month.is_empty());
    }

    #[test]
    fn test_month_key_is_strict() {
        assert_eq!(month_key("2024-03-15"), Some("2024-03".to_string()));
        assert_eq!(month_key("2024-02-29"), Some("2024-02".to_string()));
        assert_eq!(month_key("2023-02-29"), None);
        assert_eq!(month_key("2024-3-15"), None);
        assert_eq!(month_key("15/03/2024"), None);
        assert_eq!(month_key("2024-03-15T10:00"), None);
        assert_eq!(month_key(""), None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(aggregate_counts(&[]), IncidentStatistics::default());
    }
}
