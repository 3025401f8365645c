//! Flat feature-record table derived from the transformed table.
//!
//! This is the local artifact an external feature platform would ingest:
//! one row per record keyed by row index, stamped with a shared event time.
//! Text cells are rendered with the `None` sentinel so the export carries no
//! empty cells.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::table::{display_or_none, AgeGroup, DerivedRecord, SalaryCategory};

/// One exported feature row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub record_id: String,
    pub event_time: String,
    pub age: f64,
    pub salary: f64,
    pub department: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub address_length: usize,
    pub salary_category: SalaryCategory,
    pub age_group: AgeGroup,
}

/// Event-time stamp for one export batch.
pub fn feature_event_time() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Build the feature table for a transformed table. Every row shares
/// `event_time`; `record_id` is the row index.
pub fn feature_records(records: &[DerivedRecord], event_time: &str) -> Vec<FeatureRecord> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| FeatureRecord {
            record_id: index.to_string(),
            event_time: event_time.to_string(),
            age: record.age,
            salary: record.salary,
            department: record.department.clone(),
            address: display_or_none(record.address.as_deref()).to_string(),
            phone: display_or_none(record.phone.as_deref()).to_string(),
            email: display_or_none(record.email.as_deref()).to_string(),
            address_length: record.address_length,
            salary_category: record.salary_category,
            age_group: record.age_group,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derived(address: Option<&str>) -> DerivedRecord {
        DerivedRecord {
            id: Some(9),
            name: Some("Alice".to_string()),
            age: 30.0,
            salary: 60_000.0,
            hire_date: None,
            department: "Sales".to_string(),
            bonus: None,
            address: address.map(str::to_string),
            phone: None,
            email: None,
            address_length: 9,
            salary_category: SalaryCategory::Medium,
            age_group: AgeGroup::EarlyCareer,
        }
    }

    #[test]
    fn record_id_is_the_row_index() {
        let rows = feature_records(
            &[derived(Some("Street 40")), derived(None)],
            "2026-01-01T00:00:00Z",
        );
        assert_eq!(rows[0].record_id, "0");
        assert_eq!(rows[1].record_id, "1");
    }

    #[test]
    fn missing_text_cells_render_as_the_none_literal() {
        let rows = feature_records(&[derived(None)], "2026-01-01T00:00:00Z");
        assert_eq!(rows[0].address, "None");
        assert_eq!(rows[0].phone, "None");
        assert_eq!(rows[0].email, "None");
    }

    #[test]
    fn all_rows_share_the_batch_event_time() {
        let rows = feature_records(
            &[derived(Some("Street 40")), derived(None)],
            "2026-01-01T00:00:00Z",
        );
        assert!(rows.iter().all(|row| row.event_time == "2026-01-01T00:00:00Z"));
    }

    #[test]
    fn event_time_uses_second_precision_utc() {
        let stamp = feature_event_time();
        assert_eq!(stamp.len(), "2026-01-01T00:00:00Z".len());
        assert!(stamp.ends_with('Z'));
    }
}
