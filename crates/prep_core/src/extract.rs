//! Structured-field extraction from the embedded profile column.
//!
//! Each profile cell holds a serialized JSON object with optional `address`,
//! `phone`, and `email` keys. A blank or missing cell extracts to three
//! missing fields; a cell that does not parse as an object of optional
//! strings aborts the run.

use serde::Deserialize;

use crate::error::PipelineError;
use crate::table::{CleanedRecord, ImputedRecord};

#[derive(Debug, Default, Deserialize)]
struct ProfileFields {
    address: Option<String>,
    phone: Option<String>,
    email: Option<String>,
}

/// Parse every profile cell and replace the `profile` column with its three
/// scalar fields, producing the cleaned table.
pub fn extract_profiles(records: &[ImputedRecord]) -> Result<Vec<CleanedRecord>, PipelineError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let fields = parse_profile(record.profile.as_deref(), index)?;
            Ok(CleanedRecord {
                id: record.id,
                name: record.name.clone(),
                age: record.age,
                salary: record.salary,
                hire_date: record.hire_date.clone(),
                department: record.department.clone(),
                bonus: record.bonus,
                address: fields.address,
                phone: fields.phone,
                email: fields.email,
            })
        })
        .collect()
}

fn parse_profile(profile: Option<&str>, row: usize) -> Result<ProfileFields, PipelineError> {
    match profile {
        None => Ok(ProfileFields::default()),
        Some(raw) if raw.trim().is_empty() => Ok(ProfileFields::default()),
        Some(raw) => serde_json::from_str(raw).map_err(|error| PipelineError::Extraction {
            row,
            message: error.to_string(),
        }),
    }
}
