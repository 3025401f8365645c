//! Missing-value imputation.
//!
//! Numeric columns are filled with the column median computed over the
//! non-missing values of the same table (recomputed per run, never cached);
//! the department column is filled with a fixed sentinel.

use crate::error::PipelineError;
use crate::table::{ImputedRecord, RawRecord};

/// Sentinel for records whose department is missing.
pub const UNKNOWN_DEPARTMENT: &str = "Unknown";

/// Column medians computed over the non-missing values of one table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImputationStats {
    pub age_median: f64,
    pub salary_median: f64,
}

/// Compute the imputation medians for `records`.
///
/// # Errors
///
/// Fails when the table has no rows, or when every value of a numeric
/// column is missing; the median is undefined in both cases.
pub fn imputation_stats(records: &[RawRecord]) -> Result<ImputationStats, PipelineError> {
    if records.is_empty() {
        return Err(PipelineError::Cleaning(
            "input table has no rows; medians are undefined".to_string(),
        ));
    }

    Ok(ImputationStats {
        age_median: column_median(records.iter().map(|record| record.age), "age")?,
        salary_median: column_median(records.iter().map(|record| record.salary), "salary")?,
    })
}

fn column_median(
    values: impl Iterator<Item = Option<f64>>,
    column: &str,
) -> Result<f64, PipelineError> {
    let mut present: Vec<f64> = values.flatten().collect();
    if present.is_empty() {
        return Err(PipelineError::Cleaning(format!(
            "column '{column}' has no non-missing values; median is undefined"
        )));
    }

    present.sort_by(f64::total_cmp);
    let mid = present.len() / 2;
    Ok(if present.len() % 2 == 0 {
        (present[mid - 1] + present[mid]) / 2.0
    } else {
        present[mid]
    })
}

/// Fill missing values, producing a new table; the input is not mutated.
pub fn clean_records(records: &[RawRecord], stats: ImputationStats) -> Vec<ImputedRecord> {
    records
        .iter()
        .map(|record| ImputedRecord {
            id: record.id,
            name: record.name.clone(),
            age: record.age.unwrap_or(stats.age_median),
            salary: record.salary.unwrap_or(stats.salary_median),
            hire_date: record.hire_date.clone(),
            profile: record.profile.clone(),
            department: record
                .department
                .clone()
                .unwrap_or_else(|| UNKNOWN_DEPARTMENT.to_string()),
            bonus: record.bonus,
        })
        .collect()
}
