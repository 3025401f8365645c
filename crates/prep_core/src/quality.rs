//! Data-quality reporting over the raw and transformed tables.

use std::collections::{BTreeMap, HashSet};

use chrono::Utc;
use serde::Serialize;

use crate::schema::{
    TRANSFORMED_CATEGORICAL_COLUMNS, TRANSFORMED_NUMERIC_COLUMNS, TRANSFORMED_TOTAL_COLUMNS,
};
use crate::table::{AgeGroup, DerivedRecord, RawRecord, SalaryCategory};

/// Count of missing cells per input column, taken before cleaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MissingValueReport {
    pub id: usize,
    pub name: usize,
    pub age: usize,
    pub salary: usize,
    pub hire_date: usize,
    pub profile: usize,
    pub department: usize,
    pub bonus: usize,
}

impl MissingValueReport {
    pub fn total(&self) -> usize {
        self.id
            + self.name
            + self.age
            + self.salary
            + self.hire_date
            + self.profile
            + self.department
            + self.bonus
    }
}

/// Count missing cells per column in the raw table.
pub fn missing_value_report(records: &[RawRecord]) -> MissingValueReport {
    let mut report = MissingValueReport::default();
    for record in records {
        report.id += usize::from(record.id.is_none());
        report.name += usize::from(record.name.is_none());
        report.age += usize::from(record.age.is_none());
        report.salary += usize::from(record.salary.is_none());
        report.hire_date += usize::from(record.hire_date.is_none());
        report.profile += usize::from(record.profile.is_none());
        report.department += usize::from(record.department.is_none());
        report.bonus += usize::from(record.bonus.is_none());
    }
    report
}

/// Summary of the transformed table, written alongside the output files.
#[derive(Debug, Clone, Serialize)]
pub struct QualityMetrics {
    pub total_rows: usize,
    pub total_columns: usize,
    pub missing_values_count: usize,
    pub duplicate_rows: usize,
    pub numeric_columns: usize,
    pub categorical_columns: usize,
    pub unique_departments: usize,
    pub unique_age_groups: usize,
    pub unique_salary_categories: usize,
    pub age_group_distribution: BTreeMap<String, usize>,
    pub processing_timestamp: String,
}

/// Compute the quality metrics for a transformed table, stamped with the
/// current wall-clock time.
pub fn quality_metrics(records: &[DerivedRecord]) -> QualityMetrics {
    quality_metrics_at(records, Utc::now().to_rfc3339())
}

pub(crate) fn quality_metrics_at(
    records: &[DerivedRecord],
    processing_timestamp: String,
) -> QualityMetrics {
    let mut departments = HashSet::new();
    let mut age_groups = HashSet::new();
    let mut salary_categories = HashSet::new();
    let mut age_group_distribution: BTreeMap<String, usize> = BTreeMap::new();
    let mut seen_rows = HashSet::new();
    let mut missing_values_count = 0;
    let mut duplicate_rows = 0;

    for record in records {
        departments.insert(record.department.as_str());
        age_groups.insert(record.age_group);
        salary_categories.insert(record.salary_category);
        *age_group_distribution
            .entry(record.age_group.to_string())
            .or_insert(0) += 1;

        missing_values_count += usize::from(record.id.is_none())
            + usize::from(record.name.is_none())
            + usize::from(record.hire_date.is_none())
            + usize::from(record.bonus.is_none())
            + usize::from(record.address.is_none())
            + usize::from(record.phone.is_none())
            + usize::from(record.email.is_none());

        if !seen_rows.insert(row_key(record)) {
            duplicate_rows += 1;
        }
    }

    QualityMetrics {
        total_rows: records.len(),
        total_columns: TRANSFORMED_TOTAL_COLUMNS,
        missing_values_count,
        duplicate_rows,
        numeric_columns: TRANSFORMED_NUMERIC_COLUMNS,
        categorical_columns: TRANSFORMED_CATEGORICAL_COLUMNS,
        unique_departments: departments.len(),
        unique_age_groups: age_groups.len(),
        unique_salary_categories: salary_categories.len(),
        age_group_distribution,
        processing_timestamp,
    }
}

type RowKey<'a> = (
    Option<u64>,
    Option<&'a str>,
    u64,
    u64,
    Option<&'a str>,
    &'a str,
    Option<u64>,
    Option<&'a str>,
    Option<&'a str>,
    Option<&'a str>,
    usize,
    (SalaryCategory, AgeGroup),
);

/// Whole-row key for duplicate detection. Floats compare by bit pattern so
/// the key stays total even for non-finite cells (a bonus of `inf` still
/// counts as a duplicate of itself).
fn row_key(record: &DerivedRecord) -> RowKey<'_> {
    (
        record.id,
        record.name.as_deref(),
        record.age.to_bits(),
        record.salary.to_bits(),
        record.hire_date.as_deref(),
        record.department.as_str(),
        record.bonus.map(f64::to_bits),
        record.address.as_deref(),
        record.phone.as_deref(),
        record.email.as_deref(),
        record.address_length,
        (record.salary_category, record.age_group),
    )
}
