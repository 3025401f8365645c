//! Record types flowing through the pipeline stages.
//!
//! Each stage consumes the previous stage's table and produces a new one;
//! the types encode what each stage has already guaranteed (after cleaning,
//! `age`, `salary`, and `department` can no longer be missing). Field order
//! matches the column order of the corresponding output file.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One row of the raw input file. Only `age`, `salary`, `department`, and
/// `profile` columns are required in the input; every cell may still be
/// empty at this point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<f64>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub hire_date: Option<String>,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub bonus: Option<f64>,
}

/// A record after imputation: `age`, `salary`, and `department` are
/// guaranteed present; the `profile` cell is still carried for extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ImputedRecord {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub age: f64,
    pub salary: f64,
    pub hire_date: Option<String>,
    pub profile: Option<String>,
    pub department: String,
    pub bonus: Option<f64>,
}

/// A record after profile extraction. The `profile` column is dropped and
/// replaced by its three scalar fields; this is the schema of the cleaned
/// output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedRecord {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    pub age: f64,
    pub salary: f64,
    #[serde(default)]
    pub hire_date: Option<String>,
    pub department: String,
    #[serde(default)]
    pub bonus: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A cleaned record extended with the derived feature columns; the schema of
/// the transformed output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRecord {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    pub age: f64,
    pub salary: f64,
    #[serde(default)]
    pub hire_date: Option<String>,
    pub department: String,
    #[serde(default)]
    pub bonus: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub address_length: usize,
    pub salary_category: SalaryCategory,
    pub age_group: AgeGroup,
}

/// Salary bucket assigned by the feature deriver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalaryCategory {
    Low,
    Medium,
    High,
}

impl SalaryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SalaryCategory::Low => "low",
            SalaryCategory::Medium => "medium",
            SalaryCategory::High => "high",
        }
    }
}

impl fmt::Display for SalaryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Age bucket assigned by the feature deriver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    Young,
    #[serde(rename = "Early Career")]
    EarlyCareer,
    #[serde(rename = "Mid Career")]
    MidCareer,
    Senior,
    Experienced,
}

impl AgeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Young => "Young",
            AgeGroup::EarlyCareer => "Early Career",
            AgeGroup::MidCareer => "Mid Career",
            AgeGroup::Senior => "Senior",
            AgeGroup::Experienced => "Experienced",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-department aggregate. CSV headers follow the report produced by the
/// original deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentStat {
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Average Salary")]
    pub average_salary: f64,
    #[serde(rename = "Average Age")]
    pub average_age: f64,
}

/// Renders an optional text cell the way the source data renders missing
/// values: the literal `None`.
pub(crate) fn display_or_none(value: Option<&str>) -> &str {
    value.unwrap_or("None")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_match_output_vocabulary() {
        assert_eq!(SalaryCategory::Low.to_string(), "low");
        assert_eq!(SalaryCategory::Medium.to_string(), "medium");
        assert_eq!(SalaryCategory::High.to_string(), "high");
        assert_eq!(AgeGroup::EarlyCareer.to_string(), "Early Career");
        assert_eq!(AgeGroup::Experienced.to_string(), "Experienced");
    }

    #[test]
    fn missing_text_renders_as_none_literal() {
        assert_eq!(display_or_none(None), "None");
        assert_eq!(display_or_none(Some("Street 40")), "Street 40");
    }
}
