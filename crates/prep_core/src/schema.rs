//! Declared schema for the raw input file.
//!
//! Column types are declared here rather than inferred from the data, so a
//! header that does not carry the required columns is rejected before any
//! row is parsed.

use csv::StringRecord;

use crate::error::PipelineError;

/// Semantic type of an input column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
    /// Serialized-object column, kept as text until extraction.
    Json,
}

/// One column of the declared input schema.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub column_type: ColumnType,
    /// Required columns must appear in the input header; optional columns
    /// load as missing when absent.
    pub required: bool,
}

/// Declared input schema, in canonical column order.
pub const INPUT_COLUMNS: [ColumnSpec; 8] = [
    ColumnSpec {
        name: "id",
        column_type: ColumnType::Integer,
        required: false,
    },
    ColumnSpec {
        name: "name",
        column_type: ColumnType::Text,
        required: false,
    },
    ColumnSpec {
        name: "age",
        column_type: ColumnType::Float,
        required: true,
    },
    ColumnSpec {
        name: "salary",
        column_type: ColumnType::Float,
        required: true,
    },
    ColumnSpec {
        name: "hire_date",
        column_type: ColumnType::Text,
        required: false,
    },
    ColumnSpec {
        name: "profile",
        column_type: ColumnType::Json,
        required: true,
    },
    ColumnSpec {
        name: "department",
        column_type: ColumnType::Text,
        required: true,
    },
    ColumnSpec {
        name: "bonus",
        column_type: ColumnType::Float,
        required: false,
    },
];

/// Column counts of the transformed table, reported by the quality metrics.
/// Numeric: id, age, salary, bonus, address_length.
pub(crate) const TRANSFORMED_NUMERIC_COLUMNS: usize = 5;
/// Categorical: name, hire_date, department, address, phone, email,
/// salary_category, age_group.
pub(crate) const TRANSFORMED_CATEGORICAL_COLUMNS: usize = 8;
pub(crate) const TRANSFORMED_TOTAL_COLUMNS: usize =
    TRANSFORMED_NUMERIC_COLUMNS + TRANSFORMED_CATEGORICAL_COLUMNS;

/// Checks that every required column is present in the header row.
pub fn validate_header(headers: &StringRecord) -> Result<(), PipelineError> {
    for spec in INPUT_COLUMNS.iter().filter(|spec| spec.required) {
        if !headers.iter().any(|header| header == spec.name) {
            return Err(PipelineError::Load(format!(
                "missing required column '{}'",
                spec.name
            )));
        }
    }
    Ok(())
}
