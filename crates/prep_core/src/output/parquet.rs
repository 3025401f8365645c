use std::fs::File;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::error::PipelineError;
use crate::table::DerivedRecord;

pub(crate) fn write_transformed_parquet_impl(
    records: &[DerivedRecord],
    file: File,
) -> Result<(), PipelineError> {
    let batch = build_record_batch(records)
        .map_err(|error| PipelineError::Write(format!("parquet batch assembly failed: {error}")))?;
    let props = WriterProperties::builder().build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))
        .map_err(|error| PipelineError::Write(format!("parquet writer setup failed: {error}")))?;
    writer
        .write(&batch)
        .map_err(|error| PipelineError::Write(format!("parquet write failed: {error}")))?;
    writer
        .close()
        .map_err(|error| PipelineError::Write(format!("parquet close failed: {error}")))?;

    Ok(())
}

fn build_record_batch(records: &[DerivedRecord]) -> Result<RecordBatch, arrow::error::ArrowError> {
    let schema = Arc::new(transformed_schema());
    let arrays = build_arrays(records);

    RecordBatch::try_new(schema, arrays)
}

fn transformed_schema() -> Schema {
    Schema::new(vec![
        Field::new("id", DataType::UInt64, true),
        Field::new("name", DataType::Utf8, true),
        Field::new("age", DataType::Float64, false),
        Field::new("salary", DataType::Float64, false),
        Field::new("hire_date", DataType::Utf8, true),
        Field::new("department", DataType::Utf8, false),
        Field::new("bonus", DataType::Float64, true),
        Field::new("address", DataType::Utf8, true),
        Field::new("phone", DataType::Utf8, true),
        Field::new("email", DataType::Utf8, true),
        Field::new("address_length", DataType::UInt64, false),
        Field::new("salary_category", DataType::Utf8, false),
        Field::new("age_group", DataType::Utf8, false),
    ])
}

fn build_arrays(records: &[DerivedRecord]) -> Vec<ArrayRef> {
    vec![
        Arc::new(UInt64Array::from(
            records.iter().map(|r| r.id).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            records.iter().map(|r| r.name.clone()).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            records.iter().map(|r| r.age).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            records.iter().map(|r| r.salary).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            records
                .iter()
                .map(|r| r.hire_date.clone())
                .collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            records
                .iter()
                .map(|r| r.department.as_str())
                .collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            records.iter().map(|r| r.bonus).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            records.iter().map(|r| r.address.clone()).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            records.iter().map(|r| r.phone.clone()).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            records.iter().map(|r| r.email.clone()).collect::<Vec<_>>(),
        )),
        Arc::new(UInt64Array::from(
            records
                .iter()
                .map(|r| r.address_length as u64)
                .collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            records
                .iter()
                .map(|r| r.salary_category.as_str())
                .collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            records
                .iter()
                .map(|r| r.age_group.as_str())
                .collect::<Vec<_>>(),
        )),
    ]
}
