//! CSV loading against the declared schema.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::PipelineError;
use crate::schema;
use crate::table::RawRecord;

/// Load raw records from the delimited file at `path`.
///
/// The header is validated against the declared schema before any row is
/// parsed; ragged rows and cells that do not parse as their declared type
/// are load failures.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<RawRecord>, PipelineError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|error| PipelineError::Load(format!("cannot open {}: {error}", path.display())))?;
    read_records(file)
}

/// Read raw records from any CSV byte source.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<RawRecord>, PipelineError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|error| PipelineError::Load(format!("cannot read header row: {error}")))?
        .clone();
    schema::validate_header(&headers)?;

    let mut records = Vec::new();
    for (index, row) in csv_reader.deserialize::<RawRecord>().enumerate() {
        let record =
            row.map_err(|error| PipelineError::Load(format!("record {index}: {error}")))?;
        records.push(record);
    }
    Ok(records)
}
