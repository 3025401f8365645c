use std::fs::File;

use serde::Serialize;

use crate::error::PipelineError;

pub(crate) fn write_rows_impl<T: Serialize>(rows: &[T], file: File) -> Result<(), PipelineError> {
    let mut wtr = csv::Writer::from_writer(file);
    for row in rows {
        wtr.serialize(row)
            .map_err(|error| PipelineError::Write(format!("csv serialization failed: {error}")))?;
    }
    wtr.flush()
        .map_err(|error| PipelineError::Write(format!("csv flush failed: {error}")))?;
    Ok(())
}
