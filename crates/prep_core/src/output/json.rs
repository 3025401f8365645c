use std::fs::File;

use crate::error::PipelineError;
use crate::quality::QualityMetrics;

pub(crate) fn write_quality_json_impl(
    metrics: &QualityMetrics,
    file: File,
) -> Result<(), PipelineError> {
    serde_json::to_writer_pretty(file, metrics)
        .map_err(|error| PipelineError::Write(format!("quality report serialization failed: {error}")))
}
