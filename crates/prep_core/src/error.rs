use std::fmt;

/// Errors raised by the preprocessing stages.
///
/// Every variant is fatal to the current run: the pipeline surfaces the error
/// and halts. Retrying across invocations is an orchestration concern, not
/// part of the pipeline contract.
#[derive(Debug)]
pub enum PipelineError {
    /// Input file unreachable or structurally malformed.
    Load(String),
    /// Median imputation is undefined (empty table or all-missing column).
    Cleaning(String),
    /// A profile cell could not be parsed as a JSON object.
    Extraction { row: usize, message: String },
    /// A numeric value falls outside the declared bin ranges.
    Range {
        column: &'static str,
        row: usize,
        value: f64,
    },
    /// An output file could not be created or finalized.
    Write(String),
}

impl PipelineError {
    /// Name of the failing stage, used in process exit messages.
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Load(_) => "load",
            PipelineError::Cleaning(_) => "clean",
            PipelineError::Extraction { .. } => "extract",
            PipelineError::Range { .. } => "derive",
            PipelineError::Write(_) => "write",
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Load(message) => write!(f, "input load failed: {message}"),
            PipelineError::Cleaning(message) => write!(f, "cleaning failed: {message}"),
            PipelineError::Extraction { row, message } => {
                write!(f, "profile extraction failed for record {row}: {message}")
            }
            PipelineError::Range { column, row, value } => {
                write!(
                    f,
                    "value {value} in column '{column}' of record {row} is outside the declared bin ranges"
                )
            }
            PipelineError::Write(message) => write!(f, "output write failed: {message}"),
        }
    }
}

impl std::error::Error for PipelineError {}
