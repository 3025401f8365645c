//! End-to-end pipeline orchestration.
//!
//! One invocation is a single forward pass over one input file:
//! load → clean → extract → derive → (write, aggregate → write). Every
//! stage consumes the previous stage's table and produces a new one; a
//! failure at any stage aborts the run before any output is renamed into
//! place.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::PipelineError;
use crate::quality::{MissingValueReport, QualityMetrics};
use crate::{aggregate, cleaner, extract, feature_export, features, loader, output, quality};

/// Default output file names, matching the original deployment.
pub const CLEANED_FILE_NAME: &str = "cleaned_data.csv";
pub const TRANSFORMED_FILE_NAME: &str = "transformed_data.csv";
pub const DEPARTMENT_STATS_FILE_NAME: &str = "department_statistics.csv";
pub const QUALITY_METRICS_FILE_NAME: &str = "quality_metrics.json";
pub const FEATURE_RECORDS_FILE_NAME: &str = "feature_records.csv";
pub const TRANSFORMED_PARQUET_FILE_NAME: &str = "transformed_data.parquet";

/// Configuration for one pipeline run.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Input CSV file.
    pub input_path: PathBuf,
    /// Directory receiving all output files; created if absent.
    pub output_dir: PathBuf,
    /// Also write the transformed table as Parquet.
    #[serde(default)]
    pub parquet_output: bool,
}

impl PipelineConfig {
    pub fn new(input_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_dir: output_dir.into(),
            parquet_output: false,
        }
    }

    fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}

/// Row counts and artifacts produced by a successful run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub rows_processed: usize,
    pub departments: usize,
    /// Missing-cell counts observed before cleaning.
    pub missing_before_cleaning: MissingValueReport,
    pub quality: QualityMetrics,
    /// Paths written, in write order.
    pub outputs: Vec<PathBuf>,
}

/// Run the full pipeline for one input file.
///
/// # Errors
///
/// Returns the first stage error encountered; a failed run leaves no
/// output files behind.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineReport, PipelineError> {
    let raw = loader::load_records(&config.input_path)?;
    let missing_before_cleaning = quality::missing_value_report(&raw);

    let stats = cleaner::imputation_stats(&raw)?;
    let imputed = cleaner::clean_records(&raw, stats);
    let cleaned = extract::extract_profiles(&imputed)?;
    let derived = features::derive_features(&cleaned)?;
    let department_stats = aggregate::department_stats(&cleaned);
    let quality = quality::quality_metrics(&derived);
    let feature_rows = feature_export::feature_records(&derived, &feature_export::feature_event_time());

    ensure_output_dir(&config.output_dir)?;

    // All outputs are staged first and renamed into place as one unit; a
    // failure anywhere leaves no output of this run behind.
    let mut batch = output::OutputBatch::new();
    batch.stage_cleaned_csv(&cleaned, config.output_path(CLEANED_FILE_NAME))?;
    batch.stage_transformed_csv(&derived, config.output_path(TRANSFORMED_FILE_NAME))?;
    batch.stage_department_stats_csv(
        &department_stats,
        config.output_path(DEPARTMENT_STATS_FILE_NAME),
    )?;
    batch.stage_quality_metrics_json(&quality, config.output_path(QUALITY_METRICS_FILE_NAME))?;
    batch.stage_feature_records_csv(&feature_rows, config.output_path(FEATURE_RECORDS_FILE_NAME))?;
    if config.parquet_output {
        batch.stage_transformed_parquet(&derived, config.output_path(TRANSFORMED_PARQUET_FILE_NAME))?;
    }
    let outputs = batch.commit()?;

    Ok(PipelineReport {
        rows_processed: derived.len(),
        departments: department_stats.len(),
        missing_before_cleaning,
        quality,
        outputs,
    })
}

fn ensure_output_dir(dir: &Path) -> Result<(), PipelineError> {
    fs::create_dir_all(dir).map_err(|error| {
        PipelineError::Write(format!(
            "cannot create output directory {}: {error}",
            dir.display()
        ))
    })
}
