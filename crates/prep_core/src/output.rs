//! Table serialization to the configured output locations.
//!
//! Outputs are written as one batch: every table is staged to a temporary
//! file next to its destination, and nothing is renamed into place until
//! every staging write has succeeded. A failure at any point removes the
//! staging files (and rolls back any renames already performed), so a
//! failed run leaves no partial output behind.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PipelineError;
use crate::feature_export::FeatureRecord;
use crate::quality::QualityMetrics;
use crate::table::{CleanedRecord, DepartmentStat, DerivedRecord};

#[path = "output/csv.rs"]
mod csv;
#[path = "output/json.rs"]
mod json;
#[path = "output/parquet.rs"]
mod parquet;
#[path = "output/writer_utils.rs"]
mod writer_utils;

use writer_utils::StagedFile;

/// A batch of output files committed as one unit.
///
/// Each `stage_*` call writes a staging file next to its destination;
/// [`commit`](OutputBatch::commit) renames the whole batch into place.
/// Dropping an uncommitted batch removes its staging files.
#[derive(Debug, Default)]
pub struct OutputBatch {
    staged: Vec<StagedFile>,
}

impl OutputBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage the cleaned table as CSV.
    ///
    /// # Errors
    ///
    /// Returns a write error if the staging file cannot be created or
    /// written.
    pub fn stage_cleaned_csv(
        &mut self,
        records: &[CleanedRecord],
        path: impl AsRef<Path>,
    ) -> Result<(), PipelineError> {
        self.stage(path, |file| csv::write_rows_impl(records, file))
    }

    /// Stage the transformed table as CSV.
    ///
    /// # Errors
    ///
    /// Returns a write error if the staging file cannot be created or
    /// written.
    pub fn stage_transformed_csv(
        &mut self,
        records: &[DerivedRecord],
        path: impl AsRef<Path>,
    ) -> Result<(), PipelineError> {
        self.stage(path, |file| csv::write_rows_impl(records, file))
    }

    /// Stage the per-department aggregate table as CSV.
    ///
    /// # Errors
    ///
    /// Returns a write error if the staging file cannot be created or
    /// written.
    pub fn stage_department_stats_csv(
        &mut self,
        stats: &[DepartmentStat],
        path: impl AsRef<Path>,
    ) -> Result<(), PipelineError> {
        self.stage(path, |file| csv::write_rows_impl(stats, file))
    }

    /// Stage the feature-record table as CSV.
    ///
    /// # Errors
    ///
    /// Returns a write error if the staging file cannot be created or
    /// written.
    pub fn stage_feature_records_csv(
        &mut self,
        records: &[FeatureRecord],
        path: impl AsRef<Path>,
    ) -> Result<(), PipelineError> {
        self.stage(path, |file| csv::write_rows_impl(records, file))
    }

    /// Stage the quality report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a write error if the staging file cannot be created or
    /// written.
    pub fn stage_quality_metrics_json(
        &mut self,
        metrics: &QualityMetrics,
        path: impl AsRef<Path>,
    ) -> Result<(), PipelineError> {
        self.stage(path, |file| json::write_quality_json_impl(metrics, file))
    }

    /// Stage the transformed table as Parquet.
    ///
    /// # Errors
    ///
    /// Returns a write error if batch assembly fails or the staging file
    /// cannot be created or written.
    pub fn stage_transformed_parquet(
        &mut self,
        records: &[DerivedRecord],
        path: impl AsRef<Path>,
    ) -> Result<(), PipelineError> {
        self.stage(path, |file| {
            parquet::write_transformed_parquet_impl(records, file)
        })
    }

    fn stage<F>(&mut self, path: impl AsRef<Path>, write_fn: F) -> Result<(), PipelineError>
    where
        F: FnOnce(fs::File) -> Result<(), PipelineError>,
    {
        let staged = writer_utils::stage_file(path.as_ref(), write_fn)?;
        self.staged.push(staged);
        Ok(())
    }

    /// Rename every staged file into place, returning the destination paths
    /// in stage order.
    ///
    /// # Errors
    ///
    /// If any rename fails, outputs already renamed by this commit and the
    /// remaining staging files are removed before the error is returned.
    pub fn commit(mut self) -> Result<Vec<PathBuf>, PipelineError> {
        let staged = std::mem::take(&mut self.staged);
        let mut written: Vec<PathBuf> = Vec::with_capacity(staged.len());

        for file in &staged {
            if let Err(error) = file.finalize() {
                for file in &staged {
                    file.remove_staging();
                }
                for path in &written {
                    let _ = fs::remove_file(path);
                }
                return Err(error);
            }
            written.push(file.destination().to_path_buf());
        }

        Ok(written)
    }
}

impl Drop for OutputBatch {
    fn drop(&mut self) {
        for file in &self.staged {
            file.remove_staging();
        }
    }
}

/// Write the cleaned table as CSV at `path` as a single-file batch.
///
/// # Errors
///
/// Returns a write error if the staging file cannot be created, written, or
/// renamed into place.
pub fn write_cleaned_csv(
    records: &[CleanedRecord],
    path: impl AsRef<Path>,
) -> Result<(), PipelineError> {
    let mut batch = OutputBatch::new();
    batch.stage_cleaned_csv(records, path)?;
    batch.commit()?;
    Ok(())
}

/// Write the transformed table as CSV at `path` as a single-file batch.
///
/// # Errors
///
/// Returns a write error if the staging file cannot be created, written, or
/// renamed into place.
pub fn write_transformed_csv(
    records: &[DerivedRecord],
    path: impl AsRef<Path>,
) -> Result<(), PipelineError> {
    let mut batch = OutputBatch::new();
    batch.stage_transformed_csv(records, path)?;
    batch.commit()?;
    Ok(())
}

/// Write the per-department aggregate table as CSV at `path` as a
/// single-file batch.
///
/// # Errors
///
/// Returns a write error if the staging file cannot be created, written, or
/// renamed into place.
pub fn write_department_stats_csv(
    stats: &[DepartmentStat],
    path: impl AsRef<Path>,
) -> Result<(), PipelineError> {
    let mut batch = OutputBatch::new();
    batch.stage_department_stats_csv(stats, path)?;
    batch.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{AgeGroup, SalaryCategory};
    use tempfile::tempdir;

    fn cleaned() -> CleanedRecord {
        CleanedRecord {
            id: Some(1),
            name: Some("Alice".to_string()),
            age: 30.0,
            salary: 60_000.0,
            hire_date: Some("2020-01-15".to_string()),
            department: "Sales".to_string(),
            bonus: Some(500.0),
            address: Some("Street 40".to_string()),
            phone: None,
            email: None,
        }
    }

    fn derived() -> DerivedRecord {
        DerivedRecord {
            id: Some(1),
            name: Some("Alice".to_string()),
            age: 30.0,
            salary: 60_000.0,
            hire_date: Some("2020-01-15".to_string()),
            department: "Sales".to_string(),
            bonus: Some(500.0),
            address: Some("Street 40".to_string()),
            phone: None,
            email: None,
            address_length: 9,
            salary_category: SalaryCategory::Medium,
            age_group: AgeGroup::EarlyCareer,
        }
    }

    fn remaining_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .expect("read_dir")
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn cleaned_csv_preserves_column_order() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("cleaned_data.csv");
        write_cleaned_csv(&[cleaned()], &path).expect("write should succeed");

        let contents = std::fs::read_to_string(&path).expect("output should exist");
        let header = contents.lines().next().expect("header row");
        assert_eq!(
            header,
            "id,name,age,salary,hire_date,department,bonus,address,phone,email"
        );
    }

    #[test]
    fn transformed_csv_uses_the_category_vocabulary() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("transformed_data.csv");
        write_transformed_csv(&[derived()], &path).expect("write should succeed");

        let contents = std::fs::read_to_string(&path).expect("output should exist");
        assert!(contents.contains("medium"), "got: {contents}");
        assert!(contents.contains("Early Career"), "got: {contents}");
    }

    #[test]
    fn department_stats_csv_uses_the_report_headers() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("department_statistics.csv");
        let stats = vec![DepartmentStat {
            department: "Sales".to_string(),
            average_salary: 70_000.0,
            average_age: 35.0,
        }];
        write_department_stats_csv(&stats, &path).expect("write should succeed");

        let contents = std::fs::read_to_string(&path).expect("output should exist");
        let header = contents.lines().next().expect("header row");
        assert_eq!(header, "Department,Average Salary,Average Age");
    }

    #[test]
    fn failed_write_leaves_no_staging_file_behind() {
        let dir = tempdir().expect("tempdir");
        // The destination name is occupied by a directory, so the final
        // rename must fail after the staging file was written.
        let path = dir.path().join("cleaned_data.csv");
        std::fs::create_dir(&path).expect("blocker dir");

        let error = write_cleaned_csv(&[cleaned()], &path).expect_err("rename should fail");
        assert_eq!(error.stage(), "write");
        assert_eq!(remaining_names(dir.path()), vec!["cleaned_data.csv"]);
    }

    #[test]
    fn commit_is_all_or_nothing() {
        let dir = tempdir().expect("tempdir");
        let first = dir.path().join("cleaned_data.csv");
        let second = dir.path().join("department_statistics.csv");
        std::fs::create_dir(&second).expect("blocker dir");

        let stats = vec![DepartmentStat {
            department: "Sales".to_string(),
            average_salary: 70_000.0,
            average_age: 35.0,
        }];

        let mut batch = OutputBatch::new();
        batch
            .stage_cleaned_csv(&[cleaned()], &first)
            .expect("staging should succeed");
        batch
            .stage_department_stats_csv(&stats, &second)
            .expect("staging should succeed");

        let error = batch.commit().expect_err("second rename should fail");
        assert_eq!(error.stage(), "write");
        assert!(!first.exists(), "first output must be rolled back");
        assert_eq!(remaining_names(dir.path()), vec!["department_statistics.csv"]);
    }

    #[test]
    fn dropping_an_uncommitted_batch_removes_staging_files() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("cleaned_data.csv");

        let mut batch = OutputBatch::new();
        batch
            .stage_cleaned_csv(&[cleaned()], &path)
            .expect("staging should succeed");
        drop(batch);

        assert!(remaining_names(dir.path()).is_empty());
    }

    #[test]
    fn parquet_output_is_nonempty() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("transformed_data.parquet");

        let mut batch = OutputBatch::new();
        batch
            .stage_transformed_parquet(&[derived()], &path)
            .expect("staging should succeed");
        batch.commit().expect("commit should succeed");

        let metadata = std::fs::metadata(&path).expect("output should exist");
        assert!(metadata.len() > 0);
    }
}
