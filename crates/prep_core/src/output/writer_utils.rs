use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::error::PipelineError;

/// A written staging file awaiting its rename into place.
#[derive(Debug)]
pub(crate) struct StagedFile {
    staging: PathBuf,
    destination: PathBuf,
}

impl StagedFile {
    pub(crate) fn destination(&self) -> &Path {
        &self.destination
    }

    /// Rename the staging file onto its destination.
    pub(crate) fn finalize(&self) -> Result<(), PipelineError> {
        fs::rename(&self.staging, &self.destination).map_err(|error| {
            PipelineError::Write(format!(
                "cannot finalize {}: {error}",
                self.destination.display()
            ))
        })
    }

    /// Best-effort removal; the staging file is already gone once finalized.
    pub(crate) fn remove_staging(&self) {
        let _ = fs::remove_file(&self.staging);
    }
}

/// Staging path next to the final destination, so the rename stays on one
/// filesystem.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "output".into());
    name.push(".staging");
    path.with_file_name(name)
}

/// Run `write_fn` against a staging file for `path`. The staging file is
/// removed on failure and is not renamed into place here; that happens when
/// the whole batch commits.
pub(crate) fn stage_file<F>(path: &Path, write_fn: F) -> Result<StagedFile, PipelineError>
where
    F: FnOnce(File) -> Result<(), PipelineError>,
{
    let staging = staging_path(path);
    let file = File::create(&staging).map_err(|error| {
        PipelineError::Write(format!("cannot create {}: {error}", staging.display()))
    })?;

    match write_fn(file) {
        Ok(()) => Ok(StagedFile {
            staging,
            destination: path.to_path_buf(),
        }),
        Err(error) => {
            let _ = fs::remove_file(&staging);
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn staging_files_sit_next_to_the_destination() {
        assert_eq!(
            staging_path(Path::new("out/cleaned_data.csv")),
            PathBuf::from("out/cleaned_data.csv.staging")
        );
    }

    #[test]
    fn staged_file_finalizes_into_place() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("out.csv");

        let staged = stage_file(&path, |mut file| {
            file.write_all(b"a,b\n")
                .map_err(|error| PipelineError::Write(error.to_string()))
        })
        .expect("staging should succeed");

        assert!(!path.exists(), "destination must not exist before finalize");
        staged.finalize().expect("finalize should succeed");
        assert_eq!(std::fs::read_to_string(&path).expect("output"), "a,b\n");
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn failed_staging_write_removes_the_staging_file() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("out.csv");

        let error = stage_file(&path, |_file| {
            Err(PipelineError::Write("forced failure".to_string()))
        })
        .expect_err("staging should fail");

        assert_eq!(error.stage(), "write");
        assert!(!path.exists());
        assert!(!staging_path(&path).exists());
    }
}
