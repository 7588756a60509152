use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Scratch directory holding generated programs and build outputs.
/// Removed when dropped.
pub struct Sandbox {
    working_directory: PathBuf,
}

impl Sandbox {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::Builder::new()
            .prefix("dsa-harness-")
            .tempdir()
            .context("Failed to create sandbox directory")?;

        Ok(Self {
            working_directory: temp_dir.keep(),
        })
    }

    /// Fresh subdirectory for one run, so concurrent test cases never share files
    pub fn run_dir(&self) -> Result<tempfile::TempDir> {
        tempfile::Builder::new()
            .prefix("run-")
            .tempdir_in(&self.working_directory)
            .context("Failed to create run directory")
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_directory
    }

    pub fn cleanup(&self) -> Result<()> {
        if self.working_directory.exists() {
            std::fs::remove_dir_all(&self.working_directory)
                .context("Failed to cleanup sandbox directory")?;
        }
        Ok(())
    }
}

impl Drop for Sandbox {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
