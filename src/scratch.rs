//! Per-run directory for the intermediate bed file and HOMER report.
use std::path::{Path, PathBuf};

use tempfile::{Builder, TempDir};

use crate::error::AnnotateError;

pub const BED_FILE: &str = "temp_peaks.bed";
pub const REPORT_FILE: &str = "temp_homer_annotation.txt";

#[derive(Debug, Clone, Default)]
pub struct ScratchOptions {
    keep: bool,
    parent: Option<PathBuf>,
}

/// Removed on drop, unless created with `keep`.
#[derive(Debug)]
pub enum Scratch {
    Managed(TempDir),
    Kept(PathBuf),
}

impl ScratchOptions {
    pub fn keep(&mut self, keep: bool) -> &mut Self {
        self.keep = keep;
        self
    }

    /// Create the scratch directory inside `parent` instead of the system
    /// temp directory.
    pub fn parent<P: Into<PathBuf>>(&mut self, parent: Option<P>) -> &mut Self {
        self.parent = parent.map(Into::into);
        self
    }

    pub fn create(&self) -> Result<Scratch, AnnotateError> {
        let mut builder = Builder::new();
        builder.prefix("peakanno");
        let dir = match &self.parent {
            Some(parent) => builder
                .tempdir_in(parent)
                .map_err(|e| AnnotateError::io(parent, e))?,
            None => builder
                .tempdir()
                .map_err(|e| AnnotateError::io(std::env::temp_dir(), e))?,
        };
        log::debug!("Scratch directory: {}", dir.path().display());
        if self.keep {
            let path = dir.keep();
            log::info!("Keeping intermediate files in {}", path.display());
            Ok(Scratch::Kept(path))
        } else {
            Ok(Scratch::Managed(dir))
        }
    }
}

impl Scratch {
    pub fn path(&self) -> &Path {
        match self {
            Scratch::Managed(dir) => dir.path(),
            Scratch::Kept(path) => path,
        }
    }

    pub fn bed(&self) -> PathBuf {
        self.path().join(BED_FILE)
    }

    pub fn report(&self) -> PathBuf {
        self.path().join(REPORT_FILE)
    }

    pub fn is_kept(&self) -> bool {
        matches!(self, Scratch::Kept(_))
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        if !self.is_kept() {
            log::debug!("Removing {}", self.path().display());
        }
    }
}

#[cfg(test)]
mod test {
    use assert_fs::TempDir as FixtureDir;

    use super::*;

    #[test]
    fn test_managed_is_removed() -> eyre::Result<()> {
        let parent = FixtureDir::new()?;
        let scratch = ScratchOptions::default()
            .parent(Some(parent.path()))
            .create()?;
        let path = scratch.path().to_path_buf();
        assert!(path.starts_with(parent.path()));
        std::fs::write(scratch.bed(), "chr1\t0\t1\n")?;
        assert!(!scratch.is_kept());
        assert!(path.exists());
        drop(scratch);
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn test_kept_survives() -> eyre::Result<()> {
        let parent = FixtureDir::new()?;
        let scratch = ScratchOptions::default()
            .keep(true)
            .parent(Some(parent.path()))
            .create()?;
        std::fs::write(scratch.report(), "")?;
        let report = scratch.report();
        drop(scratch);
        assert!(report.exists());
        assert_eq!(report.file_name().unwrap(), REPORT_FILE);
        Ok(())
    }

    #[test]
    fn test_two_runs_do_not_share_files() -> eyre::Result<()> {
        let parent = FixtureDir::new()?;
        let mut opts = ScratchOptions::default();
        opts.parent(Some(parent.path()));
        let a = opts.create()?;
        let b = opts.create()?;
        assert_ne!(a.bed(), b.bed());
        Ok(())
    }
}
