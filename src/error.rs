use std::{io, path::PathBuf, process::ExitStatus};

use itertools::Itertools;
use thiserror::Error;

/// Failures of the individual annotation stages.
#[derive(Error, Debug)]
pub enum AnnotateError {
    #[error("No .txt files found in '{}' folder, please place your input file in that directory", .dir.display())]
    NoInputFiles { dir: PathBuf },

    #[error(
        "Found {} files in '{}' folder:\n{}\nPlease ensure there is only ONE .txt file in that folder",
        .files.len(),
        .dir.display(),
        .files.iter().map(|f| format!("  - {}", f.display())).join("\n")
    )]
    MultipleInputFiles { dir: PathBuf, files: Vec<PathBuf> },

    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to parse {} as tab-delimited text", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Missing required column(s) in {}: {}", .path.display(), .columns.iter().map(|c| format!("'{c}'")).join(", "))]
    KeyMissing { path: PathBuf, columns: Vec<String> },

    #[error("Row {row}: {column} value {value:?} is not a 1-based integer coordinate")]
    TypeConversion {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("{program} failed with {status}")]
    ExternalTool {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("IO error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AnnotateError {
    /// Errors caused by how the tool was invoked rather than by the data.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            AnnotateError::NoInputFiles { .. } | AnnotateError::MultipleInputFiles { .. }
        )
    }

    pub(crate) fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        AnnotateError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_multiple_files_message() {
        let err = AnnotateError::MultipleInputFiles {
            dir: PathBuf::from("input"),
            files: vec![PathBuf::from("input/a.txt"), PathBuf::from("input/b.txt")],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Found 2 files in 'input' folder:"));
        assert!(msg.contains("  - input/a.txt\n  - input/b.txt"));
        assert!(err.is_usage());
    }

    #[test]
    fn test_key_missing_message() {
        let err = AnnotateError::KeyMissing {
            path: PathBuf::from("report.txt"),
            columns: vec!["Gene Name".to_string(), "Gene Type".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Missing required column(s) in report.txt: 'Gene Name', 'Gene Type'"
        );
        assert!(!err.is_usage());
    }
}
