use std::path::{Path, PathBuf};

use eyre::Context;

use crate::error::AnnotateError;

/// Suffix appended to the input file stem for the annotated output.
pub const OUTPUT_SUFFIX: &str = "_annotated.txt";

/// Find the single `.txt` file in `dir`. Hidden files are skipped.
pub fn find_input<P: AsRef<Path>>(dir: P) -> eyre::Result<PathBuf> {
    let dir = dir.as_ref();
    let dir_str = dir
        .to_str()
        .ok_or_else(|| eyre::eyre!("Failed to convert path into str, unicode issue?"))?;
    let pattern = format!("{}/*.txt", glob::Pattern::escape(dir_str));

    let opts = glob::MatchOptions {
        require_literal_leading_dot: true,
        ..Default::default()
    };

    let mut files = Vec::new();
    for entry in glob::glob_with(&pattern, opts).wrap_err("Invalid input directory pattern")? {
        let entry = entry?;
        log::debug!("Found input candidate: {}", entry.display());
        files.push(entry);
    }

    match files.len() {
        0 => Err(AnnotateError::NoInputFiles {
            dir: dir.to_path_buf(),
        }
        .into()),
        1 => Ok(files.remove(0)),
        _ => Err(AnnotateError::MultipleInputFiles {
            dir: dir.to_path_buf(),
            files,
        }
        .into()),
    }
}

/// `<output_dir>/<input file name without .txt>_annotated.txt`
pub fn output_path<P, Q>(output_dir: P, input: Q) -> eyre::Result<PathBuf>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let name = input
        .as_ref()
        .file_name()
        .ok_or(eyre::eyre!("Invalid input file name"))?
        .to_str()
        .ok_or(eyre::eyre!("Invalid path name"))?;
    let stem = name.strip_suffix(".txt").unwrap_or(name);
    Ok(output_dir.as_ref().join(format!("{stem}{OUTPUT_SUFFIX}")))
}

#[cfg(test)]
mod test {
    use assert_fs::{prelude::*, TempDir};

    use super::*;

    #[test]
    fn test_output_path() {
        let out = output_path("output", "input/sample_peaks.txt").unwrap();
        assert_eq!(out, PathBuf::from("output/sample_peaks_annotated.txt"));
        let out = output_path("results", "peaks.tsv").unwrap();
        assert_eq!(out, PathBuf::from("results/peaks.tsv_annotated.txt"));
    }

    #[test]
    fn test_single_input() -> eyre::Result<()> {
        let temp_dir = TempDir::new()?;
        temp_dir.child("peaks.txt").touch()?;
        temp_dir.child("notes.md").touch()?;
        let found = find_input(temp_dir.path())?;
        assert_eq!(found, temp_dir.path().join("peaks.txt"));
        Ok(())
    }

    #[test]
    fn test_hidden_txt_is_skipped() -> eyre::Result<()> {
        let temp_dir = TempDir::new()?;
        temp_dir.child("sample.txt").touch()?;
        temp_dir.child("._sample.txt").touch()?;
        temp_dir.child(".notes.txt").touch()?;
        let found = find_input(temp_dir.path())?;
        assert_eq!(found, temp_dir.path().join("sample.txt"));
        Ok(())
    }

    #[test]
    fn test_no_input() -> eyre::Result<()> {
        let temp_dir = TempDir::new()?;
        let err = find_input(temp_dir.path()).unwrap_err();
        let err = err.downcast_ref::<AnnotateError>().unwrap();
        assert!(matches!(err, AnnotateError::NoInputFiles { .. }));
        assert!(err.to_string().contains("No .txt files found"));
        Ok(())
    }

    #[test]
    fn test_multiple_inputs() -> eyre::Result<()> {
        let temp_dir = TempDir::new()?;
        temp_dir.child("a.txt").touch()?;
        temp_dir.child("b.txt").touch()?;
        let err = find_input(temp_dir.path()).unwrap_err();
        match err.downcast_ref::<AnnotateError>() {
            Some(AnnotateError::MultipleInputFiles { files, .. }) => assert_eq!(files.len(), 2),
            other => panic!("expected MultipleInputFiles, got {other:?}"),
        }
        let msg = err.to_string();
        assert!(msg.contains("a.txt") && msg.contains("b.txt"));
        Ok(())
    }
}
