use std::{
    fs::File,
    io::{stdout, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use which::which;

/// Allows for writing to File or Stdout depending on if a filename is given.
pub fn stdout_or_file<P>(filename: Option<&P>) -> Result<Box<dyn Write>>
where
    P: AsRef<Path>,
{
    if let Some(fp) = filename {
        let handle = File::create(fp)?;
        Ok(Box::new(handle))
    } else {
        let handle = stdout().lock();
        Ok(Box::new(handle))
    }
}

/// Path given by the user, else the binary found in $PATH, else the bare name
/// so the failure surfaces when the command is spawned.
pub fn find_binary(name: &'static str, binary_filepath: &Option<PathBuf>) -> PathBuf {
    if let Some(p) = binary_filepath {
        p.to_path_buf()
    } else {
        which(name).unwrap_or_else(|e| {
            log::debug!("{name} not found in $PATH ({e}), using bare name");
            PathBuf::from(name)
        })
    }
}

/// Run one pipeline stage behind a spinner, if `progress` is set.
pub fn wrap_stage<F, T>(msg: &'static str, progress: bool, f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    log::info!("{msg}");
    if !progress {
        return f();
    }
    let p = ProgressBar::new_spinner().with_message(msg);
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}") {
        p.set_style(style);
    }
    p.enable_steady_tick(Duration::from_millis(100));

    let res = f();
    if res.is_ok() {
        p.finish_with_message(format!("✅ \"{msg}\" complete"));
    } else {
        p.finish_with_message(format!("❌ \"{msg}\" failed"));
    }
    res
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_find_binary_prefers_given_path() {
        let given = Some(PathBuf::from("/opt/bin/tool"));
        assert_eq!(find_binary("tool", &given), PathBuf::from("/opt/bin/tool"));
    }

    #[test]
    fn test_find_binary_falls_back_to_name() {
        let found = find_binary("surely-not-a-real-binary-name", &None);
        assert_eq!(found, PathBuf::from("surely-not-a-real-binary-name"));
    }

    #[test]
    fn test_wrap_stage_passes_result_through() {
        let ok = wrap_stage("ok", false, || Ok(3)).unwrap();
        assert_eq!(ok, 3);
        let err = wrap_stage("err", true, || -> Result<()> { Err(eyre::eyre!("boom")) });
        assert_eq!(err.unwrap_err().to_string(), "boom");
    }
}
