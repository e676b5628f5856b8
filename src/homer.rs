use std::{
    ffi::OsStr,
    fs::File,
    path::{Path, PathBuf},
    process::{Command, ExitStatus, Stdio},
};

use crate::{error::AnnotateError, utils};

pub const ANNOTATE_PEAKS: &str = "annotatePeaks.pl";
pub const DEFAULT_GENOME: &str = "hg38";
pub const DEFAULT_CPUS: usize = 4;

/// Settings for running HOMER's annotatePeaks.pl.
#[derive(Debug, Clone)]
pub struct HomerOptions {
    program: PathBuf,
    genome: String,
    cpus: usize,
}

/// Outcome of one annotatePeaks.pl run.
#[derive(Debug)]
pub struct HomerRun {
    pub report: PathBuf,
    pub status: ExitStatus,
    pub stderr: String,
}

impl Default for HomerOptions {
    fn default() -> Self {
        Self {
            program: PathBuf::from(ANNOTATE_PEAKS),
            genome: DEFAULT_GENOME.to_string(),
            cpus: DEFAULT_CPUS,
        }
    }
}

impl HomerOptions {
    /// Use `program` if given, otherwise look up annotatePeaks.pl in $PATH.
    pub fn new(program: &Option<PathBuf>) -> Self {
        Self {
            program: utils::find_binary(ANNOTATE_PEAKS, program),
            ..Default::default()
        }
    }

    pub fn genome<S: Into<String>>(&mut self, genome: S) -> &mut Self {
        self.genome = genome.into();
        self
    }

    pub fn cpus(&mut self, cpus: usize) -> &mut Self {
        self.cpus = cpus;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn command<S: AsRef<OsStr>>(&self, bed: S) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(bed)
            .arg(&self.genome)
            .arg("-cpu")
            .arg(self.cpus.to_string());
        cmd
    }

    /// Run annotatePeaks.pl on `bed`, writing its report to `report`.
    ///
    /// Blocks until the process exits. A non-zero exit status is returned in
    /// [`HomerRun`] and not turned into an error here, see [`HomerRun::check`].
    pub fn run<P, Q>(&self, bed: P, report: Q) -> Result<HomerRun, AnnotateError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let report = report.as_ref();
        let report_file = File::create(report).map_err(|e| AnnotateError::io(report, e))?;

        let mut cmd = self.command(bed.as_ref());
        cmd.stdout(Stdio::from(report_file)).stderr(Stdio::piped());
        log::info!("{cmd:?} >{}", report.display());
        let output = cmd
            .output()
            .map_err(|e| AnnotateError::io(&self.program, e))?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        for line in stderr.lines() {
            log::debug!("{ANNOTATE_PEAKS}: {line}");
        }
        log::info!("Exit code: {}", output.status);
        Ok(HomerRun {
            report: report.to_path_buf(),
            status: output.status,
            stderr,
        })
    }
}

impl HomerRun {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Turn a failed run into [`AnnotateError::ExternalTool`].
    pub fn check(self) -> Result<Self, AnnotateError> {
        if self.success() {
            Ok(self)
        } else {
            Err(AnnotateError::ExternalTool {
                program: ANNOTATE_PEAKS.to_string(),
                status: self.status,
                stderr: self.stderr,
            })
        }
    }

    /// Last few lines of stderr, for error messages.
    pub fn stderr_tail(&self, n: usize) -> String {
        let lines: Vec<&str> = self.stderr.lines().collect();
        let skip = lines.len().saturating_sub(n);
        lines[skip..].join("\n")
    }
}
