//! The full annotation run: peaks -> bed -> annotatePeaks.pl -> merged table.
use std::{
    fmt,
    path::{Path, PathBuf},
};

use csv::StringRecord;
use eyre::Context;

use crate::{
    bed,
    discover,
    error::AnnotateError,
    homer::HomerOptions,
    merge::{MergeOptions, Merged},
    peaks::{self, CHROMOSOME, LOCATION, PEAK_ID},
    report::{AnnotationReport, GENOMIC_FEATURE, NEAREST_GENE},
    scratch::ScratchOptions,
    table::Table,
    utils::wrap_stage,
};

const PREVIEW_ROWS: usize = 5;

#[derive(Debug, Clone)]
pub struct AnnotateOptions {
    homer: HomerOptions,
    merge: MergeOptions,
    scratch: ScratchOptions,
    output_dir: PathBuf,
    allow_tool_failure: bool,
    progress: bool,
}

/// What a finished run produced.
#[derive(Debug)]
pub struct AnnotateSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub rows: usize,
    pub matched: usize,
    /// Rows in the HOMER report, duplicates included.
    pub annotations: usize,
    pub preview: Vec<[String; 5]>,
}

impl AnnotateOptions {
    pub fn new<P: Into<PathBuf>>(homer: HomerOptions, output_dir: P) -> Self {
        Self {
            homer,
            merge: MergeOptions::default(),
            scratch: ScratchOptions::default(),
            output_dir: output_dir.into(),
            allow_tool_failure: false,
            progress: true,
        }
    }

    pub fn merge_options(&mut self, merge: MergeOptions) -> &mut Self {
        self.merge = merge;
        self
    }

    pub fn scratch_options(&mut self, scratch: ScratchOptions) -> &mut Self {
        self.scratch = scratch;
        self
    }

    /// Keep going when annotatePeaks.pl exits with an error, merging whatever
    /// it wrote.
    pub fn allow_tool_failure(&mut self, allow: bool) -> &mut Self {
        self.allow_tool_failure = allow;
        self
    }

    pub fn progress(&mut self, progress: bool) -> &mut Self {
        self.progress = progress;
        self
    }

    pub fn run<P: AsRef<Path>>(&self, input: P) -> eyre::Result<AnnotateSummary> {
        let input = input.as_ref();
        if !self.output_dir.is_dir() {
            return Err(AnnotateError::io(
                &self.output_dir,
                std::io::Error::new(std::io::ErrorKind::NotFound, "output directory does not exist"),
            )
            .into());
        }
        let output = discover::output_path(&self.output_dir, input)?;

        let table = wrap_stage("Reading input file", self.progress, || {
            Ok(peaks::load_peaks(input)?)
        })?;

        let scratch = self.scratch.create()?;
        let bed_path = scratch.bed();
        wrap_stage("Converting to BED format", self.progress, || {
            Ok(bed::table_to_bed(&table, &bed_path)?)
        })?;

        let run = wrap_stage("Running HOMER annotatePeaks.pl", self.progress, || {
            Ok(self.homer.run(&bed_path, scratch.report())?)
        })?;
        let run = if run.success() || !self.allow_tool_failure {
            let tail = run.stderr_tail(10);
            run.check()
                .wrap_err_with(|| format!("annotatePeaks.pl stderr:\n{tail}"))?
        } else {
            log::error!(
                "HOMER failed with {}, merging its partial output:\n{}",
                run.status,
                run.stderr_tail(10)
            );
            run
        };

        let (report, merged) = wrap_stage("Merging annotations", self.progress, || {
            let report = AnnotationReport::from_path(&run.report)?;
            let merged = self.merge.merge(&table, &report)?;
            Ok((report, merged))
        })?;
        merged
            .write(&output)
            .wrap_err("Failed to save annotated file")?;
        log::info!(
            "{} of {} annotated peaks matched the input",
            merged.matched(),
            report.n_peaks()
        );

        Ok(AnnotateSummary::new(input, output, &table, &report, &merged))
    }
}

impl AnnotateSummary {
    fn new(
        input: &Path,
        output: PathBuf,
        table: &Table,
        report: &AnnotationReport,
        merged: &Merged,
    ) -> Self {
        let cell = |row: &StringRecord, idx: Option<usize>| {
            idx.and_then(|i| row.get(i)).unwrap_or_default().to_string()
        };
        let key = table.position(PEAK_ID);
        let chrom = table.position(CHROMOSOME);
        let loc = table.position(LOCATION);

        let preview = table
            .records()
            .iter()
            .take(PREVIEW_ROWS)
            .map(|row| {
                let annotation = key.and_then(|k| row.get(k)).and_then(|id| report.get(id));
                [
                    cell(row, key),
                    cell(row, chrom),
                    cell(row, loc),
                    annotation
                        .and_then(|a| a.nearest_gene())
                        .unwrap_or_default()
                        .to_string(),
                    annotation
                        .and_then(|a| a.genomic_feature())
                        .unwrap_or_default()
                        .to_string(),
                ]
            })
            .collect();

        AnnotateSummary {
            input: input.to_path_buf(),
            output,
            rows: merged.len(),
            matched: merged.matched(),
            annotations: report.n_records(),
            preview,
        }
    }
}

impl fmt::Display for AnnotateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "ANNOTATION COMPLETE!")?;
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "Input:     {}", self.input.display())?;
        writeln!(f, "Output:    {}", self.output.display())?;
        writeln!(f, "HOMER:     {} annotations", self.annotations)?;
        writeln!(f, "Rows:      {}", self.rows)?;
        writeln!(f, "Annotated: {}", self.matched)?;
        if self.preview.is_empty() {
            return Ok(());
        }
        writeln!(f, "\nFirst {} examples:", self.preview.len())?;
        let header = [PEAK_ID, CHROMOSOME, LOCATION, NEAREST_GENE, GENOMIC_FEATURE];
        let widths: Vec<usize> = (0..header.len())
            .map(|i| {
                self.preview
                    .iter()
                    .map(|row| row[i].len())
                    .chain(std::iter::once(header[i].len()))
                    .max()
                    .unwrap_or_default()
            })
            .collect();
        let line = |f: &mut fmt::Formatter<'_>, cells: &[&str]| -> fmt::Result {
            let cells: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(c, &w)| format!("{c:<w$}"))
                .collect();
            writeln!(f, "{}", cells.join("  ").trim_end())
        };
        line(f, &header)?;
        for row in &self.preview {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            line(f, &cells)?;
        }
        Ok(())
    }
}
