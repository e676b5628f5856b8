use std::path::PathBuf;

use clap::Parser;
use libpeakanno::{discover, merge::MergeOptions, peaks, report::AnnotationReport};

use crate::file::InputFile;

#[derive(Parser, Debug)]
pub struct MergeCmd {
    /// Tab-delimited peak table the report was produced from
    #[clap(short, long)]
    input: InputFile,

    /// Report written by annotatePeaks.pl
    #[clap(short, long)]
    report: InputFile,

    /// Path to the merged table, defaults to
    /// {output-dir}/{input name}_annotated.txt
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Directory for the merged table when --output is not given
    #[clap(long, default_value = "output")]
    output_dir: PathBuf,

    /// Also add "Nearest Gene" and "Genomic Feature" columns
    #[clap(long, default_value_t = false)]
    summary_columns: bool,
}

impl MergeCmd {
    pub fn run(self) -> eyre::Result<()> {
        let output = match self.output {
            Some(output) => output,
            None => discover::output_path(&self.output_dir, &self.input)?,
        };
        let table = peaks::load_peaks(&self.input)?;
        let report = AnnotationReport::from_path(&self.report)?;
        let merged = MergeOptions::default()
            .summary_columns(self.summary_columns)
            .merge(&table, &report)?;
        merged.write(&output)?;
        println!(
            "Annotated {} of {} peaks: {}",
            merged.matched(),
            merged.len(),
            output.display()
        );
        Ok(())
    }
}
