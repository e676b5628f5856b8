use std::path::{Path, PathBuf};

use clap::{Args, Parser};
use libpeakanno::{
    discover,
    homer::{HomerOptions, DEFAULT_CPUS, DEFAULT_GENOME},
    merge::MergeOptions,
    scratch::ScratchOptions,
    AnnotateOptions,
};

use crate::file::InputFile;

/// Settings shared by every command that runs annotatePeaks.pl.
#[derive(Args, Debug)]
pub struct AnnotateArgs {
    /// Directory for the annotated table, must already exist
    #[clap(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// HOMER genome identifier passed to annotatePeaks.pl
    #[clap(short, long, default_value = DEFAULT_GENOME)]
    pub genome: String,

    /// Number of CPUs annotatePeaks.pl may use
    #[clap(short = 'j', long, default_value_t = DEFAULT_CPUS)]
    pub cpus: usize,

    /// Path to annotatePeaks.pl, if not specified will look in $PATH
    #[clap(long)]
    pub homer_path: Option<PathBuf>,

    /// Keep the intermediate bed file and HOMER report after the run
    #[clap(long, default_value_t = false)]
    pub keep_temp: bool,

    /// Directory in which the per-run scratch directory is created, defaults
    /// to the system temp directory
    #[clap(long)]
    pub temp_dir: Option<PathBuf>,

    /// Merge whatever annotatePeaks.pl wrote even if it exits with an error
    #[clap(long, default_value_t = false)]
    pub allow_homer_failure: bool,

    /// Also add "Nearest Gene" and "Genomic Feature" columns, resolved from
    /// Gene Name / Nearest PromoterID and Annotation / Detailed Annotation
    #[clap(long, default_value_t = false)]
    pub summary_columns: bool,

    /// Disable progress spinners
    #[clap(long, default_value_t = false)]
    pub no_progress: bool,
}

impl AnnotateArgs {
    fn options(&self) -> AnnotateOptions {
        let mut homer = HomerOptions::new(&self.homer_path);
        homer.genome(self.genome.as_str()).cpus(self.cpus);
        log::info!("Using {}", homer.program().display());

        let mut scratch = ScratchOptions::default();
        scratch.keep(self.keep_temp).parent(self.temp_dir.clone());

        let mut merge = MergeOptions::default();
        merge.summary_columns(self.summary_columns);

        let mut opts = AnnotateOptions::new(homer, &self.output_dir);
        opts.scratch_options(scratch)
            .merge_options(merge)
            .allow_tool_failure(self.allow_homer_failure)
            .progress(!self.no_progress);
        opts
    }

    pub fn annotate(&self, input: &Path) -> eyre::Result<()> {
        log::info!("{self:?}");
        let summary = self.options().run(input)?;
        println!("{summary}");
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct RunCmd {
    /// Directory holding exactly one .txt peak table
    #[clap(long, default_value = "input")]
    pub input_dir: PathBuf,

    #[clap(flatten)]
    pub args: AnnotateArgs,
}

impl RunCmd {
    pub fn run(self) -> eyre::Result<()> {
        let input = discover::find_input(&self.input_dir)?;
        log::info!("Found input file: {}", input.display());
        self.args.annotate(&input)
    }
}

#[derive(Parser, Debug)]
pub struct AnnotateCmd {
    /// Tab-delimited peak table with chromosome, location, direction and
    /// frag_numb columns
    #[clap(short, long)]
    pub input: InputFile,

    #[clap(flatten)]
    pub args: AnnotateArgs,
}

impl AnnotateCmd {
    pub fn run(self) -> eyre::Result<()> {
        self.args.annotate(&self.input.0)
    }
}
