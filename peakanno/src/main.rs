mod cmd;
mod file;

use std::{path::PathBuf, process};

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use cmd::{
    annotate::{AnnotateCmd, RunCmd},
    merge::MergeCmd,
    to_bed::ToBedCmd,
};
use eyre::Result;
use human_panic::setup_panic;
use libpeakanno::AnnotateError;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about=None)]
/// Annotate peak tables with HOMER annotatePeaks.pl.
///
/// Without a subcommand, behaves like `peakanno run` with default settings:
/// the single .txt file in input/ is annotated into output/.
struct Args {
    #[clap(flatten)]
    verbose: Verbosity<InfoLevel>,

    /// Write log messages to this file instead of stderr
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,

    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Annotate the single .txt file found in the input directory
    Run(RunCmd),

    /// Annotate a given peak table
    Annotate(AnnotateCmd),

    /// Convert a peak table to a single-base bed file
    ToBed(ToBedCmd),

    /// Merge an existing annotatePeaks.pl report onto a peak table
    Merge(MergeCmd),
}

fn init_logging(log_file: Option<&PathBuf>, level: LevelFilter) -> Result<()> {
    if let Some(log_file) = log_file {
        simple_logging::log_to_file(log_file, level)?;
    } else {
        env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .init();
    }
    Ok(())
}

fn main() -> Result<()> {
    setup_panic!();
    jane_eyre::install()?;

    let args = Args::parse();
    init_logging(args.log_file.as_ref(), args.verbose.log_level_filter())?;

    let res = match args.command {
        Some(Commands::Run(cmd)) => cmd.run(),
        Some(Commands::Annotate(cmd)) => cmd.run(),
        Some(Commands::ToBed(cmd)) => cmd.run(),
        Some(Commands::Merge(cmd)) => cmd.run(),
        None => RunCmd::parse_from(["run"]).run(),
    };

    if let Err(err) = res {
        if let Some(usage) = err.downcast_ref::<AnnotateError>().filter(|e| e.is_usage()) {
            eprintln!("ERROR: {usage}");
            process::exit(1);
        }
        return Err(err);
    }
    Ok(())
}
