use std::{io::BufWriter, path::PathBuf};

use clap::Parser;
use eyre::Context;
use libpeakanno::{bed, peaks, utils};

use crate::file::InputFile;

#[derive(Parser, Debug)]
pub struct ToBedCmd {
    /// Tab-delimited peak table
    #[clap(short, long)]
    input: InputFile,

    /// Path to output bed file, defaults to stdout if no argument provided.
    #[clap(short, long)]
    output: Option<PathBuf>,
}

impl ToBedCmd {
    pub fn run(self) -> eyre::Result<()> {
        let table = peaks::load_peaks(&self.input)?;
        let intervals = bed::intervals(&table)?;
        let writer = BufWriter::new(utils::stdout_or_file(self.output.as_ref())?);
        let n = bed::write_bed(writer, &intervals).wrap_err("Failed to write bed file")?;
        log::info!("Wrote {n} regions");
        Ok(())
    }
}
