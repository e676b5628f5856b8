use std::path::Path;

use crate::{error::AnnotateError, table::Table};

pub const CHROMOSOME: &str = "chromosome";
pub const LOCATION: &str = "location";
pub const DIRECTION: &str = "direction";
pub const PEAK_ID: &str = "frag_numb";

pub const REQUIRED_COLUMNS: [&str; 4] = [CHROMOSOME, LOCATION, DIRECTION, PEAK_ID];

/// Load a peak table and check that it has every required column.
pub fn load_peaks<P: AsRef<Path>>(path: P) -> Result<Table, AnnotateError> {
    let table = Table::from_path(path)?;
    table.require(&REQUIRED_COLUMNS)?;
    log::info!(
        "Loaded {} peaks from {}",
        table.len(),
        table.path().display()
    );
    log::debug!("Columns: {:?}", table.headers());
    Ok(table)
}

#[cfg(test)]
mod test {
    use assert_fs::{prelude::*, TempDir};

    use super::*;

    #[test]
    fn test_load_peaks() -> eyre::Result<()> {
        let temp_dir = TempDir::new()?;
        let input = temp_dir.child("peaks.txt");
        input.write_str("frag_numb\tchromosome\tlocation\tdirection\tscore\nfrag_1\tchr1\t1000\t+\t3.5\n")?;
        let table = load_peaks(input.path())?;
        assert_eq!(table.len(), 1);
        assert_eq!(table.column(PEAK_ID)?, 0);
        Ok(())
    }

    #[test]
    fn test_missing_columns_fail_fast() -> eyre::Result<()> {
        let temp_dir = TempDir::new()?;
        let input = temp_dir.child("peaks.txt");
        input.write_str("chromosome\tposition\nchr1\t1000\n")?;
        match load_peaks(input.path()) {
            Err(AnnotateError::KeyMissing { columns, .. }) => {
                assert_eq!(columns, vec!["location", "direction", "frag_numb"])
            }
            other => panic!("expected KeyMissing, got {other:?}"),
        }
        Ok(())
    }
}
