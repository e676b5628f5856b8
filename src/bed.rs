//! Conversion of peak tables into single-base BED6 intervals for HOMER.
use std::{io::Write, path::Path};

use csv::WriterBuilder;
use serde::Serialize;

use crate::{
    error::AnnotateError,
    peaks::{CHROMOSOME, DIRECTION, LOCATION, PEAK_ID},
    table::Table,
};

/// One BED6 line. Coordinates are 0-based half-open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub name: String,
    pub score: u32,
    pub strand: String,
}

impl Interval {
    /// Single base interval covering a 1-based `location`.
    pub fn from_location(chrom: &str, location: u64, name: &str, strand: &str) -> Option<Self> {
        let start = location.checked_sub(1)?;
        Some(Interval {
            chrom: chrom.to_string(),
            start,
            end: location,
            name: name.to_string(),
            score: 0,
            strand: strand.to_string(),
        })
    }
}

/// Derive one interval per peak, in table order.
pub fn intervals(table: &Table) -> Result<Vec<Interval>, AnnotateError> {
    let chrom_idx = table.column(CHROMOSOME)?;
    let loc_idx = table.column(LOCATION)?;
    let strand_idx = table.column(DIRECTION)?;
    let name_idx = table.column(PEAK_ID)?;

    table
        .records()
        .iter()
        .enumerate()
        .map(|(idx, rec)| {
            let raw = &rec[loc_idx];
            raw.trim()
                .parse::<u64>()
                .ok()
                .and_then(|loc| {
                    Interval::from_location(&rec[chrom_idx], loc, &rec[name_idx], &rec[strand_idx])
                })
                .ok_or_else(|| AnnotateError::TypeConversion {
                    row: idx + 1,
                    column: LOCATION,
                    value: raw.to_string(),
                })
        })
        .collect()
}

/// Write intervals without a header, returns the number of lines written.
pub fn write_bed<W: Write>(writer: W, intervals: &[Interval]) -> Result<usize, csv::Error> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer);
    for interval in intervals {
        writer.serialize(interval)?;
    }
    writer.flush()?;
    Ok(intervals.len())
}

/// Convert `table` and write the result to the bed file at `path`.
pub fn table_to_bed<P: AsRef<Path>>(table: &Table, path: P) -> Result<usize, AnnotateError> {
    let path = path.as_ref();
    let intervals = intervals(table)?;
    let file = std::fs::File::create(path).map_err(|e| AnnotateError::io(path, e))?;
    let n = write_bed(file, &intervals).map_err(|source| AnnotateError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Created BED file {} with {n} regions", path.display());
    Ok(n)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use quickcheck::{quickcheck, TestResult};

    use super::*;

    fn table(text: &str) -> Table {
        Table::from_reader(text.as_bytes(), "peaks.txt").unwrap()
    }

    #[test]
    fn test_two_peaks() {
        let t = table(
            "chromosome\tlocation\tdirection\tfrag_numb\n\
             chr1\t1000\t+\tfrag_1\n\
             chr2\t5000\t-\tfrag_2\n",
        );
        let ivs = intervals(&t).unwrap();
        let mut buf = Vec::new();
        let n = write_bed(&mut buf, &ivs).unwrap();
        assert_eq!(n, 2);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "chr1\t999\t1000\tfrag_1\t0\t+\nchr2\t4999\t5000\tfrag_2\t0\t-\n"
        );
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let t = table("frag_numb\textra\tdirection\tlocation\tchromosome\np1\tx\t-\t 7 \tchrX\n");
        let ivs = intervals(&t).unwrap();
        assert_eq!(
            ivs,
            vec![Interval {
                chrom: "chrX".to_string(),
                start: 6,
                end: 7,
                name: "p1".to_string(),
                score: 0,
                strand: "-".to_string(),
            }]
        );
    }

    #[test]
    fn test_non_numeric_location() {
        let t = table(
            "chromosome\tlocation\tdirection\tfrag_numb\n\
             chr1\t10\t+\tfrag_1\n\
             chr1\tten\t+\tfrag_2\n",
        );
        match intervals(&t) {
            Err(AnnotateError::TypeConversion { row, column, value }) => {
                assert_eq!(row, 2);
                assert_eq!(column, "location");
                assert_eq!(value, "ten");
            }
            other => panic!("expected TypeConversion, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_location() {
        let t = table("chromosome\tlocation\tdirection\tfrag_numb\nchr1\t0\t+\tfrag_1\n");
        assert!(matches!(
            intervals(&t),
            Err(AnnotateError::TypeConversion { row: 1, .. })
        ));
    }

    #[test]
    fn test_single_base_property() {
        fn prop(location: u64) -> TestResult {
            match Interval::from_location("chr1", location, "p", "+") {
                None => TestResult::from_bool(location == 0),
                Some(iv) => TestResult::from_bool(iv.end == iv.start + 1 && iv.start == location - 1),
            }
        }
        quickcheck(prop as fn(u64) -> TestResult);
    }

    #[test]
    fn test_row_count_and_order_property() {
        fn prop(locations: Vec<u32>) -> bool {
            let mut text = String::from("chromosome\tlocation\tdirection\tfrag_numb\n");
            for (i, loc) in locations.iter().enumerate() {
                text.push_str(&format!("chr1\t{}\t+\tpeak_{i}\n", *loc as u64 + 1));
            }
            let ivs = intervals(&table(&text)).unwrap();
            ivs.len() == locations.len()
                && ivs
                    .iter()
                    .enumerate()
                    .all(|(i, iv)| iv.name == format!("peak_{i}"))
        }
        quickcheck(prop as fn(Vec<u32>) -> bool);
    }
}
