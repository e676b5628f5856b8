//! Left join of HOMER annotations onto the original peak table.
use std::path::Path;

use csv::StringRecord;

use crate::{
    error::AnnotateError,
    peaks::PEAK_ID,
    report::{Annotation, AnnotationReport, ANNOTATION_COLUMNS, RESOLUTIONS},
    table::{write_table, Table},
};

/// Suffix for annotation columns whose name is already used by the input.
pub const COLLISION_SUFFIX: &str = "_annotation";

#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    /// Also append the resolved nearest gene and genomic feature columns.
    pub summary_columns: bool,
}

/// Merged table, one row per input peak.
#[derive(Debug)]
pub struct Merged {
    headers: StringRecord,
    rows: Vec<StringRecord>,
    matched: usize,
}

impl MergeOptions {
    pub fn summary_columns(&mut self, summary_columns: bool) -> &mut Self {
        self.summary_columns = summary_columns;
        self
    }

    fn extra_headers(&self) -> Vec<&'static str> {
        let mut headers = ANNOTATION_COLUMNS.to_vec();
        if self.summary_columns {
            headers.extend(RESOLUTIONS.iter().map(|r| r.name));
        }
        headers
    }

    fn extra_values<'a>(&self, annotation: Option<&'a Annotation>) -> Vec<&'a str> {
        let mut values: Vec<&str> = match annotation {
            Some(ann) => ann.values().iter().map(String::as_str).collect(),
            None => vec![""; ANNOTATION_COLUMNS.len()],
        };
        if self.summary_columns {
            values.extend(
                RESOLUTIONS
                    .iter()
                    .map(|r| annotation.and_then(|a| a.resolve(r)).unwrap_or_default()),
            );
        }
        values
    }

    /// Left join `report` onto `peaks` by peak id. Every peak keeps its row
    /// and original values, unmatched peaks get empty annotation fields.
    pub fn merge(&self, peaks: &Table, report: &AnnotationReport) -> Result<Merged, AnnotateError> {
        let key_idx = peaks.column(PEAK_ID)?;

        let mut headers = peaks.headers().clone();
        for name in self.extra_headers() {
            if headers.iter().any(|h| h == name) {
                headers.push_field(&format!("{name}{COLLISION_SUFFIX}"));
            } else {
                headers.push_field(name);
            }
        }

        let mut matched = 0;
        let rows = peaks
            .records()
            .iter()
            .map(|rec| {
                let annotation = report.get(&rec[key_idx]);
                if annotation.is_some() {
                    matched += 1;
                }
                let mut row = rec.clone();
                for value in self.extra_values(annotation) {
                    row.push_field(value);
                }
                row
            })
            .collect::<Vec<_>>();

        if matched < rows.len() {
            log::warn!("{} of {} peaks had no annotation", rows.len() - matched, rows.len());
        }
        Ok(Merged {
            headers,
            rows,
            matched,
        })
    }
}

impl Merged {
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of peaks that found an annotation.
    pub fn matched(&self) -> usize {
        self.matched
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), AnnotateError> {
        let path = path.as_ref();
        write_table(path, &self.headers, self.rows.iter().cloned())?;
        log::info!("Saved annotated file: {}", path.display());
        Ok(())
    }
}
