//! HOMER annotatePeaks.pl reports.
use std::path::Path;

use csv::StringRecord;
use fnv::FnvHashMap;

use crate::{error::AnnotateError, table::Table};

/// Report columns carried into the merged output, in output order.
pub const ANNOTATION_COLUMNS: [&str; 12] = [
    "Annotation",
    "Detailed Annotation",
    "Distance to TSS",
    "Nearest PromoterID",
    "Entrez ID",
    "Nearest Unigene",
    "Nearest Refseq",
    "Nearest Ensembl",
    "Gene Name",
    "Gene Alias",
    "Gene Description",
    "Gene Type",
];

pub const NEAREST_GENE: &str = "Nearest Gene";
pub const GENOMIC_FEATURE: &str = "Genomic Feature";

/// Column preference for a derived field, first non-empty value wins.
#[derive(Debug, Clone, Copy)]
pub struct Resolution {
    pub name: &'static str,
    pub candidates: &'static [&'static str],
}

pub const RESOLUTIONS: [Resolution; 2] = [
    Resolution {
        name: NEAREST_GENE,
        candidates: &["Gene Name", "Nearest PromoterID"],
    },
    Resolution {
        name: GENOMIC_FEATURE,
        candidates: &["Annotation", "Detailed Annotation"],
    },
];

/// The fixed annotation columns of a single peak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation(Vec<String>);

impl Annotation {
    pub fn get(&self, column: &str) -> Option<&str> {
        ANNOTATION_COLUMNS
            .iter()
            .position(|&c| c == column)
            .map(|idx| self.0[idx].as_str())
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn resolve(&self, resolution: &Resolution) -> Option<&str> {
        resolution
            .candidates
            .iter()
            .filter_map(|c| self.get(c))
            .find(|v| !v.is_empty())
    }

    pub fn nearest_gene(&self) -> Option<&str> {
        self.resolve(&RESOLUTIONS[0])
    }

    pub fn genomic_feature(&self) -> Option<&str> {
        self.resolve(&RESOLUTIONS[1])
    }
}

/// Annotations indexed by peak id, the report's first column.
#[derive(Debug, Default)]
pub struct AnnotationReport {
    by_peak: FnvHashMap<String, Annotation>,
    n_records: usize,
}

impl AnnotationReport {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, AnnotateError> {
        let table = Table::from_path(path)?;
        AnnotationReport::from_table(&table)
    }

    /// Fails with [`AnnotateError::KeyMissing`] listing every absent
    /// annotation column.
    pub fn from_table(table: &Table) -> Result<Self, AnnotateError> {
        table.require(&ANNOTATION_COLUMNS)?;
        let indices = ANNOTATION_COLUMNS
            .iter()
            .map(|c| table.column(c))
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("Report columns: {:?}", table.headers());

        let mut by_peak = FnvHashMap::default();
        for rec in table.records() {
            let peak_id = rec.get(0).unwrap_or_default().to_string();
            if by_peak.contains_key(&peak_id) {
                log::warn!("Duplicate annotation for peak {peak_id}, keeping the first");
                continue;
            }
            by_peak.insert(peak_id, Annotation::from_record(rec, &indices));
        }
        log::info!("HOMER returned {} annotations", table.len());
        Ok(AnnotationReport {
            by_peak,
            n_records: table.len(),
        })
    }

    pub fn get(&self, peak_id: &str) -> Option<&Annotation> {
        self.by_peak.get(peak_id)
    }

    /// Number of rows in the report, including duplicates.
    pub fn n_records(&self) -> usize {
        self.n_records
    }

    pub fn n_peaks(&self) -> usize {
        self.by_peak.len()
    }
}

impl Annotation {
    fn from_record(rec: &StringRecord, indices: &[usize]) -> Self {
        Annotation(
            indices
                .iter()
                .map(|&i| rec.get(i).unwrap_or_default().to_string())
                .collect(),
        )
    }
}
