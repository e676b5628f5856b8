//! In-memory tab-delimited tables with a header row.
use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::error::AnnotateError;

#[derive(Debug, Clone)]
pub struct Table {
    path: PathBuf,
    headers: StringRecord,
    records: Vec<StringRecord>,
}

impl Table {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, AnnotateError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AnnotateError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path).map_err(|e| AnnotateError::io(path, e))?;
        Table::from_reader(file, path)
    }

    /// Parse a table from any reader, `source` is only used for error messages.
    pub fn from_reader<R: Read, P: AsRef<Path>>(reader: R, source: P) -> Result<Self, AnnotateError> {
        let path = source.as_ref().to_path_buf();
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_reader(reader);
        let parse_err = |source| AnnotateError::Parse {
            path: path.clone(),
            source,
        };
        let headers = reader.headers().map_err(parse_err)?.clone();
        let records = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(parse_err)?;
        log::debug!("Read {} rows from {}", records.len(), path.display());
        Ok(Table {
            path,
            headers,
            records,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn records(&self) -> &[StringRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of a column, failing with [`AnnotateError::KeyMissing`].
    pub fn column(&self, name: &str) -> Result<usize, AnnotateError> {
        self.position(name).ok_or_else(|| AnnotateError::KeyMissing {
            path: self.path.clone(),
            columns: vec![name.to_string()],
        })
    }

    /// Check that every column in `required` exists, reporting all the
    /// missing ones at once.
    pub fn require(&self, required: &[&str]) -> Result<(), AnnotateError> {
        let missing: Vec<String> = required
            .iter()
            .filter(|name| self.position(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AnnotateError::KeyMissing {
                path: self.path.clone(),
                columns: missing,
            })
        }
    }
}

/// Write a header and rows tab-delimited to `path`.
pub fn write_table<P, I>(path: P, headers: &StringRecord, rows: I) -> Result<(), AnnotateError>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = StringRecord>,
{
    let path = path.as_ref();
    let write_err = |source| AnnotateError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .map_err(write_err)?;
    writer.write_record(headers).map_err(write_err)?;
    for row in rows {
        writer.write_record(&row).map_err(write_err)?;
    }
    writer
        .flush()
        .map_err(|e| AnnotateError::io(path, e))
}
