//! Table I/O: CSV load and atomic CSV write.
//!
//! Reading and writing are the engine's only external collaborators. A
//! result file is serialized to a named temp file in the destination
//! directory and renamed into place, so a failed unit never leaves a
//! partial output behind. Existing outputs are overwritten unconditionally.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::BoxscoreError;
use crate::table::Table;
use crate::value::Value;

/// Load a CSV file into a [`Table`].
///
/// The first record is the header; every field is parsed with
/// [`Value::parse`], so empty fields load as nulls.
pub fn read_table(path: &Path) -> Result<Table, BoxscoreError> {
    let file = File::open(path).map_err(|source| BoxscoreError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .map_err(|source| csv_err(path, source))?
        .iter()
        .map(String::from)
        .collect();
    let mut table = Table::new(headers)?;

    for record in reader.records() {
        let record = record.map_err(|source| csv_err(path, source))?;
        table.push_row(record.iter().map(Value::parse).collect())?;
    }

    debug!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.columns().len(),
        "loaded table"
    );
    Ok(table)
}

/// Write a [`Table`] to a CSV file, atomically.
///
/// The header row names every column; nulls serialize as empty fields. The
/// destination directory is created if needed.
pub fn write_table(table: &Table, path: &Path) -> Result<(), BoxscoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|source| io_err(path, source))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|source| io_err(path, source))?;
    {
        let mut writer = csv::Writer::from_writer(tmp.as_file_mut());
        writer
            .write_record(table.columns())
            .map_err(|source| csv_err(path, source))?;
        for row in table.rows() {
            writer
                .write_record(row.iter().map(Value::render))
                .map_err(|source| csv_err(path, source))?;
        }
        writer.flush().map_err(|source| io_err(path, source))?;
    }
    tmp.persist(path).map_err(|e| io_err(path, e.error))?;

    debug!(path = %path.display(), rows = table.row_count(), "wrote table");
    Ok(())
}

fn csv_err(path: &Path, source: csv::Error) -> BoxscoreError {
    BoxscoreError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

fn io_err(path: &Path, source: std::io::Error) -> BoxscoreError {
    BoxscoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}
