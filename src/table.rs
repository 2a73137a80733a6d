// src/table.rs
// Delimited-table I/O (CSV/TSV) on top of the `csv` crate.
//
// Typed tables go through serde (`read_records` / `write_records`);
// tables whose columns are only known at runtime (wide virus panels) use
// the untyped `DataSet` shape.

use std::error::Error;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::options::ExportFormat;
use crate::file::ensure_parent;

/// Untyped table: optional header row + string cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataSet {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.as_ref()?.iter().position(|h| h == name)
    }
}

/* ---------------- Reading ---------------- */

/// Read a headed table into `T`s. Delimiter follows the file extension.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, Box<dyn Error>> {
    let file = File::open(path).map_err(|e| format!("Cannot open {}: {e}", path.display()))?;
    read_records_from(file, ExportFormat::from_path(path))
        .map_err(|e| format!("{}: {e}", path.display()).into())
}

pub fn read_records_from<R: Read, T: DeserializeOwned>(
    reader: R,
    format: ExportFormat,
) -> Result<Vec<T>, Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(format.delim())
        .trim(Trim::Headers)
        .from_reader(reader);

    let mut out = Vec::new();
    for (i, rec) in rdr.deserialize().enumerate() {
        // +2: one for the header line, one for 1-based numbering
        let row: T = rec.map_err(|e| format!("row {}: {e}", i + 2))?;
        out.push(row);
    }
    Ok(out)
}

/// Read a headed table as strings (first row = headers).
pub fn read_dataset(path: &Path) -> Result<DataSet, Box<dyn Error>> {
    let file = File::open(path).map_err(|e| format!("Cannot open {}: {e}", path.display()))?;
    read_dataset_from(file, ExportFormat::from_path(path))
        .map_err(|e| format!("{}: {e}", path.display()).into())
}

pub fn read_dataset_from<R: Read>(reader: R, format: ExportFormat) -> Result<DataSet, Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(format.delim())
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        if rec.iter().all(|c| c.trim().is_empty()) { continue; }
        rows.push(rec.iter().map(|c| c.to_string()).collect());
    }
    Ok(DataSet { headers: Some(headers), rows })
}

/* ---------------- Writing ---------------- */

/// Write `headers` then one line per record. The header line is written
/// even when `records` is empty.
pub fn write_records_to<W: Write, T: Serialize>(
    w: W,
    headers: &[String],
    records: &[T],
    format: ExportFormat,
) -> Result<(), Box<dyn Error>> {
    let mut wtr = WriterBuilder::new()
        .delimiter(format.delim())
        .has_headers(false)
        .from_writer(w);

    wtr.write_record(headers)?;
    for r in records {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Create/truncate `path` (parents created) and write the table.
pub fn write_records<T: Serialize>(
    path: &Path,
    headers: &[String],
    records: &[T],
    format: ExportFormat,
) -> Result<(), Box<dyn Error>> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(|e| format!("Cannot create {}: {e}", path.display()))?;
    write_records_to(io::BufWriter::new(file), headers, records, format)
}

/// Render a table to a string (previews, tests).
pub fn records_to_string<T: Serialize>(
    headers: &[String],
    records: &[T],
    format: ExportFormat,
) -> Result<String, Box<dyn Error>> {
    let mut buf: Vec<u8> = Vec::new();
    write_records_to(&mut buf, headers, records, format)?;
    Ok(String::from_utf8(buf)?)
}
