//! Exporter: table → delimited text with a header row, and the reverse for
//! reloading a previously exported file as an all-text table.

use crate::error::{PrepError, PrepResult};
use crate::table::{Cell, Table};
use crate::util::{create_with_backoff, open_with_backoff};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Write `table` to `path`, replacing any existing file. Column order is kept.
pub fn write_csv(table: &Table, path: &Path, write_buf_bytes: usize) -> PrepResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PrepError::io(parent, e))?;
    }
    let f = create_with_backoff(path, 16, 50).map_err(|e| PrepError::io(path, e))?;
    let mut w = csv::Writer::from_writer(BufWriter::with_capacity(write_buf_bytes.max(8 * 1024), f));

    w.write_record(table.columns())?;
    for row in table.rows() {
        w.write_record(row.iter().map(Cell::render))?;
    }

    let mut inner = w.into_inner().map_err(|e| PrepError::io(path, e.into_error()))?;
    inner.flush().map_err(|e| PrepError::io(path, e))?;
    tracing::info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

/// Read a delimited file with a header row. Every field becomes `Cell::Text`,
/// empty fields become `Cell::Missing`; run the Cleaner to restore types.
pub fn read_csv(path: &Path) -> PrepResult<Table> {
    let f = open_with_backoff(path, 16, 50).map_err(|e| PrepError::io(path, e))?;
    let mut rdr = csv::Reader::from_reader(BufReader::new(f));

    let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut table = Table::new(columns);
    for rec in rdr.records() {
        let rec = rec?;
        let row = rec
            .iter()
            .map(|s| if s.is_empty() { Cell::Missing } else { Cell::Text(s.to_string()) })
            .collect();
        table.push_row(row)?;
    }
    tracing::info!("Read {} rows from {}", table.len(), path.display());
    Ok(table)
}
