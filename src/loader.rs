//! Record Loader: one JSON value per line, decoded eagerly into memory.

use crate::config::BadLinePolicy;
use crate::error::{PrepError, PrepResult};
use crate::ndjson::NdjsonReader;
use crate::progress::ProgressScope;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read `path` with the default policy (abort on the first malformed line).
/// Returns the number of parsed records and the records in file order.
pub fn read_json(path: &Path) -> PrepResult<(usize, Vec<Value>)> {
    read_json_with(path, BadLinePolicy::Abort, 256 * 1024, false)
}

/// Tunable loader. Blank lines are ignored and never counted.
pub fn read_json_with(
    path: &Path,
    policy: BadLinePolicy,
    read_buf_bytes: usize,
    progress: bool,
) -> PrepResult<(usize, Vec<Value>)> {
    let mut rdr = NdjsonReader::open(path, read_buf_bytes).map_err(|e| PrepError::io(path, e))?;

    let pb = if progress {
        let total = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        ProgressScope::bytes("Loading records", total)
    } else {
        ProgressScope::hidden()
    };

    let mut records = Vec::new();
    let mut skipped = 0usize;
    let mut buf: Vec<u8> = Vec::with_capacity(16 * 1024);
    let mut line_no = 0usize;

    loop {
        let n = rdr.read_line(&mut buf).map_err(|e| PrepError::io(path, e))?;
        if n == 0 { break; }
        line_no += 1;
        pb.inc_bytes(rdr.take_progress());

        if buf.iter().all(u8::is_ascii_whitespace) { continue; }
        match serde_json::from_slice::<Value>(&buf) {
            Ok(v) => records.push(v),
            Err(source) => match policy {
                BadLinePolicy::Abort => return Err(PrepError::Parse { line: line_no, source }),
                BadLinePolicy::Skip => {
                    skipped += 1;
                    tracing::warn!(line = line_no, error = %source, "skipping malformed input line");
                }
            },
        }
    }

    pb.finish(format!("{} records", records.len()));
    if skipped > 0 {
        tracing::warn!("{} malformed lines skipped in {}", skipped, path.display());
    }
    tracing::info!("Loaded {} records from {}", records.len(), path.display());
    Ok((records.len(), records))
}
