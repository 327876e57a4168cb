//! Cleaner: five independent passes over a [`Table`], plus [`Cleaner::clean`]
//! which runs them in the order junk → duplicates → coercion → date → language.
//!
//! Cells that differ as text can coerce to the same value (`"1"` and `"1.0"`),
//! so `clean` runs the duplicate pass a second time after coercion.
//!
//! Junk rows are removed before coercion. Coercion's default policy drops any
//! row it cannot parse, so a junk row that slips through is still removed, but
//! it is then counted as a coercion drop rather than as junk.

use crate::config::{CoercionPolicy, PrepOptions};
use crate::date::{cutoff_instant, parse_timestamp};
use crate::error::{PrepError, PrepResult};
use crate::table::{Cell, Table};
use ahash::AHashSet;
use serde::Serialize;
use time::macros::date;
use time::Date;

pub const DATE_COLUMN: &str = "created_at";
pub const LANG_COLUMN: &str = "lang";

/// Columns coerced to numbers.
pub const NUMERIC_COLUMNS: [&str; 6] = [
    "polarity",
    "subjectivity",
    "retweet_count",
    "favorite_count",
    "followers_count",
    "friends_count",
];

/// Columns whose value is checked against the column's own header label.
pub const JUNK_CHECK_COLUMNS: [&str; 8] = [
    "created_at",
    "polarity",
    "subjectivity",
    "lang",
    "retweet_count",
    "favorite_count",
    "followers_count",
    "friends_count",
];

#[derive(Clone, Copy)]
enum Target {
    Timestamp,
    Number,
}

/// Rows removed or altered by each pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    pub junk_removed: usize,
    pub duplicates_removed: usize,
    pub coercion_dropped: usize,
    pub coercion_nulled: usize,
    pub date_removed: usize,
    pub language_removed: usize,
}

#[derive(Clone, Debug)]
pub struct Cleaner {
    pub cutoff: Date,
    pub language: String,
    pub policy: CoercionPolicy,
}

impl Default for Cleaner {
    fn default() -> Self {
        Self {
            cutoff: date!(2020 - 12 - 31),
            language: "en".to_string(),
            policy: CoercionPolicy::DropRow,
        }
    }
}

impl Cleaner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(opts: &PrepOptions) -> Self {
        Self {
            cutoff: opts.cutoff,
            language: opts.language.clone(),
            policy: opts.coercion_policy,
        }
    }

    pub fn cutoff(mut self, d: Date) -> Self { self.cutoff = d; self }
    pub fn language(mut self, code: impl Into<String>) -> Self { self.language = code.into(); self }
    pub fn policy(mut self, p: CoercionPolicy) -> Self { self.policy = p; self }

    /// Run every pass in the documented order.
    pub fn clean(&self, table: &mut Table) -> PrepResult<CleanReport> {
        let mut report = CleanReport {
            junk_removed: self.drop_junk_rows(table),
            duplicates_removed: self.drop_duplicates(table),
            ..Default::default()
        };
        let (dropped, nulled) = self.coerce_types(table)?;
        report.coercion_dropped = dropped;
        report.coercion_nulled = nulled;
        report.duplicates_removed += self.drop_duplicates(table);
        report.date_removed = self.filter_by_date(table)?;
        report.language_removed = self.filter_by_language(table)?;
        Ok(report)
    }

    /// Remove rows where a checked column holds its own header label as text,
    /// e.g. `retweet_count == "retweet_count"`.
    pub fn drop_junk_rows(&self, table: &mut Table) -> usize {
        let checks: Vec<(usize, &str)> = JUNK_CHECK_COLUMNS
            .iter()
            .filter_map(|name| table.column_index(name).map(|i| (i, *name)))
            .collect();

        let removed = table.retain_rows(|row| {
            !checks.iter().any(|&(i, name)| row[i].as_text() == Some(name))
        });
        tracing::info!("Junk rows removed: {}", removed);
        removed
    }

    /// Remove rows that exactly repeat an earlier row; the first occurrence survives.
    pub fn drop_duplicates(&self, table: &mut Table) -> usize {
        let mut seen: AHashSet<Vec<String>> = AHashSet::with_capacity(table.len());
        let removed = table.retain_rows(|row| seen.insert(row_key(row)));
        tracing::info!("Duplicate rows removed: {}", removed);
        removed
    }

    /// Parse `created_at` into timestamps and the numeric columns into numbers.
    /// Returns `(rows dropped, cells nulled)` under the configured policy.
    pub fn coerce_types(&self, table: &mut Table) -> PrepResult<(usize, usize)> {
        let mut targets: Vec<(usize, &str, Target)> = Vec::with_capacity(NUMERIC_COLUMNS.len() + 1);
        for (name, kind) in std::iter::once((DATE_COLUMN, Target::Timestamp))
            .chain(NUMERIC_COLUMNS.iter().map(|n| (*n, Target::Number)))
        {
            match table.column_index(name) {
                Some(i) => targets.push((i, name, kind)),
                None => tracing::warn!("coerce_types: table has no `{}` column", name),
            }
        }

        let mut doomed = vec![false; table.len()];
        let mut nulled = 0usize;

        for (r, row) in table.rows_mut().iter_mut().enumerate() {
            for &(i, name, kind) in &targets {
                match coerce_cell(&row[i], kind) {
                    Ok(cell) => row[i] = cell,
                    Err(value) => match self.policy {
                        CoercionPolicy::Reject => {
                            return Err(PrepError::TypeCoercion { column: name.to_string(), row: r, value });
                        }
                        CoercionPolicy::NullCell => {
                            tracing::warn!(row = r, column = name, value = %value, "unparseable value nulled");
                            row[i] = Cell::Missing;
                            nulled += 1;
                        }
                        CoercionPolicy::DropRow => {
                            tracing::warn!(row = r, column = name, value = %value, "row dropped: unparseable value");
                            doomed[r] = true;
                            break;
                        }
                    },
                }
            }
        }

        let mut idx = 0usize;
        let dropped = table.retain_rows(|_| {
            let keep = !doomed[idx];
            idx += 1;
            keep
        });
        tracing::info!("Type coercion: {} rows dropped, {} cells nulled", dropped, nulled);
        Ok((dropped, nulled))
    }

    /// Keep rows created on or after the cutoff (UTC). Requires `coerce_types` first:
    /// an uncoerced text timestamp is an error, a missing one is filtered out.
    pub fn filter_by_date(&self, table: &mut Table) -> PrepResult<usize> {
        let i = table
            .column_index(DATE_COLUMN)
            .ok_or_else(|| PrepError::InvalidConfig(format!("table has no `{DATE_COLUMN}` column")))?;

        if let Some(r) = table
            .rows()
            .iter()
            .position(|row| !matches!(row[i], Cell::Timestamp(_) | Cell::Missing))
        {
            return Err(PrepError::InvalidConfig(format!(
                "`{DATE_COLUMN}` is not coerced (row {r}); run coerce_types before filter_by_date"
            )));
        }

        let cutoff = cutoff_instant(self.cutoff);
        let removed = table.retain_rows(|row| row[i].as_timestamp().map_or(false, |t| *t >= cutoff));
        tracing::info!("Rows before {} removed: {}", self.cutoff, removed);
        Ok(removed)
    }

    /// Keep rows whose language code equals the target exactly.
    pub fn filter_by_language(&self, table: &mut Table) -> PrepResult<usize> {
        let i = table
            .column_index(LANG_COLUMN)
            .ok_or_else(|| PrepError::InvalidConfig(format!("table has no `{LANG_COLUMN}` column")))?;

        let target = self.language.as_str();
        let removed = table.retain_rows(|row| row[i].as_text() == Some(target));
        tracing::info!("Rows with lang != {:?} removed: {}", target, removed);
        Ok(removed)
    }
}

// Variant tag keeps Text("1") and Number(1.0) distinct.
fn row_key(row: &[Cell]) -> Vec<String> {
    row.iter()
        .map(|c| {
            let tag = match c {
                Cell::Missing => 'm',
                Cell::Text(_) => 's',
                Cell::Number(_) => 'n',
                Cell::Bool(_) => 'b',
                Cell::Timestamp(_) => 't',
                Cell::Json(_) => 'j',
            };
            format!("{tag}:{}", c.render())
        })
        .collect()
}

/// Coerce one cell. `Err` carries the offending value as text.
fn coerce_cell(cell: &Cell, kind: Target) -> Result<Cell, String> {
    match (kind, cell) {
        (_, Cell::Missing) => Ok(Cell::Missing),
        (Target::Timestamp, Cell::Timestamp(_)) | (Target::Number, Cell::Number(_)) => Ok(cell.clone()),
        (_, Cell::Text(s)) if s.trim().is_empty() => Ok(Cell::Missing),
        (Target::Timestamp, Cell::Text(s)) => parse_timestamp(s).map(Cell::Timestamp).ok_or_else(|| s.clone()),
        (Target::Number, Cell::Text(s)) => s.trim().parse::<f64>().map(Cell::Number).map_err(|_| s.clone()),
        (_, other) => Err(other.render()),
    }
}
