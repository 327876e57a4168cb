//! In-memory table: named, ordered columns over positionally aligned rows.

use crate::date::render_timestamp;
use crate::error::{PrepError, PrepResult};
use serde_json::Value;
use time::OffsetDateTime;

/// One table cell. `Missing` is the sentinel for an absent value.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Missing,
    Text(String),
    Number(f64),
    Bool(bool),
    Timestamp(OffsetDateTime),
    /// Lists and objects carried through unmodified.
    Json(Value),
}

impl Cell {
    pub fn from_json(v: Option<&Value>) -> Cell {
        match v {
            None | Some(Value::Null) => Cell::Missing,
            Some(Value::String(s)) => Cell::Text(s.clone()),
            Some(Value::Number(n)) => n.as_f64().map_or(Cell::Missing, Cell::Number),
            Some(Value::Bool(b)) => Cell::Bool(*b),
            Some(other) => Cell::Json(other.clone()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&OffsetDateTime> {
        match self {
            Cell::Timestamp(t) => Some(t),
            _ => None,
        }
    }

    /// Delimited-text form. `Missing` renders as an empty field.
    pub fn render(&self) -> String {
        match self {
            Cell::Missing => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Bool(true) => "True".to_string(),
            Cell::Bool(false) => "False".to_string(),
            Cell::Timestamp(t) => render_timestamp(t),
            Cell::Json(v) => v.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Assemble `cols` (name, values) into rows, in record order.
    /// Every column must hold exactly `record_count` values.
    pub fn from_columns(record_count: usize, cols: Vec<(String, Vec<Cell>)>) -> PrepResult<Table> {
        for (name, values) in &cols {
            if values.len() != record_count {
                return Err(PrepError::Shape {
                    column: name.clone(),
                    expected: record_count,
                    actual: values.len(),
                });
            }
        }

        let columns: Vec<String> = cols.iter().map(|(n, _)| n.clone()).collect();
        let mut iters: Vec<_> = cols.into_iter().map(|(_, v)| v.into_iter()).collect();
        let rows = (0..record_count)
            .map(|_| iters.iter_mut().map(|it| it.next().unwrap_or(Cell::Missing)).collect())
            .collect();

        Ok(Table { columns, rows })
    }

    pub fn new(columns: Vec<String>) -> Table {
        Table { columns, rows: Vec::new() }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) -> PrepResult<()> {
        if row.len() != self.columns.len() {
            return Err(PrepError::Shape {
                column: format!("row {}", self.rows.len()),
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Vec<Cell>> {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r[idx]).collect())
    }

    pub fn cell(&self, row: usize, name: &str) -> Option<&Cell> {
        let idx = self.column_index(name)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Keep rows for which `keep` returns true, preserving order.
    /// Returns the number of rows removed.
    pub fn retain_rows(&mut self, mut keep: impl FnMut(&[Cell]) -> bool) -> usize {
        let before = self.rows.len();
        self.rows.retain(|r| keep(r));
        before - self.rows.len()
    }
}
