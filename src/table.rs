//! Owned in-memory table: an ordered sequence of rows over one column set.
//!
//! Rows are stored row-major as `Vec<Value>` aligned to the column list.
//! Every invocation of the engine loads its own [`Table`]; nothing is shared
//! or mutated across units.

use std::collections::HashMap;

use crate::error::{BoxscoreError, Stage};
use crate::value::Value;

/// An ordered table with a fixed column set.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with the given column set.
    ///
    /// Duplicate column names are rejected: a duplicated header would make
    /// column references ambiguous for the whole run.
    pub fn new(columns: Vec<String>) -> Result<Self, BoxscoreError> {
        let mut index = HashMap::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(BoxscoreError::DuplicateColumn {
                    column: name.clone(),
                });
            }
        }
        Ok(Self {
            columns,
            index,
            rows: Vec::new(),
        })
    }

    /// Append a row. The row must have exactly one value per column.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), BoxscoreError> {
        if row.len() != self.columns.len() {
            return Err(BoxscoreError::RowArity {
                expected: self.columns.len(),
                got: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Check that every named column exists, reporting the first absent one
    /// as a fatal schema error tagged with the referencing stage.
    pub fn require_columns<'a, I>(&self, names: I, stage: Stage) -> Result<(), BoxscoreError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in names {
            if !self.index.contains_key(name) {
                return Err(BoxscoreError::MissingColumn {
                    column: name.to_string(),
                    stage,
                });
            }
        }
        Ok(())
    }

    /// Cell lookup by row number and column name. `None` if either is out
    /// of range; stored nulls come back as `Some(&Value::Null)`.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col)
    }

    /// Name → position map for expression evaluation.
    pub(crate) fn column_map(&self) -> HashMap<String, usize> {
        self.index.clone()
    }
}
