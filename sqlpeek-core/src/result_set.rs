use crate::{AsValue, Error, Result, Value};
use std::sync::Arc;

/// Shared reference-counted column name list.
pub type RowNames = Arc<[String]>;
/// Owned row value slice matching `RowNames` length.
pub type Row = Box<[Value]>;

/// Fully fetched query result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    /// Column labels.
    pub labels: RowNames,
    /// Data values, each row aligned by index with `labels`.
    pub rows: Vec<Row>,
}

impl ResultSet {
    pub fn new(labels: RowNames, rows: Vec<Row>) -> Self {
        Self { labels, rows }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 0-based position of the column `label`, compared case insensitively.
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.labels
            .iter()
            .position(|v| v.eq_ignore_ascii_case(label))
    }

    pub fn get(&self, row: usize, label: &str) -> Option<&Value> {
        let column = self.column_index(label)?;
        self.rows.get(row).and_then(|v| v.get(column))
    }

    /// Value of column `label` in `row` converted to `T`.
    pub fn get_as<T: AsValue>(&self, row: usize, label: &str) -> Result<T> {
        let value = self.get(row, label).ok_or_else(|| {
            Error::msg(format!(
                "No value at row {} for column `{}`, available columns: {}",
                row,
                label,
                self.labels.join(", ")
            ))
        })?;
        T::try_from_value(value.clone())
    }
}
