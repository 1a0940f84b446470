use crate::value::TypedCell;

/// One result-set row: column name → cell, in result-set column order.
///
/// Setting an existing column replaces its cell in place, so column order
/// stays the order in which the source first produced each column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    entries: Vec<(String, TypedCell)>,
}

impl Row {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builder form of [`Row::set`].
    pub fn with(mut self, column: impl Into<String>, cell: impl Into<TypedCell>) -> Self {
        self.set(column, cell);
        self
    }

    pub fn set(&mut self, column: impl Into<String>, cell: impl Into<TypedCell>) {
        let column = column.into();
        let cell = cell.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == &column) {
            entry.1 = cell;
        } else {
            self.entries.push((column, cell));
        }
    }

    pub fn get(&self, column: &str) -> Option<&TypedCell> {
        self.entries.iter().find(|(k, _)| k == column).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypedCell)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
