use std::collections::HashMap;

use dbdoc_api::{ObjectId, Row, RowSource, SourceError};

// ═══════════════════════════════════════════════════════════════
//  MemorySource
// ═══════════════════════════════════════════════════════════════

/// In-memory catalog: the four result sets held as plain rows.
///
/// Objects are grouped by parent id and columns by object id, each group
/// in insertion order. Ids nobody registered answer with an empty set,
/// which is what ends the tree walk.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    database: Row,
    schemas: Vec<Row>,
    objects: HashMap<ObjectId, Vec<Row>>,
    columns: HashMap<ObjectId, Vec<Row>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database(mut self, row: Row) -> Self {
        self.set_database(row);
        self
    }

    pub fn with_schema(mut self, row: Row) -> Self {
        self.add_schema(row);
        self
    }

    pub fn with_object(mut self, parent: ObjectId, row: Row) -> Self {
        self.add_object(parent, row);
        self
    }

    pub fn with_column(mut self, object: ObjectId, row: Row) -> Self {
        self.add_column(object, row);
        self
    }

    pub fn set_database(&mut self, row: Row) {
        self.database = row;
    }

    pub fn add_schema(&mut self, row: Row) {
        self.schemas.push(row);
    }

    pub fn add_object(&mut self, parent: ObjectId, row: Row) {
        self.objects.entry(parent).or_default().push(row);
    }

    pub fn add_column(&mut self, object: ObjectId, row: Row) {
        self.columns.entry(object).or_default().push(row);
    }

    /// Number of object rows over all parents.
    pub fn object_count(&self) -> usize {
        self.objects.values().map(Vec::len).sum()
    }

    /// Number of column rows over all objects.
    pub fn column_count(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }
}

impl RowSource for MemorySource {
    fn database_info(&self) -> Result<Row, SourceError> {
        Ok(self.database.clone())
    }

    fn schemas(&self) -> Result<Vec<Row>, SourceError> {
        Ok(self.schemas.clone())
    }

    fn child_objects(&self, parent: ObjectId) -> Result<Vec<Row>, SourceError> {
        Ok(self.objects.get(&parent).cloned().unwrap_or_default())
    }

    fn columns(&self, object: ObjectId) -> Result<Vec<Row>, SourceError> {
        Ok(self.columns.get(&object).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use dbdoc_api::TypedCell;

    use super::*;

    #[test]
    fn unknown_ids_are_empty() {
        let source = MemorySource::new();
        assert!(source.child_objects(ObjectId(42)).unwrap().is_empty());
        assert!(source.columns(ObjectId(42)).unwrap().is_empty());
        assert!(source.schemas().unwrap().is_empty());
        assert!(source.database_info().unwrap().is_empty());
    }

    #[test]
    fn rows_are_grouped_and_ordered() {
        let source = MemorySource::new()
            .with_object(ObjectId::TOP_LEVEL, Row::new().with("id", 2))
            .with_object(ObjectId(2), Row::new().with("id", 3))
            .with_object(ObjectId::TOP_LEVEL, Row::new().with("id", 1))
            .with_column(ObjectId(2), Row::new().with("name", "b"))
            .with_column(ObjectId(2), Row::new().with("name", "a"));

        let top: Vec<_> = source
            .child_objects(ObjectId::TOP_LEVEL)
            .unwrap()
            .iter()
            .map(|r| r.get("id").cloned().unwrap())
            .collect();
        assert_eq!(top, [TypedCell::from(2), TypedCell::from(1)]);

        let cols = source.columns(ObjectId(2)).unwrap();
        assert_eq!(cols[0].get("name"), Some(&TypedCell::from("b")));
        assert_eq!(cols[1].get("name"), Some(&TypedCell::from("a")));
        assert_eq!(source.object_count(), 3);
        assert_eq!(source.column_count(), 2);
    }
}
