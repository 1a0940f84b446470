use std::collections::HashSet;
use std::path::Path;

use dbdoc_api::{ObjectId, Row, RowSource, SourceError};
use dbdoc_source_memory::MemorySource;

use super::snapshot::{decode_row, parse_id, JsonRow, SnapshotFile};

// ════════════════════════════════════════════════════════════════
//  SnapshotSource
// ════════════════════════════════════════════════════════════════

/// Row source backed by a JSON catalog snapshot.
///
/// The file holds the already-executed results of the four catalog
/// queries. It is read and decoded once, up front; requests are then
/// answered from memory.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    inner: MemorySource,
}

impl SnapshotSource {
    /// Read and decode a snapshot file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SourceError::io(format!("open {}: {e}", path.display())))?;
        let source = Self::from_json(&content).map_err(|e| e.with_context(path.display()))?;
        tracing::info!(
            path = %path.display(),
            objects = source.inner.object_count(),
            columns = source.inner.column_count(),
            "loaded catalog snapshot"
        );
        Ok(source)
    }

    /// Decode a snapshot from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let file: SnapshotFile = serde_json::from_str(json)?;

        let mut inner = MemorySource::new();
        inner.set_database(decode_row(&file.database).map_err(|e| e.with_context("database"))?);

        for (i, row) in file.schemas.iter().enumerate() {
            let row = decode_row(row).map_err(|e| e.with_context(format!("schemas[{i}]")))?;
            inner.add_schema(row);
        }

        let mut seen = HashSet::new();
        for (key, rows) in &file.objects {
            let parent = unique_id(&mut seen, "objects", key)?;
            for row in decode_rows(rows, "objects", key)? {
                inner.add_object(parent, row);
            }
        }

        seen.clear();
        for (key, rows) in &file.columns {
            let object = unique_id(&mut seen, "columns", key)?;
            for row in decode_rows(rows, "columns", key)? {
                inner.add_column(object, row);
            }
        }

        Ok(Self { inner })
    }
}

/// Keys are compared as ids, so `"1"` and `" 01"` name the same object.
fn unique_id(
    seen: &mut HashSet<ObjectId>,
    section: &str,
    key: &str,
) -> Result<ObjectId, SourceError> {
    let id = parse_id(key)?;
    if !seen.insert(id) {
        return Err(SourceError::format(format!(
            "{section}[\"{key}\"]: object id {id} appears more than once"
        )));
    }
    Ok(id)
}

fn decode_rows(rows: &[JsonRow], section: &str, key: &str) -> Result<Vec<Row>, SourceError> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            decode_row(row).map_err(|e| e.with_context(format!("{section}[\"{key}\"][{i}]")))
        })
        .collect()
}

impl RowSource for SnapshotSource {
    fn database_info(&self) -> Result<Row, SourceError> {
        self.inner.database_info()
    }

    fn schemas(&self) -> Result<Vec<Row>, SourceError> {
        self.inner.schemas()
    }

    fn child_objects(&self, parent: ObjectId) -> Result<Vec<Row>, SourceError> {
        self.inner.child_objects(parent)
    }

    fn columns(&self, object: ObjectId) -> Result<Vec<Row>, SourceError> {
        self.inner.columns(object)
    }
}
