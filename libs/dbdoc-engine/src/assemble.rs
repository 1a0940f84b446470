use dbdoc_api::{ObjectId, RowSource, Timestamp};

use crate::canonical::{canonical_column, format_timestamp};
use crate::document::{DocumentNode, DATABASE, DATE_GENERATED, SCHEMA};
use crate::error::EngineError;
use crate::materialize::{expand_children, MaterializeOptions};
use crate::populate::populate;

/// Build the whole metadata document, stamped with the current local time.
pub fn build_document<S: RowSource + ?Sized>(
    source: &S,
    options: &MaterializeOptions,
) -> Result<DocumentNode, EngineError> {
    build_document_at(source, Timestamp::now_local(), options)
}

/// Build the whole metadata document with an explicit generation time.
///
/// `database` root ← database-info row, then one `schema` child per schema
/// row, then the object tree under the top-level sentinel. Any error
/// discards everything built so far.
pub fn build_document_at<S: RowSource + ?Sized>(
    source: &S,
    generated: Timestamp,
    options: &MaterializeOptions,
) -> Result<DocumentNode, EngineError> {
    let mut root = DocumentNode::new(DATABASE);
    root.set_attribute(DATE_GENERATED, format_timestamp(&generated));

    let info = source.database_info()?;
    populate(&mut root, &info);
    tracing::info!(database = root.attribute("name").unwrap_or_default(), "reading catalog");

    let schemas = source.schemas()?;
    for row in &schemas {
        let mut schema = DocumentNode::new(SCHEMA);
        let name = canonical_column(row, "name").map_err(|e| e.with_context("schema row"))?;
        if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
            schema.set_attribute("name", name);
        }
        root.push_child(schema);
    }

    let stats = expand_children(source, ObjectId::TOP_LEVEL, &mut root, options)?;
    tracing::info!(
        schemas = schemas.len(),
        objects = stats.objects,
        columns = stats.columns,
        depth = stats.depth,
        "document built"
    );

    Ok(root)
}
