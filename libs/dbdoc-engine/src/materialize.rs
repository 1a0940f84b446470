use dbdoc_api::{ObjectId, Row, RowSource};

use crate::canonical::canonical_column;
use crate::document::{DocumentNode, COLUMN, OBJECT};
use crate::error::EngineError;
use crate::populate::populate;

/// Column that identifies an object row.
pub const ID_COLUMN: &str = "id";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeOptions {
    /// Deepest allowed object nesting, top-level objects being level 1.
    /// `None` disables the check: a cyclic parent/child relation then
    /// never terminates.
    pub max_depth: Option<usize>,
}

/// Counters for one expansion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeStats {
    pub objects: usize,
    pub columns: usize,
    /// Deepest object level reached.
    pub depth: usize,
}

/// An object whose node is built and whose child rows are being walked.
struct Frame {
    id: ObjectId,
    node: DocumentNode,
    pending: std::vec::IntoIter<Row>,
}

/// Append the object subtree rooted at `parent` to `parent_node`.
///
/// For every child row (in source order): an `object` node is populated
/// from the row, its `column` nodes are requested and attached, then its
/// own children are expanded the same way. A node is attached to its
/// parent once its subtree is complete.
///
/// Source requests go out in depth-first pre-order, one `columns` and one
/// `child_objects` call per object. An explicit frame stack replaces
/// recursion, so deep hierarchies do not grow the call stack.
pub fn expand_children<S: RowSource + ?Sized>(
    source: &S,
    parent: ObjectId,
    parent_node: &mut DocumentNode,
    options: &MaterializeOptions,
) -> Result<MaterializeStats, EngineError> {
    let mut stats = MaterializeStats::default();
    let mut top_level = source.child_objects(parent)?.into_iter();
    let mut stack: Vec<Frame> = Vec::new();

    loop {
        let (next, owner) = match stack.last_mut() {
            Some(frame) => (frame.pending.next(), frame.id),
            None => (top_level.next(), parent),
        };

        if let Some(row) = next {
            let depth = stack.len() + 1;
            let frame = open_object(source, row, depth, options, &mut stats)
                .map_err(|e| e.with_context(format!("child of object {owner}")))?;
            stack.push(frame);
            continue;
        }

        let Some(done) = stack.pop() else {
            break;
        };
        match stack.last_mut() {
            Some(frame) => frame.node.push_child(done.node),
            None => parent_node.push_child(done.node),
        }
    }

    Ok(stats)
}

/// Build the node for one object row, attach its columns and fetch the
/// rows of its children.
fn open_object<S: RowSource + ?Sized>(
    source: &S,
    row: Row,
    depth: usize,
    options: &MaterializeOptions,
    stats: &mut MaterializeStats,
) -> Result<Frame, EngineError> {
    let id = object_id(&row)?;
    if let Some(limit) = options.max_depth {
        if depth > limit {
            return Err(EngineError::DepthExceeded { limit, object: id });
        }
    }

    tracing::debug!(
        depth,
        object = %id,
        "{}.{}",
        trace_value(&row, "schema"),
        trace_value(&row, "name"),
    );

    let mut node = DocumentNode::new(OBJECT);
    populate(&mut node, &row);

    for column_row in source.columns(id)? {
        tracing::debug!(
            depth,
            object = %id,
            "  {} {}",
            trace_value(&column_row, "name"),
            trace_value(&column_row, "type"),
        );
        let mut column = DocumentNode::new(COLUMN);
        populate(&mut column, &column_row);
        node.push_child(column);
        stats.columns += 1;
    }

    let pending = source.child_objects(id)?.into_iter();
    stats.objects += 1;
    stats.depth = stats.depth.max(depth);

    Ok(Frame { id, node, pending })
}

fn object_id(row: &Row) -> Result<ObjectId, EngineError> {
    let cell = row.get(ID_COLUMN).ok_or_else(|| {
        EngineError::InvalidArgument(format!("object row has no '{ID_COLUMN}' column"))
    })?;
    cell.value()
        .and_then(|v| v.as_i64())
        .map(ObjectId)
        .ok_or_else(|| {
            EngineError::InvalidArgument(format!(
                "object '{ID_COLUMN}' must be a non-NULL integer, got {}",
                cell.scalar_type()
            ))
        })
}

fn trace_value(row: &Row, column: &str) -> String {
    canonical_column(row, column).ok().flatten().unwrap_or_default()
}
