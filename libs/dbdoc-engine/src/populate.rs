use dbdoc_api::Row;

use crate::canonical::canonicalize;
use crate::document::DocumentNode;
use crate::naming::{resolve, Placement};

/// Copy one row onto a node, column by column.
///
/// NULL and blank values are skipped, so no attribute or group element is
/// ever created for them. `name` becomes an attribute of `node`;
/// `group:attr` becomes attribute `attr` of the first child named `group`,
/// which is created on first use.
pub fn populate(node: &mut DocumentNode, row: &Row) {
    for (column, cell) in row.iter() {
        let Some(value) = canonicalize(cell) else {
            continue;
        };
        if value.trim().is_empty() {
            continue;
        }

        let placement = resolve(column);
        match placement {
            Placement::Flat(name) => {
                if name.is_empty() {
                    tracing::warn!(tag = node.tag(), "unnamed column skipped");
                    continue;
                }
                node.set_attribute(name, value);
            }
            Placement::Nested(group, attr) => {
                if group.is_empty() || attr.is_empty() {
                    tracing::warn!(
                        tag = node.tag(),
                        column,
                        "column name with an empty part skipped"
                    );
                    continue;
                }
                if placement.is_malformed() {
                    tracing::debug!(
                        tag = node.tag(),
                        column,
                        group,
                        attr,
                        "column name has more than one separator"
                    );
                }
                node.child_or_insert(group).set_attribute(attr, value);
            }
        }
    }
}
