/// Separator between the group and the attribute part of a column name.
pub const SEPARATOR: char = ':';

/// Where a column's value lands inside a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement<'a> {
    /// Attribute on the node itself.
    Flat(&'a str),
    /// `(group, attr)`: attribute `attr` on the child element `group`.
    Nested(&'a str, &'a str),
}

impl Placement<'_> {
    /// The attribute part still contains a separator (`a:b:c`).
    pub fn is_malformed(&self) -> bool {
        matches!(self, Placement::Nested(_, attr) if attr.contains(SEPARATOR))
    }
}

/// Split a column name on its first separator.
///
/// `foo` → `Flat("foo")`, `foo:bar` → `Nested("foo", "bar")`,
/// `foo:bar:baz` → `Nested("foo", "bar:baz")`. Never fails.
pub fn resolve(column: &str) -> Placement<'_> {
    match column.split_once(SEPARATOR) {
        None => Placement::Flat(column),
        Some((group, attr)) => Placement::Nested(group, attr),
    }
}
