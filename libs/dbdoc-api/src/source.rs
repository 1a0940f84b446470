use crate::error::SourceError;
use crate::row::Row;

/// Identity of a database object. Only used to correlate an object with
/// its child objects and its columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ObjectId(pub i64);

impl ObjectId {
    /// Parent id of top-level objects.
    pub const TOP_LEVEL: ObjectId = ObjectId(0);
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of already-executed catalog result sets.
///
/// Each method corresponds to one fixed catalog query; the document builder
/// never sees SQL. Requests are blocking and issued strictly one at a time,
/// depth-first. Any error aborts the build.
pub trait RowSource {
    /// Database-level info. Exactly one row.
    fn database_info(&self) -> Result<Row, SourceError>;

    /// One row per schema, each with a `name` column.
    fn schemas(&self) -> Result<Vec<Row>, SourceError>;

    /// Objects whose parent is `parent`, in source order.
    /// Rows carry at least `id`, `schema` and `name`.
    fn child_objects(&self, parent: ObjectId) -> Result<Vec<Row>, SourceError>;

    /// Columns of `object`, in source order.
    /// Rows carry at least `name` and `type`.
    fn columns(&self, object: ObjectId) -> Result<Vec<Row>, SourceError>;
}

impl<S: RowSource + ?Sized> RowSource for &S {
    fn database_info(&self) -> Result<Row, SourceError> {
        (**self).database_info()
    }

    fn schemas(&self) -> Result<Vec<Row>, SourceError> {
        (**self).schemas()
    }

    fn child_objects(&self, parent: ObjectId) -> Result<Vec<Row>, SourceError> {
        (**self).child_objects(parent)
    }

    fn columns(&self, object: ObjectId) -> Result<Vec<Row>, SourceError> {
        (**self).columns(object)
    }
}

impl<S: RowSource + ?Sized> RowSource for Box<S> {
    fn database_info(&self) -> Result<Row, SourceError> {
        (**self).database_info()
    }

    fn schemas(&self) -> Result<Vec<Row>, SourceError> {
        (**self).schemas()
    }

    fn child_objects(&self, parent: ObjectId) -> Result<Vec<Row>, SourceError> {
        (**self).child_objects(parent)
    }

    fn columns(&self, object: ObjectId) -> Result<Vec<Row>, SourceError> {
        (**self).columns(object)
    }
}
