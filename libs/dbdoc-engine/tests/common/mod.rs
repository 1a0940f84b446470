//! Shared fixtures for document builder integration tests.

use std::cell::RefCell;

use dbdoc_api::{ObjectId, Row, RowSource, SourceError};
use dbdoc_source_memory::MemorySource;

/// One request made against a row source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    DatabaseInfo,
    Schemas,
    ChildObjects(ObjectId),
    Columns(ObjectId),
}

/// Wraps a `MemorySource`, recording every request and optionally failing
/// one of them.
pub struct RecordingSource {
    inner: MemorySource,
    calls: RefCell<Vec<Call>>,
    fail_on: Option<Call>,
}

impl RecordingSource {
    pub fn new(inner: MemorySource) -> Self {
        Self {
            inner,
            calls: RefCell::new(Vec::new()),
            fail_on: None,
        }
    }

    pub fn failing_on(mut self, call: Call) -> Self {
        self.fail_on = Some(call);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) -> Result<(), SourceError> {
        self.calls.borrow_mut().push(call);
        if self.fail_on == Some(call) {
            return Err(SourceError::io(format!("connection reset during {call:?}")));
        }
        Ok(())
    }
}

impl RowSource for RecordingSource {
    fn database_info(&self) -> Result<Row, SourceError> {
        self.record(Call::DatabaseInfo)?;
        self.inner.database_info()
    }

    fn schemas(&self) -> Result<Vec<Row>, SourceError> {
        self.record(Call::Schemas)?;
        self.inner.schemas()
    }

    fn child_objects(&self, parent: ObjectId) -> Result<Vec<Row>, SourceError> {
        self.record(Call::ChildObjects(parent))?;
        self.inner.child_objects(parent)
    }

    fn columns(&self, object: ObjectId) -> Result<Vec<Row>, SourceError> {
        self.record(Call::Columns(object))?;
        self.inner.columns(object)
    }
}

pub fn object(id: i32, schema: &str, name: &str) -> Row {
    Row::new().with("id", id).with("schema", schema).with("name", name)
}

pub fn column(name: &str, ty: &str) -> Row {
    Row::new().with("name", name).with("type", ty)
}

/// The `Sales` database: one schema, one table with one column.
pub fn sales() -> MemorySource {
    MemorySource::new()
        .with_database(Row::new().with("name", "Sales"))
        .with_schema(Row::new().with("name", "dbo"))
        .with_object(
            ObjectId::TOP_LEVEL,
            object(1, "dbo", "Orders").with("desc:text", "Order table"),
        )
        .with_column(
            ObjectId(1),
            column("OrderId", "int").with("default:value", "0"),
        )
}

/// Two schemas, tables with columns, a procedure with parameters and a
/// nested object two levels down.
///
/// ```text
/// 0
/// ├── 10 dbo.Customers   (Id, Name)
/// ├── 20 dbo.GetOrders   (@from, @to)
/// │   └── 21 dbo.GetOrders_result
/// │       └── 22 dbo.GetOrders_row   (Total)
/// └── 30 sales.Regions
/// ```
pub fn catalog() -> MemorySource {
    MemorySource::new()
        .with_database(Row::new().with("name", "Shop").with("compatibility", 150))
        .with_schema(Row::new().with("name", "dbo"))
        .with_schema(Row::new().with("name", "sales"))
        .with_object(ObjectId::TOP_LEVEL, object(10, "dbo", "Customers"))
        .with_object(ObjectId::TOP_LEVEL, object(20, "dbo", "GetOrders"))
        .with_object(ObjectId::TOP_LEVEL, object(30, "sales", "Regions"))
        .with_object(ObjectId(20), object(21, "dbo", "GetOrders_result"))
        .with_object(ObjectId(21), object(22, "dbo", "GetOrders_row"))
        .with_column(
            ObjectId(10),
            column("Id", "int")
                .with("identity:seed", 1)
                .with("identity:increment", 1),
        )
        .with_column(ObjectId(10), column("Name", "nvarchar"))
        .with_column(ObjectId(20), column("@from", "datetime"))
        .with_column(ObjectId(20), column("@to", "datetime"))
        .with_column(ObjectId(22), column("Total", "money"))
}
