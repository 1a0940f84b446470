pub mod error;
pub mod row;
pub mod source;
pub mod value;

pub use error::{ErrorKind, SourceError};
pub use row::Row;
pub use source::{ObjectId, RowSource};
pub use value::{ScalarType, Timestamp, TypedCell, Value};
