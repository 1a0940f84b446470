pub mod assemble;
pub mod canonical;
pub mod config;
pub mod document;
pub mod error;
pub mod materialize;
pub mod naming;
pub mod populate;

pub use assemble::{build_document, build_document_at};
pub use canonical::{canonical_column, canonicalize};
pub use config::DbdocConfig;
pub use document::{Attributes, DocumentNode};
pub use error::EngineError;
pub use materialize::{expand_children, MaterializeOptions, MaterializeStats};
pub use naming::{resolve, Placement};
pub use populate::populate;
