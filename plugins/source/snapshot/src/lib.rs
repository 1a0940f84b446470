mod snapshot;
mod source;

pub use source::SnapshotSource;
