pub mod errors;
pub mod types;

pub use errors::SchemaError;
pub use types::{ColumnDescriptor, ColumnKind, MetricType, TableSchema};
