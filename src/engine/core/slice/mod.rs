pub mod slice;
pub mod slice_builder;

pub use slice::{PartitionId, Slice};
pub use slice_builder::SliceBuilder;
