pub mod batch_builder;
pub mod build_worker;
pub mod offsets;

pub use batch_builder::{BatchBuilder, BuildSummary};
pub use build_worker::{BuildRequest, BuildWorker};
pub use offsets::{FsOffsetLog, MemoryOffsets, OffsetCommit};
