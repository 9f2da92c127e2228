pub mod build;
pub mod codec;
pub mod dict;
pub mod kv;
pub mod parse;
pub mod record;
pub mod slice;

pub use build::{BatchBuilder, BuildRequest, BuildSummary, BuildWorker, FsOffsetLog, MemoryOffsets, OffsetCommit};
pub use codec::{FixedLenCodec, for_metric};
pub use dict::{Dictionary, DictionaryBuilder, LocalDictionaries};
pub use kv::{ByteSpan, FsKvSink, KeyValueCodec, KvRow, KvSink, MemoryKvSink, SliceKey};
pub use parse::{ParsedRow, RawRecord, RecordParser};
pub use record::{EncodedRecord, RecordEncoder, RecordLayout};
pub use slice::{PartitionId, Slice, SliceBuilder};
