pub mod block;
pub mod codec;
pub mod compression;
pub mod row;
pub mod sink;
pub mod span;

pub use block::{BlockHeader, ColumnBlockKind, DecodedBlock, decode_block};
pub use codec::KeyValueCodec;
pub use compression::{CompressionCodec, FLAG_COMPRESSED, Lz4Codec};
pub use row::{FIELD_DICT, FIELD_VALUE, KvRow, SliceKey};
pub use sink::{FsKvSink, KvSink, MemoryKvSink};
pub use span::ByteSpan;

#[cfg(test)]
mod block_test;
#[cfg(test)]
mod row_test;
