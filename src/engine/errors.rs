use std::io;
use thiserror::Error;

/// Errors that can abort a micro-batch build. Any variant drops the whole
/// batch; nothing is written and the consumption offset is not advanced.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("record at offset {offset} has {actual} fields, schema expects {expected}")]
    ColumnCountMismatch {
        expected: usize,
        actual: usize,
        offset: u64,
    },

    #[error("dimension value in column '{column}' is {len} bytes, too long for a dictionary entry")]
    ValueTooLong { column: String, len: usize },

    #[error("record encoding failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("key-value encoding failed: {0}")]
    Codec(#[from] CodecError),

    #[error("sink write failed: {0}")]
    Sink(#[from] SinkError),

    #[error("offset commit failed: {0}")]
    Commit(#[from] CommitError),
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("value '{value}' in dimension column '{column}' is missing from the batch dictionary")]
    DictionaryMiss { column: String, value: String },

    #[error("metric column '{column}' cannot encode '{value}' as {kind}")]
    Metric {
        column: String,
        value: String,
        kind: &'static str,
    },

    #[error("row has {actual} cells, layout expects {expected}")]
    CellCount { expected: usize, actual: usize },

    #[error("encoded record is {actual} bytes, layout expects {expected}")]
    RowWidth { expected: usize, actual: usize },
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("slice has no attached dictionaries")]
    DictionariesMissing,

    #[error("no dictionary attached for dimension column '{column}'")]
    DictionaryMissing { column: String },

    #[error(
        "dictionary blob must be self-contained: span offset {offset}, length {len}, buffer is {buf_len} bytes"
    )]
    DictionaryBlobInvariant {
        offset: usize,
        len: usize,
        buf_len: usize,
    },

    #[error("column block of {len} bytes exceeds the block size limit")]
    BlockTooLarge { len: usize },

    #[error("column block decode failed: {0}")]
    BlockDecode(String),

    #[error("dictionary blob decode failed: {0}")]
    BlobDecode(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("cannot open sink '{target}': {reason}")]
    Connection { target: String, reason: String },

    #[error("batch write failed: {0}")]
    Write(String),

    #[error("sink log corrupt: {0}")]
    Corrupt(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum CommitError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("offset record serialization failed: {0}")]
    Serialize(#[from] bincode::Error),
}
