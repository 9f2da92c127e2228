use crate::engine::core::kv::ByteSpan;
use crate::engine::core::slice::PartitionId;
use crate::engine::errors::CodecError;

/// Store field id carrying the column block payload.
pub const FIELD_VALUE: &[u8; 1] = b"v";
/// Store field id carrying the embedded dictionary blob.
pub const FIELD_DICT: &[u8; 1] = b"d";

/// Storage key of one column block. Encoded big-endian so a sorted store
/// clusters keys by partition, then slice, then column ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SliceKey {
    pub partition: PartitionId,
    pub slice_id: u64,
    pub column: u16,
}

impl SliceKey {
    pub const LEN: usize = 2 + 8 + 2;

    pub fn encode(&self) -> [u8; Self::LEN] {
        let mut out = [0u8; Self::LEN];
        out[0..2].copy_from_slice(&self.partition.to_be_bytes());
        out[2..10].copy_from_slice(&self.slice_id.to_be_bytes());
        out[10..12].copy_from_slice(&self.column.to_be_bytes());
        out
    }

    pub fn decode(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != Self::LEN {
            return None;
        }
        Some(Self {
            partition: u16::from_be_bytes([bytes[0], bytes[1]]),
            slice_id: u64::from_be_bytes(bytes[2..10].try_into().ok()?),
            column: u16::from_be_bytes([bytes[10], bytes[11]]),
        })
    }
}

/// One key/value pair bound for the store: the block value plus the
/// dictionary blob that makes the pair self-describing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvRow {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
    pub dictionary: ByteSpan,
}

impl KvRow {
    /// A pair whose dictionary is a window into a larger buffer must never
    /// reach the store; a reader elsewhere could not interpret it.
    pub fn validate_dictionary(&self) -> Result<(), CodecError> {
        self.dictionary.ensure_standalone().map(|_| ())
    }
}
