use serde::{Deserialize, Serialize};

/// One record taken from the streaming source, untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Position in the upstream partition, used for the commit watermark.
    pub offset: u64,
    /// Arrival time in epoch milliseconds. Carried for observability only,
    /// never encoded.
    pub arrived_at_ms: u64,
    /// Delimiter-separated text payload.
    pub payload: Vec<u8>,
}

impl RawRecord {
    pub fn new(offset: u64, arrived_at_ms: u64, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            offset,
            arrived_at_ms,
            payload: payload.into(),
        }
    }
}
