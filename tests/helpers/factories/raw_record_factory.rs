use rand::Rng;

use crate::engine::core::parse::RawRecord;

/// Turns payload lines into a window of raw records with consecutive
/// offsets. Arrival times are jittered; nothing downstream encodes them.
pub struct RawRecordFactory {
    start_offset: u64,
}

impl RawRecordFactory {
    pub fn new() -> Self {
        Self { start_offset: 0 }
    }

    pub fn starting_at(mut self, offset: u64) -> Self {
        self.start_offset = offset;
        self
    }

    pub fn create_batch(&self, lines: &[&str]) -> Vec<RawRecord> {
        let mut rng = rand::thread_rng();
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let arrived_at_ms = rng.gen_range(1_700_000_000_000u64..1_700_000_100_000);
                RawRecord::new(self.start_offset + i as u64, arrived_at_ms, line.as_bytes())
            })
            .collect()
    }
}
