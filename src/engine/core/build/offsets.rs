use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::core::slice::PartitionId;
use crate::engine::errors::CommitError;
use crate::shared::config::CONFIG;
use crate::shared::storage_header::{BinaryHeader, FileKind};

/// Consumption watermark hook. `commit` runs strictly after the sink write
/// of the same batch succeeded, so a crash between write and commit replays
/// the batch (at-least-once) instead of losing it.
#[async_trait::async_trait]
pub trait OffsetCommit: Send {
    async fn commit(&mut self, partition: PartitionId, watermark: u64) -> Result<(), CommitError>;

    fn last_committed(&self, partition: PartitionId) -> Option<u64>;
}

/// In-memory commits, shared across clones for test inspection.
#[derive(Debug, Clone, Default)]
pub struct MemoryOffsets {
    committed: std::sync::Arc<std::sync::Mutex<HashMap<PartitionId, u64>>>,
}

impl MemoryOffsets {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl OffsetCommit for MemoryOffsets {
    async fn commit(&mut self, partition: PartitionId, watermark: u64) -> Result<(), CommitError> {
        let mut committed = self
            .committed
            .lock()
            .map_err(|e| CommitError::Io(std::io::Error::other(e.to_string())))?;
        committed.insert(partition, watermark);
        Ok(())
    }

    fn last_committed(&self, partition: PartitionId) -> Option<u64> {
        self.committed.lock().ok()?.get(&partition).copied()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct OffsetRecord {
    partition: PartitionId,
    watermark: u64,
    committed_at_ms: u64,
}

/// File-backed commit log: length-prefixed bincode records behind a file
/// header. The last record per partition wins on load; a torn or garbage
/// tail is truncated at open so later appends land at a clean frame
/// boundary, which at worst replays one batch.
#[derive(Debug)]
pub struct FsOffsetLog {
    path: PathBuf,
    committed: HashMap<PartitionId, u64>,
}

impl FsOffsetLog {
    /// Open the log under the configured data directory.
    pub fn open() -> Result<Self, CommitError> {
        Self::open_at(Path::new(&CONFIG.engine.data_dir).join("offsets.bin"))
    }

    pub fn open_at(path: PathBuf) -> Result<Self, CommitError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let (committed, valid_end) = Self::load(&path)?;

        // Repair before the handle is used: anything past the last valid
        // frame would swallow every record appended after it.
        if valid_end > 0 {
            let file_len = std::fs::metadata(&path)?.len();
            if file_len > valid_end {
                warn!(
                    target: "sliceforge::build",
                    dropped = file_len - valid_end,
                    "Truncating torn tail of offset log"
                );
                let file = OpenOptions::new().write(true).open(&path)?;
                file.set_len(valid_end)?;
                file.sync_data()?;
            }
        }
        Ok(Self { path, committed })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Scan the log, keeping the byte offset right after the last frame
    /// that decoded cleanly. Everything past it is a torn or garbage tail.
    fn load(path: &Path) -> Result<(HashMap<PartitionId, u64>, u64), CommitError> {
        let mut file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok((HashMap::new(), 0));
            }
            Err(e) => return Err(CommitError::Io(e)),
        };

        let mut committed = HashMap::new();
        let file_len = file.metadata()?.len();
        if file_len == 0 {
            return Ok((committed, 0));
        }

        let header = BinaryHeader::read_from(&mut file)?;
        if header.magic != FileKind::OffsetLog.magic() {
            return Err(CommitError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "invalid magic for offsets.bin",
            )));
        }

        let mut valid_end = BinaryHeader::TOTAL_LEN as u64;
        loop {
            let mut len_buf = [0u8; 4];
            if let Err(e) = file.read_exact(&mut len_buf) {
                if e.kind() == std::io::ErrorKind::UnexpectedEof {
                    break;
                }
                return Err(CommitError::Io(e));
            }

            let len = u32::from_le_bytes(len_buf) as u64;
            if valid_end + 4 + len > file_len {
                warn!(
                    target: "sliceforge::build",
                    "Dropping torn tail of offset log"
                );
                break;
            }

            let mut buf = vec![0u8; len as usize];
            file.read_exact(&mut buf)?;

            match bincode::deserialize::<OffsetRecord>(&buf) {
                Ok(record) => {
                    committed.insert(record.partition, record.watermark);
                    valid_end += 4 + len;
                }
                Err(e) => {
                    warn!(
                        target: "sliceforge::build",
                        error = %e,
                        "Dropping undecodable offset record and the rest of the log"
                    );
                    break;
                }
            }
        }

        Ok((committed, valid_end))
    }

    fn append(&self, record: &OffsetRecord) -> Result<(), CommitError> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        if file.metadata()?.len() == 0 {
            let header = BinaryHeader::new(FileKind::OffsetLog.magic(), 1, 0);
            header.write_to(&mut file)?;
        }

        let encoded = bincode::serialize(record)?;
        let mut frame = Vec::with_capacity(4 + encoded.len());
        frame.extend_from_slice(&(encoded.len() as u32).to_le_bytes());
        frame.extend_from_slice(&encoded);

        // One write per frame: appenders sharing the log cannot interleave
        // a length prefix with another record's body.
        file.write_all(&frame)?;
        file.sync_data()?;
        Ok(())
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[async_trait::async_trait]
impl OffsetCommit for FsOffsetLog {
    async fn commit(&mut self, partition: PartitionId, watermark: u64) -> Result<(), CommitError> {
        self.append(&OffsetRecord {
            partition,
            watermark,
            committed_at_ms: now_ms(),
        })?;
        self.committed.insert(partition, watermark);
        debug!(
            target: "sliceforge::build",
            partition,
            watermark,
            "Committed consumption watermark"
        );
        Ok(())
    }

    fn last_committed(&self, partition: PartitionId) -> Option<u64> {
        self.committed.get(&partition).copied()
    }
}
