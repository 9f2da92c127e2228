use std::fs;
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::engine::core::kv::{ByteSpan, FIELD_DICT, FIELD_VALUE, KvRow};
use crate::engine::core::slice::PartitionId;
use crate::engine::errors::SinkError;
use crate::shared::config::CONFIG;
use crate::shared::storage_header::{FileKind, ensure_header_if_new, open_and_header_offset};

/// Destination for encoded batches. One sink handle serves one partition
/// for the lifetime of its worker; `close` releases the underlying
/// connection or file handle.
#[async_trait::async_trait]
pub trait KvSink: Send {
    /// Persist one batch of pairs. An error means the batch must be treated
    /// as unwritten.
    async fn write_batch(&mut self, rows: Vec<KvRow>) -> Result<(), SinkError>;

    /// Release the held resource. Writes after close fail.
    async fn close(&mut self) -> Result<(), SinkError>;
}

#[derive(Debug, Default)]
struct MemorySinkState {
    rows: Vec<KvRow>,
    batches: usize,
    closed: bool,
}

/// Sink that keeps everything in memory. Handles are cheap clones sharing
/// one buffer, so a test can keep one and inspect what the pipeline wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvSink {
    state: Arc<Mutex<MemorySinkState>>,
}

impl MemoryKvSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn rows(&self) -> Vec<KvRow> {
        self.state.lock().await.rows.clone()
    }

    pub async fn batch_count(&self) -> usize {
        self.state.lock().await.batches
    }

    pub async fn is_closed(&self) -> bool {
        self.state.lock().await.closed
    }
}

#[async_trait::async_trait]
impl KvSink for MemoryKvSink {
    async fn write_batch(&mut self, rows: Vec<KvRow>) -> Result<(), SinkError> {
        let mut state = self.state.lock().await;
        if state.closed {
            return Err(SinkError::Write("sink already closed".to_string()));
        }
        state.batches += 1;
        state.rows.extend(rows);
        Ok(())
    }

    async fn close(&mut self) -> Result<(), SinkError> {
        self.state.lock().await.closed = true;
        Ok(())
    }
}

/// Append-only log file standing in for a wide-column store table. Each
/// row becomes one frame: length-prefixed key, then the value and the
/// dictionary blob tagged with their field ids.
#[derive(Debug)]
pub struct FsKvSink {
    path: PathBuf,
    writer: Option<BufWriter<fs::File>>,
}

impl FsKvSink {
    /// Open the log under the configured sink directory.
    pub fn open(table: &str, partition: PartitionId) -> Result<Self, SinkError> {
        Self::open_in(Path::new(&CONFIG.sink.dir), table, partition)
    }

    /// Open (or create) the log for one table partition. Fails fast when
    /// the target is unreachable, before any batch is accepted.
    pub fn open_in(dir: &Path, table: &str, partition: PartitionId) -> Result<Self, SinkError> {
        let connect = |e: std::io::Error, target: &Path| SinkError::Connection {
            target: target.display().to_string(),
            reason: e.to_string(),
        };

        fs::create_dir_all(dir).map_err(|e| connect(e, dir))?;
        let path = dir.join(format!("{}_{:05}.kvlog", table, partition));
        let file =
            ensure_header_if_new(&path, FileKind::SliceLog.magic()).map_err(|e| connect(e, &path))?;

        info!(
            target: "sliceforge::sink",
            path = %path.display(),
            partition,
            "Opened slice log sink"
        );
        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append_frame(buf: &mut Vec<u8>, row: &KvRow) -> Result<(), SinkError> {
        let key_len = u16::try_from(row.key.len())
            .map_err(|_| SinkError::Write(format!("key of {} bytes exceeds frame limit", row.key.len())))?;
        let value_len = u32::try_from(row.value.len())
            .map_err(|_| SinkError::Write(format!("value of {} bytes exceeds frame limit", row.value.len())))?;
        let dict_bytes = row.dictionary.bytes();
        let dict_len = u32::try_from(dict_bytes.len())
            .map_err(|_| SinkError::Write(format!("dictionary of {} bytes exceeds frame limit", dict_bytes.len())))?;

        buf.extend_from_slice(&key_len.to_le_bytes());
        buf.extend_from_slice(&row.key);
        buf.extend_from_slice(FIELD_VALUE);
        buf.extend_from_slice(&value_len.to_le_bytes());
        buf.extend_from_slice(&row.value);
        buf.extend_from_slice(FIELD_DICT);
        buf.extend_from_slice(&dict_len.to_le_bytes());
        buf.extend_from_slice(dict_bytes);
        Ok(())
    }

    /// Read every frame back. For inspection and tests; the log is written
    /// for downstream bulk import, not queried in place.
    pub fn read_log(path: &Path) -> Result<Vec<KvRow>, SinkError> {
        let (mut file, _offset) = open_and_header_offset(path, FileKind::SliceLog.magic())?;

        let mut rows = Vec::new();
        loop {
            let mut key_len = [0u8; 2];
            match file.read_exact(&mut key_len) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(SinkError::Io(e)),
            }

            let mut key = vec![0u8; u16::from_le_bytes(key_len) as usize];
            file.read_exact(&mut key)
                .map_err(|e| SinkError::Corrupt(format!("truncated key: {e}")))?;

            let value = Self::read_field(&mut file, FIELD_VALUE)?;
            let dictionary = Self::read_field(&mut file, FIELD_DICT)?;

            rows.push(KvRow {
                key,
                value,
                dictionary: ByteSpan::standalone(dictionary),
            });
        }
        Ok(rows)
    }

    fn read_field(file: &mut fs::File, expected_id: &[u8; 1]) -> Result<Vec<u8>, SinkError> {
        let mut id = [0u8; 1];
        file.read_exact(&mut id)
            .map_err(|e| SinkError::Corrupt(format!("truncated field id: {e}")))?;
        if &id != expected_id {
            return Err(SinkError::Corrupt(format!(
                "unexpected field id {:?}, wanted {:?}",
                id, expected_id
            )));
        }
        let mut len = [0u8; 4];
        file.read_exact(&mut len)
            .map_err(|e| SinkError::Corrupt(format!("truncated field length: {e}")))?;
        let mut bytes = vec![0u8; u32::from_le_bytes(len) as usize];
        file.read_exact(&mut bytes)
            .map_err(|e| SinkError::Corrupt(format!("truncated field bytes: {e}")))?;
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl KvSink for FsKvSink {
    async fn write_batch(&mut self, rows: Vec<KvRow>) -> Result<(), SinkError> {
        let Some(writer) = self.writer.as_mut() else {
            return Err(SinkError::Write("sink already closed".to_string()));
        };

        // Every row must validate before anything reaches the writer; a
        // rejected batch leaves no frames behind for a later flush.
        let mut frames = Vec::new();
        for row in &rows {
            Self::append_frame(&mut frames, row)?;
        }

        writer.write_all(&frames)?;
        writer.flush()?;
        writer.get_ref().sync_data()?;

        debug!(
            target: "sliceforge::sink",
            path = %self.path.display(),
            rows = rows.len(),
            "Appended batch to slice log"
        );
        Ok(())
    }

    async fn close(&mut self) -> Result<(), SinkError> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
            writer.get_ref().sync_data()?;
            info!(
                target: "sliceforge::sink",
                path = %self.path.display(),
                "Closed slice log sink"
            );
        }
        Ok(())
    }
}
