use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::engine::core::dict::DictionaryBuilder;
use crate::engine::core::kv::{KeyValueCodec, KvSink};
use crate::engine::core::parse::{RawRecord, RecordParser};
use crate::engine::core::record::{RecordEncoder, RecordLayout};
use crate::engine::core::slice::{PartitionId, SliceBuilder};
use crate::engine::errors::{BuildError, SinkError};
use crate::engine::schema::TableSchema;

/// What one build cycle produced.
#[derive(Debug)]
pub struct BuildSummary {
    pub rows: usize,
    pub pairs: usize,
    /// `None` when the batch was empty and no slice was cut.
    pub slice_id: Option<u64>,
    /// Highest consumed offset plus one; `None` for an empty batch.
    pub watermark: Option<u64>,
    pub elapsed: Duration,
}

/// Drives one partition's micro-batches through parse, dictionary
/// collection, record encoding, the columnar slice and the key/value codec,
/// then hands the pairs to the sink. Owns the sink handle for the
/// partition's lifetime.
pub struct BatchBuilder<S: KvSink> {
    table: String,
    schema: Arc<TableSchema>,
    partition: PartitionId,
    sink: S,
    next_slice_id: u64,
}

impl<S: KvSink> BatchBuilder<S> {
    pub fn new(
        table: impl Into<String>,
        schema: Arc<TableSchema>,
        partition: PartitionId,
        sink: S,
    ) -> Self {
        Self {
            table: table.into(),
            schema,
            partition,
            sink,
            next_slice_id: 0,
        }
    }

    pub fn partition(&self) -> PartitionId {
        self.partition
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Build and persist one batch. All-or-nothing: any error drops the
    /// whole batch with nothing written.
    pub async fn build(&mut self, batch: &[RawRecord]) -> Result<BuildSummary, BuildError> {
        let started = Instant::now();
        match self.build_inner(batch, started).await {
            Ok(summary) => {
                info!(
                    target: "sliceforge::build",
                    table = %self.table,
                    partition = self.partition,
                    rows = summary.rows,
                    pairs = summary.pairs,
                    elapsed_ms = summary.elapsed.as_millis() as u64,
                    "Batch build finished"
                );
                Ok(summary)
            }
            Err(e) => {
                error!(
                    target: "sliceforge::build",
                    table = %self.table,
                    partition = self.partition,
                    batch = batch.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %e,
                    "Batch build failed, batch dropped without partial write"
                );
                Err(e)
            }
        }
    }

    async fn build_inner(
        &mut self,
        batch: &[RawRecord],
        started: Instant,
    ) -> Result<BuildSummary, BuildError> {
        if batch.is_empty() {
            info!(
                target: "sliceforge::build",
                table = %self.table,
                partition = self.partition,
                "Empty batch, nothing to build"
            );
            return Ok(BuildSummary {
                rows: 0,
                pairs: 0,
                slice_id: None,
                watermark: None,
                elapsed: started.elapsed(),
            });
        }

        let parser = RecordParser::new(&self.schema);
        let mut rows = Vec::with_capacity(batch.len());
        for record in batch {
            rows.push(parser.parse(record)?);
        }

        let dictionaries = DictionaryBuilder::new(&self.schema).collect(&rows)?;
        let layout = RecordLayout::plan(&self.schema, &dictionaries);
        let encoder = RecordEncoder::new(&self.schema, &layout, &dictionaries);

        let slice_id = self.next_slice_id;
        self.next_slice_id += 1;

        let mut builder = SliceBuilder::new(
            self.partition,
            slice_id,
            Arc::clone(&self.schema),
            layout.clone(),
        );
        for row in &rows {
            builder.append(&encoder.encode(row)?)?;
        }
        let mut slice = builder.close();
        slice.set_local_dictionaries(dictionaries);

        let codec = KeyValueCodec::new();
        let mut kv_rows = Vec::with_capacity(slice.column_count());
        for row in codec.encode_key_value(&slice)? {
            let row = row?;
            row.validate_dictionary()?;
            kv_rows.push(row);
        }

        let pairs = kv_rows.len();
        self.sink.write_batch(kv_rows).await?;

        let watermark = batch
            .iter()
            .map(|r| r.offset)
            .max()
            .map(|o| o.saturating_add(1));
        Ok(BuildSummary {
            rows: rows.len(),
            pairs,
            slice_id: Some(slice_id),
            watermark,
            elapsed: started.elapsed(),
        })
    }

    /// Close the sink, ending this partition's write lifetime.
    pub async fn finish(mut self) -> Result<(), SinkError> {
        self.sink.close().await
    }
}
