use std::sync::Arc;

use tracing::debug;

use crate::engine::core::record::{EncodedRecord, RecordLayout};
use crate::engine::core::slice::{PartitionId, Slice};
use crate::engine::errors::EncodeError;
use crate::engine::schema::TableSchema;

/// Accumulates the encoded records of one batch and pivots them into
/// per-column buffers. `close` consumes the builder, so nothing can be
/// appended to a closed slice.
pub struct SliceBuilder {
    partition: PartitionId,
    slice_id: u64,
    schema: Arc<TableSchema>,
    layout: RecordLayout,
    columns: Vec<Vec<u8>>,
    row_count: u32,
}

impl SliceBuilder {
    pub fn new(
        partition: PartitionId,
        slice_id: u64,
        schema: Arc<TableSchema>,
        layout: RecordLayout,
    ) -> Self {
        let columns = vec![Vec::new(); layout.column_count()];
        Self {
            partition,
            slice_id,
            schema,
            layout,
            columns,
            row_count: 0,
        }
    }

    pub fn append(&mut self, record: &EncodedRecord) -> Result<(), EncodeError> {
        if record.len() != self.layout.row_width() {
            return Err(EncodeError::RowWidth {
                expected: self.layout.row_width(),
                actual: record.len(),
            });
        }
        let layout = &self.layout;
        for (ordinal, column) in self.columns.iter_mut().enumerate() {
            column.extend_from_slice(layout.cell(record.bytes(), ordinal));
        }
        self.row_count += 1;
        Ok(())
    }

    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Freeze into an immutable slice. The caller attaches the batch
    /// dictionaries afterwards.
    pub fn close(self) -> Slice {
        debug!(
            target: "sliceforge::build",
            partition = self.partition,
            slice_id = self.slice_id,
            rows = self.row_count,
            "Closing slice"
        );
        Slice::new(
            self.partition,
            self.slice_id,
            self.row_count,
            self.schema,
            self.layout,
            self.columns,
        )
    }
}
