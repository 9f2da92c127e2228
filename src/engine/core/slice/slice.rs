use std::sync::Arc;

use crate::engine::core::dict::LocalDictionaries;
use crate::engine::core::record::RecordLayout;
use crate::engine::schema::TableSchema;

/// Upstream partition a slice belongs to.
pub type PartitionId = u16;

/// Immutable columnar block of one batch: the appended records pivoted into
/// per-column buffers. Produced by closing a [`SliceBuilder`]; dictionaries
/// are attached afterwards and travel with the slice until it is flattened
/// into key/value pairs.
///
/// [`SliceBuilder`]: crate::engine::core::slice::SliceBuilder
#[derive(Debug, Clone)]
pub struct Slice {
    partition: PartitionId,
    slice_id: u64,
    row_count: u32,
    schema: Arc<TableSchema>,
    layout: RecordLayout,
    columns: Vec<Vec<u8>>,
    dictionaries: Option<LocalDictionaries>,
}

impl Slice {
    pub(super) fn new(
        partition: PartitionId,
        slice_id: u64,
        row_count: u32,
        schema: Arc<TableSchema>,
        layout: RecordLayout,
        columns: Vec<Vec<u8>>,
    ) -> Self {
        Self {
            partition,
            slice_id,
            row_count,
            schema,
            layout,
            columns,
            dictionaries: None,
        }
    }

    pub fn partition(&self) -> PartitionId {
        self.partition
    }

    pub fn slice_id(&self) -> u64 {
        self.slice_id
    }

    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn layout(&self) -> &RecordLayout {
        &self.layout
    }

    /// Packed cells of one column, `row_count * slot width` bytes.
    pub fn column_bytes(&self, ordinal: usize) -> &[u8] {
        &self.columns[ordinal]
    }

    pub fn set_local_dictionaries(&mut self, dictionaries: LocalDictionaries) {
        self.dictionaries = Some(dictionaries);
    }

    pub fn local_dictionaries(&self) -> Option<&LocalDictionaries> {
        self.dictionaries.as_ref()
    }
}
