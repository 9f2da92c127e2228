use std::sync::Arc;

use crate::engine::core::dict::DictionaryBuilder;
use crate::engine::core::record::{RecordEncoder, RecordLayout};
use crate::engine::core::slice::{PartitionId, Slice, SliceBuilder};
use crate::engine::schema::TableSchema;

use super::{ParsedRowFactory, TableSchemaFactory};

/// Builds a closed slice by driving payload lines through the real
/// pipeline stages. Defaults to a seller/amount schema so short rows
/// like "a,1" work out of the box.
pub struct SliceFactory {
    partition: PartitionId,
    slice_id: u64,
    schema: Option<TableSchema>,
    rows: Vec<String>,
    attach_dictionaries: bool,
}

impl SliceFactory {
    pub fn new() -> Self {
        Self {
            partition: 0,
            slice_id: 0,
            schema: None,
            rows: Vec::new(),
            attach_dictionaries: true,
        }
    }

    pub fn with_partition(mut self, partition: PartitionId) -> Self {
        self.partition = partition;
        self
    }

    pub fn with_slice_id(mut self, slice_id: u64) -> Self {
        self.slice_id = slice_id;
        self
    }

    pub fn with_schema(mut self, schema: TableSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_rows(mut self, lines: &[&str]) -> Self {
        self.rows = lines.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn without_dictionaries(mut self) -> Self {
        self.attach_dictionaries = false;
        self
    }

    pub fn create(self) -> Slice {
        let schema = self.schema.unwrap_or_else(|| {
            TableSchemaFactory::new()
                .with_dimension("seller")
                .with_metric_i64("amount")
                .create()
        });

        let line_refs: Vec<&str> = self.rows.iter().map(String::as_str).collect();
        let rows = ParsedRowFactory::new(&schema).create_batch(&line_refs);

        let dictionaries = DictionaryBuilder::new(&schema).collect(&rows).unwrap();
        let layout = RecordLayout::plan(&schema, &dictionaries);
        let encoder = RecordEncoder::new(&schema, &layout, &dictionaries);

        let mut builder = SliceBuilder::new(
            self.partition,
            self.slice_id,
            Arc::new(schema.clone()),
            layout.clone(),
        );
        for row in &rows {
            builder.append(&encoder.encode(row).unwrap()).unwrap();
        }

        let mut slice = builder.close();
        if self.attach_dictionaries {
            slice.set_local_dictionaries(dictionaries);
        }
        slice
    }
}
