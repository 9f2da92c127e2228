use crate::engine::core::dict::LocalDictionaries;
use crate::engine::core::parse::ParsedRow;
use crate::engine::core::record::{RecordLayout, SlotRole};
use crate::engine::errors::EncodeError;
use crate::engine::schema::TableSchema;

/// One fixed-width binary row. Dimension cells hold dictionary codes,
/// metric cells hold codec output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRecord {
    bytes: Vec<u8>,
}

impl EncodedRecord {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Turns parsed rows into fixed-width records under one batch's layout and
/// dictionaries.
pub struct RecordEncoder<'a> {
    schema: &'a TableSchema,
    layout: &'a RecordLayout,
    dictionaries: &'a LocalDictionaries,
}

impl<'a> RecordEncoder<'a> {
    pub fn new(
        schema: &'a TableSchema,
        layout: &'a RecordLayout,
        dictionaries: &'a LocalDictionaries,
    ) -> Self {
        Self {
            schema,
            layout,
            dictionaries,
        }
    }

    pub fn encode(&self, row: &ParsedRow) -> Result<EncodedRecord, EncodeError> {
        if row.len() != self.layout.column_count() {
            return Err(EncodeError::CellCount {
                expected: self.layout.column_count(),
                actual: row.len(),
            });
        }

        let mut bytes = Vec::with_capacity(self.layout.row_width());
        for (ordinal, cell) in row.cells().iter().enumerate() {
            let slot = self.layout.slot(ordinal);
            let column = self.schema.columns()[ordinal].name.as_str();
            match slot.role {
                SlotRole::Dimension => {
                    // The dictionary was built from this very batch, so a
                    // miss is a broken build, not bad input.
                    let code = self
                        .dictionaries
                        .get(column)
                        .and_then(|dict| dict.encode(cell))
                        .ok_or_else(|| EncodeError::DictionaryMiss {
                            column: column.to_string(),
                            value: cell.clone(),
                        })?;
                    bytes.extend_from_slice(&code.to_le_bytes()[..slot.width]);
                }
                SlotRole::Metric(codec) => {
                    codec.encode(column, cell, &mut bytes)?;
                }
            }
        }

        if bytes.len() != self.layout.row_width() {
            return Err(EncodeError::RowWidth {
                expected: self.layout.row_width(),
                actual: bytes.len(),
            });
        }

        Ok(EncodedRecord::new(bytes))
    }
}
