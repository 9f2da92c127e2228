use std::fmt;

use crate::engine::core::codec::{FixedLenCodec, for_metric};
use crate::engine::core::dict::LocalDictionaries;
use crate::engine::schema::{ColumnKind, TableSchema};

/// How one column's cell is produced.
#[derive(Clone, Copy)]
pub enum SlotRole {
    /// Dictionary code, truncated little-endian to the slot width.
    Dimension,
    /// Fixed-width codec output.
    Metric(&'static dyn FixedLenCodec),
}

impl fmt::Debug for SlotRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotRole::Dimension => write!(f, "Dimension"),
            SlotRole::Metric(codec) => write!(f, "Metric({})", codec.type_name()),
        }
    }
}

/// Byte range of one column inside a fixed-width record.
#[derive(Debug, Clone, Copy)]
pub struct FieldSlot {
    pub offset: usize,
    pub width: usize,
    pub role: SlotRole,
}

/// Per-batch row layout: slot offsets and widths in schema column order.
/// Dimension widths depend on the batch dictionaries, so a layout is planned
/// once per batch and never reused across batches.
#[derive(Debug, Clone)]
pub struct RecordLayout {
    slots: Vec<FieldSlot>,
    row_width: usize,
}

impl RecordLayout {
    pub fn plan(schema: &TableSchema, dictionaries: &LocalDictionaries) -> Self {
        let mut slots = Vec::with_capacity(schema.column_count());
        let mut offset = 0;
        for col in schema.columns() {
            let (width, role) = match col.kind {
                ColumnKind::Dimension => {
                    let width = dictionaries
                        .get(&col.name)
                        .map(|d| d.code_width())
                        .unwrap_or(1);
                    (width, SlotRole::Dimension)
                }
                ColumnKind::Metric(metric) => {
                    let codec = for_metric(metric);
                    (codec.width(), SlotRole::Metric(codec))
                }
            };
            slots.push(FieldSlot {
                offset,
                width,
                role,
            });
            offset += width;
        }
        Self {
            slots,
            row_width: offset,
        }
    }

    pub fn slots(&self) -> &[FieldSlot] {
        &self.slots
    }

    pub fn slot(&self, ordinal: usize) -> &FieldSlot {
        &self.slots[ordinal]
    }

    pub fn column_count(&self) -> usize {
        self.slots.len()
    }

    pub fn row_width(&self) -> usize {
        self.row_width
    }

    /// The cell of `ordinal` inside one encoded row.
    pub fn cell<'r>(&self, row: &'r [u8], ordinal: usize) -> &'r [u8] {
        let slot = &self.slots[ordinal];
        &row[slot.offset..slot.offset + slot.width]
    }
}
