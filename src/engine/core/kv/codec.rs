use tracing::debug;

use crate::engine::core::kv::block::{BlockHeader, ColumnBlockKind};
use crate::engine::core::kv::compression::{CompressionCodec, FLAG_COMPRESSED, Lz4Codec};
use crate::engine::core::kv::{ByteSpan, KvRow, SliceKey};
use crate::engine::core::record::SlotRole;
use crate::engine::core::slice::Slice;
use crate::engine::errors::CodecError;

/// Flattens a closed, dictionary-attached slice into one key/value pair per
/// column. Pairs come out in ordinal order, which is also store key order.
pub struct KeyValueCodec {
    compression: Lz4Codec,
}

impl Default for KeyValueCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueCodec {
    pub fn new() -> Self {
        Self {
            compression: Lz4Codec,
        }
    }

    /// Lazy pass over the slice columns. Fails up front when the slice has
    /// no dictionaries attached.
    pub fn encode_key_value<'a>(
        &'a self,
        slice: &'a Slice,
    ) -> Result<impl Iterator<Item = Result<KvRow, CodecError>> + 'a, CodecError> {
        if slice.local_dictionaries().is_none() {
            return Err(CodecError::DictionariesMissing);
        }
        debug!(
            target: "sliceforge::codec",
            slice_id = slice.slice_id(),
            columns = slice.column_count(),
            rows = slice.row_count(),
            "Flattening slice into key/value pairs"
        );
        Ok((0..slice.column_count()).map(move |ordinal| self.encode_column(slice, ordinal)))
    }

    fn encode_column(&self, slice: &Slice, ordinal: usize) -> Result<KvRow, CodecError> {
        let column = &slice.schema().columns()[ordinal];
        let slot = slice.layout().slot(ordinal);
        let cells = slice.column_bytes(ordinal);

        let uncomp_len =
            u32::try_from(cells.len()).map_err(|_| CodecError::BlockTooLarge { len: cells.len() })?;

        let kind = match slot.role {
            SlotRole::Dimension => ColumnBlockKind::Dimension,
            SlotRole::Metric(_) => ColumnBlockKind::Metric,
        };

        let compressed = self.compression.compress(cells)?;
        let mut value = Vec::with_capacity(BlockHeader::LEN + compressed.len());
        let header = BlockHeader::new(
            kind,
            slot.width as u8,
            FLAG_COMPRESSED,
            slice.row_count(),
            uncomp_len,
        );
        header.write_to(&mut value);
        value.extend_from_slice(&compressed);

        let dictionary = match slot.role {
            SlotRole::Dimension => {
                let dict = slice
                    .local_dictionaries()
                    .and_then(|dicts| dicts.get(&column.name))
                    .ok_or_else(|| CodecError::DictionaryMissing {
                        column: column.name.clone(),
                    })?;
                ByteSpan::standalone(dict.to_blob())
            }
            // Metric pairs carry no dictionary; the empty span is trivially
            // self-contained.
            SlotRole::Metric(_) => ByteSpan::empty(),
        };

        let key = SliceKey {
            partition: slice.partition(),
            slice_id: slice.slice_id(),
            // schema construction caps ordinals at u16 range
            column: ordinal as u16,
        };

        Ok(KvRow {
            key: key.encode().to_vec(),
            value,
            dictionary,
        })
    }
}
