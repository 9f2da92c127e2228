use crate::engine::core::kv::compression::{CompressionCodec, FLAG_COMPRESSED};
use crate::engine::errors::CodecError;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnBlockKind {
    Dimension = 0,
    Metric = 1,
}

impl From<u8> for ColumnBlockKind {
    fn from(v: u8) -> Self {
        match v {
            1 => ColumnBlockKind::Metric,
            _ => ColumnBlockKind::Dimension,
        }
    }
}

impl From<ColumnBlockKind> for u8 {
    fn from(k: ColumnBlockKind) -> u8 {
        k as u8
    }
}

/// Leading bytes of every column block value. Little-endian, written by
/// hand so the on-wire layout never depends on struct layout.
#[derive(Clone, Copy, Debug)]
pub struct BlockHeader {
    pub kind: u8,
    pub width: u8,
    pub flags: u16,
    pub row_count: u32,
    pub uncomp_len: u32,
}

impl BlockHeader {
    pub const LEN: usize = 1 + 1 + 2 + 4 + 4;

    pub fn new(kind: ColumnBlockKind, width: u8, flags: u16, row_count: u32, uncomp_len: u32) -> Self {
        Self {
            kind: kind.into(),
            width,
            flags,
            row_count,
            uncomp_len,
        }
    }

    pub fn write_to(&self, buf: &mut Vec<u8>) {
        buf.push(self.kind);
        buf.push(self.width);
        buf.extend_from_slice(&self.flags.to_le_bytes());
        buf.extend_from_slice(&self.row_count.to_le_bytes());
        buf.extend_from_slice(&self.uncomp_len.to_le_bytes());
    }

    pub fn read_from(slice: &[u8]) -> Option<Self> {
        if slice.len() < Self::LEN {
            return None;
        }
        let kind = slice[0];
        let width = slice[1];
        let mut f = [0u8; 2];
        f.copy_from_slice(&slice[2..4]);
        let flags = u16::from_le_bytes(f);
        let mut c = [0u8; 4];
        c.copy_from_slice(&slice[4..8]);
        let row_count = u32::from_le_bytes(c);
        c.copy_from_slice(&slice[8..12]);
        let uncomp_len = u32::from_le_bytes(c);
        Some(Self {
            kind,
            width,
            flags,
            row_count,
            uncomp_len,
        })
    }
}

/// Decoded column block: header plus the unpacked cell bytes.
#[derive(Debug)]
pub struct DecodedBlock {
    pub header: BlockHeader,
    pub cells: Vec<u8>,
}

impl DecodedBlock {
    pub fn row_count(&self) -> usize {
        self.header.row_count as usize
    }

    pub fn cell(&self, row: usize) -> Option<&[u8]> {
        let width = self.header.width as usize;
        let start = row.checked_mul(width)?;
        self.cells.get(start..start + width)
    }
}

/// Parse one block value back into cell bytes.
pub fn decode_block<C: CompressionCodec>(
    bytes: &[u8],
    compression: &C,
) -> Result<DecodedBlock, CodecError> {
    let header = BlockHeader::read_from(bytes)
        .ok_or_else(|| CodecError::BlockDecode("short block header".to_string()))?;
    let payload = &bytes[BlockHeader::LEN..];

    let cells = if header.flags & FLAG_COMPRESSED != 0 {
        compression.decompress(payload, header.uncomp_len as usize)?
    } else {
        payload.to_vec()
    };

    if cells.len() != header.uncomp_len as usize {
        return Err(CodecError::BlockDecode(format!(
            "cell bytes {} do not match header length {}",
            cells.len(),
            header.uncomp_len
        )));
    }
    Ok(DecodedBlock { header, cells })
}
