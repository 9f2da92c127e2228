use crate::engine::core::kv::block::{BlockHeader, ColumnBlockKind, decode_block};
use crate::engine::core::kv::compression::{CompressionCodec, FLAG_COMPRESSED, Lz4Codec};
use crate::engine::errors::CodecError;

#[test]
fn header_roundtrip() {
    let header = BlockHeader::new(ColumnBlockKind::Dimension, 2, FLAG_COMPRESSED, 1000, 2000);
    let mut buf = Vec::new();
    header.write_to(&mut buf);
    assert_eq!(buf.len(), BlockHeader::LEN);

    let read = BlockHeader::read_from(&buf).unwrap();
    assert_eq!(ColumnBlockKind::from(read.kind), ColumnBlockKind::Dimension);
    assert_eq!(read.width, 2);
    assert_eq!(read.flags, FLAG_COMPRESSED);
    assert_eq!(read.row_count, 1000);
    assert_eq!(read.uncomp_len, 2000);
}

#[test]
fn short_header_is_none() {
    assert!(BlockHeader::read_from(&[0u8; BlockHeader::LEN - 1]).is_none());
}

#[test]
fn compressed_block_roundtrip() {
    let cells: Vec<u8> = (0..64u8).flat_map(|i| [i, i, i, i]).collect();
    let compressed = Lz4Codec.compress(&cells).unwrap();

    let mut value = Vec::new();
    BlockHeader::new(
        ColumnBlockKind::Metric,
        4,
        FLAG_COMPRESSED,
        64,
        cells.len() as u32,
    )
    .write_to(&mut value);
    value.extend_from_slice(&compressed);

    let block = decode_block(&value, &Lz4Codec).unwrap();
    assert_eq!(block.cells, cells);
    assert_eq!(block.row_count(), 64);
    assert_eq!(block.cell(0).unwrap(), &[0, 0, 0, 0]);
    assert_eq!(block.cell(63).unwrap(), &[63, 63, 63, 63]);
    assert!(block.cell(64).is_none());
}

#[test]
fn uncompressed_block_roundtrip() {
    let cells = vec![5u8, 6, 7];
    let mut value = Vec::new();
    BlockHeader::new(ColumnBlockKind::Dimension, 1, 0, 3, 3).write_to(&mut value);
    value.extend_from_slice(&cells);

    let block = decode_block(&value, &Lz4Codec).unwrap();
    assert_eq!(block.cells, cells);
    assert_eq!(block.cell(1).unwrap(), &[6]);
}

#[test]
fn length_mismatch_is_rejected() {
    let cells = vec![5u8, 6, 7];
    let mut value = Vec::new();
    // header claims 4 bytes of cells but only 3 follow
    BlockHeader::new(ColumnBlockKind::Dimension, 1, 0, 3, 4).write_to(&mut value);
    value.extend_from_slice(&cells);

    let err = decode_block(&value, &Lz4Codec).unwrap_err();
    assert!(matches!(err, CodecError::BlockDecode(_)));
}

#[test]
fn truncated_value_is_rejected() {
    let err = decode_block(&[1u8, 2], &Lz4Codec).unwrap_err();
    assert!(matches!(err, CodecError::BlockDecode(_)));
}

#[test]
fn unknown_kind_byte_falls_back_to_dimension() {
    assert_eq!(ColumnBlockKind::from(0u8), ColumnBlockKind::Dimension);
    assert_eq!(ColumnBlockKind::from(1u8), ColumnBlockKind::Metric);
    assert_eq!(ColumnBlockKind::from(200u8), ColumnBlockKind::Dimension);
}
