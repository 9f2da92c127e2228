use crate::engine::core::kv::{ByteSpan, KvRow, SliceKey};

#[test]
fn key_layout_is_partition_slice_ordinal_big_endian() {
    let key = SliceKey {
        partition: 0x0102,
        slice_id: 0x0304050607080910,
        column: 0x1112,
    };
    let bytes = key.encode();
    assert_eq!(bytes.len(), SliceKey::LEN);
    assert_eq!(&bytes[0..2], &[0x01, 0x02]);
    assert_eq!(
        &bytes[2..10],
        &[0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x10]
    );
    assert_eq!(&bytes[10..12], &[0x11, 0x12]);

    assert_eq!(SliceKey::decode(&bytes), Some(key));
}

#[test]
fn decode_rejects_wrong_length() {
    assert_eq!(SliceKey::decode(&[0u8; 11]), None);
    assert_eq!(SliceKey::decode(&[0u8; 13]), None);
}

#[test]
fn byte_order_matches_logical_order() {
    // Sorting encoded keys must equal sorting (partition, slice, ordinal)
    let keys = [
        SliceKey { partition: 1, slice_id: 2, column: 3 },
        SliceKey { partition: 0, slice_id: 9, column: 9 },
        SliceKey { partition: 1, slice_id: 2, column: 0 },
        SliceKey { partition: 1, slice_id: 1, column: 9 },
        SliceKey { partition: 256, slice_id: 0, column: 0 },
    ];

    let mut logical: Vec<SliceKey> = keys.to_vec();
    logical.sort();

    let mut encoded: Vec<[u8; SliceKey::LEN]> = keys.iter().map(|k| k.encode()).collect();
    encoded.sort();

    let reordered: Vec<SliceKey> = encoded
        .iter()
        .map(|b| SliceKey::decode(b).unwrap())
        .collect();
    assert_eq!(reordered, logical);
}

#[test]
fn validate_accepts_standalone_dictionary() {
    let row = KvRow {
        key: vec![0; SliceKey::LEN],
        value: vec![1, 2, 3],
        dictionary: ByteSpan::standalone(vec![7, 8]),
    };
    assert!(row.validate_dictionary().is_ok());
}

#[test]
fn validate_rejects_windowed_dictionary() {
    let row = KvRow {
        key: vec![0; SliceKey::LEN],
        value: vec![1, 2, 3],
        dictionary: ByteSpan::windowed(vec![7, 8, 9], 1, 1),
    };
    assert!(row.validate_dictionary().is_err());
}
