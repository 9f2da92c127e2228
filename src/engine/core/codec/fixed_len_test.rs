use crate::engine::core::codec::for_metric;
use crate::engine::errors::EncodeError;
use crate::engine::schema::MetricType;

#[test]
fn i64_cells_are_little_endian() {
    let codec = for_metric(MetricType::I64);
    let mut out = Vec::new();
    codec.encode("amount", "1", &mut out).unwrap();
    assert_eq!(out, 1i64.to_le_bytes());

    out.clear();
    codec.encode("amount", "-7", &mut out).unwrap();
    assert_eq!(out, (-7i64).to_le_bytes());
}

#[test]
fn every_codec_writes_its_declared_width() {
    let samples = [
        (MetricType::I64, "-42"),
        (MetricType::U64, "42"),
        (MetricType::F64, "3.5"),
        (MetricType::Bool, "true"),
    ];
    for (metric, value) in samples {
        let codec = for_metric(metric);
        let mut out = Vec::new();
        codec.encode("m", value, &mut out).unwrap();
        assert_eq!(out.len(), codec.width(), "{}", codec.type_name());
    }
}

#[test]
fn encode_decode_roundtrip() {
    let cases = [
        (MetricType::I64, "-9001"),
        (MetricType::I64, "0"),
        (MetricType::U64, "18446744073709551615"),
        (MetricType::F64, "2.5"),
        (MetricType::Bool, "true"),
        (MetricType::Bool, "false"),
    ];
    for (metric, value) in cases {
        let codec = for_metric(metric);
        let mut out = Vec::new();
        codec.encode("m", value, &mut out).unwrap();
        assert_eq!(codec.decode(&out).unwrap(), value);
    }
}

#[test]
fn unparseable_value_is_a_typed_error() {
    let codec = for_metric(MetricType::I64);
    let mut out = Vec::new();
    let err = codec.encode("amount", "oops", &mut out).unwrap_err();
    match err {
        EncodeError::Metric {
            column,
            value,
            kind,
        } => {
            assert_eq!(column, "amount");
            assert_eq!(value, "oops");
            assert_eq!(kind, "i64");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(out.is_empty());
}

#[test]
fn i64_rejects_leading_whitespace_and_floats() {
    let codec = for_metric(MetricType::I64);
    let mut out = Vec::new();
    assert!(codec.encode("amount", " 1", &mut out).is_err());
    assert!(codec.encode("amount", "1.0", &mut out).is_err());
    assert!(codec.encode("amount", "", &mut out).is_err());
}

#[test]
fn bool_accepts_only_canonical_literals() {
    let codec = for_metric(MetricType::Bool);
    let mut out = Vec::new();
    assert!(codec.encode("flag", "True", &mut out).is_err());
    assert!(codec.encode("flag", "1", &mut out).is_err());
    codec.encode("flag", "false", &mut out).unwrap();
    assert_eq!(out, [0u8]);
}

#[test]
fn decode_rejects_wrong_width() {
    assert!(for_metric(MetricType::I64).decode(&[0u8; 4]).is_none());
    assert!(for_metric(MetricType::Bool).decode(&[0u8, 1u8]).is_none());
    assert!(for_metric(MetricType::Bool).decode(&[7u8]).is_none());
}
