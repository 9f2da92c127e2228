use crate::engine::errors::EncodeError;
use crate::engine::schema::MetricType;

/// Fixed-width binary codec for one metric type. Every cell a codec produces
/// has exactly [`width`](FixedLenCodec::width) bytes, so rows stay
/// fixed-length and columns can be sliced by ordinal arithmetic.
pub trait FixedLenCodec: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn width(&self) -> usize;

    /// Parse the raw cell text and append its fixed-width form to `out`.
    fn encode(&self, column: &str, value: &str, out: &mut Vec<u8>) -> Result<(), EncodeError>;

    /// Decode one cell back into its canonical text form. `None` when the
    /// cell has the wrong width or holds an impossible value.
    fn decode(&self, cell: &[u8]) -> Option<String>;
}

/// Codec for a metric type, picked once at layout-planning time.
pub fn for_metric(metric: MetricType) -> &'static dyn FixedLenCodec {
    match metric {
        MetricType::I64 => &I64Codec,
        MetricType::U64 => &U64Codec,
        MetricType::F64 => &F64Codec,
        MetricType::Bool => &BoolCodec,
    }
}

fn parse_failure(codec: &dyn FixedLenCodec, column: &str, value: &str) -> EncodeError {
    EncodeError::Metric {
        column: column.to_string(),
        value: value.to_string(),
        kind: codec.type_name(),
    }
}

pub struct I64Codec;

impl FixedLenCodec for I64Codec {
    fn type_name(&self) -> &'static str {
        "i64"
    }

    fn width(&self) -> usize {
        8
    }

    fn encode(&self, column: &str, value: &str, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        let n: i64 = value.parse().map_err(|_| parse_failure(self, column, value))?;
        out.extend_from_slice(&n.to_le_bytes());
        Ok(())
    }

    fn decode(&self, cell: &[u8]) -> Option<String> {
        let bytes: [u8; 8] = cell.try_into().ok()?;
        Some(i64::from_le_bytes(bytes).to_string())
    }
}

pub struct U64Codec;

impl FixedLenCodec for U64Codec {
    fn type_name(&self) -> &'static str {
        "u64"
    }

    fn width(&self) -> usize {
        8
    }

    fn encode(&self, column: &str, value: &str, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        let n: u64 = value.parse().map_err(|_| parse_failure(self, column, value))?;
        out.extend_from_slice(&n.to_le_bytes());
        Ok(())
    }

    fn decode(&self, cell: &[u8]) -> Option<String> {
        let bytes: [u8; 8] = cell.try_into().ok()?;
        Some(u64::from_le_bytes(bytes).to_string())
    }
}

pub struct F64Codec;

impl FixedLenCodec for F64Codec {
    fn type_name(&self) -> &'static str {
        "f64"
    }

    fn width(&self) -> usize {
        8
    }

    fn encode(&self, column: &str, value: &str, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        let n: f64 = value.parse().map_err(|_| parse_failure(self, column, value))?;
        out.extend_from_slice(&n.to_le_bytes());
        Ok(())
    }

    fn decode(&self, cell: &[u8]) -> Option<String> {
        let bytes: [u8; 8] = cell.try_into().ok()?;
        Some(f64::from_le_bytes(bytes).to_string())
    }
}

pub struct BoolCodec;

impl FixedLenCodec for BoolCodec {
    fn type_name(&self) -> &'static str {
        "bool"
    }

    fn width(&self) -> usize {
        1
    }

    fn encode(&self, column: &str, value: &str, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        let byte = match value {
            "true" => 1u8,
            "false" => 0u8,
            _ => return Err(parse_failure(self, column, value)),
        };
        out.push(byte);
        Ok(())
    }

    fn decode(&self, cell: &[u8]) -> Option<String> {
        match cell {
            [0] => Some("false".to_string()),
            [1] => Some("true".to_string()),
            _ => None,
        }
    }
}
