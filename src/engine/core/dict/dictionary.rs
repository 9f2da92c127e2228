use std::collections::{BTreeSet, HashMap};

use crate::engine::errors::CodecError;
use crate::shared::storage_header::{BinaryHeader, FileKind};

/// Bijection between the distinct string values of one dimension column and
/// dense codes, scoped to a single batch. Codes are assigned in sorted value
/// order, so the same distinct set always yields the same coding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    /// Values in code order; the index is the code.
    values: Vec<String>,
    codes: HashMap<String, u32>,
}

impl Dictionary {
    pub fn from_distinct(distinct: BTreeSet<String>) -> Self {
        let values: Vec<String> = distinct.into_iter().collect();
        let codes = values
            .iter()
            .enumerate()
            .map(|(code, value)| (value.clone(), code as u32))
            .collect();
        Self { values, codes }
    }

    pub fn encode(&self, value: &str) -> Option<u32> {
        self.codes.get(value).copied()
    }

    pub fn decode(&self, code: u32) -> Option<&str> {
        self.values.get(code as usize).map(String::as_str)
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest whole number of bytes that can hold every code of this
    /// dictionary. At least 1 so an all-identical column still occupies a
    /// cell.
    pub fn code_width(&self) -> usize {
        let max_code = self.values.len().saturating_sub(1) as u32;
        let bits = (32 - max_code.leading_zeros()).max(1) as usize;
        (bits + 7) / 8
    }

    /// Serialize into a self-contained blob: file header, value count, then
    /// length-prefixed values in code order.
    pub fn to_blob(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(BinaryHeader::TOTAL_LEN + 4 + self.values.len() * 8);
        let header = BinaryHeader::new(FileKind::DictionaryBlob.magic(), 1, 0);
        buf.extend_from_slice(&header.to_bytes());
        buf.extend_from_slice(&(self.values.len() as u32).to_le_bytes());
        for value in &self.values {
            // value length was bounded at collection time
            buf.extend_from_slice(&(value.len() as u16).to_le_bytes());
            buf.extend_from_slice(value.as_bytes());
        }
        buf
    }

    /// Parse a blob produced by [`to_blob`]. Rejects wrong magic, short
    /// frames and out-of-order values.
    pub fn from_blob(bytes: &[u8]) -> Result<Self, CodecError> {
        let header = BinaryHeader::read_from(&mut &bytes[..])
            .map_err(|e| CodecError::BlobDecode(format!("bad header: {e}")))?;
        if header.magic != FileKind::DictionaryBlob.magic() {
            return Err(CodecError::BlobDecode("unexpected magic".to_string()));
        }

        let mut pos = BinaryHeader::TOTAL_LEN;
        let count_bytes: [u8; 4] = bytes
            .get(pos..pos + 4)
            .and_then(|b| b.try_into().ok())
            .ok_or_else(|| CodecError::BlobDecode("missing value count".to_string()))?;
        let count = u32::from_le_bytes(count_bytes) as usize;
        pos += 4;

        let mut distinct = BTreeSet::new();
        let mut previous: Option<String> = None;
        for _ in 0..count {
            let len_bytes: [u8; 2] = bytes
                .get(pos..pos + 2)
                .and_then(|b| b.try_into().ok())
                .ok_or_else(|| CodecError::BlobDecode("truncated value length".to_string()))?;
            let len = u16::from_le_bytes(len_bytes) as usize;
            pos += 2;

            let raw = bytes
                .get(pos..pos + len)
                .ok_or_else(|| CodecError::BlobDecode("truncated value".to_string()))?;
            pos += len;

            let value = String::from_utf8(raw.to_vec())
                .map_err(|e| CodecError::BlobDecode(format!("value not UTF-8: {e}")))?;
            if let Some(prev) = &previous {
                if *prev >= value {
                    return Err(CodecError::BlobDecode("values out of order".to_string()));
                }
            }
            previous = Some(value.clone());
            distinct.insert(value);
        }

        if pos != bytes.len() {
            return Err(CodecError::BlobDecode("trailing bytes after values".to_string()));
        }

        Ok(Self::from_distinct(distinct))
    }
}
