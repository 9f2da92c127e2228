use crate::engine::errors::CodecError;

use lz4_flex::block::{
    compress_prepend_size as lz4_compress, decompress_size_prepended as lz4_decompress,
};

/// Block flag: payload bytes are compressed.
pub const FLAG_COMPRESSED: u16 = 0x0001;

pub trait CompressionCodec {
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CodecError>;
    fn decompress(&self, input: &[u8], _uncompressed_len: usize) -> Result<Vec<u8>, CodecError>;
}

pub struct Lz4Codec;

impl CompressionCodec for Lz4Codec {
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        Ok(lz4_compress(input))
    }

    fn decompress(&self, input: &[u8], _uncompressed_len: usize) -> Result<Vec<u8>, CodecError> {
        lz4_decompress(input).map_err(|e| CodecError::BlockDecode(format!("lz4 decompress: {e}")))
    }
}
