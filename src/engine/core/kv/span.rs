use crate::engine::errors::CodecError;

/// A `(buffer, offset, length)` view, the shape wide-column store clients
/// hand around. The codec only ever emits self-contained spans (offset 0,
/// length covering the whole buffer); windowed construction exists so
/// adapters and tests can represent the degenerate case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteSpan {
    buf: Vec<u8>,
    offset: usize,
    len: usize,
}

impl ByteSpan {
    pub fn standalone(buf: Vec<u8>) -> Self {
        let len = buf.len();
        Self {
            buf,
            offset: 0,
            len,
        }
    }

    pub fn empty() -> Self {
        Self::standalone(Vec::new())
    }

    /// A window into a shared buffer. `offset + len` must stay inside `buf`.
    pub fn windowed(buf: Vec<u8>, offset: usize, len: usize) -> Self {
        Self { buf, offset, len }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn buffer_len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_standalone(&self) -> bool {
        self.offset == 0 && self.len == self.buf.len()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buf[self.offset..self.offset + self.len]
    }

    /// The whole buffer when the span is self-contained, an error when it is
    /// a window over foreign bytes.
    pub fn ensure_standalone(&self) -> Result<&[u8], CodecError> {
        if self.is_standalone() {
            Ok(&self.buf)
        } else {
            Err(CodecError::DictionaryBlobInvariant {
                offset: self.offset,
                len: self.len,
                buf_len: self.buf.len(),
            })
        }
    }
}
