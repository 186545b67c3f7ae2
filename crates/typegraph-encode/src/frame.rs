//! Length-prefixed framing of byte blobs.
//!
//! A framed buffer is the concatenation of its fields, each preceded by its length
//! as an unsigned LEB128 varint. The format is self-delimiting: a reader recovers
//! the fields by alternately reading a varint and that many bytes.

use crate::error::{FrameError, FrameResult};

/// Longest LEB128 encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Encodes `value` into a stack buffer, returning it with the encoded length.
fn encode_uvarint(mut value: u64) -> ([u8; MAX_VARINT_LEN], usize) {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let mut n = 0;
    while value >= 0x80 {
        buf[n] = (value as u8) | 0x80;
        value >>= 7;
        n += 1;
    }
    buf[n] = value as u8;
    (buf, n + 1)
}

/// Appends the varint encoding of `value` to `out`.
pub fn put_uvarint(out: &mut Vec<u8>, value: u64) {
    let (buf, len) = encode_uvarint(value);
    out.extend_from_slice(&buf[..len]);
}

/// The varint encoding of `value` as its own blob.
pub fn uvarint_bytes(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_VARINT_LEN);
    put_uvarint(&mut out, value);
    out
}

/// Reads one varint from the front of `buf`, returning it with the number of
/// bytes consumed.
pub fn read_uvarint(buf: &[u8]) -> FrameResult<(u64, usize)> {
    let mut value: u64 = 0;
    for (i, &byte) in buf.iter().enumerate() {
        if i == MAX_VARINT_LEN || (i == MAX_VARINT_LEN - 1 && byte > 1) {
            return Err(FrameError::VarintOverflow { offset: 0 });
        }
        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte < 0x80 {
            return Ok((value, i + 1));
        }
    }
    Err(FrameError::Truncated { offset: buf.len() })
}

/// Frames `fields` in order.
pub fn frame<B: AsRef<[u8]>>(fields: &[B]) -> Vec<u8> {
    let mut framer = Framer::with_capacity(fields.len());
    for field in fields {
        framer.push(field.as_ref());
    }
    framer.finish()
}

/// Splits a framed buffer back into its fields.
pub fn unframe(buf: &[u8]) -> FrameResult<Vec<&[u8]>> {
    let mut fields = Vec::new();
    let mut pos = 0;
    while pos < buf.len() {
        let (len, used) = read_uvarint(&buf[pos..]).map_err(|e| e.at(pos))?;
        pos += used;
        let end = usize::try_from(len)
            .ok()
            .and_then(|len| pos.checked_add(len))
            .filter(|&end| end <= buf.len())
            .ok_or(FrameError::ShortField {
                offset: pos,
                wanted: len,
                available: buf.len() - pos,
            })?;
        fields.push(&buf[pos..end]);
        pos = end;
    }
    Ok(fields)
}

/// Incremental builder for a framed buffer.
#[derive(Debug, Default, Clone)]
pub struct Framer {
    out: Vec<u8>,
    fields: usize,
}

impl Framer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(fields: usize) -> Self {
        Framer {
            out: Vec::with_capacity(fields * 16),
            fields: 0,
        }
    }

    pub fn push(&mut self, field: impl AsRef<[u8]>) -> &mut Self {
        let field = field.as_ref();
        put_uvarint(&mut self.out, field.len() as u64);
        self.out.extend_from_slice(field);
        self.fields += 1;
        self
    }

    pub fn push_byte(&mut self, byte: u8) -> &mut Self {
        self.push([byte])
    }

    /// Pushes `value` as a varint-encoded field.
    pub fn push_uvarint(&mut self, value: u64) -> &mut Self {
        let (buf, len) = encode_uvarint(value);
        self.push(&buf[..len])
    }

    pub fn len(&self) -> usize {
        self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields == 0
    }

    pub fn finish(self) -> Vec<u8> {
        self.out
    }
}
