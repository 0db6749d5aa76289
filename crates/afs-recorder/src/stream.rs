//! Wire codec for the recorder stream.
//!
//! Each item is two TLV records: an integrity record holding the canonical
//! integrity string, then a payload record holding the raw content.
//!
//! ```text
//! +------+----------------+-----------------------+
//! | type | length (u64 BE)| value (length bytes)  |
//! +------+----------------+-----------------------+
//!   0x01   integrity string (UTF-8)
//!   0x02   payload bytes
//! ```
//!
//! Payloads are streamed in both directions and never buffered whole.

use std::io::{self, Read, Write};

use afs_sri::Integrity;
use tracing::debug;

use crate::error::{RecorderError, RecorderResult};

/// Record type of the integrity record.
pub const RECORD_INTEGRITY: u8 = 0x01;
/// Record type of the payload record.
pub const RECORD_PAYLOAD: u8 = 0x02;
/// Size of a record header: type byte plus big-endian length.
pub const HEADER_LEN: usize = 9;

/// Largest accepted integrity record. The longest canonical string
/// (`sha512-` plus 88 base64 characters) is far below this.
const MAX_INTEGRITY_LEN: u64 = 1024;

/// Encode one item: the integrity record for `integrity`, then a payload
/// record of `size` bytes copied from `payload`.
///
/// Exactly `size` bytes are taken from `payload`; a source that ends sooner
/// is a [`RecorderError::ShortPayload`].
pub fn encode<W, R>(writer: &mut W, integrity: &Integrity, size: u64, payload: &mut R) -> RecorderResult<()>
where
    W: Write + ?Sized,
    R: Read + ?Sized,
{
    if size > i64::MAX as u64 {
        return Err(RecorderError::LengthOverflow(size));
    }
    let sri = integrity.to_string();
    write_record(writer, RECORD_INTEGRITY, sri.as_bytes())?;

    write_header(writer, RECORD_PAYLOAD, size)?;
    let copied = io::copy(&mut payload.take(size), writer)?;
    if copied < size {
        return Err(RecorderError::ShortPayload {
            sri,
            expected: size,
            actual: copied,
        });
    }
    debug!(sri = %sri, size, "encoded item");
    Ok(())
}

/// Encode an in-memory payload.
pub fn encode_bytes<W: Write + ?Sized>(
    writer: &mut W,
    integrity: &Integrity,
    payload: &[u8],
) -> RecorderResult<()> {
    encode(writer, integrity, payload.len() as u64, &mut &payload[..])
}

fn write_record<W: Write + ?Sized>(writer: &mut W, record_type: u8, value: &[u8]) -> RecorderResult<()> {
    write_header(writer, record_type, value.len() as u64)?;
    writer.write_all(value)?;
    Ok(())
}

fn write_header<W: Write + ?Sized>(writer: &mut W, record_type: u8, len: u64) -> RecorderResult<()> {
    let mut header = [0u8; HEADER_LEN];
    header[0] = record_type;
    header[1..].copy_from_slice(&len.to_be_bytes());
    writer.write_all(&header)?;
    Ok(())
}

/// Read a record header. `Ok(None)` if the stream ends before its first byte.
fn read_header<R: Read + ?Sized>(reader: &mut R) -> RecorderResult<Option<(u8, u64)>> {
    let mut header = [0u8; HEADER_LEN];
    let mut filled = 0;
    while filled < HEADER_LEN {
        match reader.read(&mut header[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    match filled {
        0 => Ok(None),
        HEADER_LEN => {
            let mut len = [0u8; 8];
            len.copy_from_slice(&header[1..]);
            let len = u64::from_be_bytes(len);
            if len > i64::MAX as u64 {
                return Err(RecorderError::LengthOverflow(len));
            }
            Ok(Some((header[0], len)))
        }
        got => Err(RecorderError::TruncatedHeader { got }),
    }
}

fn expect_header<R: Read + ?Sized>(reader: &mut R, expected: u8) -> RecorderResult<Option<u64>> {
    match read_header(reader)? {
        None => Ok(None),
        Some((actual, _)) if actual != expected => {
            Err(RecorderError::UnexpectedRecordType { expected, actual })
        }
        Some((_, len)) => Ok(Some(len)),
    }
}

/// Decode the next item, or `Ok(None)` at a clean end of stream.
///
/// The payload must be read to the end, closed, or dropped before decoding
/// the next item; all three leave `reader` positioned at the next item.
pub fn decode_next<R: Read + ?Sized>(
    reader: &mut R,
) -> RecorderResult<Option<(Integrity, PayloadReader<'_, R>)>> {
    let Some(len) = expect_header(reader, RECORD_INTEGRITY)? else {
        return Ok(None);
    };
    if len > MAX_INTEGRITY_LEN {
        return Err(RecorderError::LengthOverflow(len));
    }
    let mut raw = vec![0u8; len as usize];
    reader.read_exact(&mut raw)?;
    let text = String::from_utf8(raw).map_err(|_| RecorderError::InvalidUtf8)?;
    let integrity = Integrity::parse(&text)?;

    let len = expect_header(reader, RECORD_PAYLOAD)?
        .ok_or(RecorderError::TruncatedHeader { got: 0 })?;
    debug!(sri = %integrity, size = len, "decoded item");
    Ok(Some((integrity, PayloadReader::new(reader, len))))
}

/// Decode the next item; a clean end of stream is [`RecorderError::EndOfStream`].
pub fn decode<R: Read + ?Sized>(reader: &mut R) -> RecorderResult<(Integrity, PayloadReader<'_, R>)> {
    decode_next(reader)?.ok_or(RecorderError::EndOfStream)
}

/// Bounded view of one payload record.
///
/// Yields at most the declared number of bytes. Closing or dropping it
/// before the end discards the rest of the record; the underlying reader
/// stays open. [`abandon`](Self::abandon) skips that discard.
pub struct PayloadReader<'a, R: Read + ?Sized> {
    inner: &'a mut R,
    declared: u64,
    remaining: u64,
}

impl<'a, R: Read + ?Sized> PayloadReader<'a, R> {
    fn new(inner: &'a mut R, declared: u64) -> Self {
        Self {
            inner,
            declared,
            remaining: declared,
        }
    }

    /// Declared payload length.
    pub fn len(&self) -> u64 {
        self.declared
    }

    pub fn is_empty(&self) -> bool {
        self.declared == 0
    }

    /// Bytes not yet read.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Discard the unread rest of the payload and return how many bytes
    /// were skipped.
    pub fn close(mut self) -> RecorderResult<u64> {
        let skipped = io::copy(&mut self, &mut io::sink())?;
        if skipped > 0 {
            debug!(skipped, "skipped payload bytes");
        }
        Ok(skipped)
    }

    /// Give up on the record without reading the rest of it.
    ///
    /// The underlying reader is left in the middle of the payload, so the
    /// stream cannot be decoded further.
    pub fn abandon(mut self) {
        self.remaining = 0;
    }
}

impl<R: Read + ?Sized> Read for PayloadReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 || buf.is_empty() {
            return Ok(0);
        }
        let max = buf.len().min(usize::try_from(self.remaining).unwrap_or(usize::MAX));
        let n = self.inner.read(&mut buf[..max])?;
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("payload record ended {} bytes early", self.remaining),
            ));
        }
        self.remaining -= n as u64;
        Ok(n)
    }
}

impl<R: Read + ?Sized> Drop for PayloadReader<'_, R> {
    fn drop(&mut self) {
        if self.remaining > 0 {
            // Best effort: a failure here shows up on the next decode.
            let _ = io::copy(self, &mut io::sink());
        }
    }
}

impl<R: Read + ?Sized> std::fmt::Debug for PayloadReader<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayloadReader")
            .field("declared", &self.declared)
            .field("remaining", &self.remaining)
            .finish()
    }
}
