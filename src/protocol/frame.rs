//! Frame protocol
//!
//! A frame is a little-endian length prefix followed by exactly that many
//! payload bytes. The prefix width depends on the server generation.
//!
//! ```text
//! Short: ┌─────────┬───────────────┐   Long: ┌─────────┬───────────────┐
//!        │ Len (2) │ Payload       │         │ Len (4) │ Payload       │
//!        └─────────┴───────────────┘         └─────────┴───────────────┘
//! ```
//!
//! The two variants are not interoperable. A long reader fed a short frame
//! takes the first two payload bytes as the high half of the length.

use std::io::{self, ErrorKind, Read, Write};

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{ClientError, Result};

/// Upper bound on the payload buffer reserved before any payload byte
/// arrives. A bogus length prefix must not allocate gigabytes up front.
const INITIAL_PAYLOAD_CAPACITY: u64 = 64 * 1024;

/// Length prefix width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameVariant {
    /// 2-byte prefix (generation 1)
    Short,

    /// 4-byte prefix (generation 2)
    Long,
}

impl FrameVariant {
    /// Number of prefix bytes
    #[inline]
    pub fn prefix_width(self) -> usize {
        match self {
            FrameVariant::Short => 2,
            FrameVariant::Long => 4,
        }
    }

    /// Largest payload length the prefix can express
    #[inline]
    pub fn max_payload_len(self) -> u64 {
        match self {
            FrameVariant::Short => u16::MAX as u64,
            FrameVariant::Long => u32::MAX as u64,
        }
    }

    /// Parse a prefix width given in bytes
    pub fn from_width(width: u8) -> Result<Self> {
        match width {
            2 => Ok(FrameVariant::Short),
            4 => Ok(FrameVariant::Long),
            other => Err(ClientError::Config(format!(
                "unsupported length prefix width {} (expected 2 or 4)",
                other
            ))),
        }
    }
}

/// A complete frame ready for the wire
#[derive(Debug, Clone)]
pub struct Frame {
    variant: FrameVariant,
    payload: Bytes,
}

impl Frame {
    /// Create a frame, checking the payload fits the variant's prefix
    pub fn new(variant: FrameVariant, payload: impl Into<Bytes>) -> Result<Self> {
        let payload = payload.into();
        let size = payload.len() as u64;
        let max = variant.max_payload_len();
        if size > max {
            return Err(ClientError::PayloadTooLarge { size, max });
        }
        Ok(Self { variant, payload })
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Total size on the wire (prefix + payload)
    pub fn encoded_len(&self) -> usize {
        self.variant.prefix_width() + self.payload.len()
    }

    /// Serialize prefix and payload into one contiguous buffer
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        buf.put_uint_le(self.payload.len() as u64, self.variant.prefix_width());
        buf.put_slice(&self.payload);
        buf.freeze()
    }
}

// =============================================================================
// Stream-based I/O
// =============================================================================

/// Write one frame to a stream
///
/// Nothing is written if the payload is too large for the variant.
pub fn write_frame<W: Write>(writer: &mut W, variant: FrameVariant, payload: &[u8]) -> Result<()> {
    let frame = Frame::new(variant, Bytes::copy_from_slice(payload))?;
    let bytes = frame.to_bytes();

    writer
        .write_all(&bytes)
        .and_then(|_| writer.flush())
        .map_err(map_write_error)?;

    tracing::trace!("Wrote {:?} frame: {} payload bytes", variant, payload.len());
    Ok(())
}

/// Read one frame from a stream
///
/// Blocks until the prefix and the full payload have arrived. A peer that
/// closes early yields `ConnectionClosed`, never a truncated payload.
pub fn read_frame<R: Read>(reader: &mut R, variant: FrameVariant) -> Result<Vec<u8>> {
    let width = variant.prefix_width();
    let mut prefix = [0u8; 4];
    read_prefix(reader, &mut prefix[..width])?;

    let size = (&prefix[..width]).get_uint_le(width);
    tracing::trace!("Reading {:?} frame: {} payload bytes", variant, size);

    // Short reads are normal on slow links; take + read_to_end keeps going
    // until `size` bytes or EOF.
    let mut payload = Vec::with_capacity(size.min(INITIAL_PAYLOAD_CAPACITY) as usize);
    let outcome = Read::take(&mut *reader, size).read_to_end(&mut payload);
    let received = payload.len() as u64;

    match outcome {
        Ok(_) if received == size => Ok(payload),
        Ok(_) => Err(ClientError::ConnectionClosed { expected: size, received }),
        Err(e) => Err(map_read_error(e, size, received)),
    }
}

/// Fill the prefix buffer, tracking how much arrived before a close
fn read_prefix<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    let expected = buf.len() as u64;
    let mut filled = 0;

    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(ClientError::ConnectionClosed {
                    expected,
                    received: filled as u64,
                })
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(map_read_error(e, expected, filled as u64)),
        }
    }

    Ok(())
}

/// Classify a read error
///
/// Socket timeouts surface as `WouldBlock` on Unix and `TimedOut` on
/// Windows. A peer reset counts as closure.
fn map_read_error(err: io::Error, expected: u64, received: u64) -> ClientError {
    match err.kind() {
        ErrorKind::WouldBlock | ErrorKind::TimedOut => ClientError::Timeout {
            stage: "awaiting response",
        },
        ErrorKind::UnexpectedEof | ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted => {
            ClientError::ConnectionClosed { expected, received }
        }
        _ => ClientError::Io(err),
    }
}

fn map_write_error(err: io::Error) -> ClientError {
    match err.kind() {
        ErrorKind::WouldBlock | ErrorKind::TimedOut => ClientError::Timeout {
            stage: "sending request",
        },
        _ => ClientError::Io(err),
    }
}
