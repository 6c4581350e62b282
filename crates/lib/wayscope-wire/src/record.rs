//! Reader for the sequential record container holding serialized scenarios.
//!
//! Each frame is: an 8-byte little-endian payload length, the masked CRC32C
//! of those length bytes, the payload, and the masked CRC32C of the payload.
//! Both checksums are verified before a payload is handed out.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use prost::Message;
use thiserror::Error;

use crate::schema::Scenario;

/// Added to the rotated CRC when masking, per the container format.
const CRC_MASK_DELTA: u32 = 0xa282_ead8;

const LENGTH_BYTES: usize = 8;
const CRC_BYTES: usize = 4;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("i/o failure while reading record: {0}")]
    Io(#[from] std::io::Error),
    #[error("record stream ended inside a frame")]
    TruncatedRecord,
    #[error("length checksum mismatch: expected {expected:#010x}, found {found:#010x}")]
    LengthChecksum { expected: u32, found: u32 },
    #[error("payload checksum mismatch: expected {expected:#010x}, found {found:#010x}")]
    PayloadChecksum { expected: u32, found: u32 },
    #[error("payload is not a valid scenario message: {0}")]
    Decode(#[from] prost::DecodeError),
}

/// Masked CRC32C as stored in frame headers and trailers.
pub fn masked_crc32c(bytes: &[u8]) -> u32 {
    let crc = crc32c::crc32c(bytes);
    ((crc >> 15) | (crc << 17)).wrapping_add(CRC_MASK_DELTA)
}

/// Parses one frame payload into the scenario schema model.
pub fn decode_scenario(payload: &[u8]) -> Result<Scenario, RecordError> {
    Ok(Scenario::decode(payload)?)
}

/// Appends one framed payload to `writer`.
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> std::io::Result<()> {
    let length = payload.len() as u64;
    let length_bytes = length.to_le_bytes();
    writer.write_all(&length_bytes)?;
    writer.write_all(&masked_crc32c(&length_bytes).to_le_bytes())?;
    writer.write_all(payload)?;
    writer.write_all(&masked_crc32c(payload).to_le_bytes())?;
    Ok(())
}

/// Iterator over the payloads of a record container.
///
/// A broken frame desynchronizes the length-prefixed stream, so the first
/// error ends iteration; payloads yielded before it remain valid.
pub struct RecordReader<R: Read> {
    source: R,
    finished: bool,
}

impl RecordReader<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, RecordError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> RecordReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            finished: false,
        }
    }

    /// Fills `buf` completely. `Ok(false)` means the stream was already at
    /// its end; ending mid-buffer is a truncated frame.
    fn fill(&mut self, buf: &mut [u8]) -> Result<bool, RecordError> {
        let mut filled = 0;
        while filled < buf.len() {
            let count = self.source.read(&mut buf[filled..])?;
            if count == 0 {
                if filled == 0 {
                    return Ok(false);
                }
                return Err(RecordError::TruncatedRecord);
            }
            filled += count;
        }
        Ok(true)
    }

    fn read_frame(&mut self) -> Result<Option<Vec<u8>>, RecordError> {
        let mut length_bytes = [0u8; LENGTH_BYTES];
        if !self.fill(&mut length_bytes)? {
            return Ok(None);
        }

        let mut crc_bytes = [0u8; CRC_BYTES];
        if !self.fill(&mut crc_bytes)? {
            return Err(RecordError::TruncatedRecord);
        }
        let found = u32::from_le_bytes(crc_bytes);
        let expected = masked_crc32c(&length_bytes);
        if found != expected {
            return Err(RecordError::LengthChecksum { expected, found });
        }

        let length = u64::from_le_bytes(length_bytes) as usize;
        let mut payload = vec![0u8; length];
        if !self.fill(&mut payload)? && length > 0 {
            return Err(RecordError::TruncatedRecord);
        }

        if !self.fill(&mut crc_bytes)? {
            return Err(RecordError::TruncatedRecord);
        }
        let found = u32::from_le_bytes(crc_bytes);
        let expected = masked_crc32c(&payload);
        if found != expected {
            return Err(RecordError::PayloadChecksum { expected, found });
        }
        Ok(Some(payload))
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<Vec<u8>, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_frame() {
            Ok(Some(payload)) => Some(Ok(payload)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
