// crates/ndtp-core/src/wire/header.rs

use crate::error::{NdtpError, Result};
use crate::wire::DataType;

pub const NDTP_VERSION: u8 = 1;
pub const HEADER_SIZE_BYTES: usize = 12;

/// Fixed 12-byte frame preamble, big-endian:
/// version:u8 (=1) | data_type:u8 | timestamp:u64 (device ns) | seq_number:u16
///
/// `data_type` stays a raw tag here: the header parses for any tag value,
/// and payload dispatch decides whether the tag is known.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NdtpHeader {
    pub data_type: u8,
    pub timestamp: u64,
    pub seq_number: u16,
}

impl NdtpHeader {
    pub fn new(data_type: DataType, timestamp: u64, seq_number: u16) -> Self {
        Self {
            data_type: data_type.tag(),
            timestamp,
            seq_number,
        }
    }

    pub fn pack(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_SIZE_BYTES);
        out.push(NDTP_VERSION);
        out.push(self.data_type);
        out.extend_from_slice(&self.timestamp.to_be_bytes());
        out.extend_from_slice(&self.seq_number.to_be_bytes());
        out
    }

    /// Fails `VersionMismatch` on a wrong version byte, independent of
    /// whatever follows the header.
    pub fn unpack(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE_BYTES {
            return Err(NdtpError::InsufficientData(format!(
                "header needs {HEADER_SIZE_BYTES} bytes, got {}",
                bytes.len()
            )));
        }
        let version = bytes[0];
        if version != NDTP_VERSION {
            return Err(NdtpError::VersionMismatch {
                expected: NDTP_VERSION,
                got: version,
            });
        }
        let timestamp = u64::from_be_bytes(bytes[2..10].try_into().unwrap());
        let seq_number = u16::from_be_bytes(bytes[10..12].try_into().unwrap());
        Ok(Self {
            data_type: bytes[1],
            timestamp,
            seq_number,
        })
    }
}
