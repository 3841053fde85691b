// crates/ndtp-core/src/wire/message.rs

use crate::checksum::crc16;
use crate::error::{NdtpError, Result};
use crate::wire::broadband::BroadbandPayload;
use crate::wire::header::{NdtpHeader, HEADER_SIZE_BYTES};
use crate::wire::spiketrain::SpiketrainPayload;
use crate::wire::DataType;

pub const CRC_SIZE_BYTES: usize = 2;
const MIN_MESSAGE_BYTES: usize = HEADER_SIZE_BYTES + CRC_SIZE_BYTES;

/// The payload of one frame. The discriminant must agree with the header's
/// `data_type` tag; decode enforces this, encode trusts the caller (use
/// `NdtpMessage::new` to derive the tag from the payload).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    Broadband(BroadbandPayload),
    Spiketrain(SpiketrainPayload),
}

impl Payload {
    pub fn data_type(&self) -> DataType {
        match self {
            Payload::Broadband(_) => DataType::Broadband,
            Payload::Spiketrain(_) => DataType::Spiketrain,
        }
    }

    fn pack(&self) -> Result<Vec<u8>> {
        match self {
            Payload::Broadband(p) => p.pack(),
            Payload::Spiketrain(p) => p.pack(),
        }
    }
}

/// One complete frame: header | payload | CRC-16 (2 bytes, big-endian).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NdtpMessage {
    pub header: NdtpHeader,
    pub payload: Payload,
}

impl NdtpMessage {
    /// Builds a message whose header tag matches the payload kind.
    pub fn new(timestamp: u64, seq_number: u16, payload: Payload) -> Self {
        Self {
            header: NdtpHeader::new(payload.data_type(), timestamp, seq_number),
            payload,
        }
    }

    /// header bytes ++ payload bytes ++ CRC-16/ARC over both.
    pub fn pack(&self) -> Result<Vec<u8>> {
        let mut out = self.header.pack();
        out.extend_from_slice(&self.payload.pack()?);
        let crc = crc16(&out);
        out.extend_from_slice(&crc.to_be_bytes());
        Ok(out)
    }

    /// Decode order: length gate, version gate, checksum, then payload.
    /// The checksum is verified before any payload byte is interpreted; a
    /// corrupted datagram is rejected whole, never partially decoded. The
    /// version gate still comes first: a wrong version byte fails
    /// `VersionMismatch` regardless of checksum validity.
    pub fn unpack(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < MIN_MESSAGE_BYTES {
            return Err(NdtpError::InsufficientData(format!(
                "message needs at least {MIN_MESSAGE_BYTES} bytes, got {}",
                bytes.len()
            )));
        }
        let header = NdtpHeader::unpack(bytes)?;

        let crc_at = bytes.len() - CRC_SIZE_BYTES;
        let carried = u16::from_be_bytes(bytes[crc_at..].try_into().unwrap());
        let computed = crc16(&bytes[..crc_at]);
        if carried != computed {
            return Err(NdtpError::ChecksumMismatch { carried, computed });
        }

        let body = &bytes[HEADER_SIZE_BYTES..crc_at];
        let payload = match DataType::from_tag(header.data_type) {
            Some(DataType::Broadband) => Payload::Broadband(BroadbandPayload::unpack(body)?),
            Some(DataType::Spiketrain) => Payload::Spiketrain(SpiketrainPayload::unpack(body)?),
            None => return Err(NdtpError::UnknownDataType(header.data_type)),
        };

        Ok(Self { header, payload })
    }
}

/// Boundary operation for the streaming layer: one datagram out.
pub fn encode(header: NdtpHeader, payload: Payload) -> Result<Vec<u8>> {
    NdtpMessage { header, payload }.pack()
}

/// Boundary operation for the streaming layer: one datagram in.
pub fn decode(bytes: &[u8]) -> Result<(NdtpHeader, Payload)> {
    let msg = NdtpMessage::unpack(bytes)?;
    Ok((msg.header, msg.payload))
}
