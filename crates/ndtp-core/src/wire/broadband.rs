// crates/ndtp-core/src/wire/broadband.rs

use crate::bits::{pack_values, unpack_values, ByteOrder};
use crate::error::{NdtpError, Result};

pub const BROADBAND_PREFIX_BYTES: usize = 7;
pub const MAX_CHANNELS: usize = (1 << 24) - 1;
pub const MAX_SAMPLES_PER_CHANNEL: usize = (1 << 16) - 1;

const CHANNEL_ID_BITS: u8 = 24;
const SAMPLE_COUNT_BITS: u8 = 16;
const U24_MAX: u32 = (1 << 24) - 1;

/// One electrode's sample run within a broadband payload. `channel_id` is
/// not required to be unique across a message; order is significant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BroadbandChannel {
    pub channel_id: u32,
    pub samples: Vec<i64>,
}

/// Broadband wire layout, big-endian:
///
/// ```text
/// (bit_width << 1) | is_signed   : 1 byte
/// channel count                  : 3 bytes
/// sample_rate                    : 3 bytes
/// then one continuous MSB-first bitstream, per channel:
///   channel_id   : 24 bits
///   sample count : 16 bits
///   samples      : sample_count * bit_width bits
/// ```
///
/// The bit cursor runs across channels with no byte realignment; whenever
/// a channel's samples end mid-byte, the next channel_id starts there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BroadbandPayload {
    pub bit_width: u8,
    pub is_signed: bool,
    pub sample_rate: u32,
    pub channels: Vec<BroadbandChannel>,
}

impl BroadbandPayload {
    pub fn pack(&self) -> Result<Vec<u8>> {
        if self.bit_width == 0 || self.bit_width > 127 {
            return Err(NdtpError::ValueOutOfRange(format!(
                "broadband bit_width must be in 1..=127, got {}",
                self.bit_width
            )));
        }
        if self.channels.len() > MAX_CHANNELS {
            return Err(NdtpError::ValueOutOfRange(format!(
                "{} channels exceeds 24-bit channel count",
                self.channels.len()
            )));
        }
        if self.sample_rate > U24_MAX {
            return Err(NdtpError::ValueOutOfRange(format!(
                "sample_rate {} exceeds 24-bit field",
                self.sample_rate
            )));
        }

        let mut out = Vec::with_capacity(BROADBAND_PREFIX_BYTES + self.packed_stream_bytes());
        out.push((self.bit_width << 1) | self.is_signed as u8);
        out.extend_from_slice(&(self.channels.len() as u32).to_be_bytes()[1..]);
        out.extend_from_slice(&self.sample_rate.to_be_bytes()[1..]);

        let mut offset = 0u8;
        for ch in &self.channels {
            if ch.channel_id > U24_MAX {
                return Err(NdtpError::ValueOutOfRange(format!(
                    "channel_id {} exceeds 24-bit field",
                    ch.channel_id
                )));
            }
            if ch.samples.len() > MAX_SAMPLES_PER_CHANNEL {
                return Err(NdtpError::ValueOutOfRange(format!(
                    "{} samples exceeds 16-bit per-channel count",
                    ch.samples.len()
                )));
            }
            offset = pack_values(
                &[ch.channel_id as i64],
                CHANNEL_ID_BITS,
                false,
                ByteOrder::Big,
                &mut out,
                offset,
            )?;
            offset = pack_values(
                &[ch.samples.len() as i64],
                SAMPLE_COUNT_BITS,
                false,
                ByteOrder::Big,
                &mut out,
                offset,
            )?;
            offset = pack_values(
                &ch.samples,
                self.bit_width,
                self.is_signed,
                ByteOrder::Big,
                &mut out,
                offset,
            )?;
        }

        Ok(out)
    }

    pub fn unpack(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < BROADBAND_PREFIX_BYTES {
            return Err(NdtpError::InsufficientData(format!(
                "broadband payload needs a {BROADBAND_PREFIX_BYTES}-byte prefix, got {}",
                bytes.len()
            )));
        }
        let bit_width = bytes[0] >> 1;
        let is_signed = bytes[0] & 1 == 1;
        let ch_count = u32::from_be_bytes([0, bytes[1], bytes[2], bytes[3]]) as usize;
        let sample_rate = u32::from_be_bytes([0, bytes[4], bytes[5], bytes[6]]);

        // ch_count comes off the wire; cap the preallocation.
        let mut channels = Vec::with_capacity(ch_count.min(1024));
        let mut cursor = BROADBAND_PREFIX_BYTES * 8;
        for _ in 0..ch_count {
            let (id, end) = unpack_values(
                bytes,
                CHANNEL_ID_BITS,
                false,
                ByteOrder::Big,
                Some(1),
                cursor,
            )?;
            let (count, end) = unpack_values(
                bytes,
                SAMPLE_COUNT_BITS,
                false,
                ByteOrder::Big,
                Some(1),
                end,
            )?;
            let (samples, end) = unpack_values(
                bytes,
                bit_width,
                is_signed,
                ByteOrder::Big,
                Some(count[0] as usize),
                end,
            )?;
            cursor = end;
            channels.push(BroadbandChannel {
                channel_id: id[0] as u32,
                samples,
            });
        }

        Ok(Self {
            bit_width,
            is_signed,
            sample_rate,
            channels,
        })
    }

    fn packed_stream_bytes(&self) -> usize {
        let mut bits = 0usize;
        for ch in &self.channels {
            bits += (CHANNEL_ID_BITS + SAMPLE_COUNT_BITS) as usize;
            bits += ch.samples.len() * self.bit_width as usize;
        }
        (bits + 7) / 8
    }
}
