// crates/ndtp-core/src/wire/spiketrain.rs

use crate::bits::{pack_values, unpack_values, ByteOrder};
use crate::error::{NdtpError, Result};

pub const SPIKE_BIT_WIDTH: u8 = 4;
pub const MAX_SPIKE_COUNT: u8 = (1 << SPIKE_BIT_WIDTH) - 1;
pub const SPIKETRAIN_PREFIX_BYTES: usize = 5;

/// Spiketrain wire layout, big-endian:
///
/// ```text
/// spike-bin count : 4 bytes
/// bin_size_ms     : 1 byte
/// counts          : count * 4 bits, unsigned, MSB-first
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpiketrainPayload {
    pub bin_size_ms: u8,
    pub spike_counts: Vec<u8>,
}

impl SpiketrainPayload {
    /// Counts above `MAX_SPIKE_COUNT` are saturated, never rejected; the
    /// 4-bit field cannot represent more. Callers that need the true count
    /// must retain it separately.
    pub fn pack(&self) -> Result<Vec<u8>> {
        if self.spike_counts.len() > u32::MAX as usize {
            return Err(NdtpError::ValueOutOfRange(format!(
                "{} bins exceeds 32-bit count",
                self.spike_counts.len()
            )));
        }

        let packed_len = (self.spike_counts.len() * SPIKE_BIT_WIDTH as usize + 7) / 8;
        let mut out = Vec::with_capacity(SPIKETRAIN_PREFIX_BYTES + packed_len);
        out.extend_from_slice(&(self.spike_counts.len() as u32).to_be_bytes());
        out.push(self.bin_size_ms);

        let clamped: Vec<i64> = self
            .spike_counts
            .iter()
            .map(|&c| c.min(MAX_SPIKE_COUNT) as i64)
            .collect();
        pack_values(
            &clamped,
            SPIKE_BIT_WIDTH,
            false,
            ByteOrder::Big,
            &mut out,
            0,
        )?;

        Ok(out)
    }

    pub fn unpack(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < SPIKETRAIN_PREFIX_BYTES {
            return Err(NdtpError::InsufficientData(format!(
                "spiketrain payload needs {SPIKETRAIN_PREFIX_BYTES} bytes, got {}",
                bytes.len()
            )));
        }
        let count = u32::from_be_bytes(bytes[0..4].try_into().unwrap());
        let bin_size_ms = bytes[4];

        let packed = &bytes[SPIKETRAIN_PREFIX_BYTES..];
        let need = (count as u64 * SPIKE_BIT_WIDTH as u64 + 7) / 8;
        if (packed.len() as u64) < need {
            return Err(NdtpError::InsufficientData(format!(
                "spiketrain declares {count} bins ({need} packed bytes), got {}",
                packed.len()
            )));
        }

        let (values, _) = unpack_values(
            packed,
            SPIKE_BIT_WIDTH,
            false,
            ByteOrder::Big,
            Some(count as usize),
            0,
        )?;
        Ok(Self {
            bin_size_ms,
            spike_counts: values.iter().map(|&v| v as u8).collect(),
        })
    }
}
