// crates/ndtp-core/src/types.rs

use crate::error::{NdtpError, Result};
use crate::wire::broadband::{BroadbandChannel, BroadbandPayload};
use crate::wire::message::{NdtpMessage, Payload};
use crate::wire::spiketrain::SpiketrainPayload;

/// One broadband acquisition window, pre-framing.
///
/// `pack` emits one datagram per channel so each frame stays small enough
/// for datagram transports; the streaming layer owns addressing and loss
/// accounting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElectricalBroadbandData {
    pub t0: u64,
    pub bit_width: u8,
    pub is_signed: bool,
    pub sample_rate: u32,
    pub channels: Vec<BroadbandChannel>,
}

impl ElectricalBroadbandData {
    /// One message per channel. Sequence numbers start at `seq_number` and
    /// increment per message, wrapping mod 2^16.
    pub fn pack(&self, seq_number: u16) -> Result<Vec<Vec<u8>>> {
        let mut out = Vec::with_capacity(self.channels.len());
        for (i, ch) in self.channels.iter().enumerate() {
            let payload = BroadbandPayload {
                bit_width: self.bit_width,
                is_signed: self.is_signed,
                sample_rate: self.sample_rate,
                channels: vec![ch.clone()],
            };
            let seq = seq_number.wrapping_add(i as u16);
            out.push(NdtpMessage::new(self.t0, seq, Payload::Broadband(payload)).pack()?);
        }
        Ok(out)
    }

    /// Decodes one datagram back into a (typically single-channel) window.
    /// Fails with `UnknownDataType` when the frame does not carry a
    /// broadband payload.
    pub fn unpack(bytes: &[u8]) -> Result<Self> {
        let msg = NdtpMessage::unpack(bytes)?;
        match msg.payload {
            Payload::Broadband(p) => Ok(Self {
                t0: msg.header.timestamp,
                bit_width: p.bit_width,
                is_signed: p.is_signed,
                sample_rate: p.sample_rate,
                channels: p.channels,
            }),
            _ => Err(NdtpError::UnknownDataType(msg.header.data_type)),
        }
    }
}

/// One window of binned spike counts, pre-framing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpiketrainData {
    pub t0: u64,
    pub bin_size_ms: u8,
    pub spike_counts: Vec<u8>,
}

impl SpiketrainData {
    /// Spiketrain windows always fit one message.
    pub fn pack(&self, seq_number: u16) -> Result<Vec<Vec<u8>>> {
        let payload = SpiketrainPayload {
            bin_size_ms: self.bin_size_ms,
            spike_counts: self.spike_counts.clone(),
        };
        let msg = NdtpMessage::new(self.t0, seq_number, Payload::Spiketrain(payload));
        Ok(vec![msg.pack()?])
    }

    /// Fails with `UnknownDataType` when the frame does not carry a
    /// spiketrain payload.
    pub fn unpack(bytes: &[u8]) -> Result<Self> {
        let msg = NdtpMessage::unpack(bytes)?;
        match msg.payload {
            Payload::Spiketrain(p) => Ok(Self {
                t0: msg.header.timestamp,
                bin_size_ms: p.bin_size_ms,
                spike_counts: p.spike_counts,
            }),
            _ => Err(NdtpError::UnknownDataType(msg.header.data_type)),
        }
    }
}
