// crates/ndtp-core/src/lib.rs

//! NDTP: a bit-packed wire codec for neural sensor data over datagram
//! transports.
//!
//! One frame = 12-byte header | payload | CRC-16/ARC (2 bytes, big-endian).
//! Payloads are either broadband sample arrays (per-channel, packed at an
//! arbitrary 1..=56 bit sample width) or binned spike counts (fixed 4-bit,
//! saturating). The codec is a pure transform: no I/O, no clock, no shared
//! state; the streaming layer owns sockets, reordering, and loss
//! accounting.

pub mod bits;
pub mod checksum;
pub mod error;
pub mod types;
pub mod wire;

pub use crate::error::{NdtpError, Result};
pub use crate::types::{ElectricalBroadbandData, SpiketrainData};
pub use crate::wire::broadband::{BroadbandChannel, BroadbandPayload};
pub use crate::wire::header::{NdtpHeader, HEADER_SIZE_BYTES, NDTP_VERSION};
pub use crate::wire::message::{decode, encode, NdtpMessage, Payload};
pub use crate::wire::spiketrain::SpiketrainPayload;
pub use crate::wire::DataType;
