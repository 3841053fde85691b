// crates/ndtp-core/src/error.rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NdtpError>;

#[derive(Debug, Error)]
pub enum NdtpError {
    #[error("value out of range: {0}")]
    ValueOutOfRange(String),

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("version mismatch: expected {expected:#04x}, got {got:#04x}")]
    VersionMismatch { expected: u8, got: u8 },

    #[error("unknown data type tag {0:#04x}")]
    UnknownDataType(u8),

    #[error("checksum mismatch: frame carries {carried:#06x}, computed {computed:#06x}")]
    ChecksumMismatch { carried: u16, computed: u16 },
}
