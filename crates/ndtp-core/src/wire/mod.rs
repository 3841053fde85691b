// crates/ndtp-core/src/wire/mod.rs

pub mod broadband;
pub mod header;
pub mod message;
pub mod spiketrain;

/// Payload tags this build can decode. The tag space is owned by the
/// device schema; these values track the SDK's `DataType` enum. Tags that
/// are not listed here flow through decode as `UnknownDataType`, so schema
/// additions do not break this build.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum DataType {
    Broadband = 2,
    Spiketrain = 3,
}

impl DataType {
    #[inline]
    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            2 => Some(DataType::Broadband),
            3 => Some(DataType::Spiketrain),
            _ => None,
        }
    }
}
