// crates/ndtp-core/src/checksum.rs

/// CRC-16/ARC over a byte slice.
///
/// Parameterization is the interoperability contract for every NDTP frame:
/// poly 0x8005 (reflected 0xA001), init 0x0000, no final xor.
/// Check value: `crc16(b"123456789") == 0xBB3D`.
pub fn crc16(bytes: &[u8]) -> u16 {
    let mut crc: u16 = 0x0000;
    for &b in bytes {
        crc ^= b as u16;
        for _ in 0..8 {
            crc = if crc & 1 != 0 { (crc >> 1) ^ 0xA001 } else { crc >> 1 };
        }
    }
    crc
}
