// crates/ndtp-core/src/bits.rs

use crate::error::{NdtpError, Result};

/// Widest packable value. Capped below 64 so the two's-complement and
/// range-check arithmetic in `i64`/`u64` cannot overflow.
pub const MAX_BIT_WIDTH: u8 = 56;

/// Placement of each consumed bit run within the current destination byte.
///
/// Values are always consumed most-significant-bit-first; the order only
/// decides where a run lands relative to the bits already in the byte:
/// - `Big`: the highest free bits (classic MSB-first bitstream).
/// - `Little`: the lowest free bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    Big,
    Little,
}

/// Append `values` to `buf`, each occupying exactly `bit_width` bits,
/// starting at bit `bit_offset` (0..=7) within the final byte of `buf`.
///
/// Signed negatives are converted to `bit_width`-wide two's complement
/// before packing. The buffer grows in whole bytes; unwritten high bits of
/// the final byte stay zero. Returns the new bit offset within the final
/// byte so a caller can keep packing contiguously.
///
/// Fails with `ValueOutOfRange` when a value does not fit `bit_width` bits
/// given `is_signed`, or when `bit_width` is outside `1..=56`.
pub fn pack_values(
    values: &[i64],
    bit_width: u8,
    is_signed: bool,
    order: ByteOrder,
    buf: &mut Vec<u8>,
    bit_offset: u8,
) -> Result<u8> {
    validate_bit_width(bit_width)?;

    let mut offset = (bit_offset & 7) as usize;
    if offset != 0 && buf.is_empty() {
        buf.push(0);
    }

    for &v in values {
        check_range(v, bit_width, is_signed)?;

        // two's complement at bit_width
        let raw = (v as u64) & mask_u64(bit_width);

        let mut remaining = bit_width as usize;
        while remaining > 0 {
            if offset == 0 {
                buf.push(0);
            }
            let avail = 8 - offset;
            let take = remaining.min(avail);
            let run = ((raw >> (remaining - take)) as u8) & mask_u8(take);

            let last = buf.len() - 1;
            match order {
                ByteOrder::Big => buf[last] |= run << (avail - take),
                ByteOrder::Little => buf[last] |= run << offset,
            }

            offset = (offset + take) & 7;
            remaining -= take;
        }
    }

    Ok(offset as u8)
}

/// Inverse of `pack_values`. Decodes `bit_width`-wide values from `data`
/// beginning at absolute bit position `start_bit` (whole bytes are skipped
/// when it exceeds 7). Returns the values and the absolute end-bit
/// position; the caller slices `data` from `end_bit / 8` to keep reading.
///
/// With `Some(count)` exactly that many values are decoded, the buffer
/// length is checked up front, and trailing bits are left untouched.
/// With `None` the maximum number of complete values is decoded and
/// leftover bits that do not form a complete value are an
/// `InsufficientData` error (input ended mid-value with no declared count).
///
/// Sign extension is applied per value when `is_signed` and the top bit of
/// the raw value is set.
pub fn unpack_values(
    data: &[u8],
    bit_width: u8,
    is_signed: bool,
    order: ByteOrder,
    count: Option<usize>,
    start_bit: usize,
) -> Result<(Vec<i64>, usize)> {
    validate_bit_width(bit_width)?;

    let total_bits = data.len() * 8;
    if start_bit > total_bits {
        return Err(NdtpError::InsufficientData(format!(
            "start bit {start_bit} past end of {} byte buffer",
            data.len()
        )));
    }
    let avail = total_bits - start_bit;
    let width = bit_width as usize;

    let n = match count {
        Some(n) => {
            let need = n.checked_mul(width).ok_or_else(|| {
                NdtpError::InsufficientData(format!("requested bit count overflows: {n} values"))
            })?;
            if avail < need {
                return Err(NdtpError::InsufficientData(format!(
                    "need {need} bits for {n} values at width {bit_width}, have {avail}"
                )));
            }
            n
        }
        None => {
            if avail % width != 0 {
                return Err(NdtpError::InsufficientData(format!(
                    "{avail} bits is not a whole number of {bit_width}-bit values"
                )));
            }
            avail / width
        }
    };

    let mut out = Vec::with_capacity(n);
    let mut cursor = start_bit;
    for _ in 0..n {
        let mut raw: u64 = 0;
        let mut remaining = width;
        while remaining > 0 {
            let offset = cursor % 8;
            let free = 8 - offset;
            let take = remaining.min(free);
            let byte = data[cursor / 8];
            let run = match order {
                ByteOrder::Big => (byte >> (free - take)) & mask_u8(take),
                ByteOrder::Little => (byte >> offset) & mask_u8(take),
            };
            raw = (raw << take) | run as u64;
            cursor += take;
            remaining -= take;
        }
        out.push(extend_sign(raw, bit_width, is_signed));
    }

    Ok((out, cursor))
}

#[inline]
fn validate_bit_width(bit_width: u8) -> Result<()> {
    if bit_width == 0 || bit_width > MAX_BIT_WIDTH {
        return Err(NdtpError::ValueOutOfRange(format!(
            "bit_width must be in 1..={MAX_BIT_WIDTH}, got {bit_width}"
        )));
    }
    Ok(())
}

fn check_range(v: i64, bit_width: u8, is_signed: bool) -> Result<()> {
    let w = bit_width as u32;
    let (lo, hi) = if is_signed {
        (-(1i64 << (w - 1)), (1i64 << (w - 1)) - 1)
    } else {
        (0, mask_u64(bit_width) as i64)
    };
    if v < lo || v > hi {
        return Err(NdtpError::ValueOutOfRange(format!(
            "value {v} does not fit {bit_width} {} bits",
            if is_signed { "signed" } else { "unsigned" }
        )));
    }
    Ok(())
}

#[inline]
fn extend_sign(raw: u64, bit_width: u8, is_signed: bool) -> i64 {
    if is_signed && raw & (1u64 << (bit_width - 1)) != 0 {
        (raw as i64) - (1i64 << bit_width)
    } else {
        raw as i64
    }
}

#[inline]
fn mask_u64(bits: u8) -> u64 {
    (1u64 << bits) - 1
}

#[inline]
fn mask_u8(bits: usize) -> u8 {
    ((1u16 << bits) - 1) as u8
}
