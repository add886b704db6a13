use crate::error::MathError;
use alloy_primitives::U256;

/// Index (0–255) of the highest set bit of `x`.
///
/// Fails with `MathError::ZeroValue` for zero, the only value without one.
/// Tick math uses this as the integer part of `log2`.
#[inline]
pub fn most_significant_bit(x: U256) -> Result<u8, MathError> {
    if x.is_zero() {
        return Err(MathError::ZeroValue);
    }
    Ok((x.bit_len() - 1) as u8)
}

/// Index (0–255) of the lowest set bit of `x`, used when scanning a
/// bitmap word upwards for the first initialized position.
#[inline]
pub fn least_significant_bit(x: U256) -> Result<u8, MathError> {
    if x.is_zero() {
        return Err(MathError::ZeroValue);
    }
    Ok(x.trailing_zeros() as u8)
}
