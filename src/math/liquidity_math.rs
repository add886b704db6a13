use crate::error::MathError;

/// Applies a signed `liquidityNet` delta to the active liquidity.
///
/// Mirrors `LiquidityMath.addDelta`: dropping below zero is an underflow,
/// exceeding `u128::MAX` an overflow.
#[inline]
pub fn add_delta(x: u128, y: i128) -> Result<u128, MathError> {
    if y < 0 {
        x.checked_sub(y.unsigned_abs()).ok_or(MathError::Underflow)
    } else {
        x.checked_add(y as u128).ok_or(MathError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_delta_adds_positive_delta() {
        assert_eq!(add_delta(100, 20).unwrap(), 120);
    }

    #[test]
    fn add_delta_subtracts_negative_delta() {
        assert_eq!(add_delta(100, -20).unwrap(), 80);
    }

    #[test]
    fn add_delta_zero_delta_returns_same() {
        assert_eq!(add_delta(123_456_789, 0).unwrap(), 123_456_789);
    }

    #[test]
    fn add_delta_positive_overflow() {
        assert!(matches!(add_delta(u128::MAX, 1), Err(MathError::Overflow)));
    }

    #[test]
    fn add_delta_negative_to_exact_zero() {
        assert_eq!(add_delta(1_000, -1_000).unwrap(), 0);
    }

    #[test]
    fn add_delta_negative_underflow() {
        assert!(matches!(add_delta(100, -200), Err(MathError::Underflow)));
    }

    #[test]
    fn add_delta_handles_i128_min() {
        // |i128::MIN| is representable as u128
        let x = 1u128 << 127;
        assert_eq!(add_delta(x, i128::MIN).unwrap(), 0);
        assert!(matches!(
            add_delta(x - 1, i128::MIN),
            Err(MathError::Underflow)
        ));
    }
}
