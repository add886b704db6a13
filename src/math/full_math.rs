use crate::error::MathError;
use alloy_primitives::U256;

const TWO: U256 = U256::from_limbs([2, 0, 0, 0]);
const THREE: U256 = U256::from_limbs([3, 0, 0, 0]);

/// Full 512-bit product of `a * b` as `(high, low)` words.
#[inline(always)]
fn wide_mul(a: U256, b: U256) -> (U256, U256) {
    let low = a.wrapping_mul(b);
    // a * b mod (2^256 - 1) and mod 2^256 differ by exactly the high word
    let mm = a.mul_mod(b, U256::MAX);
    let (high, borrow) = mm.overflowing_sub(low);
    (if borrow { high.wrapping_sub(U256::ONE) } else { high }, low)
}

/// `floor(a * b / denominator)` without losing the upper 256 bits of the
/// intermediate product.
///
/// Fails with `DivisionByZero`, or `Overflow` when the quotient does not
/// fit in 256 bits.
#[inline(always)]
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }

    let (mut high, mut low) = wide_mul(a, b);
    if high.is_zero() {
        return Ok(low / denominator);
    }
    if denominator <= high {
        return Err(MathError::Overflow);
    }

    // make the product divisible by denominator
    let remainder = a.mul_mod(b, denominator);
    let (reduced, borrow) = low.overflowing_sub(remainder);
    low = reduced;
    if borrow {
        high = high.wrapping_sub(U256::ONE);
    }

    // strip the power of two out of denominator and shift it out of the product
    let twos = denominator & denominator.wrapping_neg();
    let odd = denominator / twos;
    low /= twos;
    let flip = (twos.wrapping_neg() / twos).wrapping_add(U256::ONE);
    low |= high.wrapping_mul(flip);

    // inverse of odd mod 2^256, correct to 4 bits, doubled by each Newton step
    let mut inverse = THREE.wrapping_mul(odd) ^ TWO;
    for _ in 0..6 {
        inverse = inverse.wrapping_mul(TWO.wrapping_sub(odd.wrapping_mul(inverse)));
    }

    Ok(low.wrapping_mul(inverse))
}

/// [`mul_div`] rounded up.
#[inline(always)]
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    let quotient = mul_div(a, b, denominator)?;
    if a.mul_mod(b, denominator).is_zero() {
        return Ok(quotient);
    }
    quotient.checked_add(U256::ONE).ok_or(MathError::Overflow)
}

/// `ceil(a / b)`. Panics when `b` is zero, like integer division.
#[inline(always)]
pub fn div_rounding_up(a: U256, b: U256) -> U256 {
    let (quotient, remainder) = a.div_rem(b);
    if remainder.is_zero() {
        quotient
    } else {
        quotient + U256::ONE
    }
}

/// `a * b` truncated to the low 256 bits.
///
/// One branch of the token0 price update relies on this wraparound
/// to detect that the product overflowed.
#[inline(always)]
pub fn multiply_in_256(a: U256, b: U256) -> U256 {
    a.wrapping_mul(b)
}

/// `a + b` truncated to the low 256 bits.
#[inline(always)]
pub fn add_in_256(a: U256, b: U256) -> U256 {
    a.wrapping_add(b)
}
