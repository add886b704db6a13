use crate::FastMap;
use crate::U256_1;
use crate::error::{MathError, TickError};
use crate::math::bit_math::{least_significant_bit, most_significant_bit};
use crate::math::tick_math::MAX_TICK_SPACING;
use alloy_primitives::U256;

/// Computes the bitmap word index and bit position for a compressed tick.
///
/// `compressed` is a tick already divided by the spacing; bit `b` of word
/// `w` stands for the compressed tick `w * 256 + b`.
#[inline]
pub fn position(compressed: i32) -> (i16, u8) {
    ((compressed >> 8) as i16, (compressed & 0xff) as u8)
}

/// `floor(tick / tick_spacing)`, rounding toward negative infinity.
#[inline]
pub fn compress(tick: i32, tick_spacing: i32) -> i32 {
    tick.div_euclid(tick_spacing)
}

/// The word a one-word search starting at `tick` has to look at.
///
/// A `lte` search scans the word holding `tick` itself, a `gt` search
/// the word holding the next compressed tick.
#[inline]
pub fn search_word(tick: i32, tick_spacing: i32, lte: bool) -> i16 {
    let compressed = compress(tick, tick_spacing);
    if lte {
        position(compressed).0
    } else {
        position(compressed + 1).0
    }
}

/// Rejects spacings outside `[1, MAX_TICK_SPACING)`.
///
/// Within that range every word boundary of an in-range tick fits in `i32`.
#[inline]
pub fn check_spacing(tick_spacing: i32) -> Result<(), TickError> {
    if tick_spacing <= 0 || tick_spacing >= MAX_TICK_SPACING {
        return Err(TickError::InvalidSpacing(tick_spacing));
    }
    Ok(())
}

/// Returns the bitmap word stored at `word`, or zero if absent.
pub fn get_word(bitmap: &FastMap<i16, U256>, word: i16) -> U256 {
    bitmap.get(&word).copied().unwrap_or(U256::ZERO)
}

/// Toggles the initialized status of a tick in the bitmap.
///
/// `tick` must be a multiple of `tick_spacing`.
pub fn flip_tick(
    tick_bitmap: &mut FastMap<i16, U256>,
    tick: i32,
    tick_spacing: i32,
) -> Result<(), TickError> {
    check_spacing(tick_spacing)?;
    if tick % tick_spacing != 0 {
        return Err(TickError::NotOnSpacing {
            tick,
            spacing: tick_spacing,
        });
    }

    let (word_pos, bit_pos) = position(tick / tick_spacing);
    let word = tick_bitmap.entry(word_pos).or_insert(U256::ZERO);
    *word ^= U256_1 << bit_pos;
    if word.is_zero() {
        tick_bitmap.remove(&word_pos);
    }
    Ok(())
}

/// Scans one already-fetched bitmap word for the next initialized tick to
/// the left (`lte`) or right of `tick`.
///
/// `word` must be the word named by [`search_word`] for the same arguments.
/// When nothing is initialized the word boundary is returned with `false`,
/// so the caller can step there and search the neighbouring word.
pub fn next_initialized_tick_in_word(
    word: U256,
    tick: i32,
    tick_spacing: i32,
    lte: bool,
) -> Result<(i32, bool), MathError> {
    let compressed = compress(tick, tick_spacing);

    if lte {
        let (_, bit_pos) = position(compressed);
        // all the 1s at or to the right of the current bit_pos
        let mask = (U256_1 << bit_pos) - U256_1 + (U256_1 << bit_pos);
        let masked = word & mask;

        let initialized = !masked.is_zero();
        let next = if initialized {
            (compressed - i32::from(bit_pos - most_significant_bit(masked)?)) * tick_spacing
        } else {
            (compressed - i32::from(bit_pos)) * tick_spacing
        };
        Ok((next, initialized))
    } else {
        let (_, bit_pos) = position(compressed + 1);
        // all the 1s at or to the left of bit_pos
        let mask = !((U256_1 << bit_pos) - U256_1);
        let masked = word & mask;

        let initialized = !masked.is_zero();
        let next = if initialized {
            (compressed + 1 + i32::from(least_significant_bit(masked)? - bit_pos)) * tick_spacing
        } else {
            (compressed + 1 + i32::from(u8::MAX - bit_pos)) * tick_spacing
        };
        Ok((next, initialized))
    }
}

/// Searches the sparse `bitmap` within one word of `tick`.
pub fn next_initialized_tick_within_one_word(
    bitmap: &FastMap<i16, U256>,
    tick: i32,
    tick_spacing: i32,
    lte: bool,
) -> Result<(i32, bool), MathError> {
    let word = get_word(bitmap, search_word(tick, tick_spacing, lte));
    next_initialized_tick_in_word(word, tick, tick_spacing, lte)
}
