use crate::error::StateError;
use crate::math::bit_math::most_significant_bit;
use alloy_primitives::{I256, U256};

pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = -MIN_TICK;
/// Exclusive upper bound on tick spacing, as enforced by the pool factory.
pub const MAX_TICK_SPACING: i32 = 16384;

/// `get_sqrt_ratio_at_tick(MIN_TICK)`
pub const MIN_SQRT_RATIO: U256 = U256::from_limbs([4295128739, 0, 0, 0]);
/// `get_sqrt_ratio_at_tick(MAX_TICK)`
pub const MAX_SQRT_RATIO: U256 =
    U256::from_limbs([6743328256752651558, 17280870778742802505, 4294805859, 0]);

/// ln(2) / ln(sqrt(1.0001)) in Q128.128, truncated.
const LOG_SQRT10001: I256 =
    I256::from_raw(U256::from_limbs([11745905768312294533, 13863, 0, 0]));
/// Error margin subtracted for the lower tick candidate.
const TICK_LOW_OFFSET: I256 = I256::from_raw(U256::from_limbs([
    6552757943157144234,
    184476617836266586,
    0,
    0,
]));
/// Error margin added for the upper tick candidate.
const TICK_HIGH_OFFSET: I256 = I256::from_raw(U256::from_limbs([
    4998474450511881007,
    15793544031827761793,
    0,
    0,
]));

/// `1 / sqrt(1.0001)^(2^i)` in Q128.128 for i in 1..20, as `[low, high]` limbs.
/// Bit 0 seeds the ratio directly.
const BIT_MULTIPLIERS: [[u64; 2]; 19] = [
    [6459403834229662010, 18444899583751176498],
    [17226890335427755468, 18443055278223354162],
    [2032852871939366096, 18439367220385604838],
    [14545316742740207172, 18431993317065449817],
    [5129152022828963008, 18417254355718160513],
    [4894419605888772193, 18387811781193591352],
    [1280255884321894483, 18329067761203520168],
    [15924666964335305636, 18212142134806087854],
    [8010504389359918676, 17980523815641551639],
    [10668036004952895731, 17526086738831147013],
    [4878133418470705625, 16651378430235024244],
    [9537173718739605541, 15030750278693429944],
    [9972618978014552549, 12247334978882834399],
    [10428997489610666743, 8131365268884726200],
    [9305304367709015974, 3584323654723342297],
    [14301143598189091785, 696457651847595233],
    [7393154844743099908, 26294789957452057],
    [2209338891292245656, 37481735321082],
    [10518117631919034274, 76158723],
];

/// Returns the sqrt price (Q64.96 fixed‑point) at a given tick index,
/// i.e. `sqrt(1.0001^tick) * 2^96`, or `StateError::TickOutOfBounds` if
/// the tick is outside `[MIN_TICK, MAX_TICK]`.
///
/// The ratio is built in Q128.128 by multiplying one precomputed factor
/// per set bit of `|tick|`, inverted for positive ticks, then shifted
/// down to Q64.96 rounding up so the result never undershoots the tick.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U256, StateError> {
    let abs_tick = tick.unsigned_abs();

    if abs_tick > MAX_TICK as u32 {
        return Err(StateError::TickOutOfBounds);
    }

    let mut ratio = if abs_tick & 1 != 0 {
        U256::from_limbs([12262481743371124737, 18445821805675392311, 0, 0])
    } else {
        U256::from_limbs([0, 0, 1, 0])
    };

    for (i, [low, high]) in BIT_MULTIPLIERS.iter().enumerate() {
        if abs_tick & (2 << i) != 0 {
            // both factors are below 2^129 so the product fits in 256 bits
            ratio = ratio.wrapping_mul(U256::from_limbs([*low, *high, 0, 0])) >> 128;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    let round_up = ratio.as_limbs()[0] & 0xFFFF_FFFF != 0;
    Ok((ratio >> 32) + U256::from(round_up as u64))
}

#[inline]
pub(crate) fn i256_from_i128(value: i128) -> I256 {
    let magnitude = I256::from_raw(U256::from(value.unsigned_abs()));
    if value < 0 { -magnitude } else { magnitude }
}

/// Computes the greatest tick whose sqrt ratio is `<= sqrt_price_x_96`.
///
/// Fails with `StateError::SqrtPriceOutOfBounds` outside
/// `[MIN_SQRT_RATIO, MAX_SQRT_RATIO)`. The result always satisfies
/// `get_sqrt_ratio_at_tick(t) <= sqrt_price_x_96 < get_sqrt_ratio_at_tick(t + 1)`.
pub fn get_tick_at_sqrt_ratio(sqrt_price_x_96: U256) -> Result<i32, StateError> {
    if sqrt_price_x_96 < MIN_SQRT_RATIO || sqrt_price_x_96 >= MAX_SQRT_RATIO {
        return Err(StateError::SqrtPriceOutOfBounds);
    }

    // Q64.96 -> Q128.128
    let ratio = sqrt_price_x_96 << 32;
    let msb = most_significant_bit(ratio).map_err(|_| StateError::SqrtPriceIsZero)? as usize;

    // normalise into [2^127, 2^128)
    let mut r = if msb >= 128 {
        ratio >> (msb - 127)
    } else {
        ratio << (127 - msb)
    };

    // log2 in Q64.64; 14 square-and-shift rounds fill fractional bits 63..50
    let mut log_2: i128 = (msb as i128 - 128) << 64;
    for shift in (50..=63).rev() {
        r = r.wrapping_mul(r) >> 127;
        let f = usize::from(r.bit(128));
        log_2 |= (f as i128) << shift;
        r >>= f;
    }

    let log_sqrt10001 = i256_from_i128(log_2).wrapping_mul(LOG_SQRT10001);
    let tick_low = (log_sqrt10001 - TICK_LOW_OFFSET).asr(128).low_i32();
    let tick_high = (log_sqrt10001 + TICK_HIGH_OFFSET).asr(128).low_i32();

    Ok(if tick_low == tick_high {
        tick_low
    } else if get_sqrt_ratio_at_tick(tick_high)? <= sqrt_price_x_96 {
        tick_high
    } else {
        tick_low
    })
}
