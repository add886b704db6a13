use crate::error::{Error, TickError};
use crate::math::tick_bitmap::{check_spacing, compress};
use crate::math::tick_math::{MAX_TICK, MIN_TICK, i256_from_i128};
use crate::tick::{Tick, TickDataProvider};
use alloy_primitives::I256;

/// Checks that `ticks` can back a pool with the given spacing.
///
/// Fails on a spacing outside `[1, MAX_TICK_SPACING)`, an index off the spacing grid or out
/// of range, a `liquidity_net` sum other than zero, or an order that is
/// not strictly ascending.
pub fn validate_list(ticks: &[Tick], tick_spacing: i32) -> Result<(), TickError> {
    check_spacing(tick_spacing)?;

    for tick in ticks {
        if tick.index % tick_spacing != 0 {
            return Err(TickError::NotOnSpacing {
                tick: tick.index,
                spacing: tick_spacing,
            });
        }
        if !(MIN_TICK..=MAX_TICK).contains(&tick.index) {
            return Err(TickError::IndexOutOfRange(tick.index));
        }
    }

    // i128 sums can overflow long before the set is inconsistent
    let net = ticks
        .iter()
        .fold(I256::ZERO, |acc, tick| acc + i256_from_i128(tick.liquidity_net));
    if !net.is_zero() {
        return Err(TickError::NonZeroNet(net));
    }

    if let Some(pair) = ticks.windows(2).find(|pair| pair[0].index >= pair[1].index) {
        return Err(TickError::Unsorted {
            previous: pair[0].index,
            tick: pair[1].index,
        });
    }

    Ok(())
}

#[inline]
pub fn is_below_smallest(ticks: &[Tick], tick: i32) -> bool {
    ticks.first().is_none_or(|first| tick < first.index)
}

#[inline]
pub fn is_at_or_above_largest(ticks: &[Tick], tick: i32) -> bool {
    ticks.last().is_none_or(|last| tick >= last.index)
}

/// Position of the largest tick whose index is `<= tick`, if any.
#[inline]
pub fn binary_search(ticks: &[Tick], tick: i32) -> Option<usize> {
    ticks.partition_point(|t| t.index <= tick).checked_sub(1)
}

/// Exact lookup of an initialized tick.
pub fn get_tick(ticks: &[Tick], index: i32) -> Result<Tick, TickError> {
    ticks
        .binary_search_by_key(&index, |t| t.index)
        .map(|i| ticks[i])
        .map_err(|_| TickError::NotFound(index))
}

/// Nearest initialized tick at or before (`lte`) or strictly after `tick`,
/// without any word bound. `None` when the list has nothing on that side.
pub fn next_initialized_tick(ticks: &[Tick], tick: i32, lte: bool) -> Option<Tick> {
    match binary_search(ticks, tick) {
        Some(i) if lte => Some(ticks[i]),
        Some(i) => ticks.get(i + 1).copied(),
        None if lte => None,
        None => ticks.first().copied(),
    }
}

/// Same contract as the on-chain bitmap scan, answered from a sorted list.
///
/// The result never leaves the 256-tick word the search starts in; when
/// nothing is initialized inside it the word boundary comes back with
/// `false`. An empty list always yields the boundary.
pub fn next_initialized_tick_within_one_word(
    ticks: &[Tick],
    tick: i32,
    lte: bool,
    tick_spacing: i32,
) -> Result<(i32, bool), TickError> {
    check_spacing(tick_spacing)?;
    let compressed = compress(tick, tick_spacing);

    if lte {
        let word_pos = compressed >> 8;
        let minimum = (word_pos << 8) * tick_spacing;

        if is_below_smallest(ticks, tick) {
            return Ok((minimum, false));
        }
        Ok(match next_initialized_tick(ticks, tick, true) {
            Some(found) if found.index >= minimum => (found.index, true),
            _ => (minimum, false),
        })
    } else {
        let word_pos = (compressed + 1) >> 8;
        let maximum = (((word_pos + 1) << 8) - 1) * tick_spacing;

        if is_at_or_above_largest(ticks, tick) {
            return Ok((maximum, false));
        }
        Ok(match next_initialized_tick(ticks, tick, false) {
            Some(found) if found.index <= maximum => (found.index, true),
            _ => (maximum, false),
        })
    }
}

/// In-memory tick source over a validated, ascending tick list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickListDataProvider {
    ticks: Vec<Tick>,
}

impl TickListDataProvider {
    pub fn new(ticks: Vec<Tick>, tick_spacing: i32) -> Result<Self, TickError> {
        validate_list(&ticks, tick_spacing)?;
        Ok(Self { ticks })
    }

    #[inline]
    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }
}

impl TickDataProvider for TickListDataProvider {
    async fn get_tick(&self, index: i32) -> Result<Tick, Error> {
        Ok(get_tick(&self.ticks, index)?)
    }

    async fn next_initialized_tick_within_one_word(
        &self,
        tick: i32,
        lte: bool,
        tick_spacing: i32,
    ) -> Result<(i32, bool), Error> {
        Ok(next_initialized_tick_within_one_word(
            &self.ticks,
            tick,
            lte,
            tick_spacing,
        )?)
    }
}
