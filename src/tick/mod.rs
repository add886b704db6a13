//! Tick storage and the capability the swap loop reads ticks through.
//!
//! Two sources ship with the crate:
//! - [`TickListDataProvider`]: a validated, sorted in-memory tick array.
//! - [`LensTickDataProvider`]: fetches bitmap words and tick infos one at a
//!   time through a host supplied [`TickLens`] (an RPC client, a cache, or
//!   the in-memory [`TickBitmap`]).

mod lens;
pub mod tick_list;

pub use lens::{LensTickDataProvider, TickBitmap, TickLens};
pub use tick_list::TickListDataProvider;

use crate::error::{Error, TickError};
use crate::math::tick_math::{MAX_TICK, MIN_TICK};
use std::future::Future;

/// An initialized tick boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick {
    pub index: i32,
    /// Total liquidity referencing this tick.
    pub liquidity_gross: u128,
    /// Liquidity added to the active range when the price crosses this tick
    /// upward (removed when crossing downward).
    pub liquidity_net: i128,
}

impl Tick {
    pub fn new(index: i32, liquidity_gross: u128, liquidity_net: i128) -> Result<Self, TickError> {
        if !(MIN_TICK..=MAX_TICK).contains(&index) {
            return Err(TickError::IndexOutOfRange(index));
        }
        Ok(Self {
            index,
            liquidity_gross,
            liquidity_net,
        })
    }
}

/// Per-tick liquidity as stored on chain, keyed by tick index elsewhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickInfo {
    pub liquidity_gross: u128,
    pub liquidity_net: i128,
}

impl From<Tick> for TickInfo {
    fn from(tick: Tick) -> Self {
        Self {
            liquidity_gross: tick.liquidity_gross,
            liquidity_net: tick.liquidity_net,
        }
    }
}

/// Source of tick data for a single pool.
///
/// These two lookups are the only await points of a swap simulation. The
/// swap loop issues them one at a time and never retries; retry or
/// timeout policy around a remote source belongs to the implementor.
pub trait TickDataProvider: Send + Sync {
    /// Returns the initialized tick at `index`, or `TickError::NotFound`.
    fn get_tick(&self, index: i32) -> impl Future<Output = Result<Tick, Error>> + Send;

    /// Returns the next initialized tick at or before (`lte`) or strictly
    /// after `tick`, never leaving the 256-tick bitmap word of the search.
    ///
    /// The flag is `false` when the returned index is only the word
    /// boundary; the caller steps there and searches again.
    fn next_initialized_tick_within_one_word(
        &self,
        tick: i32,
        lte: bool,
        tick_spacing: i32,
    ) -> impl Future<Output = Result<(i32, bool), Error>> + Send;
}
