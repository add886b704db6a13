//! Off-chain quoting and routing core for Uniswap V3–style
//! concentrated-liquidity pools.
//!
//! This crate exposes:
//! - Low‑level math primitives (`math::*`) that reproduce the on‑chain
//!   integer rounding of tick, price and swap-step computations.
//! - Tick storage (`tick::*`): a validated sorted tick list, an on‑chain
//!   style tick bitmap, and the [`TickDataProvider`] capability the swap
//!   loop reads ticks through.
//! - An immutable [`Pool`] that quotes exact‑in / exact‑out swaps by
//!   simulating the tick-crossing loop, returning the post-swap pool.
//! - Route search (`route::*`) producing the best multi-hop [`Trade`]s
//!   over a set of pools.
//!
//! # Examples
//!
//! ## Pure math
//! ```no_run
//! use clmm_quoter::{math::tick_math, RESOLUTION, U256};
//!
//! let sqrt_price = tick_math::get_sqrt_ratio_at_tick(0).unwrap();
//! assert_eq!(sqrt_price, U256::ONE << 96);
//! assert_eq!(RESOLUTION, 96);
//! ```
//!
//! ## Quoting a swap
//! ```no_run
//! use clmm_quoter::{
//!     math::tick_math::get_sqrt_ratio_at_tick, Address, FeeAmount, Pool, Tick, TokenAmount, U256,
//! };
//!
//! # futures::executor::block_on(async {
//! let token_a = Address::with_last_byte(1);
//! let token_b = Address::with_last_byte(2);
//! let ticks = vec![
//!     Tick::new(-887220, 1_000_000_000_000_000_000, 1_000_000_000_000_000_000).unwrap(),
//!     Tick::new(887220, 1_000_000_000_000_000_000, -1_000_000_000_000_000_000).unwrap(),
//! ];
//! let pool = Pool::with_ticks(
//!     token_a,
//!     token_b,
//!     FeeAmount::Medium,
//!     get_sqrt_ratio_at_tick(0).unwrap(),
//!     1_000_000_000_000_000_000,
//!     0,
//!     ticks,
//! )
//! .unwrap();
//!
//! let (amount_out, pool_after) = pool
//!     .get_output_amount(&TokenAmount::new(token_a, U256::from(1_000_000u64)), None)
//!     .await
//!     .unwrap();
//! println!("{} of {} (new tick {})", amount_out.amount, amount_out.token, pool_after.tick_current());
//! # });
//! ```
//!
//! ## Routing
//! ```no_run
//! use clmm_quoter::{best_trade_exact_in, Address, BestTradeOptions, Pool, TokenAmount, U256};
//!
//! # fn pools() -> Vec<Pool> { unimplemented!() }
//! # futures::executor::block_on(async {
//! let pools: Vec<Pool> = pools();
//! let amount_in = TokenAmount::new(Address::with_last_byte(1), U256::from(1_000_000u64));
//! let trades = best_trade_exact_in(
//!     &pools,
//!     &amount_in,
//!     Address::with_last_byte(3),
//!     BestTradeOptions::default(),
//! )
//! .await
//! .unwrap();
//! for trade in &trades {
//!     println!("{:?} -> {}", trade.route().path(), trade.output_amount());
//! }
//! # });
//! ```

pub use alloy_primitives::{Address, I256, U256};

pub mod error;
mod hash;
pub mod math;
pub mod pool;
pub mod route;
pub mod tick;
mod token_amount;

pub use error::Error;
pub use hash::FastMap;
pub use pool::{FeeAmount, Pool, Price};
pub use route::{BestTradeOptions, Route, Trade, TradeType, best_trade_exact_in, best_trade_exact_out};
pub use tick::{
    LensTickDataProvider, Tick, TickBitmap, TickDataProvider, TickInfo, TickLens,
    TickListDataProvider,
};
pub use token_amount::TokenAmount;

const U256_1: U256 = U256::from_limbs([1, 0, 0, 0]);

/// `type(uint160).max`
const U160_MAX: U256 = U256::from_limbs([u64::MAX, u64::MAX, u32::MAX as u64, 0]);
const U256_E6: U256 = U256::from_limbs([1000000, 0, 0, 0]);

pub const RESOLUTION: u8 = 96;
pub const Q96: U256 = U256::from_limbs([0, 4294967296, 0, 0]);
