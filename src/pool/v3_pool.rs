use crate::TokenAmount;
use crate::error::{Error, MathError, PoolError, StateError, SwapError};
use crate::math::tick_bitmap::check_spacing;
use crate::math::tick_math::{
    MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK, get_sqrt_ratio_at_tick,
};
use crate::pool::fee::FeeAmount;
use crate::pool::price::Price;
use crate::pool::swap::SwapParams;
use crate::tick::{Tick, TickDataProvider, TickListDataProvider};
use alloy_primitives::{Address, I256, U160, U256};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Converts an `Address` into its `U160` numeric representation.
#[inline(always)]
pub fn address_to_u160(address: Address) -> U160 {
    address.into()
}

/// Returns the token pair sorted by numeric address, as used by Uniswap V3.
pub fn sort_tokens(token_a: Address, token_b: Address) -> (Address, Address) {
    if address_to_u160(token_a) < address_to_u160(token_b) {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    }
}

/// Exact-in amounts become a positive `amountSpecified`, so they have to
/// fit in 255 bits.
#[inline]
fn to_signed(amount: U256) -> Result<I256, MathError> {
    if amount.bit(255) {
        return Err(MathError::Overflow);
    }
    Ok(I256::from_raw(amount))
}

/// Immutable snapshot of a concentrated-liquidity pool.
///
/// Quoting never mutates a pool: [`Pool::get_output_amount`] and
/// [`Pool::get_input_amount`] return the post-swap state as a new `Pool`
/// sharing the same tick source.
pub struct Pool<P = TickListDataProvider> {
    token0: Address,
    token1: Address,
    fee_pips: u32,
    tick_spacing: i32,
    sqrt_price_x96: U256,
    liquidity: u128,
    tick_current: i32,
    ticks: Arc<P>,
    token0_price: OnceLock<Price>,
}

impl<P> Clone for Pool<P> {
    fn clone(&self) -> Self {
        Self {
            token0: self.token0,
            token1: self.token1,
            fee_pips: self.fee_pips,
            tick_spacing: self.tick_spacing,
            sqrt_price_x96: self.sqrt_price_x96,
            liquidity: self.liquidity,
            tick_current: self.tick_current,
            ticks: Arc::clone(&self.ticks),
            token0_price: self.token0_price.clone(),
        }
    }
}

impl<P> fmt::Debug for Pool<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("token0", &self.token0)
            .field("token1", &self.token1)
            .field("fee_pips", &self.fee_pips)
            .field("tick_spacing", &self.tick_spacing)
            .field("sqrt_price_x96", &self.sqrt_price_x96)
            .field("liquidity", &self.liquidity)
            .field("tick_current", &self.tick_current)
            .finish_non_exhaustive()
    }
}

impl Pool<TickListDataProvider> {
    /// Builds a pool on one of the canonical fee tiers from a tick list.
    pub fn with_ticks(
        token_a: Address,
        token_b: Address,
        fee: FeeAmount,
        sqrt_price_x96: U256,
        liquidity: u128,
        tick_current: i32,
        ticks: Vec<Tick>,
    ) -> Result<Self, Error> {
        let provider = TickListDataProvider::new(ticks, fee.tick_spacing())?;
        Self::new(
            token_a,
            token_b,
            fee.fee_pips(),
            fee.tick_spacing(),
            sqrt_price_x96,
            liquidity,
            tick_current,
            provider,
        )
    }
}

impl<P> Pool<P> {
    /// Creates a pool, sorting the tokens by address.
    ///
    /// `tick_current` must bracket the price:
    /// `sqrt_ratio(tick_current) <= sqrt_price_x96 <= sqrt_ratio(tick_current + 1)`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        token_a: Address,
        token_b: Address,
        fee_pips: u32,
        tick_spacing: i32,
        sqrt_price_x96: U256,
        liquidity: u128,
        tick_current: i32,
        ticks: P,
    ) -> Result<Self, Error> {
        Self::from_shared(
            token_a,
            token_b,
            fee_pips,
            tick_spacing,
            sqrt_price_x96,
            liquidity,
            tick_current,
            Arc::new(ticks),
        )
    }

    /// Same as [`Pool::new`] for a tick source already shared with other pools.
    #[allow(clippy::too_many_arguments)]
    pub fn from_shared(
        token_a: Address,
        token_b: Address,
        fee_pips: u32,
        tick_spacing: i32,
        sqrt_price_x96: U256,
        liquidity: u128,
        tick_current: i32,
        ticks: Arc<P>,
    ) -> Result<Self, Error> {
        if token_a == token_b {
            return Err(PoolError::IdenticalTokens(token_a).into());
        }
        if fee_pips >= 1_000_000 {
            return Err(PoolError::FeeOutOfRange(fee_pips).into());
        }
        check_spacing(tick_spacing)?;
        if !(MIN_TICK..=MAX_TICK).contains(&tick_current) {
            return Err(StateError::TickOutOfBounds.into());
        }
        if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 >= MAX_SQRT_RATIO {
            return Err(StateError::SqrtPriceOutOfBounds.into());
        }

        let lower = get_sqrt_ratio_at_tick(tick_current)?;
        let upper = get_sqrt_ratio_at_tick((tick_current + 1).min(MAX_TICK))?;
        if sqrt_price_x96 < lower || sqrt_price_x96 > upper {
            return Err(PoolError::PriceTickMismatch {
                tick: tick_current,
                sqrt_price_x96,
            }
            .into());
        }

        let (token0, token1) = sort_tokens(token_a, token_b);
        Ok(Self {
            token0,
            token1,
            fee_pips,
            tick_spacing,
            sqrt_price_x96,
            liquidity,
            tick_current,
            ticks,
            token0_price: OnceLock::new(),
        })
    }

    /// A copy of this pool moved to a new price, sharing the tick source.
    pub(crate) fn with_state(&self, sqrt_price_x96: U256, liquidity: u128, tick_current: i32) -> Self {
        Self {
            sqrt_price_x96,
            liquidity,
            tick_current,
            token0_price: OnceLock::new(),
            ..self.clone()
        }
    }

    #[inline]
    pub fn token0(&self) -> Address {
        self.token0
    }

    #[inline]
    pub fn token1(&self) -> Address {
        self.token1
    }

    #[inline]
    pub fn fee_pips(&self) -> u32 {
        self.fee_pips
    }

    #[inline]
    pub fn tick_spacing(&self) -> i32 {
        self.tick_spacing
    }

    #[inline]
    pub fn sqrt_price_x96(&self) -> U256 {
        self.sqrt_price_x96
    }

    #[inline]
    pub fn liquidity(&self) -> u128 {
        self.liquidity
    }

    #[inline]
    pub fn tick_current(&self) -> i32 {
        self.tick_current
    }

    #[inline]
    pub fn tick_data_provider(&self) -> &P {
        &self.ticks
    }

    #[inline]
    pub fn involves_token(&self, token: Address) -> bool {
        token == self.token0 || token == self.token1
    }

    /// The token on the other side of the pool from `token`.
    pub fn other_token(&self, token: Address) -> Result<Address, PoolError> {
        if token == self.token0 {
            Ok(self.token1)
        } else if token == self.token1 {
            Ok(self.token0)
        } else {
            Err(PoolError::InvalidToken(token))
        }
    }

    /// Current price of token0 in token1, computed once per pool value.
    pub fn token0_price(&self) -> Result<Price, Error> {
        if let Some(price) = self.token0_price.get() {
            return Ok(*price);
        }
        let price = Price::from_sqrt_price_x96(self.token0, self.token1, self.sqrt_price_x96)?;
        Ok(*self.token0_price.get_or_init(|| price))
    }

    /// Current price of token1 in token0.
    pub fn token1_price(&self) -> Result<Price, Error> {
        Ok(self.token0_price()?.invert())
    }

    /// Current price of `token` in terms of the other pool token.
    pub fn price_of(&self, token: Address) -> Result<Price, Error> {
        if token == self.token0 {
            self.token0_price()
        } else if token == self.token1 {
            self.token1_price()
        } else {
            Err(PoolError::InvalidToken(token).into())
        }
    }
}

impl<P: TickDataProvider> Pool<P> {
    /// Quotes an exact-input swap of `input_amount`.
    ///
    /// Returns the output amount and the pool as it would be after the
    /// swap. Without a price limit, running out of liquidity before the
    /// whole input is spent fails with `SwapError::InsufficientLiquidity`;
    /// with a limit the swap stops there and quotes the partial fill.
    pub async fn get_output_amount(
        &self,
        input_amount: &TokenAmount,
        sqrt_price_limit_x96: Option<U256>,
    ) -> Result<(TokenAmount, Self), Error> {
        if !self.involves_token(input_amount.token) {
            return Err(PoolError::InvalidToken(input_amount.token).into());
        }
        if input_amount.is_zero() {
            return Err(SwapError::InsufficientInputAmount.into());
        }

        let zero_for_one = input_amount.token == self.token0;
        let result = self
            .swap(SwapParams::new(
                zero_for_one,
                to_signed(input_amount.amount)?,
                sqrt_price_limit_x96,
            ))
            .await?;

        if !result.amount_specified_remaining.is_zero() && sqrt_price_limit_x96.is_none() {
            return Err(SwapError::InsufficientLiquidity.into());
        }

        let output_amount = result.amount_calculated.unsigned_abs();
        if output_amount.is_zero() {
            return Err(SwapError::InsufficientInputAmount.into());
        }

        let output_token = if zero_for_one { self.token1 } else { self.token0 };
        Ok((
            TokenAmount::new(output_token, output_amount),
            self.with_state(result.sqrt_price_x96, result.liquidity, result.tick_current),
        ))
    }

    /// Quotes an exact-output swap producing `output_amount`.
    ///
    /// Returns the input amount required and the post-swap pool, with the
    /// same price limit semantics as [`Pool::get_output_amount`].
    pub async fn get_input_amount(
        &self,
        output_amount: &TokenAmount,
        sqrt_price_limit_x96: Option<U256>,
    ) -> Result<(TokenAmount, Self), Error> {
        if !self.involves_token(output_amount.token) {
            return Err(PoolError::InvalidToken(output_amount.token).into());
        }
        if output_amount.is_zero() {
            return Err(SwapError::InsufficientInputAmount.into());
        }

        let zero_for_one = output_amount.token == self.token1;
        let result = self
            .swap(SwapParams::new(
                zero_for_one,
                -to_signed(output_amount.amount)?,
                sqrt_price_limit_x96,
            ))
            .await?;

        if !result.amount_specified_remaining.is_zero() && sqrt_price_limit_x96.is_none() {
            return Err(SwapError::InsufficientLiquidity.into());
        }

        let input_token = if zero_for_one { self.token0 } else { self.token1 };
        Ok((
            TokenAmount::new(input_token, result.amount_calculated.unsigned_abs()),
            self.with_state(result.sqrt_price_x96, result.liquidity, result.tick_current),
        ))
    }
}
