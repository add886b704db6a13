use crate::error::{Error, MathError, SwapError};
use crate::math::liquidity_math::add_delta;
use crate::math::swap_math::compute_swap_step;
use crate::math::tick_math::{
    MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK, get_sqrt_ratio_at_tick,
    get_tick_at_sqrt_ratio,
};
use crate::pool::v3_pool::Pool;
use crate::tick::TickDataProvider;
use crate::U256_1;
use alloy_primitives::{I256, U256};
use tracing::{debug, trace};

#[derive(Copy, Clone, Debug)]
pub struct SwapParams {
    /// Swap direction: `true` for token0 → token1, `false` for token1 → token0.
    pub zero_for_one: bool,
    /// Signed amount being swapped. Positive means “exact in”, negative means “exact out”.
    pub amount_specified: I256,
    /// Sqrt‑price limit in Q96 that bounds how far the price is allowed to move.
    ///
    /// `None` lets the price run to just inside the global bounds.
    pub sqrt_price_limit_x96: Option<U256>,
}

impl SwapParams {
    #[inline]
    pub fn new(
        zero_for_one: bool,
        amount_specified: I256,
        sqrt_price_limit_x96: Option<U256>,
    ) -> Self {
        Self {
            zero_for_one,
            amount_specified,
            sqrt_price_limit_x96,
        }
    }
}

/// Outcome of a simulated swap.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SwapResult {
    /// Part of `amount_specified` left unfilled when the price limit was hit.
    pub amount_specified_remaining: I256,
    /// Running total on the other side: negative output for exact in,
    /// positive input (fees included) for exact out.
    pub amount_calculated: I256,
    pub amount0_delta: I256,
    pub amount1_delta: I256,
    pub sqrt_price_x96: U256,
    pub liquidity: u128,
    pub tick_current: i32,
    pub fees_paid: U256,
}

// the top level state of the swap, the results of which would be recorded in storage at the end
struct SwapState {
    // the amount remaining to be swapped in/out of the input/output asset
    amount_specified_remaining: I256,
    // the amount already swapped out/in of the output/input asset
    amount_calculated: I256,
    // current sqrt(price)
    sqrt_price_x96: U256,
    // the tick associated with the current price
    tick: i32,
    // the current liquidity in range
    liquidity: u128,
    // accumulated swap fees
    swap_fee: U256,
}

#[derive(Default)]
struct StepComputations {
    // the price at the beginning of the step
    sqrt_price_start_x96: U256,
    // the next tick to swap to from the current tick in the swap direction
    tick_next: i32,
    // whether tickNext is initialized or not
    initialized: bool,
    // sqrt(price) for the next tick (1/0)
    sqrt_price_next_x96: U256,
    // how much is being swapped in this step
    amount_in: U256,
    // how much is being swapped out
    amount_out: U256,
    // how much fee is being paid in
    fee_amount: U256,
}

/// Resolves the price limit for a direction, checking it lies strictly
/// between the current price and the global bound.
fn resolve_price_limit(
    zero_for_one: bool,
    sqrt_price_limit_x96: Option<U256>,
    sqrt_price_x96: U256,
) -> Result<U256, SwapError> {
    let limit = sqrt_price_limit_x96.unwrap_or(if zero_for_one {
        MIN_SQRT_RATIO + U256_1
    } else {
        MAX_SQRT_RATIO - U256_1
    });

    let valid = if zero_for_one {
        limit > MIN_SQRT_RATIO && limit < sqrt_price_x96
    } else {
        limit < MAX_SQRT_RATIO && limit > sqrt_price_x96
    };
    if !valid {
        return Err(SwapError::InvalidPriceLimit {
            limit,
            current: sqrt_price_x96,
        });
    }
    Ok(limit)
}

impl<P: TickDataProvider> Pool<P> {
    /// Runs the tick-crossing swap loop against this pool's state.
    ///
    /// The pool itself is left untouched; the final price, liquidity and
    /// tick come back in the [`SwapResult`]. Each iteration awaits at most
    /// one tick lookup.
    pub async fn swap(&self, params: SwapParams) -> Result<SwapResult, Error> {
        let amount_specified = params.amount_specified;
        if amount_specified.is_zero() {
            return Err(SwapError::AmountSpecifiedIsZero.into());
        }

        let zero_for_one = params.zero_for_one;
        let sqrt_price_limit_x96 = resolve_price_limit(
            zero_for_one,
            params.sqrt_price_limit_x96,
            self.sqrt_price_x96(),
        )?;

        let exact_input = amount_specified.is_positive();
        let tick_spacing = self.tick_spacing();
        let ticks = self.tick_data_provider();

        let mut state = SwapState {
            amount_specified_remaining: amount_specified,
            amount_calculated: I256::ZERO,
            sqrt_price_x96: self.sqrt_price_x96(),
            tick: self.tick_current(),
            liquidity: self.liquidity(),
            swap_fee: U256::ZERO,
        };

        while !state.amount_specified_remaining.is_zero()
            && state.sqrt_price_x96 != sqrt_price_limit_x96
        {
            let mut step = StepComputations {
                sqrt_price_start_x96: state.sqrt_price_x96,
                ..Default::default()
            };

            (step.tick_next, step.initialized) = ticks
                .next_initialized_tick_within_one_word(state.tick, zero_for_one, tick_spacing)
                .await?;

            step.tick_next = step.tick_next.clamp(MIN_TICK, MAX_TICK);

            step.sqrt_price_next_x96 = get_sqrt_ratio_at_tick(step.tick_next)?;

            let target = if zero_for_one {
                step.sqrt_price_next_x96.max(sqrt_price_limit_x96)
            } else {
                step.sqrt_price_next_x96.min(sqrt_price_limit_x96)
            };

            (
                state.sqrt_price_x96,
                step.amount_in,
                step.amount_out,
                step.fee_amount,
            ) = compute_swap_step(
                state.sqrt_price_x96,
                target,
                state.liquidity,
                state.amount_specified_remaining,
                self.fee_pips(),
            )?;

            state.swap_fee += step.fee_amount;

            if exact_input {
                state.amount_specified_remaining -=
                    I256::from_raw(step.amount_in + step.fee_amount);
                state.amount_calculated -= I256::from_raw(step.amount_out);
            } else {
                state.amount_specified_remaining += I256::from_raw(step.amount_out);
                state.amount_calculated += I256::from_raw(step.amount_in + step.fee_amount);
            }

            trace!(
                tick_next = step.tick_next,
                initialized = step.initialized,
                sqrt_price_x96 = %state.sqrt_price_x96,
                amount_in = %step.amount_in,
                amount_out = %step.amount_out,
                fee_amount = %step.fee_amount,
                "swap step"
            );

            if state.sqrt_price_x96 == step.sqrt_price_next_x96 {
                if step.initialized {
                    let mut liquidity_net = ticks.get_tick(step.tick_next).await?.liquidity_net;
                    if zero_for_one {
                        liquidity_net = liquidity_net.checked_neg().ok_or(MathError::Overflow)?;
                    }
                    state.liquidity = add_delta(state.liquidity, liquidity_net)?;
                }
                state.tick = if zero_for_one {
                    step.tick_next - 1
                } else {
                    step.tick_next
                };
            } else if state.sqrt_price_x96 != step.sqrt_price_start_x96 {
                state.tick = get_tick_at_sqrt_ratio(state.sqrt_price_x96)?;
            }
        }

        let filled = amount_specified - state.amount_specified_remaining;
        let (amount0_delta, amount1_delta) = if zero_for_one == exact_input {
            (filled, state.amount_calculated)
        } else {
            (state.amount_calculated, filled)
        };

        debug!(
            zero_for_one,
            exact_input,
            %amount0_delta,
            %amount1_delta,
            tick = state.tick,
            liquidity = state.liquidity,
            "swap simulated"
        );

        Ok(SwapResult {
            amount_specified_remaining: state.amount_specified_remaining,
            amount_calculated: state.amount_calculated,
            amount0_delta,
            amount1_delta,
            sqrt_price_x96: state.sqrt_price_x96,
            liquidity: state.liquidity,
            tick_current: state.tick,
            fees_paid: state.swap_fee,
        })
    }
}
