use crate::TokenAmount;
use crate::error::{Error, RouteError};
use crate::math::full_math::mul_div;
use crate::pool::Price;
use crate::route::path::Route;
use crate::tick::{TickDataProvider, TickListDataProvider};
use alloy_primitives::U256;
use std::cmp::Ordering;
use std::fmt;

const BPS: U256 = U256::from_limbs([10_000, 0, 0, 0]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TradeType {
    ExactInput,
    ExactOutput,
}

/// A simulated swap of a fixed amount along a single [`Route`].
pub struct Trade<P = TickListDataProvider> {
    route: Route<P>,
    input_amount: TokenAmount,
    output_amount: TokenAmount,
    trade_type: TradeType,
}

impl<P> Clone for Trade<P> {
    fn clone(&self) -> Self {
        Self {
            route: self.route.clone(),
            input_amount: self.input_amount,
            output_amount: self.output_amount,
            trade_type: self.trade_type,
        }
    }
}

impl<P> fmt::Debug for Trade<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trade")
            .field("trade_type", &self.trade_type)
            .field("input_amount", &self.input_amount)
            .field("output_amount", &self.output_amount)
            .field("path", &self.route.path())
            .finish()
    }
}

impl<P> Trade<P> {
    /// Wraps amounts that were already computed for `route`, only checking
    /// that their tokens match the route ends.
    pub fn create_unchecked_trade(
        route: Route<P>,
        input_amount: TokenAmount,
        output_amount: TokenAmount,
        trade_type: TradeType,
    ) -> Result<Self, RouteError> {
        if input_amount.token != route.input() {
            return Err(RouteError::InputMismatch(input_amount.token));
        }
        if output_amount.token != route.output() {
            return Err(RouteError::OutputMismatch(output_amount.token));
        }
        Ok(Self {
            route,
            input_amount,
            output_amount,
            trade_type,
        })
    }

    #[inline]
    pub fn route(&self) -> &Route<P> {
        &self.route
    }

    #[inline]
    pub fn input_amount(&self) -> TokenAmount {
        self.input_amount
    }

    #[inline]
    pub fn output_amount(&self) -> TokenAmount {
        self.output_amount
    }

    #[inline]
    pub fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    #[inline]
    pub fn hops(&self) -> usize {
        self.route.hops()
    }

    /// Average price paid: output received per unit of input.
    pub fn execution_price(&self) -> Price {
        Price::new(
            self.input_amount.token,
            self.output_amount.token,
            self.output_amount.amount,
            self.input_amount.amount,
        )
    }

    /// Least output to accept for a slippage tolerance in basis points.
    ///
    /// Exact output trades return the output unchanged.
    pub fn minimum_amount_out(&self, slippage_bps: u32) -> Result<TokenAmount, Error> {
        if self.trade_type == TradeType::ExactOutput {
            return Ok(self.output_amount);
        }
        let amount = mul_div(
            self.output_amount.amount,
            BPS,
            BPS + U256::from(slippage_bps),
        )?;
        Ok(TokenAmount::new(self.output_amount.token, amount))
    }

    /// Most input to spend for a slippage tolerance in basis points.
    ///
    /// Exact input trades return the input unchanged.
    pub fn maximum_amount_in(&self, slippage_bps: u32) -> Result<TokenAmount, Error> {
        if self.trade_type == TradeType::ExactInput {
            return Ok(self.input_amount);
        }
        let amount = mul_div(
            self.input_amount.amount,
            BPS + U256::from(slippage_bps),
            BPS,
        )?;
        Ok(TokenAmount::new(self.input_amount.token, amount))
    }
}

impl<P: TickDataProvider> Trade<P> {
    /// Simulates `amount` through every pool of `route`.
    ///
    /// Each pool is quoted from its own snapshot; a route never visits the
    /// same pool twice.
    pub async fn from_route(
        route: Route<P>,
        amount: TokenAmount,
        trade_type: TradeType,
    ) -> Result<Self, Error> {
        let (input_amount, output_amount) = match trade_type {
            TradeType::ExactInput => {
                if amount.token != route.input() {
                    return Err(RouteError::InputMismatch(amount.token).into());
                }
                let mut token_amount = amount;
                for pool in route.pools() {
                    (token_amount, _) = pool.get_output_amount(&token_amount, None).await?;
                }
                (amount, token_amount)
            }
            TradeType::ExactOutput => {
                if amount.token != route.output() {
                    return Err(RouteError::OutputMismatch(amount.token).into());
                }
                let mut token_amount = amount;
                for pool in route.pools().iter().rev() {
                    (token_amount, _) = pool.get_input_amount(&token_amount, None).await?;
                }
                (token_amount, amount)
            }
        };

        Ok(Self::create_unchecked_trade(
            route,
            input_amount,
            output_amount,
            trade_type,
        )?)
    }

    pub async fn exact_in(route: Route<P>, amount_in: TokenAmount) -> Result<Self, Error> {
        Self::from_route(route, amount_in, TradeType::ExactInput).await
    }

    pub async fn exact_out(route: Route<P>, amount_out: TokenAmount) -> Result<Self, Error> {
        Self::from_route(route, amount_out, TradeType::ExactOutput).await
    }
}

/// Ranks trades between the same tokens: more output first, then less
/// input, then fewer hops.
pub fn trade_comparator<P>(a: &Trade<P>, b: &Trade<P>) -> Ordering {
    b.output_amount
        .amount
        .cmp(&a.output_amount.amount)
        .then_with(|| a.input_amount.amount.cmp(&b.input_amount.amount))
        .then_with(|| a.hops().cmp(&b.hops()))
}

/// Inserts `item` into the already sorted `items`, keeping at most
/// `max_size` entries. Returns whichever item fell off the end, if any.
///
/// Equal items keep their insertion order.
pub fn sorted_insert<T>(
    items: &mut Vec<T>,
    item: T,
    max_size: usize,
    comparator: impl Fn(&T, &T) -> Ordering,
) -> Option<T> {
    if max_size == 0 {
        return Some(item);
    }
    if items.len() == max_size
        && items
            .last()
            .is_some_and(|last| comparator(last, &item) != Ordering::Greater)
    {
        return Some(item);
    }

    let index = items.partition_point(|existing| comparator(existing, &item) != Ordering::Greater);
    items.insert(index, item);
    if items.len() > max_size {
        items.pop()
    } else {
        None
    }
}
