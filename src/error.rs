use alloy_primitives::{Address, I256, U256};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("Math error - overflow")]
    Overflow,
    #[error("Math error - underflow")]
    Underflow,
    #[error("Math error - out of bounds")]
    OutOfBounds,
    #[error("Math error - division by zero")]
    DivisionByZero,
    #[error("BitMath error - zero input value")]
    ZeroValue,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("State error - sqrtPrice out of bounds")]
    SqrtPriceOutOfBounds,
    #[error("State error - sqrtPrice is 0")]
    SqrtPriceIsZero,
    #[error("State error - sqrtRatio is 0")]
    SqrtRatioIsZero,

    #[error("State error - tick out of bounds")]
    TickOutOfBounds,

    #[error("State error - liquidity is 0")]
    LiquidityIsZero,

    #[error("State error - requested amount exceeds pool reserves")]
    InsufficientReserves,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TickError {
    #[error("Tick error - tick spacing must be in [1, 16384), got {0}")]
    InvalidSpacing(i32),
    #[error("Tick error - tick {tick} is not a multiple of spacing {spacing}")]
    NotOnSpacing { tick: i32, spacing: i32 },
    #[error("Tick error - tick {0} is outside [MIN_TICK, MAX_TICK]")]
    IndexOutOfRange(i32),
    #[error("Tick error - liquidityNet of the tick set sums to {0}, expected 0")]
    NonZeroNet(I256),
    #[error("Tick error - ticks not strictly ascending ({previous} then {tick})")]
    Unsorted { previous: i32, tick: i32 },
    #[error("Tick error - tick {0} not found")]
    NotFound(i32),
    #[error("Tick error - tick data source failed: {0}")]
    Provider(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SwapError {
    #[error("Swap error - amount specified is 0")]
    AmountSpecifiedIsZero,
    #[error("Swap error - price limit {limit} is on the wrong side of the current price {current}")]
    InvalidPriceLimit { limit: U256, current: U256 },
    #[error("Swap error - insufficient liquidity to fill the requested amount")]
    InsufficientLiquidity,
    #[error("Swap error - input amount too small to produce any output")]
    InsufficientInputAmount,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Pool error - token {0} is not part of the pool")]
    InvalidToken(Address),
    #[error("Pool error - token0 and token1 are both {0}")]
    IdenticalTokens(Address),
    #[error("Pool error - fee {0} pips is not below 1e6")]
    FeeOutOfRange(u32),
    #[error("Pool error - tick {tick} does not bracket sqrt price {sqrt_price_x96}")]
    PriceTickMismatch { tick: i32, sqrt_price_x96: U256 },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Route error - route has no pools")]
    EmptyRoute,
    #[error("Route error - input token {0} is not in the first pool")]
    InputMismatch(Address),
    #[error("Route error - output token {0} is not in the last pool")]
    OutputMismatch(Address),
    #[error("Route error - pool {index} does not continue the path at {token}")]
    Disconnected { index: usize, token: Address },
    #[error("Route error - pool is used more than once")]
    DuplicatePool,
    #[error("Route error - max_hops must be positive")]
    InvalidMaxHops,
    #[error("Route error - max_num_results must be positive")]
    InvalidMaxResults,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    MathError(#[from] crate::error::MathError),

    #[error(transparent)]
    StateError(#[from] crate::error::StateError),

    #[error(transparent)]
    TickError(#[from] crate::error::TickError),

    #[error(transparent)]
    SwapError(#[from] crate::error::SwapError),

    #[error(transparent)]
    PoolError(#[from] crate::error::PoolError),

    #[error(transparent)]
    RouteError(#[from] crate::error::RouteError),
}

impl Error {
    /// Whether this failure only means "this pool cannot fill this amount".
    ///
    /// Route search skips the branch on these and aborts on everything else.
    pub fn is_insufficient_liquidity(&self) -> bool {
        matches!(
            self,
            Error::SwapError(SwapError::InsufficientLiquidity)
                | Error::SwapError(SwapError::InsufficientInputAmount)
                | Error::StateError(StateError::InsufficientReserves)
        )
    }
}
