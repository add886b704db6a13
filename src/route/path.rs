use crate::error::RouteError;
use crate::pool::Pool;
use crate::tick::TickListDataProvider;
use alloy_primitives::Address;
use std::fmt;

#[inline]
fn same_pool<P>(a: &Pool<P>, b: &Pool<P>) -> bool {
    a.token0() == b.token0()
        && a.token1() == b.token1()
        && a.fee_pips() == b.fee_pips()
        && a.tick_spacing() == b.tick_spacing()
}

/// An ordered chain of pools leading from `input` to `output`.
pub struct Route<P = TickListDataProvider> {
    pools: Vec<Pool<P>>,
    path: Vec<Address>,
    input: Address,
    output: Address,
}

impl<P> Clone for Route<P> {
    fn clone(&self) -> Self {
        Self {
            pools: self.pools.clone(),
            path: self.path.clone(),
            input: self.input,
            output: self.output,
        }
    }
}

impl<P> fmt::Debug for Route<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .field("pools", &self.pools)
            .finish()
    }
}

impl<P> Route<P> {
    /// Checks that consecutive pools share a token, that the chain starts
    /// at `input` and ends at `output`, and that no pool appears twice.
    pub fn new(pools: Vec<Pool<P>>, input: Address, output: Address) -> Result<Self, RouteError> {
        let (Some(first), Some(last)) = (pools.first(), pools.last()) else {
            return Err(RouteError::EmptyRoute);
        };
        if !first.involves_token(input) {
            return Err(RouteError::InputMismatch(input));
        }
        if !last.involves_token(output) {
            return Err(RouteError::OutputMismatch(output));
        }

        let mut path = Vec::with_capacity(pools.len() + 1);
        path.push(input);
        let mut current = input;
        for (index, pool) in pools.iter().enumerate() {
            if pools[..index].iter().any(|seen| same_pool(seen, pool)) {
                return Err(RouteError::DuplicatePool);
            }
            current = pool
                .other_token(current)
                .map_err(|_| RouteError::Disconnected {
                    index,
                    token: current,
                })?;
            path.push(current);
        }
        if current != output {
            return Err(RouteError::OutputMismatch(output));
        }

        Ok(Self {
            pools,
            path,
            input,
            output,
        })
    }

    #[inline]
    pub fn pools(&self) -> &[Pool<P>] {
        &self.pools
    }

    /// Tokens visited in order, `input` first and `output` last.
    #[inline]
    pub fn path(&self) -> &[Address] {
        &self.path
    }

    #[inline]
    pub fn input(&self) -> Address {
        self.input
    }

    #[inline]
    pub fn output(&self) -> Address {
        self.output
    }

    #[inline]
    pub fn hops(&self) -> usize {
        self.pools.len()
    }
}
