use crate::TokenAmount;
use crate::error::{Error, RouteError};
use crate::pool::Pool;
use crate::route::path::Route;
use crate::route::trade::{Trade, TradeType, sorted_insert, trade_comparator};
use crate::tick::TickDataProvider;
use alloy_primitives::Address;
use futures::future::{BoxFuture, FutureExt};
use tracing::debug;

/// Bounds on a best-trade search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestTradeOptions {
    /// How many trades to keep.
    pub max_num_results: usize,
    /// Longest route, in pools.
    pub max_hops: usize,
}

impl Default for BestTradeOptions {
    fn default() -> Self {
        Self {
            max_num_results: 3,
            max_hops: 3,
        }
    }
}

impl BestTradeOptions {
    fn validate(&self) -> Result<(), RouteError> {
        if self.max_hops == 0 {
            return Err(RouteError::InvalidMaxHops);
        }
        if self.max_num_results == 0 {
            return Err(RouteError::InvalidMaxResults);
        }
        Ok(())
    }
}

struct Search<'a, P> {
    pools: &'a [Pool<P>],
    // token the walk must reach
    target: Address,
    // amount fixed by the caller
    fixed: TokenAmount,
    max_num_results: usize,
    trades: Vec<Trade<P>>,
}

impl<'a, P> Search<'a, P> {
    fn new(pools: &'a [Pool<P>], target: Address, fixed: TokenAmount, max_num_results: usize) -> Self {
        Self {
            pools,
            target,
            fixed,
            max_num_results,
            trades: Vec::with_capacity(max_num_results),
        }
    }

    fn route(&self, path: &[usize], input: Address, output: Address) -> Result<Route<P>, RouteError> {
        Route::new(
            path.iter().map(|&index| self.pools[index].clone()).collect(),
            input,
            output,
        )
    }

    fn insert(&mut self, trade: Trade<P>) {
        sorted_insert(&mut self.trades, trade, self.max_num_results, trade_comparator);
    }
}

fn without(candidates: &[usize], position: usize) -> Vec<usize> {
    candidates
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != position)
        .map(|(_, &index)| index)
        .collect()
}

/// Finds the best trades spending exactly `amount_in` to reach `token_out`.
///
/// Walks every path of at most `max_hops` distinct pools depth first. A
/// pool that cannot fill the amount only prunes its own branch; any other
/// failure aborts the search. Results are ordered by
/// [`trade_comparator`](crate::route::trade_comparator).
pub async fn best_trade_exact_in<P: TickDataProvider>(
    pools: &[Pool<P>],
    amount_in: &TokenAmount,
    token_out: Address,
    options: BestTradeOptions,
) -> Result<Vec<Trade<P>>, Error> {
    options.validate()?;
    if pools.is_empty() {
        return Ok(Vec::new());
    }

    let mut search = Search::new(pools, token_out, *amount_in, options.max_num_results);
    let candidates = (0..pools.len()).collect();
    exact_in_step(&mut search, candidates, Vec::new(), *amount_in, options.max_hops).await?;

    debug!(
        token_in = %amount_in.token,
        %token_out,
        found = search.trades.len(),
        "exact in search finished"
    );
    Ok(search.trades)
}

fn exact_in_step<'a, 'b, P: TickDataProvider>(
    search: &'b mut Search<'a, P>,
    candidates: Vec<usize>,
    path: Vec<usize>,
    amount_in: TokenAmount,
    max_hops: usize,
) -> BoxFuture<'b, Result<(), Error>>
where
    'a: 'b,
{
    async move {
        let pools = search.pools;
        for (position, &index) in candidates.iter().enumerate() {
            let pool = &pools[index];
            if !pool.involves_token(amount_in.token) {
                continue;
            }

            let amount_out = match pool.get_output_amount(&amount_in, None).await {
                Ok((amount_out, _)) => amount_out,
                Err(err) if err.is_insufficient_liquidity() => {
                    debug!(pool = index, %amount_in, error = %err, "skipping pool");
                    continue;
                }
                Err(err) => return Err(err),
            };

            let mut next_path = path.clone();
            next_path.push(index);

            if amount_out.token == search.target {
                let route = search.route(&next_path, search.fixed.token, search.target)?;
                let trade = Trade::create_unchecked_trade(
                    route,
                    search.fixed,
                    amount_out,
                    TradeType::ExactInput,
                )?;
                search.insert(trade);
            } else if max_hops > 1 && candidates.len() > 1 {
                exact_in_step(
                    &mut *search,
                    without(&candidates, position),
                    next_path,
                    amount_out,
                    max_hops - 1,
                )
                .await?;
            }
        }
        Ok(())
    }
    .boxed()
}

/// Finds the cheapest trades from `token_in` that produce exactly
/// `amount_out`.
///
/// The walk starts at the output token and works backwards, so each
/// branch extends its route at the front.
pub async fn best_trade_exact_out<P: TickDataProvider>(
    pools: &[Pool<P>],
    token_in: Address,
    amount_out: &TokenAmount,
    options: BestTradeOptions,
) -> Result<Vec<Trade<P>>, Error> {
    options.validate()?;
    if pools.is_empty() {
        return Ok(Vec::new());
    }

    let mut search = Search::new(pools, token_in, *amount_out, options.max_num_results);
    let candidates = (0..pools.len()).collect();
    exact_out_step(&mut search, candidates, Vec::new(), *amount_out, options.max_hops).await?;

    debug!(
        %token_in,
        token_out = %amount_out.token,
        found = search.trades.len(),
        "exact out search finished"
    );
    Ok(search.trades)
}

fn exact_out_step<'a, 'b, P: TickDataProvider>(
    search: &'b mut Search<'a, P>,
    candidates: Vec<usize>,
    path: Vec<usize>,
    amount_out: TokenAmount,
    max_hops: usize,
) -> BoxFuture<'b, Result<(), Error>>
where
    'a: 'b,
{
    async move {
        let pools = search.pools;
        for (position, &index) in candidates.iter().enumerate() {
            let pool = &pools[index];
            if !pool.involves_token(amount_out.token) {
                continue;
            }

            let amount_in = match pool.get_input_amount(&amount_out, None).await {
                Ok((amount_in, _)) => amount_in,
                Err(err) if err.is_insufficient_liquidity() => {
                    debug!(pool = index, %amount_out, error = %err, "skipping pool");
                    continue;
                }
                Err(err) => return Err(err),
            };

            let mut next_path = Vec::with_capacity(path.len() + 1);
            next_path.push(index);
            next_path.extend_from_slice(&path);

            if amount_in.token == search.target {
                let route = search.route(&next_path, search.target, search.fixed.token)?;
                let trade = Trade::create_unchecked_trade(
                    route,
                    amount_in,
                    search.fixed,
                    TradeType::ExactOutput,
                )?;
                search.insert(trade);
            } else if max_hops > 1 && candidates.len() > 1 {
                exact_out_step(
                    &mut *search,
                    without(&candidates, position),
                    next_path,
                    amount_in,
                    max_hops - 1,
                )
                .await?;
            }
        }
        Ok(())
    }
    .boxed()
}
