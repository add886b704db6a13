use clmm_quoter::math::tick_math::get_sqrt_ratio_at_tick;
use clmm_quoter::{
    Address, BestTradeOptions, Error, FeeAmount, LensTickDataProvider, Pool, Q96, Tick,
    TickBitmap, TokenAmount, Trade, TradeType, U256, best_trade_exact_in, best_trade_exact_out,
    error::SwapError,
};
use futures::executor::block_on;
use proptest::prelude::*;

const ONE_ETHER: u128 = 1_000_000_000_000_000_000;

fn token(n: u8) -> Address {
    Address::with_last_byte(n)
}

fn amount(n: u8, value: u128) -> TokenAmount {
    TokenAmount::new(token(n), U256::from(value))
}

fn full_range_ticks() -> Vec<Tick> {
    vec![
        Tick::new(-887_220, ONE_ETHER, ONE_ETHER as i128).unwrap(),
        Tick::new(887_220, ONE_ETHER, -(ONE_ETHER as i128)).unwrap(),
    ]
}

fn example_pool(a: u8, b: u8) -> Pool {
    Pool::with_ticks(
        token(a),
        token(b),
        FeeAmount::Medium,
        Q96,
        ONE_ETHER,
        0,
        full_range_ticks(),
    )
    .unwrap()
}

/// Full range plus a stack of positions closing every 60 ticks below zero.
fn stepped_ticks() -> Vec<Tick> {
    let mut ticks = vec![Tick::new(-887_220, ONE_ETHER, ONE_ETHER as i128).unwrap()];
    for step in (1..=10).rev() {
        ticks.push(Tick::new(-60 * step, ONE_ETHER, ONE_ETHER as i128).unwrap());
    }
    ticks.push(Tick::new(60, 10 * ONE_ETHER, -10 * ONE_ETHER as i128).unwrap());
    ticks.push(Tick::new(887_220, ONE_ETHER, -(ONE_ETHER as i128)).unwrap());
    ticks
}

#[test]
fn example_pool_quotes_both_ways() {
    let pool = example_pool(1, 2);

    let (out, after) = block_on(pool.get_output_amount(&amount(1, 1_000_000), None)).unwrap();
    assert_eq!(out, amount(2, 996_999));
    assert_eq!(after.tick_current(), -1);
    assert!(after.sqrt_price_x96() < pool.sqrt_price_x96());
    assert_eq!(after.liquidity(), ONE_ETHER);
    // the original snapshot is untouched
    assert_eq!(pool.sqrt_price_x96(), Q96);

    let (input, _) = block_on(pool.get_input_amount(&amount(2, 996_999), None)).unwrap();
    assert_eq!(input, amount(1, 1_000_000));
}

#[test]
fn chained_quotes_continue_from_the_new_pool() {
    // 1% of the liquidity, large enough for the impact to survive rounding
    let input = amount(1, ONE_ETHER / 100);
    let pool = example_pool(1, 2);
    let (first_out, first) = block_on(pool.get_output_amount(&input, None)).unwrap();
    let (second_out, second) = block_on(first.get_output_amount(&input, None)).unwrap();

    // worse price after the first trade
    assert!(second_out.amount < first_out.amount);
    assert!(first.sqrt_price_x96() < pool.sqrt_price_x96());
    assert!(second.sqrt_price_x96() < first.sqrt_price_x96());
    assert!(second.tick_current() < first.tick_current());
}

#[test]
fn single_pool_errors_are_surfaced() {
    let pool = example_pool(1, 2);
    assert_eq!(
        block_on(pool.get_output_amount(&amount(1, 0), None)).unwrap_err(),
        Error::SwapError(SwapError::InsufficientInputAmount)
    );

    let empty = Pool::with_ticks(token(1), token(2), FeeAmount::Medium, Q96, 0, 0, vec![]).unwrap();
    assert_eq!(
        block_on(empty.get_output_amount(&amount(1, 1_000), None)).unwrap_err(),
        Error::SwapError(SwapError::InsufficientLiquidity)
    );
}

#[test]
fn lens_and_list_providers_quote_identically() {
    let ticks = stepped_ticks();
    let list_pool = Pool::with_ticks(
        token(1),
        token(2),
        FeeAmount::Medium,
        Q96,
        11 * ONE_ETHER,
        0,
        ticks.clone(),
    )
    .unwrap();
    let lens_pool = Pool::new(
        token(1),
        token(2),
        3000,
        60,
        Q96,
        11 * ONE_ETHER,
        0,
        LensTickDataProvider::new(TickBitmap::from_ticks(&ticks, 60).unwrap()),
    )
    .unwrap();

    for value in [1_000u128, ONE_ETHER / 100, ONE_ETHER, 20 * ONE_ETHER] {
        for n in [1u8, 2] {
            let input = amount(n, value);
            let (list_out, list_after) =
                block_on(list_pool.get_output_amount(&input, None)).unwrap();
            let (lens_out, lens_after) =
                block_on(lens_pool.get_output_amount(&input, None)).unwrap();
            assert_eq!(list_out, lens_out);
            assert_eq!(list_after.tick_current(), lens_after.tick_current());
            assert_eq!(list_after.liquidity(), lens_after.liquidity());
        }
    }
}

#[test]
fn route_search_over_a_triangle() {
    let pools = vec![example_pool(1, 2), example_pool(2, 3), example_pool(1, 3)];
    let options = BestTradeOptions {
        max_num_results: 3,
        max_hops: 2,
    };

    let trades = block_on(best_trade_exact_in(&pools, &amount(1, 1_000_000), token(3), options))
        .unwrap();
    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].hops(), 1);
    assert_eq!(trades[0].output_amount(), amount(3, 996_999));
    assert_eq!(trades[1].hops(), 2);
    assert!(trades[0].output_amount().amount > trades[1].output_amount().amount);

    let trades = block_on(best_trade_exact_out(&pools, token(1), &amount(3, 996_999), options))
        .unwrap();
    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].input_amount(), amount(1, 1_000_000));
    assert_eq!(trades[0].trade_type(), TradeType::ExactOutput);
}

#[test]
fn best_trade_slippage_bounds() {
    let pools = vec![example_pool(1, 2)];
    let trades = block_on(best_trade_exact_in(
        &pools,
        &amount(1, 1_000_000),
        token(2),
        BestTradeOptions::default(),
    ))
    .unwrap();
    let best: &Trade = &trades[0];

    // 996_999 / 1.005
    assert_eq!(best.minimum_amount_out(50).unwrap(), amount(2, 992_038));
    assert_eq!(best.maximum_amount_in(50).unwrap(), amount(1, 1_000_000));
    let price = best.execution_price();
    assert_eq!(price.quote(&amount(1, 1_000_000)).unwrap(), amount(2, 996_999));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn requoting_the_output_never_costs_more(value in 1_000u128..1_000_000_000_000_000_000, zero_for_one in any::<bool>(), tick in -600i32..600) {
        let ticks = stepped_ticks();
        let liquidity = ticks
            .iter()
            .filter(|t| t.index <= tick)
            .map(|t| t.liquidity_net)
            .sum::<i128>() as u128;
        let pool = Pool::with_ticks(
            token(1),
            token(2),
            FeeAmount::Medium,
            get_sqrt_ratio_at_tick(tick).unwrap(),
            liquidity,
            tick,
            ticks,
        )
        .unwrap();

        let (token_in, token_out) = if zero_for_one { (1, 2) } else { (2, 1) };
        let input = amount(token_in, value);
        let (out, _) = block_on(pool.get_output_amount(&input, None)).unwrap();
        prop_assert_eq!(out.token, token(token_out));

        let (required, _) = block_on(pool.get_input_amount(&out, None)).unwrap();
        prop_assert_eq!(required.token, token(token_in));
        prop_assert!(required.amount <= input.amount);

        let (replayed, _) = block_on(pool.get_output_amount(&required, None)).unwrap();
        prop_assert!(replayed.amount >= out.amount);
    }
}
