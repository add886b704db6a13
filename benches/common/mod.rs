#![allow(dead_code)]

use clmm_quoter::{Address, FeeAmount, Pool, Q96, Tick, TokenAmount, U256};

pub const ONE_ETHER: u128 = 1_000_000_000_000_000_000;

pub fn token(n: u8) -> Address {
    Address::with_last_byte(n)
}

pub fn amount(n: u8, value: u128) -> TokenAmount {
    TokenAmount::new(token(n), U256::from(value))
}

/// Full range liquidity plus a band of narrower positions around tick 0,
/// so large swaps have ticks to cross.
pub fn banded_ticks(fee: FeeAmount, bands: i32) -> Vec<Tick> {
    let spacing = fee.tick_spacing();
    let max = clmm_quoter::math::tick_math::MAX_TICK / spacing * spacing;
    let mut ticks = vec![Tick::new(-max, ONE_ETHER, ONE_ETHER as i128).unwrap()];
    for band in (1..=bands).rev() {
        ticks.push(Tick::new(-band * spacing, ONE_ETHER, ONE_ETHER as i128).unwrap());
    }
    for band in 1..=bands {
        ticks.push(Tick::new(band * spacing, ONE_ETHER, -(ONE_ETHER as i128)).unwrap());
    }
    ticks.push(Tick::new(max, ONE_ETHER, -(ONE_ETHER as i128)).unwrap());
    ticks
}

pub fn banded_pool(a: u8, b: u8, fee: FeeAmount, bands: i32) -> Pool {
    Pool::with_ticks(
        token(a),
        token(b),
        fee,
        Q96,
        (bands as u128 + 1) * ONE_ETHER,
        0,
        banded_ticks(fee, bands),
    )
    .unwrap()
}
