use crate::U256_E6;
use crate::error::Error;
use crate::math::full_math::{mul_div, mul_div_rounding_up};
use crate::math::sqrt_price_math::{
    get_amount_0_delta, get_amount_1_delta, get_next_sqrt_price_from_input,
    get_next_sqrt_price_from_output,
};
use alloy_primitives::{I256, U256};

/// Computes one swap step inside a single initialized-tick range.
///
/// The direction is inferred from the prices (`current >= target` means
/// token0 in), the mode from the sign of `amount_remaining` (non‑negative
/// is exact input). Returns `(sqrt_ratio_next, amount_in, amount_out,
/// fee_amount)`.
///
/// For exact input the fee is taken off the remaining amount before the
/// price moves, and on a partial final step whatever is left over after
/// `amount_in` becomes the fee, so `amount_in + fee_amount` never exceeds
/// `amount_remaining`. For exact output `amount_out` never exceeds
/// `-amount_remaining`.
pub fn compute_swap_step(
    sqrt_ratio_current_x96: U256,
    sqrt_ratio_target_x96: U256,
    liquidity: u128,
    amount_remaining: I256,
    fee_pips: u32,
) -> Result<(U256, U256, U256, U256), Error> {
    let zero_for_one = sqrt_ratio_current_x96 >= sqrt_ratio_target_x96;
    let exact_in = !amount_remaining.is_negative();
    let fee = U256::from(fee_pips);

    let mut amount_in = U256::ZERO;
    let mut amount_out = U256::ZERO;

    let sqrt_ratio_next_x96 = if exact_in {
        let amount_remaining_less_fee =
            mul_div(amount_remaining.into_raw(), U256_E6 - fee, U256_E6)?;

        amount_in = if zero_for_one {
            get_amount_0_delta(sqrt_ratio_target_x96, sqrt_ratio_current_x96, liquidity, true)?
        } else {
            get_amount_1_delta(sqrt_ratio_current_x96, sqrt_ratio_target_x96, liquidity, true)?
        };

        if amount_remaining_less_fee >= amount_in {
            sqrt_ratio_target_x96
        } else {
            get_next_sqrt_price_from_input(
                sqrt_ratio_current_x96,
                liquidity,
                amount_remaining_less_fee,
                zero_for_one,
            )?
        }
    } else {
        amount_out = if zero_for_one {
            get_amount_1_delta(sqrt_ratio_target_x96, sqrt_ratio_current_x96, liquidity, false)?
        } else {
            get_amount_0_delta(sqrt_ratio_current_x96, sqrt_ratio_target_x96, liquidity, false)?
        };

        if amount_remaining.unsigned_abs() >= amount_out {
            sqrt_ratio_target_x96
        } else {
            get_next_sqrt_price_from_output(
                sqrt_ratio_current_x96,
                liquidity,
                amount_remaining.unsigned_abs(),
                zero_for_one,
            )?
        }
    };

    let max = sqrt_ratio_target_x96 == sqrt_ratio_next_x96;

    // recompute at the final price, reusing the estimate only when it was
    // computed for this exact price in the matching mode
    if zero_for_one {
        if !(max && exact_in) {
            amount_in =
                get_amount_0_delta(sqrt_ratio_next_x96, sqrt_ratio_current_x96, liquidity, true)?;
        }
        if !(max && !exact_in) {
            amount_out =
                get_amount_1_delta(sqrt_ratio_next_x96, sqrt_ratio_current_x96, liquidity, false)?;
        }
    } else {
        if !(max && exact_in) {
            amount_in =
                get_amount_1_delta(sqrt_ratio_current_x96, sqrt_ratio_next_x96, liquidity, true)?;
        }
        if !(max && !exact_in) {
            amount_out =
                get_amount_0_delta(sqrt_ratio_current_x96, sqrt_ratio_next_x96, liquidity, false)?;
        }
    }

    // cap the output amount to not exceed the remaining output amount
    if !exact_in && amount_out > amount_remaining.unsigned_abs() {
        amount_out = amount_remaining.unsigned_abs();
    }

    let fee_amount = if exact_in && sqrt_ratio_next_x96 != sqrt_ratio_target_x96 {
        // we didn't reach the target, so take the remainder of the maximum input as fee
        amount_remaining.into_raw() - amount_in
    } else {
        mul_div_rounding_up(amount_in, fee, U256_E6 - fee)?
    };

    Ok((sqrt_ratio_next_x96, amount_in, amount_out, fee_amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MathError, StateError};
    use crate::math::sqrt_price_math::get_next_sqrt_price_from_input;
    use crate::math::tick_math::{MAX_SQRT_RATIO, MIN_SQRT_RATIO};
    use proptest::prelude::*;
    use std::str::FromStr;

    fn u(s: &str) -> U256 {
        U256::from_str(s).unwrap()
    }

    fn signed(s: &str) -> I256 {
        I256::from_raw(u(s))
    }

    // sqrt(101/100) * 2^96 and sqrt(1000/100) * 2^96
    const PRICE_1: &str = "79228162514264337593543950336";
    const PRICE_101_100: &str = "79623317895830914510639640423";
    const PRICE_1000_100: &str = "250541448375047931186413801569";

    #[test]
    fn exact_in_capped_at_price_target_one_for_zero() {
        let price = u(PRICE_1);
        let target = u(PRICE_101_100);
        let liquidity = 2e18 as u128;
        let amount = signed("1000000000000000000");

        let (next, amount_in, amount_out, fee) =
            compute_swap_step(price, target, liquidity, amount, 600).unwrap();

        assert_eq!(amount_in, u("9975124224178055"));
        assert_eq!(fee, u("5988667735148"));
        assert_eq!(amount_out, u("9925619580021728"));
        assert!(amount_in + fee < amount.into_raw(), "entire amount is not used");

        let price_after_whole_input =
            get_next_sqrt_price_from_input(price, liquidity, amount.into_raw(), false).unwrap();
        assert_eq!(next, target, "price is capped at price target");
        assert!(next < price_after_whole_input, "price is less than price after whole input amount");
    }

    #[test]
    fn exact_out_capped_at_price_target_one_for_zero() {
        let price = u(PRICE_1);
        let target = u(PRICE_101_100);
        let liquidity = 2e18 as u128;
        let amount = -signed("1000000000000000000");

        let (next, amount_in, amount_out, fee) =
            compute_swap_step(price, target, liquidity, amount, 600).unwrap();

        assert_eq!(amount_in, u("9975124224178055"));
        assert_eq!(fee, u("5988667735148"));
        assert_eq!(amount_out, u("9925619580021728"));
        assert!(amount_out < amount.unsigned_abs(), "entire amount out is not returned");
        assert_eq!(next, target, "price is capped at price target");
    }

    #[test]
    fn exact_in_fully_spent_one_for_zero() {
        let price = u(PRICE_1);
        let target = u(PRICE_1000_100);
        let liquidity = 2e18 as u128;
        let amount = signed("1000000000000000000");

        let (next, amount_in, amount_out, fee) =
            compute_swap_step(price, target, liquidity, amount, 600).unwrap();

        assert_eq!(amount_in, u("999400000000000000"));
        assert_eq!(fee, u("600000000000000"));
        assert_eq!(amount_out, u("666399946655997866"));
        assert_eq!(amount_in + fee, amount.into_raw(), "entire amount is used");

        let price_after_input_less_fee =
            get_next_sqrt_price_from_input(price, liquidity, amount.into_raw() - fee, false)
                .unwrap();
        assert!(next < target, "price does not reach price target");
        assert_eq!(next, price_after_input_less_fee);
    }

    #[test]
    fn exact_out_fully_received_one_for_zero() {
        let price = u(PRICE_1);
        let target = u(PRICE_1000_100);
        let liquidity = 2e18 as u128;
        let amount = -signed("1000000000000000000");

        let (next, amount_in, amount_out, fee) =
            compute_swap_step(price, target, liquidity, amount, 600).unwrap();

        assert_eq!(amount_in, u("2000000000000000000"));
        assert_eq!(fee, u("1200720432259356"));
        assert_eq!(amount_out, amount.unsigned_abs());
        assert!(next < target, "price does not reach price target");
    }

    #[test]
    fn amount_out_is_capped_at_desired_amount_out() {
        let (next, amount_in, amount_out, fee) = compute_swap_step(
            u("417332158212080721273783715441582"),
            u("1452870262520218020823638996"),
            159344665391607089467575320103,
            -signed("1"),
            1,
        )
        .unwrap();

        assert_eq!(amount_in, u("1"));
        assert_eq!(fee, u("1"));
        assert_eq!(amount_out, u("1"));
        assert_eq!(next, u("417332158212080721273783715441581"));
    }

    #[test]
    fn target_price_of_one_uses_partial_input_amount() {
        let (next, amount_in, amount_out, fee) = compute_swap_step(
            u("2"),
            u("1"),
            1,
            signed("3915081100057732413702495386755767"),
            1,
        )
        .unwrap();

        assert_eq!(amount_in, u("39614081257132168796771975168"));
        assert_eq!(fee, u("39614120871253040049813"));
        assert!(amount_in + fee <= u("3915081100057732413702495386755767"));
        assert_eq!(amount_out, U256::ZERO);
        assert_eq!(next, u("1"));
    }

    #[test]
    fn entire_input_amount_taken_as_fee() {
        let (next, amount_in, amount_out, fee) = compute_swap_step(
            u("2413"),
            u("79887613182836312"),
            1985041575832132834610021537970,
            signed("10"),
            1872,
        )
        .unwrap();

        assert_eq!(amount_in, U256::ZERO);
        assert_eq!(fee, u("10"));
        assert_eq!(amount_out, U256::ZERO);
        assert_eq!(next, u("2413"));
    }

    #[test]
    fn zero_liquidity_moves_straight_to_target() {
        let price = u(PRICE_1);
        let target = u(PRICE_101_100);
        let (next, amount_in, amount_out, fee) =
            compute_swap_step(price, target, 0, signed("1000"), 3000).unwrap();

        assert_eq!(next, target);
        assert_eq!(amount_in, U256::ZERO);
        assert_eq!(amount_out, U256::ZERO);
        assert_eq!(fee, U256::ZERO);
    }

    fn sqrt_price() -> impl Strategy<Value = U256> {
        (any::<u64>(), any::<u64>(), 0u64..(1u64 << 32)).prop_filter_map(
            "inside [MIN_SQRT_RATIO, MAX_SQRT_RATIO)",
            |(l0, l1, l2)| {
                let p = U256::from_limbs([l0, l1, l2, 0]);
                (p >= MIN_SQRT_RATIO && p < MAX_SQRT_RATIO).then_some(p)
            },
        )
    }

    proptest! {
        #[test]
        fn exact_in_never_spends_more_than_remaining(
            current in sqrt_price(),
            target in sqrt_price(),
            liquidity in 1u128..,
            amount in 1u128..,
            fee_pips in 0u32..1_000_000,
        ) {
            let remaining = U256::from(amount);
            match compute_swap_step(
                current,
                target,
                liquidity,
                I256::from_raw(remaining),
                fee_pips,
            ) {
                Ok((next, amount_in, _, fee)) => {
                    prop_assert!(amount_in + fee <= remaining);
                    if current >= target {
                        prop_assert!(next <= current && next >= target);
                    } else {
                        prop_assert!(next >= current && next <= target);
                    }
                }
                // only a 256-bit overflow in the amount math can stop a valid step
                Err(err) => prop_assert_eq!(err, Error::MathError(MathError::Overflow)),
            }
        }

        #[test]
        fn exact_out_never_returns_more_than_requested(
            current in sqrt_price(),
            target in sqrt_price(),
            liquidity in 1u128..,
            amount in 1u128..,
            fee_pips in 0u32..1_000_000,
        ) {
            let requested = U256::from(amount);
            match compute_swap_step(
                current,
                target,
                liquidity,
                -I256::from_raw(requested),
                fee_pips,
            ) {
                Ok((_, _, amount_out, _)) => prop_assert!(amount_out <= requested),
                Err(err) => prop_assert!(
                    matches!(
                        err,
                        Error::MathError(MathError::Overflow)
                            | Error::StateError(StateError::InsufficientReserves)
                    ),
                    "unexpected error {:?}",
                    err
                ),
            }
        }
    }
}
