use crate::TokenAmount;
use crate::error::{Error, PoolError};
use crate::math::full_math::mul_div;
use alloy_primitives::{Address, U256};

/// 2^192, the denominator of `sqrt_price_x96^2`.
const Q192: U256 = U256::from_limbs([0, 0, 0, 1]);
const Q128: U256 = U256::from_limbs([0, 0, 1, 0]);
const Q64: U256 = U256::from_limbs([0, 1, 0, 0]);

/// Exchange rate between two tokens as a fraction of raw amounts:
/// one unit of `base` buys `numerator / denominator` units of `quote`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    pub base: Address,
    pub quote: Address,
    pub numerator: U256,
    pub denominator: U256,
}

impl Price {
    pub const fn new(base: Address, quote: Address, numerator: U256, denominator: U256) -> Self {
        Self {
            base,
            quote,
            numerator,
            denominator,
        }
    }

    /// Price of token0 in token1 implied by a Q64.96 sqrt price.
    ///
    /// Above `u128::MAX` the square no longer fits in 256 bits, so the
    /// fraction is scaled down by 2^64 on both sides.
    pub fn from_sqrt_price_x96(
        token0: Address,
        token1: Address,
        sqrt_price_x96: U256,
    ) -> Result<Self, Error> {
        if sqrt_price_x96 <= U256::from(u128::MAX) {
            Ok(Self::new(token0, token1, sqrt_price_x96 * sqrt_price_x96, Q192))
        } else {
            let numerator = mul_div(sqrt_price_x96, sqrt_price_x96, Q64)?;
            Ok(Self::new(token0, token1, numerator, Q128))
        }
    }

    #[inline]
    pub fn invert(&self) -> Self {
        Self::new(self.quote, self.base, self.denominator, self.numerator)
    }

    /// Converts an amount of `base` into `quote`, rounding down.
    pub fn quote(&self, amount: &TokenAmount) -> Result<TokenAmount, Error> {
        if amount.token != self.base {
            return Err(PoolError::InvalidToken(amount.token).into());
        }
        let quoted = mul_div(amount.amount, self.numerator, self.denominator)?;
        Ok(TokenAmount::new(self.quote, quoted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Q96;
    use crate::math::tick_math::{MAX_SQRT_RATIO, get_sqrt_ratio_at_tick};

    #[test]
    fn price_at_tick_zero_is_one() {
        let a = Address::with_last_byte(1);
        let b = Address::with_last_byte(2);
        let price = Price::from_sqrt_price_x96(a, b, Q96).unwrap();

        let quoted = price.quote(&TokenAmount::new(a, U256::from(12_345u64))).unwrap();
        assert_eq!(quoted, TokenAmount::new(b, U256::from(12_345u64)));
    }

    #[test]
    fn price_at_tick_plus_100_pays_one_percent_more() {
        let a = Address::with_last_byte(1);
        let b = Address::with_last_byte(2);
        // 1.0001^100 ~= 1.01005
        let price =
            Price::from_sqrt_price_x96(a, b, get_sqrt_ratio_at_tick(100).unwrap()).unwrap();

        let quoted = price.quote(&TokenAmount::new(a, U256::from(1_000_000u64))).unwrap();
        assert_eq!(quoted.amount, U256::from(1_010_049u64));

        let back = price
            .invert()
            .quote(&TokenAmount::new(b, U256::from(1_010_050u64)))
            .unwrap();
        assert_eq!(back.token, a);
        assert_eq!(back.amount, U256::from(1_000_000u64));
    }

    #[test]
    fn large_sqrt_prices_are_scaled() {
        let a = Address::with_last_byte(1);
        let b = Address::with_last_byte(2);
        let price = Price::from_sqrt_price_x96(a, b, MAX_SQRT_RATIO).unwrap();
        assert_eq!(price.denominator, Q128);
        assert!(!price.numerator.is_zero());
    }

    #[test]
    fn quote_rejects_foreign_token() {
        let a = Address::with_last_byte(1);
        let b = Address::with_last_byte(2);
        let price = Price::from_sqrt_price_x96(a, b, Q96).unwrap();
        assert_eq!(
            price.quote(&TokenAmount::new(b, U256::from(1u64))),
            Err(Error::PoolError(PoolError::InvalidToken(b)))
        );
    }
}
