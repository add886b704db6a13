/// Canonical fee tiers and the tick spacing each one is deployed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeeAmount {
    /// 0.01%
    Lowest,
    /// 0.05%
    Low,
    /// 0.3%
    Medium,
    /// 1%
    High,
}

impl FeeAmount {
    /// Fee in hundredths of a basis point (1e-6).
    #[inline]
    pub const fn fee_pips(self) -> u32 {
        match self {
            FeeAmount::Lowest => 100,
            FeeAmount::Low => 500,
            FeeAmount::Medium => 3000,
            FeeAmount::High => 10_000,
        }
    }

    #[inline]
    pub const fn tick_spacing(self) -> i32 {
        match self {
            FeeAmount::Lowest => 1,
            FeeAmount::Low => 10,
            FeeAmount::Medium => 60,
            FeeAmount::High => 200,
        }
    }

    pub const fn from_fee_pips(fee_pips: u32) -> Option<Self> {
        match fee_pips {
            100 => Some(FeeAmount::Lowest),
            500 => Some(FeeAmount::Low),
            3000 => Some(FeeAmount::Medium),
            10_000 => Some(FeeAmount::High),
            _ => None,
        }
    }
}

impl From<FeeAmount> for u32 {
    fn from(fee: FeeAmount) -> Self {
        fee.fee_pips()
    }
}
