use crate::FastMap;
use crate::error::{Error, TickError};
use crate::math::tick_bitmap::{
    check_spacing, flip_tick, get_word, next_initialized_tick_in_word, search_word,
};
use crate::tick::tick_list::validate_list;
use crate::tick::{Tick, TickDataProvider, TickInfo};
use alloy_primitives::U256;
use std::future::Future;

/// Raw pool storage reads, as exposed by the on-chain `tickBitmap` and
/// `ticks` getters.
///
/// Implement this for an RPC client or a storage cache and wrap it in a
/// [`LensTickDataProvider`] to quote against ticks fetched on demand.
pub trait TickLens: Send + Sync {
    /// The 256-bit bitmap word at `word`; zero when nothing is initialized.
    fn tick_bitmap(&self, word: i16) -> impl Future<Output = Result<U256, Error>> + Send;

    /// Liquidity stored at `index`; all zero for an uninitialized tick.
    fn ticks(&self, index: i32) -> impl Future<Output = Result<TickInfo, Error>> + Send;
}

/// Tick source that reads one bitmap word per search and one tick per
/// crossing through a [`TickLens`].
#[derive(Debug, Clone, Default)]
pub struct LensTickDataProvider<L> {
    lens: L,
}

impl<L: TickLens> LensTickDataProvider<L> {
    pub fn new(lens: L) -> Self {
        Self { lens }
    }

    pub fn lens(&self) -> &L {
        &self.lens
    }
}

impl<L: TickLens> TickDataProvider for LensTickDataProvider<L> {
    async fn get_tick(&self, index: i32) -> Result<Tick, Error> {
        let info = self.lens.ticks(index).await?;
        if info.liquidity_gross == 0 {
            return Err(TickError::NotFound(index).into());
        }
        Ok(Tick {
            index,
            liquidity_gross: info.liquidity_gross,
            liquidity_net: info.liquidity_net,
        })
    }

    async fn next_initialized_tick_within_one_word(
        &self,
        tick: i32,
        lte: bool,
        tick_spacing: i32,
    ) -> Result<(i32, bool), Error> {
        check_spacing(tick_spacing)?;
        let word = self
            .lens
            .tick_bitmap(search_word(tick, tick_spacing, lte))
            .await?;
        Ok(next_initialized_tick_in_word(word, tick, tick_spacing, lte)?)
    }
}

/// Sparse in-memory copy of a pool's `tickBitmap` and `ticks` storage.
#[derive(Debug, Clone, Default)]
pub struct TickBitmap {
    words: FastMap<i16, U256>,
    ticks: FastMap<i32, TickInfo>,
}

impl TickBitmap {
    /// Builds the bitmap for a tick list, applying the same checks as
    /// [`TickListDataProvider::new`](crate::TickListDataProvider::new).
    pub fn from_ticks(ticks: &[Tick], tick_spacing: i32) -> Result<Self, TickError> {
        validate_list(ticks, tick_spacing)?;

        let mut bitmap = Self::default();
        for tick in ticks {
            flip_tick(&mut bitmap.words, tick.index, tick_spacing)?;
            bitmap.ticks.insert(tick.index, TickInfo::from(*tick));
        }
        Ok(bitmap)
    }

    #[inline]
    pub fn word(&self, word: i16) -> U256 {
        get_word(&self.words, word)
    }

    #[inline]
    pub fn is_initialized(&self, tick: i32) -> bool {
        self.ticks.contains_key(&tick)
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}

impl TickLens for TickBitmap {
    async fn tick_bitmap(&self, word: i16) -> Result<U256, Error> {
        Ok(self.word(word))
    }

    async fn ticks(&self, index: i32) -> Result<TickInfo, Error> {
        Ok(self.ticks.get(&index).copied().unwrap_or_default())
    }
}
