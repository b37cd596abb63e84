//! The stable route: a StableSwap pool seen as an X/Y swap venue.

use crate::domain::{Amount, SwapDirection};
use crate::error::EngineError;
use crate::pools::StableSwapPool;
use crate::traits::SwapQuoter;

/// A [`StableSwapPool`] plus the basket indices of the X and Y assets.
///
/// # Examples
///
/// ```
/// use stable_allocator::config::StablePoolConfig;
/// use stable_allocator::domain::{Amount, Balances, FeeSchedule, Liquidity, SwapDirection};
/// use stable_allocator::pools::StableSwapPool;
/// use stable_allocator::solver::StableRoute;
/// use stable_allocator::traits::{FromConfig, SwapQuoter};
///
/// let balances = Balances::from_raw(&[1_000_000, 1_000_000]).expect("2 coins");
/// let cfg = StablePoolConfig::uniform(100, FeeSchedule::ZERO, balances, Liquidity::new(2_000_000))
///     .expect("valid config");
/// let pool = StableSwapPool::from_config(&cfg).expect("valid pool");
/// let route = StableRoute::new(&pool, 0, 1).expect("distinct indices");
///
/// assert_eq!(route.quote(SwapDirection::XToY, Amount::ZERO), Ok(Amount::ZERO));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StableRoute<'a> {
    pool: &'a StableSwapPool,
    index_x: usize,
    index_y: usize,
}

impl<'a> StableRoute<'a> {
    /// Creates a route over `pool` trading coin `index_x` against
    /// `index_y`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::SameCoin`] if the indices match.
    /// - [`EngineError::InvalidIndex`] if either is outside the basket.
    pub fn new(pool: &'a StableSwapPool, index_x: usize, index_y: usize) -> Result<Self, EngineError> {
        if index_x == index_y {
            return Err(EngineError::SameCoin { index: index_x });
        }
        let n_coins = pool.n_coins();
        for index in [index_x, index_y] {
            if index >= n_coins {
                return Err(EngineError::InvalidIndex { index, n_coins });
            }
        }
        Ok(Self {
            pool,
            index_x,
            index_y,
        })
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &'a StableSwapPool {
        self.pool
    }

    /// Basket index of the X asset.
    #[must_use]
    pub const fn index_x(&self) -> usize {
        self.index_x
    }

    /// Basket index of the Y asset.
    #[must_use]
    pub const fn index_y(&self) -> usize {
        self.index_y
    }
}

impl SwapQuoter for StableRoute<'_> {
    fn quote(&self, direction: SwapDirection, amount_in: Amount) -> Result<Amount, EngineError> {
        if amount_in.is_zero() {
            return Ok(Amount::ZERO);
        }
        match direction {
            SwapDirection::NoSwap => Ok(Amount::ZERO),
            SwapDirection::XToY => self.pool.get_dy(self.index_x, self.index_y, amount_in),
            SwapDirection::YToX => self.pool.get_dy(self.index_y, self.index_x, amount_in),
        }
    }
}
