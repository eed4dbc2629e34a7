//! Tick and liquidity math.
//!
//! - [`tick_range`]: spacing-aligned range around the current tick
//! - [`tick_math`]: tick to sqrt-ratio conversion in Q64.96, via `uniswap_v3_math`
//! - [`liquidity_amounts`]: token amounts a mint must supply for a liquidity amount

pub mod liquidity_amounts;
pub mod tick_math;
pub mod tick_range;

pub use liquidity_amounts::{MintAmounts, amounts_for_liquidity};
pub use tick_math::{MAX_TICK, MIN_TICK, sqrt_ratio_at_tick};
pub use tick_range::{RANGE_WIDTH_IN_SPACINGS, nearest_usable_tick, symmetric_range};
