pub mod amount;
pub mod slippage;
pub mod tick_range;

pub use amount::{Amount, LIQUIDITY_DECIMALS, parse_liquidity};
pub use slippage::SlippageTolerance;
pub use tick_range::TickRange;
