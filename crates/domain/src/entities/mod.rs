pub mod liquidity_record;
pub mod pool;
pub mod position;
pub mod token;

// Re-export for easier access
pub use liquidity_record::LiquidityRecord;
pub use pool::{PoolQuery, PoolRecord, PoolState};
pub use position::MintParams;
pub use token::TokenDescriptor;
