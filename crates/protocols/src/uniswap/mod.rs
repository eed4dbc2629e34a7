//! Uniswap V3 contract clients.

pub mod factory;
pub mod pool_reader;
pub mod position_manager;

pub use factory::UniswapFactory;
pub use pool_reader::PoolReader;
pub use position_manager::PositionManager;
