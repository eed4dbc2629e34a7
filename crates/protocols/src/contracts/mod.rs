//! Clients for the token, ledger and sale contracts.

pub mod erc20;
pub mod ledger;
pub mod sale;

pub use erc20::Erc20;
pub use ledger::LiquidityLedger;
pub use sale::TokenSale;
