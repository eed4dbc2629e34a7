//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use lpdapp_protocols::prelude::*;
//! ```

pub use crate::addresses::ContractAddresses;
pub use crate::clients::{
    ConfirmedTx, ContractClients, Erc20Client, FactoryClient, LedgerClient, LedgerEntry,
    MintReceipt, MintedPosition, PoolClient, PositionManagerClient, SaleClient, Slot0,
    TokenHoldersClient, WalletSigner,
};
pub use crate::config::ClientConfig;
pub use crate::rpc::RpcProvider;
