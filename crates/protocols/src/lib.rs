//! Contract clients for the liquidity provisioning flow.
//!
//! Each on-chain collaborator sits behind an async trait so the orchestrator
//! can be driven by live contracts or by test doubles:
//! - Pool factory lookup
//! - Pool state reads
//! - ERC-20 metadata, allowance and approval
//! - Position manager mint
//! - Liquidity ledger records
//! - Token sale purchases

/// Well-known contract deployments.
pub mod addresses;
/// ABI bindings.
pub mod bindings;
/// Client traits and shared result types.
pub mod clients;
/// Connection configuration.
pub mod config;
/// Token, ledger and sale contracts.
pub mod contracts;
/// Prelude module for convenient imports.
pub mod prelude;
/// JSON-RPC provider with a local signing wallet.
pub mod rpc;
/// Uniswap V3 factory, pool and position manager.
pub mod uniswap;
