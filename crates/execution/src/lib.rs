//! Liquidity provisioning orchestration.
//!
//! This crate sequences the on-chain steps of adding concentrated
//! liquidity to a pool:
//! - Pool resolution through the factory
//! - Concurrent pool state reads
//! - Idempotent token approvals
//! - Mint submission and confirmation
//! - Discovery log and ledger recording
//!
//! It also provides the ledger history reader, token reads and the
//! token sale purchase flow. Every awaited chain interaction runs under
//! a stage timeout and a cooperative cancellation token.

/// Prelude module for convenient imports.
pub mod prelude;

/// Token approvals.
pub mod approvals;
/// Provisioning configuration.
pub mod config;
/// Typed failures.
pub mod error;
/// Ledger history reads.
pub mod history;
/// Mint submission.
pub mod mint;
/// The provisioning orchestrator.
pub mod provisioner;
/// Mint recording.
pub mod recorder;
/// Pool resolution.
pub mod resolver;
/// Token sale purchases.
pub mod sale;
/// Stage timeouts and cancellation.
pub mod stage;
/// Pool state reads.
pub mod state_reader;
/// Token metadata and balances.
pub mod tokens;
