//! Domain model for concentrated liquidity provisioning.
//!
//! This crate holds the value objects passed between orchestrator stages and
//! the pure computations that do not touch the network:
//! - Token, pool and position entities
//! - Tick range calculation aligned to the pool's tick spacing
//! - Mint parameter construction with slippage bounds and deadline
//! - Sqrt-ratio and liquidity-amount math

/// Entities exchanged between stages.
pub mod entities;
/// Fee tier enumeration.
pub mod enums;
/// Domain error types.
pub mod error;
/// Tick and liquidity math.
pub mod math;
/// Mint parameter builder.
pub mod mint_params;
/// Value objects.
pub mod value_objects;

pub use error::DomainError;
