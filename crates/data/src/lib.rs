//! Local persistence for the provisioning flow.
//!
//! Holds the pool discovery history: an append-only log of every pool
//! a provisioning attempt has used.

/// Pool discovery log.
pub mod discovery;

pub use discovery::{DiscoveryLog, FileDiscoveryLog, MemoryDiscoveryLog, StoreError};
