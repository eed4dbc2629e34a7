use crate::entities::token::TokenDescriptor;
use crate::enums::FeeTier;
use crate::error::DomainError;
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Input to pool resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolQuery {
    pub token_a: TokenDescriptor,
    pub token_b: TokenDescriptor,
    pub fee: FeeTier,
}

impl PoolQuery {
    pub fn new(token_a: TokenDescriptor, token_b: TokenDescriptor, fee: FeeTier) -> Self {
        Self {
            token_a,
            token_b,
            fee,
        }
    }

    /// Token addresses in canonical `token0 < token1` order.
    #[must_use]
    pub fn sorted_addresses(&self) -> (Address, Address) {
        sort_addresses(self.token_a.address, self.token_b.address)
    }

    /// Human-readable pair label in caller order, e.g. `WOOX/WETH`.
    #[must_use]
    pub fn pair_label(&self) -> String {
        format!("{}/{}", self.token_a.symbol, self.token_b.symbol)
    }
}

/// A pool found by the factory for a token pair and fee tier.
///
/// `pool_address` is never the zero address: a zero lookup result means no
/// pool exists and never produces a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRecord {
    pub token_a: TokenDescriptor,
    pub token_b: TokenDescriptor,
    pub fee: FeeTier,
    pub chain_id: u64,
    pub pool_address: Address,
}

impl PoolRecord {
    /// Builds a record from a factory lookup result.
    ///
    /// Returns `None` when the factory returned the zero address.
    #[must_use]
    pub fn from_lookup(query: &PoolQuery, chain_id: u64, pool_address: Address) -> Option<Self> {
        if pool_address.is_zero() {
            return None;
        }
        Some(Self {
            token_a: query.token_a.clone(),
            token_b: query.token_b.clone(),
            fee: query.fee,
            chain_id,
            pool_address,
        })
    }

    /// Tokens in canonical `token0 < token1` order.
    #[must_use]
    pub fn sorted_tokens(&self) -> (&TokenDescriptor, &TokenDescriptor) {
        if self.token_a.sorts_before(&self.token_b) {
            (&self.token_a, &self.token_b)
        } else {
            (&self.token_b, &self.token_a)
        }
    }
}

/// Live pool state needed for position math.
///
/// Read fresh for every provisioning attempt; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    pub tick_spacing: i32,
    pub fee: u32,
    pub liquidity: u128,
    pub sqrt_price_x96: U256,
    pub tick: i32,
}

impl PoolState {
    /// Checks the state is usable for range and amount calculation in a
    /// pool of the `expected` fee tier.
    ///
    /// # Errors
    /// Returns `InvalidPoolState` for a non-positive tick spacing, a fee or
    /// spacing that disagrees with `expected`, or an uninitialized price.
    pub fn validate(&self, expected: FeeTier) -> Result<(), DomainError> {
        if self.tick_spacing <= 0 {
            return Err(DomainError::InvalidPoolState(format!(
                "tick spacing must be positive, got {}",
                self.tick_spacing
            )));
        }
        if self.fee != expected.units() {
            return Err(DomainError::InvalidPoolState(format!(
                "pool reports fee {}, expected {}",
                self.fee,
                expected.units()
            )));
        }
        if self.tick_spacing != expected.default_tick_spacing() {
            return Err(DomainError::InvalidPoolState(format!(
                "pool reports tick spacing {}, the {expected} tier uses {}",
                self.tick_spacing,
                expected.default_tick_spacing()
            )));
        }
        if self.sqrt_price_x96.is_zero() {
            return Err(DomainError::InvalidPoolState(
                "pool price is not initialized".to_string(),
            ));
        }
        Ok(())
    }
}

/// Orders two addresses ascending.
#[must_use]
pub fn sort_addresses(a: Address, b: Address) -> (Address, Address) {
    if a < b { (a, b) } else { (b, a) }
}
