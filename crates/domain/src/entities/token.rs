use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// ERC-20 token metadata as read from the token contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenDescriptor {
    pub address: Address,
    pub chain_id: u64,
    pub decimals: u8,
    pub symbol: String,
    pub name: String,
}

impl TokenDescriptor {
    pub fn new(
        address: Address,
        chain_id: u64,
        decimals: u8,
        symbol: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            address,
            chain_id,
            decimals,
            symbol: symbol.into(),
            name: name.into(),
        }
    }

    /// Returns true if this token sorts before `other` by address.
    #[must_use]
    pub fn sorts_before(&self, other: &TokenDescriptor) -> bool {
        self.address < other.address
    }
}
