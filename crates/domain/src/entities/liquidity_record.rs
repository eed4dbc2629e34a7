use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// A provisioning event stored by the liquidity ledger contract.
///
/// Created once per successful mint and never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityRecord {
    pub id: U256,
    /// Chain id the mint happened on, as recorded by the ledger.
    pub network: String,
    pub owner: Address,
    pub pool_address: Address,
    /// Token A name.
    pub token_a: String,
    /// Token B name.
    pub token_b: String,
    pub token_a_address: Address,
    pub token_b_address: Address,
    /// Block timestamp of the record, Unix seconds.
    pub time_created: u64,
    pub transaction_hash: String,
}

impl LiquidityRecord {
    /// Pair label in recorded order, e.g. `Woox/Wrapped Ether`.
    #[must_use]
    pub fn pair_label(&self) -> String {
        format!("{}/{}", self.token_a, self.token_b)
    }
}
