use crate::enums::FeeTier;
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Parameters of the position manager `mint` call.
///
/// Tokens are in canonical `token0 < token1` order. `amount*_min` never
/// exceeds the matching `amount*_desired`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintParams {
    pub token0: Address,
    pub token1: Address,
    pub fee: FeeTier,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub amount0_desired: U256,
    pub amount1_desired: U256,
    pub amount0_min: U256,
    pub amount1_min: U256,
    pub recipient: Address,
    /// Unix seconds.
    pub deadline: u64,
}

impl MintParams {
    /// Desired amount for `token`, or `None` if it is not part of the pair.
    #[must_use]
    pub fn desired_amount(&self, token: Address) -> Option<U256> {
        if token == self.token0 {
            Some(self.amount0_desired)
        } else if token == self.token1 {
            Some(self.amount1_desired)
        } else {
            None
        }
    }
}
