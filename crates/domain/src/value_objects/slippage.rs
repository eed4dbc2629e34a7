use crate::error::DomainError;
use alloy_primitives::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const BPS_DENOMINATOR: u16 = 10_000;

/// Accepted price movement between quote and execution, in basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlippageTolerance(u16);

impl SlippageTolerance {
    /// # Errors
    /// Returns `InvalidSlippage` above 10000 bps.
    pub fn from_bps(bps: u16) -> Result<Self, DomainError> {
        if bps > BPS_DENOMINATOR {
            return Err(DomainError::InvalidSlippage(bps));
        }
        Ok(Self(bps))
    }

    /// Zero tolerance: minimum amounts equal desired amounts.
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn bps(self) -> u16 {
        self.0
    }

    /// Tolerance as a percentage, e.g. `0.5` for 50 bps.
    #[must_use]
    pub fn as_percent(self) -> Decimal {
        Decimal::from(self.0) / Decimal::from(100)
    }

    /// `desired * (1 - tolerance)`, rounded down.
    #[must_use]
    pub fn minimum_of(self, desired: U256) -> U256 {
        let denominator = U256::from(BPS_DENOMINATOR);
        let kept = U256::from(BPS_DENOMINATOR - self.0);
        // Split to keep the product within 256 bits.
        (desired / denominator) * kept + (desired % denominator) * kept / denominator
    }
}
