use lpdapp_domain::DomainError;
use lpdapp_domain::mint_params::DEFAULT_DEADLINE_SECS;
use lpdapp_domain::value_objects::SlippageTolerance;
use std::time::Duration;

/// Configuration for provisioning attempts.
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    /// Slippage tolerance applied to the mint minimum amounts, in basis points.
    pub slippage_bps: u16,
    /// Seconds the mint stays valid after its parameters are built.
    pub deadline_secs: u64,
    /// Gas ceiling for the mint transaction.
    pub mint_gas_limit: u64,
    /// Upper bound on every awaited chain interaction, in seconds.
    pub stage_timeout_secs: u64,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            slippage_bps: 50, // 0.5%
            deadline_secs: DEFAULT_DEADLINE_SECS,
            mint_gas_limit: 1_000_000,
            stage_timeout_secs: 180,
        }
    }
}

impl ProvisionConfig {
    /// # Errors
    /// Returns `InvalidSlippage` above 10000 bps.
    pub fn slippage(&self) -> Result<SlippageTolerance, DomainError> {
        SlippageTolerance::from_bps(self.slippage_bps)
    }

    #[must_use]
    pub fn stage_timeout(&self) -> Duration {
        Duration::from_secs(self.stage_timeout_secs)
    }
}
