use crate::error::HistoryError;
use crate::stage::{Stage, StageGuard};
use alloy_primitives::Address;
use lpdapp_domain::entities::LiquidityRecord;
use lpdapp_protocols::clients::LedgerClient;
use std::sync::Arc;
use tracing::debug;

/// Reads the positions recorded for an account.
pub struct LiquidityHistoryReader {
    ledger: Arc<dyn LedgerClient>,
}

impl LiquidityHistoryReader {
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self { ledger }
    }

    /// Every ledger record owned by `owner`, in ledger order.
    pub async fn read(
        &self,
        owner: Address,
        guard: &StageGuard,
    ) -> Result<Vec<LiquidityRecord>, HistoryError> {
        let records = guard
            .run(Stage::History, self.ledger.get_all_liquidity(owner))
            .await?;
        debug!(owner = %owner, count = records.len(), "Liquidity history read");
        Ok(records)
    }
}
