use crate::error::ProvisionError;
use crate::stage::{Stage, StageFailure, StageGuard};
use lpdapp_domain::entities::MintParams;
use lpdapp_protocols::clients::{MintReceipt, PositionManagerClient};
use std::sync::Arc;
use tracing::{info, warn};

/// Submits the position manager mint and waits for confirmation.
pub struct MintExecutor {
    position_manager: Arc<dyn PositionManagerClient>,
    gas_limit: u64,
}

impl MintExecutor {
    pub fn new(position_manager: Arc<dyn PositionManagerClient>, gas_limit: u64) -> Self {
        Self {
            position_manager,
            gas_limit,
        }
    }

    /// A failed broadcast or a reverted receipt yields `MintFailed`.
    ///
    /// Once the transaction is broadcast, a timeout or cancellation while
    /// waiting for its receipt yields `MintUnconfirmed` with the hash.
    pub async fn execute(
        &self,
        params: &MintParams,
        guard: &StageGuard,
    ) -> Result<MintReceipt, ProvisionError> {
        // Step 1: Broadcast
        let tx = guard
            .run(
                Stage::Mint,
                self.position_manager.submit_mint(params, self.gas_limit),
            )
            .await
            .map_err(|failure| {
                ProvisionError::from_stage(Stage::Mint, failure, ProvisionError::MintFailed)
            })?;

        // Step 2: Wait for the receipt
        let receipt = guard
            .run(Stage::Mint, self.position_manager.confirm_mint(tx))
            .await
            .map_err(|failure| match failure {
                StageFailure::Failed(e) => ProvisionError::MintFailed(format!("{e:#}")),
                interrupted => {
                    warn!(tx = %tx, cause = %interrupted, "Mint outcome unknown");
                    ProvisionError::MintUnconfirmed {
                        tx,
                        cause: interrupted.to_string(),
                    }
                }
            })?;

        match receipt.position {
            Some(position) => info!(
                tx = %receipt.tx.hash,
                token_id = %position.token_id,
                liquidity = position.liquidity,
                amount0 = %position.amount0,
                amount1 = %position.amount1,
                "Position minted"
            ),
            None => info!(tx = %receipt.tx.hash, "Mint confirmed"),
        }
        Ok(receipt)
    }
}
