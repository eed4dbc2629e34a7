//! Records a confirmed mint in the liquidity ledger.
//!
//! The ledger submission is attempted exactly once per confirmed mint.

use crate::error::{ProvisionError, UnrecordedMint};
use crate::stage::{Stage, StageGuard};
use lpdapp_protocols::clients::{ConfirmedTx, LedgerClient, LedgerEntry};
use std::sync::Arc;
use tracing::{error, info};

pub struct PositionRecorder {
    ledger: Arc<dyn LedgerClient>,
}

impl PositionRecorder {
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self { ledger }
    }

    /// Builds the ledger entry for a confirmed mint, with tokens in caller order.
    #[must_use]
    pub fn ledger_entry(minted: &UnrecordedMint) -> LedgerEntry {
        let pool = &minted.pool;
        LedgerEntry {
            token_a: pool.token_a.name.clone(),
            token_b: pool.token_b.name.clone(),
            token_a_address: pool.token_a.address,
            token_b_address: pool.token_b.address,
            pool_address: pool.pool_address,
            network: pool.chain_id.to_string(),
            transaction_hash: minted.mint.tx.hash_hex(),
        }
    }

    /// Cancellation only interrupts the wait for the ledger receipt. Any
    /// ledger failure, including cancellation, is a `RecordFailed` that
    /// carries the confirmed mint.
    pub async fn record(
        &self,
        minted: UnrecordedMint,
        guard: &StageGuard,
    ) -> Result<ConfirmedTx, ProvisionError> {
        let entry = Self::ledger_entry(&minted);
        match guard
            .finish(Stage::Record, self.ledger.add_liquidity(&entry))
            .await
        {
            Ok(tx) => {
                info!(pool = %entry.pool_address, mint_tx = %entry.transaction_hash, tx = %tx.hash, "Position recorded");
                Ok(tx)
            }
            Err(failure) => {
                error!(
                    pool = %entry.pool_address,
                    mint_tx = %entry.transaction_hash,
                    error = %failure,
                    "Mint confirmed but ledger record failed"
                );
                Err(ProvisionError::RecordFailed {
                    mint: Box::new(minted),
                    cause: failure.to_string(),
                })
            }
        }
    }
}
