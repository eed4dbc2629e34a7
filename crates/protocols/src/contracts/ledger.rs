//! Liquidity ledger client.
//!
//! The ledger stores one record per successful mint, keyed by the
//! sender of the `addLiquidity` call.

use crate::bindings::ILiquidityLedger;
use crate::clients::{ConfirmedTx, LedgerClient, LedgerEntry};
use crate::rpc::confirm;
use alloy::primitives::Address;
use alloy::providers::DynProvider;
use anyhow::{Context, Result};
use async_trait::async_trait;
use lpdapp_domain::entities::LiquidityRecord;
use tracing::info;

pub struct LiquidityLedger {
    provider: DynProvider,
    address: Address,
}

impl LiquidityLedger {
    pub fn new(provider: DynProvider, address: Address) -> Self {
        Self { provider, address }
    }
}

impl From<ILiquidityLedger::Liquidity> for LiquidityRecord {
    fn from(entry: ILiquidityLedger::Liquidity) -> Self {
        Self {
            id: entry.id,
            network: entry.network,
            owner: entry.owner,
            pool_address: entry.poolAddress,
            token_a: entry.tokenA,
            token_b: entry.tokenB,
            token_a_address: entry.tokenA_Address,
            token_b_address: entry.tokenB_Address,
            time_created: entry.timeCreated.saturating_to::<u64>(),
            transaction_hash: entry.transactionHash,
        }
    }
}

#[async_trait]
impl LedgerClient for LiquidityLedger {
    async fn add_liquidity(&self, entry: &LedgerEntry) -> Result<ConfirmedTx> {
        let ledger = ILiquidityLedger::new(self.address, self.provider.clone());
        let pending = ledger
            .addLiquidity(
                entry.token_a.clone(),
                entry.token_b.clone(),
                entry.token_a_address,
                entry.token_b_address,
                entry.pool_address,
                entry.network.clone(),
                entry.transaction_hash.clone(),
            )
            .send()
            .await
            .context("Failed to submit addLiquidity transaction")?;

        info!(
            pool = %entry.pool_address,
            mint_tx = %entry.transaction_hash,
            tx = %pending.tx_hash(),
            "Ledger record submitted"
        );
        let (tx, _) = confirm(pending, "addLiquidity").await?;
        Ok(tx)
    }

    async fn get_all_liquidity(&self, owner: Address) -> Result<Vec<LiquidityRecord>> {
        let ledger = ILiquidityLedger::new(self.address, self.provider.clone());
        let entries = ledger
            .getAllLiquidity(owner)
            .call()
            .await
            .with_context(|| format!("getAllLiquidity({owner}) failed"))?;
        Ok(entries.into_iter().map(LiquidityRecord::from).collect())
    }
}
