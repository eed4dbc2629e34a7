//! Position manager client.
//!
//! Mints a new concentrated liquidity position and decodes the
//! `IncreaseLiquidity` event emitted by the mint.

use crate::bindings::INonfungiblePositionManager::{self, IncreaseLiquidity};
use crate::clients::{MintReceipt, MintedPosition, PositionManagerClient};
use crate::rpc::confirm;
use alloy::primitives::aliases::{I24, U24};
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider};
use alloy::rpc::types::TransactionReceipt;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use lpdapp_domain::entities::MintParams;
use tracing::{info, warn};

/// Client for the nonfungible position manager.
pub struct PositionManager {
    provider: DynProvider,
    address: Address,
}

impl PositionManager {
    pub fn new(provider: DynProvider, address: Address) -> Self {
        Self { provider, address }
    }
}

/// Converts mint parameters into the ABI struct.
pub fn to_abi_params(params: &MintParams) -> Result<INonfungiblePositionManager::MintParams> {
    let tick = |value: i32| {
        I24::try_from(value).map_err(|_| anyhow!("tick {value} does not fit in int24"))
    };

    Ok(INonfungiblePositionManager::MintParams {
        token0: params.token0,
        token1: params.token1,
        fee: U24::from(params.fee.units()),
        tickLower: tick(params.tick_lower)?,
        tickUpper: tick(params.tick_upper)?,
        amount0Desired: params.amount0_desired,
        amount1Desired: params.amount1_desired,
        amount0Min: params.amount0_min,
        amount1Min: params.amount1_min,
        recipient: params.recipient,
        deadline: U256::from(params.deadline),
    })
}

/// Finds the position minted by `manager` in a receipt.
pub fn minted_position(receipt: &TransactionReceipt, manager: Address) -> Option<MintedPosition> {
    receipt
        .inner
        .logs()
        .iter()
        .filter(|log| log.address() == manager)
        .find_map(|log| log.log_decode::<IncreaseLiquidity>().ok())
        .map(|log| {
            let event = log.inner.data;
            MintedPosition {
                token_id: event.tokenId,
                liquidity: event.liquidity,
                amount0: event.amount0,
                amount1: event.amount1,
            }
        })
}

#[async_trait]
impl PositionManagerClient for PositionManager {
    fn address(&self) -> Address {
        self.address
    }

    async fn submit_mint(&self, params: &MintParams, gas_limit: u64) -> Result<TxHash> {
        let abi_params = to_abi_params(params)?;
        let manager = INonfungiblePositionManager::new(self.address, self.provider.clone());

        let pending = manager
            .mint(abi_params)
            .gas(gas_limit)
            .send()
            .await
            .context("Failed to submit mint transaction")?;

        info!(
            tx = %pending.tx_hash(),
            token0 = %params.token0,
            token1 = %params.token1,
            tick_lower = params.tick_lower,
            tick_upper = params.tick_upper,
            "Mint submitted"
        );
        Ok(*pending.tx_hash())
    }

    async fn confirm_mint(&self, tx: TxHash) -> Result<MintReceipt> {
        // Step 1: Wait for a successful receipt
        let pending = PendingTransactionBuilder::new(self.provider.root().clone(), tx);
        let (tx, receipt) = confirm(pending, "mint").await?;

        // Step 2: Decode the new position
        let position = minted_position(&receipt, self.address);
        if position.is_none() {
            warn!(tx = %tx.hash, "Mint receipt carried no IncreaseLiquidity event");
        }

        Ok(MintReceipt { tx, position })
    }
}
