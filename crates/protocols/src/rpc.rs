//! JSON-RPC provider with a local signing wallet.

use crate::addresses::ContractAddresses;
use crate::clients::{ConfirmedTx, ContractClients, WalletSigner};
use crate::config::ClientConfig;
use crate::contracts::{Erc20, LiquidityLedger, TokenSale};
use crate::uniswap::{PoolReader, PositionManager, UniswapFactory};
use alloy::network::{Ethereum, EthereumWallet};
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionReceipt;
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest::Url;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Provider bound to the signing wallet.
#[derive(Clone)]
pub struct RpcProvider {
    provider: DynProvider,
    account: Address,
}

impl RpcProvider {
    /// Connects to the configured endpoint with the configured key.
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let signer: PrivateKeySigner = config
            .private_key
            .trim()
            .parse()
            .context("Invalid wallet private key")?;
        let account = signer.address();
        let url: Url = config
            .rpc_url
            .parse()
            .with_context(|| format!("Invalid RPC URL: {}", config.rpc_url))?;

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(url)
            .erased();

        info!(account = %account, rpc = %config.rpc_url, "Connected RPC provider");
        Ok(Self { provider, account })
    }

    /// Underlying provider.
    #[must_use]
    pub fn inner(&self) -> &DynProvider {
        &self.provider
    }

    /// Builds every contract client against this provider.
    #[must_use]
    pub fn contract_clients(&self, addresses: &ContractAddresses) -> ContractClients {
        let provider = self.provider.clone();
        ContractClients {
            wallet: Arc::new(self.clone()),
            factory: Arc::new(UniswapFactory::new(provider.clone(), addresses.factory)),
            pools: Arc::new(PoolReader::new(provider.clone())),
            erc20: Arc::new(Erc20::new(provider.clone())),
            holders: Arc::new(Erc20::new(provider.clone())),
            position_manager: Arc::new(PositionManager::new(
                provider.clone(),
                addresses.position_manager,
            )),
            ledger: Arc::new(LiquidityLedger::new(provider.clone(), addresses.ledger)),
            sale: Arc::new(TokenSale::new(provider, addresses.sale)),
        }
    }
}

#[async_trait]
impl WalletSigner for RpcProvider {
    fn address(&self) -> Address {
        self.account
    }

    async fn chain_id(&self) -> Result<u64> {
        self.provider
            .get_chain_id()
            .await
            .context("Failed to fetch chain id")
    }

    async fn native_balance(&self) -> Result<U256> {
        self.provider
            .get_balance(self.account)
            .await
            .context("Failed to fetch native balance")
    }
}

/// Waits for a submitted transaction and rejects reverted receipts.
pub(crate) async fn confirm(
    pending: PendingTransactionBuilder<Ethereum>,
    what: &str,
) -> Result<(ConfirmedTx, TransactionReceipt)> {
    let hash = *pending.tx_hash();
    debug!(tx = %hash, "Waiting for {what} receipt");

    let receipt = pending
        .get_receipt()
        .await
        .with_context(|| format!("{what} transaction {hash:#x} was not confirmed"))?;

    if !receipt.status() {
        bail!("{what} transaction {hash:#x} reverted");
    }

    let tx = ConfirmedTx::from(&receipt);
    info!(tx = %hash, gas_used = tx.gas_used, "{what} confirmed");
    Ok((tx, receipt))
}
