use crate::bindings::ITokenSale;
use crate::clients::{ConfirmedTx, SaleClient};
use crate::rpc::confirm;
use alloy::primitives::{Address, U256};
use alloy::providers::DynProvider;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

/// Fixed-price token sale client.
pub struct TokenSale {
    provider: DynProvider,
    address: Address,
}

impl TokenSale {
    pub fn new(provider: DynProvider, address: Address) -> Self {
        Self { provider, address }
    }

    fn contract(&self) -> ITokenSale::ITokenSaleInstance<DynProvider> {
        ITokenSale::new(self.address, self.provider.clone())
    }
}

#[async_trait]
impl SaleClient for TokenSale {
    async fn token_price(&self) -> Result<U256> {
        self.contract()
            .tokenPrice()
            .call()
            .await
            .context("tokenPrice() failed")
    }

    async fn tokens_sold(&self) -> Result<U256> {
        self.contract()
            .tokenSold()
            .call()
            .await
            .context("tokenSold() failed")
    }

    async fn buy_tokens(&self, amount: U256, value: U256) -> Result<ConfirmedTx> {
        let sale = self.contract();
        let pending = sale
            .buyTokens(amount)
            .value(value)
            .send()
            .await
            .context("Failed to submit buyTokens transaction")?;

        info!(amount = %amount, value = %value, tx = %pending.tx_hash(), "Purchase submitted");
        let (tx, _) = confirm(pending, "buyTokens").await?;
        Ok(tx)
    }
}
