use crate::bindings::{IERC20, ITokenHolders};
use crate::clients::{ConfirmedTx, Erc20Client, TokenHoldersClient};
use crate::rpc::confirm;
use alloy::primitives::{Address, U256};
use alloy::providers::DynProvider;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

/// ERC-20 client. The token address is passed per call.
pub struct Erc20 {
    provider: DynProvider,
}

impl Erc20 {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }

    fn token(&self, token: Address) -> IERC20::IERC20Instance<DynProvider> {
        IERC20::new(token, self.provider.clone())
    }
}

#[async_trait]
impl Erc20Client for Erc20 {
    async fn name(&self, token: Address) -> Result<String> {
        self.token(token)
            .name()
            .call()
            .await
            .with_context(|| format!("name() on {token} failed"))
    }

    async fn symbol(&self, token: Address) -> Result<String> {
        self.token(token)
            .symbol()
            .call()
            .await
            .with_context(|| format!("symbol() on {token} failed"))
    }

    async fn decimals(&self, token: Address) -> Result<u8> {
        self.token(token)
            .decimals()
            .call()
            .await
            .with_context(|| format!("decimals() on {token} failed"))
    }

    async fn total_supply(&self, token: Address) -> Result<U256> {
        self.token(token)
            .totalSupply()
            .call()
            .await
            .with_context(|| format!("totalSupply() on {token} failed"))
    }

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256> {
        self.token(token)
            .balanceOf(owner)
            .call()
            .await
            .with_context(|| format!("balanceOf({owner}) on {token} failed"))
    }

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256> {
        self.token(token)
            .allowance(owner, spender)
            .call()
            .await
            .with_context(|| format!("allowance({owner}, {spender}) on {token} failed"))
    }

    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<ConfirmedTx> {
        let contract = self.token(token);
        let pending = contract
            .approve(spender, amount)
            .send()
            .await
            .with_context(|| format!("Failed to submit approve on {token}"))?;

        info!(token = %token, spender = %spender, amount = %amount, tx = %pending.tx_hash(), "Approval submitted");
        let (tx, _) = confirm(pending, "approve").await?;
        Ok(tx)
    }
}

#[async_trait]
impl TokenHoldersClient for Erc20 {
    async fn holders(&self, token: Address) -> Result<Vec<Address>> {
        ITokenHolders::new(token, self.provider.clone())
            .getTokenHolders()
            .call()
            .await
            .with_context(|| format!("getTokenHolders() on {token} failed"))
    }
}
