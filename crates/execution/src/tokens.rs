//! Token metadata and balance reads.

use crate::error::TokenReadError;
use crate::stage::{CancelToken, Stage, StageFailure, StageGuard};
use alloy_primitives::{Address, U256};
use lpdapp_domain::entities::TokenDescriptor;
use lpdapp_protocols::clients::{Erc20Client, TokenHoldersClient, WalletSigner};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Read-only view of token contracts and the wallet's balances.
pub struct TokenDirectory {
    erc20: Arc<dyn Erc20Client>,
    holders: Arc<dyn TokenHoldersClient>,
    guard: StageGuard,
}

impl TokenDirectory {
    pub fn new(
        erc20: Arc<dyn Erc20Client>,
        holders: Arc<dyn TokenHoldersClient>,
        timeout: Duration,
    ) -> Self {
        Self {
            erc20,
            holders,
            guard: StageGuard::new(timeout, CancelToken::never()),
        }
    }

    async fn read<T>(
        &self,
        token: Address,
        work: impl Future<Output = anyhow::Result<T>>,
    ) -> Result<T, TokenReadError> {
        self.guard
            .run(Stage::TokenRead, work)
            .await
            .map_err(|failure| TokenReadError::ReadFailed {
                token,
                cause: failure.to_string(),
            })
    }

    /// Reads name, symbol and decimals concurrently, stamped with the
    /// wallet's chain id.
    pub async fn describe(
        &self,
        wallet: &dyn WalletSigner,
        token: Address,
    ) -> Result<TokenDescriptor, TokenReadError> {
        let chain_id = self
            .guard
            .run(Stage::TokenRead, wallet.chain_id())
            .await
            .map_err(|failure: StageFailure| TokenReadError::WalletFailed(failure.to_string()))?;

        let (name, symbol, decimals) = self
            .read(token, async {
                tokio::try_join!(
                    self.erc20.name(token),
                    self.erc20.symbol(token),
                    self.erc20.decimals(token),
                )
            })
            .await?;

        debug!(token = %token, symbol = %symbol, decimals, chain_id, "Token described");
        Ok(TokenDescriptor::new(token, chain_id, decimals, symbol, name))
    }

    pub async fn balance(&self, token: Address, owner: Address) -> Result<U256, TokenReadError> {
        self.read(token, self.erc20.balance_of(token, owner)).await
    }

    pub async fn total_supply(&self, token: Address) -> Result<U256, TokenReadError> {
        self.read(token, self.erc20.total_supply(token)).await
    }

    /// Every holder the token contract reports.
    pub async fn holders(&self, token: Address) -> Result<Vec<Address>, TokenReadError> {
        self.read(token, self.holders.holders(token)).await
    }

    /// Native currency balance of the wallet's account.
    pub async fn native_balance(&self, wallet: &dyn WalletSigner) -> Result<U256, TokenReadError> {
        self.guard
            .run(Stage::TokenRead, wallet.native_balance())
            .await
            .map_err(|failure| TokenReadError::WalletFailed(failure.to_string()))
    }
}
