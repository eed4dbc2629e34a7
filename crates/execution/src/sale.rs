//! Token purchases from the fixed-price sale contract.

use crate::error::PurchaseError;
use crate::stage::{CancelToken, Stage, StageFailure, StageGuard};
use alloy_primitives::U256;
use lpdapp_protocols::clients::{ConfirmedTx, SaleClient, WalletSigner};
use std::sync::Arc;
use std::time::Duration;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

/// Price and progress of the sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleStatus {
    /// Wei per whole token.
    pub token_price: U256,
    pub tokens_sold: U256,
}

/// A confirmed purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub amount: U256,
    /// Wei paid.
    pub cost: U256,
    pub tx: ConfirmedTx,
}

/// Buys whole tokens at the sale's fixed price.
pub struct TokenPurchase {
    sale: Arc<dyn SaleClient>,
    timeout: Duration,
}

impl TokenPurchase {
    pub fn new(sale: Arc<dyn SaleClient>, timeout: Duration) -> Self {
        Self { sale, timeout }
    }

    fn read_failed(failure: StageFailure) -> PurchaseError {
        match failure {
            StageFailure::Cancelled => PurchaseError::Cancelled,
            other => PurchaseError::ReadFailed(other.to_string()),
        }
    }

    /// Reads price and sold count concurrently.
    pub async fn status(&self) -> Result<SaleStatus, PurchaseError> {
        let guard = StageGuard::new(self.timeout, CancelToken::never());
        let (token_price, tokens_sold) = guard
            .run(Stage::Purchase, async {
                tokio::try_join!(self.sale.token_price(), self.sale.tokens_sold())
            })
            .await
            .map_err(Self::read_failed)?;
        Ok(SaleStatus {
            token_price,
            tokens_sold,
        })
    }

    /// Buys `amount` whole tokens for `amount * tokenPrice` wei.
    ///
    /// # Errors
    /// `InsufficientFunds` when the wallet cannot cover the cost; nothing
    /// is submitted in that case.
    pub async fn buy(
        &self,
        wallet: &dyn WalletSigner,
        amount: U256,
        cancel: &CancelToken,
    ) -> Result<PurchaseReceipt, PurchaseError> {
        let span = info_span!("purchase", attempt = %Uuid::new_v4(), amount = %amount);
        self.run_purchase(wallet, amount, cancel)
            .instrument(span)
            .await
    }

    async fn run_purchase(
        &self,
        wallet: &dyn WalletSigner,
        amount: U256,
        cancel: &CancelToken,
    ) -> Result<PurchaseReceipt, PurchaseError> {
        if amount.is_zero() {
            return Err(PurchaseError::InvalidAmount(
                "amount must be at least one token".to_string(),
            ));
        }
        let guard = StageGuard::new(self.timeout, cancel.clone());

        // Step 1: Price the purchase
        let price = guard
            .run(Stage::Purchase, self.sale.token_price())
            .await
            .map_err(Self::read_failed)?;
        let cost = amount.checked_mul(price).ok_or_else(|| {
            PurchaseError::InvalidAmount(format!("cost of {amount} tokens overflows"))
        })?;

        // Step 2: Check the wallet covers it
        let available = guard
            .run(Stage::Purchase, wallet.native_balance())
            .await
            .map_err(Self::read_failed)?;
        if available < cost {
            return Err(PurchaseError::InsufficientFunds {
                required: cost,
                available,
            });
        }

        // Step 3: Submit and wait for confirmation
        let tx = guard
            .run(Stage::Purchase, self.sale.buy_tokens(amount, cost))
            .await
            .map_err(|failure| match failure {
                StageFailure::Cancelled => PurchaseError::Cancelled,
                other => PurchaseError::PurchaseFailed(other.to_string()),
            })?;

        info!(amount = %amount, cost = %cost, tx = %tx.hash, "Tokens purchased");
        Ok(PurchaseReceipt { amount, cost, tx })
    }
}
