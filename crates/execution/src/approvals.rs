//! Token approvals for the position manager.
//!
//! Approvals run in a fixed order, token A then token B, and each one is
//! confirmed before the next starts. A token whose allowance already
//! covers the amount is skipped, so re-running the flow never submits a
//! redundant approval.

use crate::error::ProvisionError;
use crate::stage::{Stage, StageGuard};
use alloy_primitives::{Address, U256};
use lpdapp_protocols::clients::{ConfirmedTx, Erc20Client};
use std::sync::Arc;
use tracing::info;

/// What the sequencer did for one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalAction {
    /// Existing allowance covered the amount; nothing was submitted.
    AlreadySufficient { allowance: U256 },
    /// An approval for the exact amount was confirmed.
    Approved(ConfirmedTx),
}

/// Approval outcome for one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenApproval {
    pub token: Address,
    pub amount: U256,
    pub action: ApprovalAction,
}

/// Issues the ERC-20 approvals a mint needs.
pub struct ApprovalSequencer {
    erc20: Arc<dyn Erc20Client>,
}

impl ApprovalSequencer {
    pub fn new(erc20: Arc<dyn Erc20Client>) -> Self {
        Self { erc20 }
    }

    /// Ensures `spender` may move `amount` of each token on behalf of `owner`.
    ///
    /// Tokens are processed in the given order. The first failure aborts
    /// the sequence.
    pub async fn ensure(
        &self,
        owner: Address,
        spender: Address,
        requirements: &[(Address, U256)],
        guard: &StageGuard,
    ) -> Result<Vec<TokenApproval>, ProvisionError> {
        let mut approvals = Vec::with_capacity(requirements.len());
        for &(token, amount) in requirements {
            approvals.push(self.ensure_one(owner, spender, token, amount, guard).await?);
        }
        Ok(approvals)
    }

    async fn ensure_one(
        &self,
        owner: Address,
        spender: Address,
        token: Address,
        amount: U256,
        guard: &StageGuard,
    ) -> Result<TokenApproval, ProvisionError> {
        let failed = |failure| {
            ProvisionError::from_stage(Stage::Approval, failure, |cause| {
                ProvisionError::ApprovalFailed { token, cause }
            })
        };

        let allowance = guard
            .run(Stage::Approval, self.erc20.allowance(token, owner, spender))
            .await
            .map_err(failed)?;

        if allowance >= amount {
            info!(token = %token, allowance = %allowance, amount = %amount, "Allowance already sufficient");
            return Ok(TokenApproval {
                token,
                amount,
                action: ApprovalAction::AlreadySufficient { allowance },
            });
        }

        let tx = guard
            .run(Stage::Approval, self.erc20.approve(token, spender, amount))
            .await
            .map_err(failed)?;

        info!(token = %token, amount = %amount, tx = %tx.hash, "Approval confirmed");
        Ok(TokenApproval {
            token,
            amount,
            action: ApprovalAction::Approved(tx),
        })
    }
}
