//! Typed failures of the provisioning, history, token and sale flows.
//!
//! Contract clients fail with opaque transport errors. Every stage
//! translates those into one of the kinds below, so callers never see a
//! raw transport error.

use crate::stage::{Stage, StageFailure};
use alloy_primitives::{Address, TxHash, U256};
use lpdapp_domain::DomainError;
use lpdapp_domain::entities::{MintParams, PoolRecord};
use lpdapp_domain::enums::FeeTier;
use lpdapp_protocols::clients::MintReceipt;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// A confirmed mint that the ledger did not record.
#[derive(Debug, Clone)]
pub struct UnrecordedMint {
    pub attempt_id: Uuid,
    pub pool: PoolRecord,
    pub params: MintParams,
    pub mint: MintReceipt,
}

impl fmt::Display for UnrecordedMint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mint {}", self.mint.tx.hash)
    }
}

/// Failure kinds of a provisioning attempt, one per notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    InvalidRequest,
    PoolNotFound,
    ResolutionFailed,
    StateReadFailed,
    InvalidPoolState,
    ApprovalFailed,
    MintFailed,
    MintUnconfirmed,
    RecordFailed,
    Cancelled,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Errors of a provisioning attempt. The flow stops at the first one.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Rejected before any contract call.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The factory has no pool for the pair and fee. An expected outcome.
    #[error("no pool exists for {pair} at the {fee} fee tier")]
    PoolNotFound { pair: String, fee: FeeTier },

    #[error("pool resolution failed: {0}")]
    ResolutionFailed(String),

    #[error("pool state read failed: {0}")]
    StateReadFailed(String),

    #[error(transparent)]
    InvalidPoolState(DomainError),

    #[error("approval of token {token} failed: {cause}")]
    ApprovalFailed { token: Address, cause: String },

    #[error("mint failed: {0}")]
    MintFailed(String),

    /// The mint was broadcast but its receipt never arrived.
    #[error("mint {tx} submitted but not confirmed: {cause}")]
    MintUnconfirmed { tx: TxHash, cause: String },

    /// The mint is final on-chain; only the ledger record is missing.
    #[error("{mint} confirmed but the ledger record failed: {cause}")]
    RecordFailed {
        mint: Box<UnrecordedMint>,
        cause: String,
    },

    #[error("provisioning cancelled during {0}")]
    Cancelled(Stage),
}

impl ProvisionError {
    /// Maps a guarded stage failure, keeping cancellation distinct.
    pub(crate) fn from_stage(
        stage: Stage,
        failure: StageFailure,
        otherwise: impl FnOnce(String) -> Self,
    ) -> Self {
        match failure {
            StageFailure::Cancelled => Self::Cancelled(stage),
            other => otherwise(other.to_string()),
        }
    }

    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidRequest(_) => FailureKind::InvalidRequest,
            Self::PoolNotFound { .. } => FailureKind::PoolNotFound,
            Self::ResolutionFailed(_) => FailureKind::ResolutionFailed,
            Self::StateReadFailed(_) => FailureKind::StateReadFailed,
            Self::InvalidPoolState(_) => FailureKind::InvalidPoolState,
            Self::ApprovalFailed { .. } => FailureKind::ApprovalFailed,
            Self::MintFailed(_) => FailureKind::MintFailed,
            Self::MintUnconfirmed { .. } => FailureKind::MintUnconfirmed,
            Self::RecordFailed { .. } => FailureKind::RecordFailed,
            Self::Cancelled(_) => FailureKind::Cancelled,
        }
    }

    /// Transient RPC failures after which re-running the whole flow is safe.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            FailureKind::ResolutionFailed | FailureKind::StateReadFailed
        )
    }

    /// The confirmed mint, if the failure happened after it.
    #[must_use]
    pub fn mint_confirmed(&self) -> Option<&UnrecordedMint> {
        match self {
            Self::RecordFailed { mint, .. } => Some(mint),
            _ => None,
        }
    }

    /// Message shown to the user for this failure.
    #[must_use]
    pub fn notification(&self) -> String {
        match self {
            Self::InvalidRequest(reason) => format!("Request rejected: {reason}."),
            Self::PoolNotFound { pair, fee } => {
                format!("No {pair} pool exists at the {fee} fee tier.")
            }
            Self::ResolutionFailed(_) => {
                "Could not look up the pool. Check the connection and try again.".to_string()
            }
            Self::StateReadFailed(_) => {
                "Could not read the pool state. Check the connection and try again.".to_string()
            }
            Self::InvalidPoolState(_) => {
                "The pool reported an unusable state. No liquidity was added.".to_string()
            }
            Self::ApprovalFailed { token, .. } => {
                format!("Approval of token {token} failed. No liquidity was added.")
            }
            Self::MintFailed(_) => "Adding liquidity failed. No position was created.".to_string(),
            Self::MintUnconfirmed { tx, .. } => format!(
                "Transaction {tx} to add liquidity was sent, but its outcome is unknown. Check it before trying again."
            ),
            Self::RecordFailed { mint, .. } => format!(
                "Liquidity was added in transaction {}, but recording it in the ledger failed. Your funds are in the position.",
                mint.mint.tx.hash
            ),
            Self::Cancelled(stage) => {
                format!("Provisioning was cancelled during {stage}. No position was created.")
            }
        }
    }
}

/// Errors reading the liquidity ledger.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("liquidity history read failed: {0}")]
    ReadFailed(String),

    #[error("liquidity history read cancelled")]
    Cancelled,
}

impl From<StageFailure> for HistoryError {
    fn from(failure: StageFailure) -> Self {
        match failure {
            StageFailure::Cancelled => Self::Cancelled,
            other => Self::ReadFailed(other.to_string()),
        }
    }
}

/// Errors reading token metadata and balances.
#[derive(Debug, Error)]
pub enum TokenReadError {
    #[error("reading token {token} failed: {cause}")]
    ReadFailed { token: Address, cause: String },

    #[error("reading the wallet failed: {0}")]
    WalletFailed(String),
}

/// Errors of the token sale flow.
#[derive(Debug, Error)]
pub enum PurchaseError {
    #[error("invalid purchase amount: {0}")]
    InvalidAmount(String),

    #[error("sale read failed: {0}")]
    ReadFailed(String),

    #[error("insufficient funds: {required} wei required, {available} wei available")]
    InsufficientFunds { required: U256, available: U256 },

    #[error("purchase failed: {0}")]
    PurchaseFailed(String),

    #[error("purchase cancelled")]
    Cancelled,
}
