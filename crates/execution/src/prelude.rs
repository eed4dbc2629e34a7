//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use lpdapp_execution::prelude::*;
//! ```

pub use crate::approvals::{ApprovalAction, ApprovalSequencer, TokenApproval};
pub use crate::config::ProvisionConfig;
pub use crate::error::{
    FailureKind, HistoryError, ProvisionError, PurchaseError, TokenReadError, UnrecordedMint,
};
pub use crate::history::LiquidityHistoryReader;
pub use crate::mint::MintExecutor;
pub use crate::provisioner::{LiquidityProvisioner, ProvisionReceipt, ProvisionRequest};
pub use crate::recorder::PositionRecorder;
pub use crate::resolver::{PoolResolver, Resolution};
pub use crate::sale::{PurchaseReceipt, SaleStatus, TokenPurchase};
pub use crate::stage::{CancelHandle, CancelToken, Stage, StageFailure, StageGuard};
pub use crate::state_reader::PoolStateReader;
pub use crate::tokens::TokenDirectory;
