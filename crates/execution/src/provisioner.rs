//! Liquidity provisioning orchestrator.
//!
//! Sequences the stages of one provisioning attempt:
//! pool resolution, state read, range and parameter computation,
//! approvals, mint and recording. The flow stops at the first failure
//! and reports it as a typed [`ProvisionError`].

use crate::approvals::{ApprovalSequencer, TokenApproval};
use crate::config::ProvisionConfig;
use crate::error::{ProvisionError, UnrecordedMint};
use crate::mint::MintExecutor;
use crate::recorder::PositionRecorder;
use crate::resolver::{PoolResolver, Resolution};
use crate::stage::{CancelToken, Stage, StageGuard};
use crate::state_reader::PoolStateReader;
use alloy_primitives::{Address, U256};
use chrono::Utc;
use lpdapp_data::DiscoveryLog;
use lpdapp_domain::entities::{MintParams, PoolQuery, PoolRecord, PoolState, TokenDescriptor};
use lpdapp_domain::enums::FeeTier;
use lpdapp_domain::math::symmetric_range;
use lpdapp_domain::mint_params::{MintRequest, build_mint_params};
use lpdapp_domain::value_objects::{SlippageTolerance, TickRange, parse_liquidity};
use lpdapp_protocols::clients::{ConfirmedTx, ContractClients, MintReceipt, WalletSigner};
use std::sync::Arc;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

/// A user request to add liquidity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionRequest {
    pub token_a: TokenDescriptor,
    pub token_b: TokenDescriptor,
    pub fee: FeeTier,
    /// Desired liquidity as a decimal string, scaled by 1e18.
    pub liquidity: String,
}

impl ProvisionRequest {
    #[must_use]
    pub fn query(&self) -> PoolQuery {
        PoolQuery::new(self.token_a.clone(), self.token_b.clone(), self.fee)
    }
}

/// Everything a successful attempt produced.
#[derive(Debug, Clone)]
pub struct ProvisionReceipt {
    pub attempt_id: Uuid,
    pub pool: PoolRecord,
    pub state: PoolState,
    pub range: TickRange,
    pub params: MintParams,
    pub approvals: Vec<TokenApproval>,
    pub mint: MintReceipt,
    pub ledger_tx: ConfirmedTx,
}

/// Checked request ready for the chain stages.
struct ValidatedRequest {
    query: PoolQuery,
    liquidity: u128,
    slippage: SlippageTolerance,
}

/// Runs provisioning attempts against one set of contract clients.
pub struct LiquidityProvisioner {
    resolver: PoolResolver,
    reader: PoolStateReader,
    approvals: ApprovalSequencer,
    minter: MintExecutor,
    recorder: PositionRecorder,
    spender: Address,
    config: ProvisionConfig,
}

impl LiquidityProvisioner {
    pub fn new(
        clients: &ContractClients,
        discoveries: Arc<dyn DiscoveryLog>,
        config: ProvisionConfig,
    ) -> Self {
        Self {
            resolver: PoolResolver::new(clients.factory.clone(), discoveries),
            reader: PoolStateReader::new(clients.pools.clone()),
            approvals: ApprovalSequencer::new(clients.erc20.clone()),
            minter: MintExecutor::new(clients.position_manager.clone(), config.mint_gas_limit),
            recorder: PositionRecorder::new(clients.ledger.clone()),
            spender: clients.position_manager.address(),
            config,
        }
    }

    /// The resolver, for standalone pool queries.
    #[must_use]
    pub fn resolver(&self) -> &PoolResolver {
        &self.resolver
    }

    #[must_use]
    pub fn config(&self) -> &ProvisionConfig {
        &self.config
    }

    /// Runs one provisioning attempt for `wallet`.
    ///
    /// # Errors
    /// Returns the first stage failure. A `RecordFailed` means the mint
    /// itself is confirmed on-chain.
    pub async fn provision(
        &self,
        wallet: &dyn WalletSigner,
        request: &ProvisionRequest,
        cancel: &CancelToken,
    ) -> Result<ProvisionReceipt, ProvisionError> {
        let attempt_id = Uuid::new_v4();
        let span = info_span!(
            "provision",
            attempt = %attempt_id,
            pair = %request.query().pair_label(),
            fee = %request.fee
        );
        self.run_attempt(attempt_id, wallet, request, cancel)
            .instrument(span)
            .await
    }

    async fn run_attempt(
        &self,
        attempt_id: Uuid,
        wallet: &dyn WalletSigner,
        request: &ProvisionRequest,
        cancel: &CancelToken,
    ) -> Result<ProvisionReceipt, ProvisionError> {
        let guard = StageGuard::new(self.config.stage_timeout(), cancel.clone());
        let owner = wallet.address();
        info!(owner = %owner, liquidity = %request.liquidity, "Starting provisioning attempt");

        // Step 1: Validate the request before any contract call
        let validated = self.validate(request)?;
        let chain_id = guard
            .run(Stage::Validation, wallet.chain_id())
            .await
            .map_err(|failure| {
                ProvisionError::from_stage(
                    Stage::Validation,
                    failure,
                    ProvisionError::ResolutionFailed,
                )
            })?;
        for token in [&request.token_a, &request.token_b] {
            if token.chain_id != chain_id {
                return Err(ProvisionError::InvalidRequest(format!(
                    "token {} is on chain {}, wallet is on chain {chain_id}",
                    token.symbol, token.chain_id
                )));
            }
        }

        // Step 2: Resolve the pool
        let pool = match self
            .resolver
            .resolve(&validated.query, chain_id, &guard)
            .await?
        {
            Resolution::Found(pool) => pool,
            Resolution::NotFound => {
                return Err(ProvisionError::PoolNotFound {
                    pair: validated.query.pair_label(),
                    fee: validated.query.fee,
                });
            }
        };

        // Step 3: Read live pool state
        let state = self.reader.read(&pool, &guard).await?;

        // Step 4: Range and mint parameters
        let range =
            symmetric_range(state.tick, state.tick_spacing).map_err(ProvisionError::InvalidPoolState)?;
        let now = u64::try_from(Utc::now().timestamp()).map_err(|_| {
            ProvisionError::InvalidRequest("system clock is before the Unix epoch".to_string())
        })?;
        let params = build_mint_params(&MintRequest {
            pool: &pool,
            state: &state,
            range,
            liquidity: validated.liquidity,
            recipient: owner,
            now,
            slippage: validated.slippage,
            deadline_secs: self.config.deadline_secs,
        })
        .map_err(ProvisionError::InvalidPoolState)?;

        info!(
            pool = %pool.pool_address,
            tick = state.tick,
            range = %range,
            in_range = range.contains(state.tick),
            amount0 = %params.amount0_desired,
            amount1 = %params.amount1_desired,
            "Mint parameters built"
        );

        // Step 5: Approvals, token A then token B
        let requirements = [
            (
                pool.token_a.address,
                params.desired_amount(pool.token_a.address).unwrap_or(U256::ZERO),
            ),
            (
                pool.token_b.address,
                params.desired_amount(pool.token_b.address).unwrap_or(U256::ZERO),
            ),
        ];
        let approvals = self
            .approvals
            .ensure(owner, self.spender, &requirements, &guard)
            .await?;

        // Step 6: Mint
        let mint = self.minter.execute(&params, &guard).await?;

        // Step 7: Record
        let minted = UnrecordedMint {
            attempt_id,
            pool,
            params,
            mint,
        };
        let ledger_tx = self.recorder.record(minted.clone(), &guard).await?;

        info!(mint_tx = %minted.mint.tx.hash, ledger_tx = %ledger_tx.hash, "Provisioning complete");
        Ok(ProvisionReceipt {
            attempt_id,
            pool: minted.pool,
            state,
            range,
            params: minted.params,
            approvals,
            mint: minted.mint,
            ledger_tx,
        })
    }

    fn validate(&self, request: &ProvisionRequest) -> Result<ValidatedRequest, ProvisionError> {
        if request.token_a.address == request.token_b.address {
            return Err(ProvisionError::InvalidRequest(format!(
                "both tokens are {}",
                request.token_a.address
            )));
        }
        if request.token_a.chain_id != request.token_b.chain_id {
            return Err(ProvisionError::InvalidRequest(format!(
                "tokens are on different chains ({} and {})",
                request.token_a.chain_id, request.token_b.chain_id
            )));
        }
        let liquidity = parse_liquidity(&request.liquidity)
            .map_err(|e| ProvisionError::InvalidRequest(e.to_string()))?;
        let slippage = self
            .config
            .slippage()
            .map_err(|e| ProvisionError::InvalidRequest(e.to_string()))?;

        Ok(ValidatedRequest {
            query: request.query(),
            liquidity,
            slippage,
        })
    }
}
