//! Live pool state reads.

use crate::error::ProvisionError;
use crate::stage::{Stage, StageGuard};
use lpdapp_domain::entities::{PoolRecord, PoolState};
use lpdapp_protocols::clients::PoolClient;
use std::sync::Arc;
use tracing::debug;

/// Reads the four pieces of pool state needed for position math.
pub struct PoolStateReader {
    pools: Arc<dyn PoolClient>,
}

impl PoolStateReader {
    pub fn new(pools: Arc<dyn PoolClient>) -> Self {
        Self { pools }
    }

    /// Issues the four reads concurrently and validates the snapshot
    /// against the pool's fee tier.
    ///
    /// Any failed read fails the whole snapshot; partial state is never
    /// returned.
    pub async fn read(
        &self,
        record: &PoolRecord,
        guard: &StageGuard,
    ) -> Result<PoolState, ProvisionError> {
        let pool = record.pool_address;
        let reads = async {
            let (tick_spacing, fee, liquidity, slot0) = tokio::try_join!(
                self.pools.tick_spacing(pool),
                self.pools.fee(pool),
                self.pools.liquidity(pool),
                self.pools.slot0(pool),
            )?;
            Ok(PoolState {
                tick_spacing,
                fee,
                liquidity,
                sqrt_price_x96: slot0.sqrt_price_x96,
                tick: slot0.tick,
            })
        };

        let state = guard.run(Stage::StateRead, reads).await.map_err(|failure| {
            ProvisionError::from_stage(Stage::StateRead, failure, ProvisionError::StateReadFailed)
        })?;

        state.validate(record.fee).map_err(ProvisionError::InvalidPoolState)?;

        debug!(
            pool = %pool,
            tick = state.tick,
            tick_spacing = state.tick_spacing,
            liquidity = state.liquidity,
            "Pool state read"
        );
        Ok(state)
    }
}
