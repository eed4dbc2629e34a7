//! Pool resolution against the factory.

use crate::error::ProvisionError;
use crate::stage::{Stage, StageGuard};
use lpdapp_data::DiscoveryLog;
use lpdapp_domain::entities::{PoolQuery, PoolRecord};
use lpdapp_protocols::clients::FactoryClient;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of a factory lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(PoolRecord),
    /// The factory returned the zero address.
    NotFound,
}

/// Finds the deployed pool for a token pair and fee tier.
pub struct PoolResolver {
    factory: Arc<dyn FactoryClient>,
    discoveries: Arc<dyn DiscoveryLog>,
}

impl PoolResolver {
    pub fn new(factory: Arc<dyn FactoryClient>, discoveries: Arc<dyn DiscoveryLog>) -> Self {
        Self {
            factory,
            discoveries,
        }
    }

    /// Queries the factory with the pair in canonical order.
    async fn lookup(
        &self,
        query: &PoolQuery,
        chain_id: u64,
        guard: &StageGuard,
    ) -> Result<Resolution, ProvisionError> {
        let (token0, token1) = query.sorted_addresses();
        debug!(token0 = %token0, token1 = %token1, fee = %query.fee, "Resolving pool");

        let pool_address = guard
            .run(
                Stage::Resolution,
                self.factory.get_pool(token0, token1, query.fee),
            )
            .await
            .map_err(|failure| {
                ProvisionError::from_stage(
                    Stage::Resolution,
                    failure,
                    ProvisionError::ResolutionFailed,
                )
            })?;

        match PoolRecord::from_lookup(query, chain_id, pool_address) {
            Some(record) => {
                info!(pair = %query.pair_label(), fee = %query.fee, pool = %pool_address, "Pool found");
                Ok(Resolution::Found(record))
            }
            None => {
                info!(pair = %query.pair_label(), fee = %query.fee, "No pool deployed");
                Ok(Resolution::NotFound)
            }
        }
    }

    /// Looks the pool up and appends a found pool to the discovery log.
    ///
    /// The append is best-effort: a log failure is reported at `warn` and
    /// the resolution still succeeds.
    pub async fn resolve(
        &self,
        query: &PoolQuery,
        chain_id: u64,
        guard: &StageGuard,
    ) -> Result<Resolution, ProvisionError> {
        let resolution = self.lookup(query, chain_id, guard).await?;
        if let Resolution::Found(record) = &resolution {
            if let Err(e) = self.discoveries.append(record).await {
                warn!(pool = %record.pool_address, error = %e, "Failed to append pool discovery");
            }
        }
        Ok(resolution)
    }
}
