use crate::bindings::IUniswapV3Factory;
use crate::clients::FactoryClient;
use alloy::primitives::{Address, aliases::U24};
use alloy::providers::DynProvider;
use anyhow::{Context, Result};
use async_trait::async_trait;
use lpdapp_domain::enums::FeeTier;
use tracing::debug;

/// Pool lookups against the Uniswap V3 factory.
pub struct UniswapFactory {
    provider: DynProvider,
    address: Address,
}

impl UniswapFactory {
    pub fn new(provider: DynProvider, address: Address) -> Self {
        Self { provider, address }
    }
}

#[async_trait]
impl FactoryClient for UniswapFactory {
    async fn get_pool(&self, token0: Address, token1: Address, fee: FeeTier) -> Result<Address> {
        let factory = IUniswapV3Factory::new(self.address, self.provider.clone());
        let pool = factory
            .getPool(token0, token1, U24::from(fee.units()))
            .call()
            .await
            .with_context(|| format!("getPool({token0}, {token1}, {fee}) failed"))?;

        debug!(token0 = %token0, token1 = %token1, fee = %fee, pool = %pool, "Factory lookup");
        Ok(pool)
    }
}
