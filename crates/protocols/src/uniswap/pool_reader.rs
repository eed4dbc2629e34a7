use crate::bindings::IUniswapV3Pool;
use crate::clients::{PoolClient, Slot0};
use alloy::primitives::{Address, U256};
use alloy::providers::DynProvider;
use anyhow::{Context, Result};
use async_trait::async_trait;

/// Reads pool state through view calls. Any pool address may be passed.
pub struct PoolReader {
    provider: DynProvider,
}

impl PoolReader {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl PoolClient for PoolReader {
    async fn tick_spacing(&self, pool: Address) -> Result<i32> {
        let contract = IUniswapV3Pool::new(pool, self.provider.clone());
        let spacing = contract
            .tickSpacing()
            .call()
            .await
            .with_context(|| format!("tickSpacing() on {pool} failed"))?;
        Ok(spacing.as_i32())
    }

    async fn fee(&self, pool: Address) -> Result<u32> {
        let contract = IUniswapV3Pool::new(pool, self.provider.clone());
        let fee = contract
            .fee()
            .call()
            .await
            .with_context(|| format!("fee() on {pool} failed"))?;
        Ok(fee.to::<u32>())
    }

    async fn liquidity(&self, pool: Address) -> Result<u128> {
        let contract = IUniswapV3Pool::new(pool, self.provider.clone());
        contract
            .liquidity()
            .call()
            .await
            .with_context(|| format!("liquidity() on {pool} failed"))
    }

    async fn slot0(&self, pool: Address) -> Result<Slot0> {
        let contract = IUniswapV3Pool::new(pool, self.provider.clone());
        let slot0 = contract
            .slot0()
            .call()
            .await
            .with_context(|| format!("slot0() on {pool} failed"))?;
        Ok(Slot0 {
            sqrt_price_x96: U256::from(slot0.sqrtPriceX96),
            tick: slot0.tick.as_i32(),
        })
    }
}
