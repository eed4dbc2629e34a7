//! Mint parameter construction.

use crate::entities::{MintParams, PoolRecord, PoolState};
use crate::error::DomainError;
use crate::math::amounts_for_liquidity;
use crate::value_objects::{SlippageTolerance, TickRange};
use alloy_primitives::Address;

/// Seconds a mint stays valid after submission.
pub const DEFAULT_DEADLINE_SECS: u64 = 600;

/// Inputs for [`build_mint_params`].
#[derive(Debug, Clone)]
pub struct MintRequest<'a> {
    pub pool: &'a PoolRecord,
    pub state: &'a PoolState,
    pub range: TickRange,
    /// Desired liquidity, already scaled to pool units.
    pub liquidity: u128,
    pub recipient: Address,
    /// Current Unix time in seconds.
    pub now: u64,
    pub slippage: SlippageTolerance,
    pub deadline_secs: u64,
}

/// Builds the position manager mint parameters.
///
/// Tokens are put in canonical order, desired amounts come from the
/// liquidity math at the pool's current price, minimums apply the slippage
/// tolerance and the deadline is `now + deadline_secs`.
///
/// # Errors
/// Returns `InvalidPoolState` if the range is not aligned to the pool's
/// tick spacing, and propagates liquidity math errors such as an empty
/// range or a tick outside the pool's domain.
pub fn build_mint_params(request: &MintRequest<'_>) -> Result<MintParams, DomainError> {
    if !request.range.is_aligned_to(request.state.tick_spacing) {
        return Err(DomainError::InvalidPoolState(format!(
            "range {} is not aligned to tick spacing {}",
            request.range, request.state.tick_spacing
        )));
    }
    let (token0, token1) = request.pool.sorted_tokens();
    let amounts = amounts_for_liquidity(
        request.state.sqrt_price_x96,
        request.state.tick,
        request.range,
        request.liquidity,
    )?;

    let deadline = request
        .now
        .checked_add(request.deadline_secs.max(1))
        .ok_or(DomainError::Overflow("mint deadline"))?;

    Ok(MintParams {
        token0: token0.address,
        token1: token1.address,
        fee: request.pool.fee,
        tick_lower: request.range.lower,
        tick_upper: request.range.upper,
        amount0_desired: amounts.amount0,
        amount1_desired: amounts.amount1,
        amount0_min: request.slippage.minimum_of(amounts.amount0),
        amount1_min: request.slippage.minimum_of(amounts.amount1),
        recipient: request.recipient,
        deadline,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::TokenDescriptor;
    use crate::enums::FeeTier;
    use crate::math::{sqrt_ratio_at_tick, symmetric_range};
    use alloy_primitives::{U256, address};

    fn pool() -> PoolRecord {
        // Caller order deliberately reversed relative to address order.
        PoolRecord {
            token_a: TokenDescriptor::new(
                address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
                1,
                18,
                "WETH",
                "Wrapped Ether",
            ),
            token_b: TokenDescriptor::new(
                address!("1d63c1b4c9b8ba0767c2341f68ae1e74f7a49eea"),
                1,
                18,
                "WOOX",
                "Woox",
            ),
            fee: FeeTier::Medium,
            chain_id: 1,
            pool_address: address!("8ad599c3a0ff1de082011efddc58f1908eb6e6d8"),
        }
    }

    fn state(tick: i32) -> PoolState {
        PoolState {
            tick_spacing: 60,
            fee: 3000,
            liquidity: 10u128.pow(24),
            sqrt_price_x96: sqrt_ratio_at_tick(tick).unwrap(),
            tick,
        }
    }

    #[test]
    fn test_builds_canonical_params() {
        let pool = pool();
        let state = state(1000);
        let range = symmetric_range(state.tick, state.tick_spacing).unwrap();
        let recipient = address!("00000000000000000000000000000000000000aa");

        let params = build_mint_params(&MintRequest {
            pool: &pool,
            state: &state,
            range,
            liquidity: 10u128.pow(18),
            recipient,
            now: 1_700_000_000,
            slippage: SlippageTolerance::from_bps(50).unwrap(),
            deadline_secs: DEFAULT_DEADLINE_SECS,
        })
        .unwrap();

        assert!(params.token0 < params.token1);
        assert_eq!(params.token0, pool.token_b.address);
        assert_eq!(params.tick_lower, 840);
        assert_eq!(params.tick_upper, 1080);
        assert_eq!(params.deadline, 1_700_000_600);
        assert_eq!(params.recipient, recipient);
        assert!(params.amount0_desired > U256::ZERO);
        assert!(params.amount1_desired > U256::ZERO);
        assert!(params.amount0_min <= params.amount0_desired);
        assert!(params.amount1_min <= params.amount1_desired);
        assert!(params.amount0_min < params.amount0_desired);
    }

    #[test]
    fn test_zero_slippage_keeps_minimums_equal() {
        let pool = pool();
        let state = state(-130);
        let range = symmetric_range(state.tick, state.tick_spacing).unwrap();

        let params = build_mint_params(&MintRequest {
            pool: &pool,
            state: &state,
            range,
            liquidity: 10u128.pow(18),
            recipient: Address::ZERO,
            now: 0,
            slippage: SlippageTolerance::zero(),
            deadline_secs: DEFAULT_DEADLINE_SECS,
        })
        .unwrap();

        assert_eq!(params.amount0_min, params.amount0_desired);
        assert_eq!(params.amount1_min, params.amount1_desired);
        assert_eq!(params.tick_lower, -300);
        assert_eq!(params.tick_upper, -60);
    }

    #[test]
    fn test_propagates_empty_range() {
        let pool = pool();
        let state = state(0);
        let result = build_mint_params(&MintRequest {
            pool: &pool,
            state: &state,
            range: TickRange {
                lower: 60,
                upper: -60,
            },
            liquidity: 1,
            recipient: Address::ZERO,
            now: 0,
            slippage: SlippageTolerance::zero(),
            deadline_secs: DEFAULT_DEADLINE_SECS,
        });
        assert!(matches!(result, Err(DomainError::EmptyTickRange { .. })));
    }

    #[test]
    fn test_rejects_range_off_the_spacing_grid() {
        let pool = pool();
        let state = state(0);
        let result = build_mint_params(&MintRequest {
            pool: &pool,
            state: &state,
            range: TickRange::new(-90, 90).unwrap(),
            liquidity: 1,
            recipient: Address::ZERO,
            now: 0,
            slippage: SlippageTolerance::zero(),
            deadline_secs: DEFAULT_DEADLINE_SECS,
        });
        assert!(matches!(result, Err(DomainError::InvalidPoolState(_))));
    }
}
