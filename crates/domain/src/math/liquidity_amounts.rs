use crate::error::DomainError;
use crate::math::tick_math::sqrt_ratio_at_tick;
use crate::value_objects::TickRange;
use alloy_primitives::U256;
use uniswap_v3_math::sqrt_price_math;

/// Token amounts a mint must supply, in canonical token order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintAmounts {
    pub amount0: U256,
    pub amount1: U256,
}

/// Amounts of token0 and token1 needed to mint `liquidity` over `range`
/// at the pool's current price.
///
/// Rounds up, so the pool never receives less than the liquidity requires.
/// Below the range only token0 is needed, above it only token1.
///
/// # Errors
/// Returns `EmptyTickRange` for an inverted range, `TickOutOfBounds` for
/// bounds outside the pool's tick domain, and `Math` when the fixed-point
/// library rejects the inputs.
pub fn amounts_for_liquidity(
    sqrt_price_x96: U256,
    tick_current: i32,
    range: TickRange,
    liquidity: u128,
) -> Result<MintAmounts, DomainError> {
    if range.lower >= range.upper {
        return Err(DomainError::EmptyTickRange {
            lower: range.lower,
            upper: range.upper,
        });
    }
    let sqrt_lower = sqrt_ratio_at_tick(range.lower)?;
    let sqrt_upper = sqrt_ratio_at_tick(range.upper)?;

    if tick_current < range.lower {
        Ok(MintAmounts {
            amount0: amount0_delta(sqrt_lower, sqrt_upper, liquidity)?,
            amount1: U256::ZERO,
        })
    } else if tick_current < range.upper {
        Ok(MintAmounts {
            amount0: amount0_delta(sqrt_price_x96, sqrt_upper, liquidity)?,
            amount1: amount1_delta(sqrt_lower, sqrt_price_x96, liquidity)?,
        })
    } else {
        Ok(MintAmounts {
            amount0: U256::ZERO,
            amount1: amount1_delta(sqrt_lower, sqrt_upper, liquidity)?,
        })
    }
}

fn amount0_delta(sqrt_a: U256, sqrt_b: U256, liquidity: u128) -> Result<U256, DomainError> {
    sqrt_price_math::_get_amount_0_delta(sqrt_a, sqrt_b, liquidity, true)
        .map_err(|e| DomainError::Math(e.to_string()))
}

fn amount1_delta(sqrt_a: U256, sqrt_b: U256, liquidity: u128) -> Result<U256, DomainError> {
    sqrt_price_math::_get_amount_1_delta(sqrt_a, sqrt_b, liquidity, true)
        .map_err(|e| DomainError::Math(e.to_string()))
}
