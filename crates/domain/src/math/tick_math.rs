use crate::error::DomainError;
use alloy_primitives::U256;
use uniswap_v3_math::tick_math;

/// Lowest tick a pool can address.
pub const MIN_TICK: i32 = tick_math::MIN_TICK;
/// Highest tick a pool can address.
pub const MAX_TICK: i32 = tick_math::MAX_TICK;

/// Returns `sqrt(1.0001^tick) * 2^96`, as the pool contract computes it.
///
/// # Errors
/// Returns `TickOutOfBounds` outside `[MIN_TICK, MAX_TICK]`.
pub fn sqrt_ratio_at_tick(tick: i32) -> Result<U256, DomainError> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(DomainError::TickOutOfBounds(tick));
    }
    tick_math::get_sqrt_ratio_at_tick(tick).map_err(|e| DomainError::Math(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_zero_is_q96() {
        assert_eq!(sqrt_ratio_at_tick(0).unwrap(), U256::from(1u8) << 96_usize);
    }

    #[test]
    fn test_bounds_match_pool_constants() {
        assert_eq!(
            sqrt_ratio_at_tick(MIN_TICK).unwrap(),
            U256::from(4_295_128_739u64)
        );
        assert_eq!(
            sqrt_ratio_at_tick(MAX_TICK).unwrap(),
            "1461446703485210103287273052203988822378723970342"
                .parse::<U256>()
                .unwrap()
        );
    }

    #[test]
    fn test_rejects_out_of_bounds() {
        assert_eq!(
            sqrt_ratio_at_tick(MAX_TICK + 1),
            Err(DomainError::TickOutOfBounds(MAX_TICK + 1))
        );
        assert!(sqrt_ratio_at_tick(MIN_TICK - 1).is_err());
    }

    #[test]
    fn test_monotonic_in_tick() {
        let mut previous = sqrt_ratio_at_tick(-1000).unwrap();
        for tick in (-990..=1000).step_by(10) {
            let current = sqrt_ratio_at_tick(tick).unwrap();
            assert!(current > previous, "ratio must grow at tick {tick}");
            previous = current;
        }
    }
}
