use crate::error::DomainError;
use crate::value_objects::TickRange;

/// Number of tick spacings on each side of the current usable tick.
pub const RANGE_WIDTH_IN_SPACINGS: i32 = 2;

/// Largest multiple of `tick_spacing` at or below `tick`.
///
/// Uses floor division, so negative ticks round away from zero:
/// `nearest_usable_tick(-130, 60) == -180`.
///
/// # Errors
/// Returns `InvalidPoolState` if `tick_spacing` is not positive.
pub fn nearest_usable_tick(tick: i32, tick_spacing: i32) -> Result<i32, DomainError> {
    if tick_spacing <= 0 {
        return Err(DomainError::InvalidPoolState(format!(
            "tick spacing must be positive, got {tick_spacing}"
        )));
    }
    Ok(tick.div_euclid(tick_spacing) * tick_spacing)
}

/// Range of `RANGE_WIDTH_IN_SPACINGS` spacings on each side of the nearest usable tick.
///
/// Both bounds are multiples of `tick_spacing`.
///
/// # Errors
/// Returns `InvalidPoolState` if `tick_spacing` is not positive.
pub fn symmetric_range(tick: i32, tick_spacing: i32) -> Result<TickRange, DomainError> {
    let nearest = nearest_usable_tick(tick, tick_spacing)?;
    let half_width = RANGE_WIDTH_IN_SPACINGS
        .checked_mul(tick_spacing)
        .ok_or(DomainError::Overflow("tick range width"))?;
    let lower = nearest
        .checked_sub(half_width)
        .ok_or(DomainError::Overflow("lower tick"))?;
    let upper = nearest
        .checked_add(half_width)
        .ok_or(DomainError::Overflow("upper tick"))?;
    TickRange::new(lower, upper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_positive_tick() {
        assert_eq!(nearest_usable_tick(1000, 60).unwrap(), 960);
        let range = symmetric_range(1000, 60).unwrap();
        assert_eq!(range, TickRange { lower: 840, upper: 1080 });
    }

    #[test]
    fn test_negative_tick_uses_floor() {
        assert_eq!(nearest_usable_tick(-130, 60).unwrap(), -180);
        let range = symmetric_range(-130, 60).unwrap();
        assert_eq!(range, TickRange { lower: -300, upper: -60 });
    }

    #[test]
    fn test_aligned_tick_is_its_own_nearest() {
        assert_eq!(nearest_usable_tick(-180, 60).unwrap(), -180);
        assert_eq!(nearest_usable_tick(0, 10).unwrap(), 0);
        assert_eq!(symmetric_range(0, 10).unwrap(), TickRange { lower: -20, upper: 20 });
    }

    #[test]
    fn test_rejects_non_positive_spacing() {
        assert!(matches!(
            symmetric_range(100, 0),
            Err(DomainError::InvalidPoolState(_))
        ));
        assert!(symmetric_range(100, -60).is_err());
    }

    proptest! {
        #[test]
        fn prop_range_is_aligned_and_brackets_nearest(
            tick in -887_272i32..=887_272,
            spacing in 1i32..=16_384,
        ) {
            let range = symmetric_range(tick, spacing).unwrap();
            let nearest = tick.div_euclid(spacing) * spacing;

            prop_assert_eq!(range.lower % spacing, 0);
            prop_assert_eq!(range.upper % spacing, 0);
            prop_assert!(range.lower < range.upper);
            prop_assert!(range.lower <= nearest && nearest <= range.upper);
            prop_assert!(range.lower < nearest && nearest < range.upper);
            prop_assert!(nearest <= tick);
        }

        #[test]
        fn prop_range_is_deterministic(
            tick in any::<i32>().prop_map(|t| t / 4),
            spacing in 1i32..=16_384,
        ) {
            prop_assert_eq!(symmetric_range(tick, spacing), symmetric_range(tick, spacing));
        }
    }
}
