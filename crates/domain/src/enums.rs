use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fee tiers supported by the pool factory.
///
/// Fee units are hundredths of a basis point, as passed to `getPool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum FeeTier {
    /// 0.01%
    Lowest,
    /// 0.05%
    Low,
    /// 0.3%
    Medium,
    /// 1%
    High,
}

impl FeeTier {
    /// All tiers in ascending fee order.
    pub const ALL: [FeeTier; 4] = [Self::Lowest, Self::Low, Self::Medium, Self::High];

    /// Fee in hundredths of a basis point.
    #[must_use]
    pub const fn units(self) -> u32 {
        match self {
            Self::Lowest => 100,
            Self::Low => 500,
            Self::Medium => 3000,
            Self::High => 10_000,
        }
    }

    /// Tick spacing the factory assigns to pools of this tier.
    #[must_use]
    pub const fn default_tick_spacing(self) -> i32 {
        match self {
            Self::Lowest => 1,
            Self::Low => 10,
            Self::Medium => 60,
            Self::High => 200,
        }
    }
}

impl TryFrom<u32> for FeeTier {
    type Error = DomainError;

    fn try_from(units: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.units() == units)
            .ok_or(DomainError::UnsupportedFee(units))
    }
}

impl From<FeeTier> for u32 {
    fn from(tier: FeeTier) -> Self {
        tier.units()
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = self.units();
        write!(f, "{}.{:02}%", units / 10_000, (units % 10_000) / 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_tier_round_trips_units() {
        for tier in FeeTier::ALL {
            assert_eq!(FeeTier::try_from(tier.units()), Ok(tier));
        }
        assert_eq!(
            FeeTier::try_from(2500),
            Err(DomainError::UnsupportedFee(2500))
        );
    }

    #[test]
    fn test_fee_tier_display() {
        assert_eq!(FeeTier::Medium.to_string(), "0.30%");
        assert_eq!(FeeTier::High.to_string(), "1.00%");
        assert_eq!(FeeTier::Lowest.to_string(), "0.01%");
    }

    #[test]
    fn test_fee_tier_serializes_as_units() {
        let json = serde_json::to_string(&FeeTier::Low).unwrap();
        assert_eq!(json, "500");
        let tier: FeeTier = serde_json::from_str("10000").unwrap();
        assert_eq!(tier, FeeTier::High);
        assert!(serde_json::from_str::<FeeTier>("42").is_err());
    }
}
