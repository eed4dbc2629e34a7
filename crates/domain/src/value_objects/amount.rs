use crate::error::DomainError;
use alloy_primitives::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Decimal places used when a liquidity amount is entered as a decimal string.
pub const LIQUIDITY_DECIMALS: u8 = 18;

/// A raw on-chain integer amount with the token's decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount {
    pub raw: U256,
    pub decimals: u8,
}

impl Amount {
    pub fn new(raw: U256, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    /// Parses a human decimal string such as `"1.5"` into raw units.
    ///
    /// # Errors
    /// Returns `InvalidAmount` for malformed or negative input, more fractional
    /// digits than `decimals`, or a value that overflows 256 bits.
    pub fn parse(value: &str, decimals: u8) -> Result<Self, DomainError> {
        let invalid = |reason: &str| DomainError::InvalidAmount {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let parsed = Decimal::from_str(value.trim()).map_err(|e| invalid(&e.to_string()))?;
        if parsed.is_sign_negative() && !parsed.is_zero() {
            return Err(invalid("must not be negative"));
        }
        let scale = parsed.scale();
        if scale > u32::from(decimals) {
            return Err(invalid(&format!("more than {decimals} decimal places")));
        }

        let factor = U256::from(10u8)
            .checked_pow(U256::from(u32::from(decimals) - scale))
            .ok_or_else(|| invalid("too many decimals"))?;
        let raw = U256::from(parsed.mantissa().unsigned_abs())
            .checked_mul(factor)
            .ok_or_else(|| invalid("exceeds 256 bits"))?;

        Ok(Self { raw, decimals })
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.raw.to_string();
        let decimals = usize::from(self.decimals);
        if decimals == 0 {
            return f.write_str(&digits);
        }

        let padded = format!("{digits:0>width$}", width = decimals + 1);
        let (whole, fraction) = padded.split_at(padded.len() - decimals);
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            f.write_str(whole)
        } else {
            write!(f, "{whole}.{fraction}")
        }
    }
}

/// Parses a desired liquidity amount entered as a decimal string.
///
/// The value is scaled by [`LIQUIDITY_DECIMALS`] and must fit the pool's
/// 128-bit liquidity.
///
/// # Errors
/// Returns `InvalidAmount` for malformed, zero, or oversized input.
pub fn parse_liquidity(value: &str) -> Result<u128, DomainError> {
    let amount = Amount::parse(value, LIQUIDITY_DECIMALS)?;
    if amount.is_zero() {
        return Err(DomainError::InvalidAmount {
            value: value.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    u128::try_from(amount.raw).map_err(|_| DomainError::InvalidAmount {
        value: value.to_string(),
        reason: "exceeds 128-bit liquidity".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scales_by_decimals() {
        let amount = Amount::parse("1.5", 6).unwrap();
        assert_eq!(amount.raw, U256::from(1_500_000u64));

        let whole = Amount::parse("42", 0).unwrap();
        assert_eq!(whole.raw, U256::from(42u64));

        let tiny = Amount::parse("0.000000000000000001", 18).unwrap();
        assert_eq!(tiny.raw, U256::from(1u64));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Amount::parse("abc", 18).is_err());
        assert!(Amount::parse("-1", 18).is_err());
        assert!(Amount::parse("0.1234567", 6).is_err());
    }

    #[test]
    fn test_display_trims_fraction() {
        assert_eq!(Amount::new(U256::from(1_500_000u64), 6).to_string(), "1.5");
        assert_eq!(Amount::new(U256::from(2_000_000u64), 6).to_string(), "2");
        assert_eq!(Amount::new(U256::from(5u64), 3).to_string(), "0.005");
        assert_eq!(Amount::new(U256::from(7u64), 0).to_string(), "7");
    }

    #[test]
    fn test_parse_liquidity() {
        assert_eq!(parse_liquidity("1").unwrap(), 1_000_000_000_000_000_000);
        assert_eq!(parse_liquidity("0.25").unwrap(), 250_000_000_000_000_000);
        assert!(parse_liquidity("0").is_err());
        assert!(parse_liquidity("").is_err());
    }
}
