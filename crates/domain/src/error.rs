use thiserror::Error;

/// Errors raised by pure domain computations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Pool state cannot be used for position math.
    #[error("invalid pool state: {0}")]
    InvalidPoolState(String),

    /// Tick is outside the supported range.
    #[error("tick {0} out of bounds")]
    TickOutOfBounds(i32),

    /// Lower tick is not below the upper tick.
    #[error("tick range [{lower}, {upper}] is empty")]
    EmptyTickRange { lower: i32, upper: i32 },

    /// Fee units do not match a known fee tier.
    #[error("unsupported fee tier {0}")]
    UnsupportedFee(u32),

    /// A decimal amount could not be parsed or scaled.
    #[error("invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },

    /// Slippage tolerance above 100%.
    #[error("slippage of {0} bps exceeds 10000")]
    InvalidSlippage(u16),

    /// Fixed-point liquidity math rejected its inputs.
    #[error("liquidity math: {0}")]
    Math(String),

    /// Intermediate value does not fit the target width.
    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),
}
