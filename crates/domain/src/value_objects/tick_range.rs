use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position's tick bounds, `lower < upper`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickRange {
    pub lower: i32,
    pub upper: i32,
}

impl TickRange {
    /// Creates a range, rejecting empty or inverted bounds.
    ///
    /// # Errors
    /// Returns `EmptyTickRange` if `lower >= upper`.
    pub fn new(lower: i32, upper: i32) -> Result<Self, DomainError> {
        if lower >= upper {
            return Err(DomainError::EmptyTickRange { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Returns true if `tick` lies in `[lower, upper)`, the pool's active-range convention.
    #[must_use]
    pub fn contains(&self, tick: i32) -> bool {
        tick >= self.lower && tick < self.upper
    }

    /// Returns true if both bounds are multiples of `spacing`.
    #[must_use]
    pub fn is_aligned_to(&self, spacing: i32) -> bool {
        spacing > 0 && self.lower % spacing == 0 && self.upper % spacing == 0
    }
}

impl fmt::Display for TickRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}
