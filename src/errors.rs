//! Validation errors

use crate::float_types::Real;
use thiserror::Error;

/// All the validation issues gear construction might report.
///
/// Parameter problems are rejected before any geometry work begins and name
/// the offending parameter. `DegenerateOutline` is the per-gear construction
/// failure: the planetary layout records it and continues with the rest of
/// the set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A real parameter is NaN or infinite.
    #[error("(NonFinite) parameter `{parameter}` is not finite: {value}")]
    NonFinite { parameter: &'static str, value: Real },

    /// A parameter that must be strictly positive is zero or negative.
    #[error("(NonPositive) parameter `{parameter}` must be > 0, got {value}")]
    NonPositive { parameter: &'static str, value: Real },

    /// A parameter that must be non-negative is negative.
    #[error("(Negative) parameter `{parameter}` must be >= 0, got {value}")]
    Negative { parameter: &'static str, value: Real },

    /// A parameter fell outside its open interval.
    #[error("(OutOfRange) parameter `{parameter}` must lie in ({min}, {max}), got {value}")]
    OutOfRange {
        parameter: &'static str,
        value: Real,
        min: Real,
        max: Real,
    },

    /// An integer count is below its required minimum.
    #[error("(CountTooSmall) parameter `{parameter}` must be >= {min}, got {value}")]
    CountTooSmall {
        parameter: &'static str,
        value: usize,
        min: usize,
    },

    /// An outline has too few distinct points to bound a face.
    #[error("(DegenerateOutline) outline has only {points} distinct points")]
    DegenerateOutline { points: usize },
}

impl ValidationError {
    /// Check that `value` is finite, tagging the error with `parameter`.
    pub fn require_finite(parameter: &'static str, value: Real) -> Result<(), Self> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(ValidationError::NonFinite { parameter, value })
        }
    }

    /// Check that `value` is finite and strictly positive.
    pub fn require_positive(parameter: &'static str, value: Real) -> Result<(), Self> {
        Self::require_finite(parameter, value)?;
        if value > 0.0 {
            Ok(())
        } else {
            Err(ValidationError::NonPositive { parameter, value })
        }
    }

    /// Check that `value` is finite and non-negative.
    pub fn require_non_negative(parameter: &'static str, value: Real) -> Result<(), Self> {
        Self::require_finite(parameter, value)?;
        if value >= 0.0 {
            Ok(())
        } else {
            Err(ValidationError::Negative { parameter, value })
        }
    }

    /// Check that `value` lies strictly inside `(min, max)`.
    pub fn require_in_open_range(
        parameter: &'static str,
        value: Real,
        min: Real,
        max: Real,
    ) -> Result<(), Self> {
        Self::require_finite(parameter, value)?;
        if value > min && value < max {
            Ok(())
        } else {
            Err(ValidationError::OutOfRange {
                parameter,
                value,
                min,
                max,
            })
        }
    }

    /// Check that an integer count reaches its minimum.
    pub fn require_count(
        parameter: &'static str,
        value: usize,
        min: usize,
    ) -> Result<(), Self> {
        if value >= min {
            Ok(())
        } else {
            Err(ValidationError::CountTooSmall {
                parameter,
                value,
                min,
            })
        }
    }
}
