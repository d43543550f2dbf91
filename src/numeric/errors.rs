// ============================================================================
// Numeric Errors
// Error types for the checked fixed-point API
// ============================================================================

use std::fmt;

/// Errors reported by the checked fixed-point operations.
///
/// The operator forms (`+`, `*`, `<<`, ...) never produce these; they wrap
/// silently like the underlying integer storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedPointError {
    /// Result exceeded the storage maximum
    Overflow,
    /// Result below the storage minimum
    Underflow,
    /// Attempted division by zero
    DivisionByZero,
    /// Real value lies outside the representable range
    OutOfRange,
    /// Real value is NaN or infinite
    NotFinite,
    /// Input string could not be parsed
    InvalidInput,
}

impl fmt::Display for FixedPointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixedPointError::Overflow => {
                write!(f, "arithmetic overflow: result exceeded maximum value")
            },
            FixedPointError::Underflow => {
                write!(f, "arithmetic underflow: result below minimum value")
            },
            FixedPointError::DivisionByZero => write!(f, "division by zero"),
            FixedPointError::OutOfRange => {
                write!(f, "value outside the representable fixed-point range")
            },
            FixedPointError::NotFinite => write!(f, "value is not a finite number"),
            FixedPointError::InvalidInput => write!(f, "invalid input: could not parse value"),
        }
    }
}

impl std::error::Error for FixedPointError {}

/// Result type alias for checked fixed-point operations
pub type FixedPointResult<T> = Result<T, FixedPointError>;
