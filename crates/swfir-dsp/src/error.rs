//! Error types for curve processing and synthesis.

use thiserror::Error;

/// Errors raised before any synthesis work starts.
///
/// Synthesis itself cannot fail on finite input: magnitudes are floored
/// before the logarithm.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A frequency/gain curve is unusable: too short, mismatched, non-finite,
    /// non-positive or descending frequencies.
    #[error("invalid curve: {0}")]
    InvalidCurve(String),

    /// Synthesis parameters are out of range.
    #[error("invalid synthesis config: {0}")]
    InvalidConfig(String),
}

/// Convenience result type for DSP operations.
pub type Result<T> = std::result::Result<T, Error>;
