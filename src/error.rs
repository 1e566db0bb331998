//! Error type shared by every sampler.
//!
//! All checks happen before any randomness is drawn, so an `Err` means the
//! caller's RNG was not advanced.

use thiserror::Error;

/// Errors returned by the samplers in this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    /// `n` points with minimum gap `delta` do not fit in `[low, high)`.
    #[error(
        "cannot select {n} points from the interval [{low}, {high}] with minimum spacing {delta}"
    )]
    Infeasible {
        /// Lower end of the interval.
        low: f64,
        /// Upper end of the interval.
        high: f64,
        /// Requested minimum spacing.
        delta: f64,
        /// Requested number of points.
        n: usize,
    },

    /// An input array has the wrong rank or dimensions.
    #[error("shape error: {0}")]
    Shape(String),

    /// A parameter value lies outside its domain.
    #[error("domain error: {0}")]
    Domain(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SampleError>;

impl From<ndarray::ShapeError> for SampleError {
    fn from(e: ndarray::ShapeError) -> Self {
        Self::Shape(e.to_string())
    }
}
