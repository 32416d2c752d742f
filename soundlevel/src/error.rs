//! Error types for chart construction and rendering.
//!
//! The numeric pipeline (intensity, level, formatting) never fails: non-finite
//! values flow through it as data. `Error` covers the places where a caller can
//! hand in an unusable configuration or where a raster backend can fail.

use thiserror::Error;

/// Custom error type for chart operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Axis bounds that cannot be projected (equal or non-finite)
    #[error("Invalid {axis} range: [{min}, {max}]")]
    InvalidRange {
        axis: &'static str,
        min: f64,
        max: f64,
    },

    /// Logarithmic axis with a bound that has no logarithm
    #[error("Logarithmic {axis} axis needs positive bounds, got [{min}, {max}]")]
    NonPositiveLogBound {
        axis: &'static str,
        min: f64,
        max: f64,
    },

    /// Autoscaling was asked to derive bounds from nothing
    #[error("Cannot autoscale an empty sample set")]
    EmptySamples,

    /// Sweep definition that produces no samples
    #[error("Invalid sweep: {message}")]
    InvalidSweep { message: String },

    /// Chart options that failed validation
    #[error("Invalid chart options: {message}")]
    InvalidOptions { message: String },

    /// Drawing backend failures
    #[error("Drawing error: {message}")]
    Backend { message: String },

    /// Image encoding failures
    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),
}

impl Error {
    /// Create an InvalidSweep error with a message
    pub fn invalid_sweep(message: impl Into<String>) -> Self {
        Self::InvalidSweep {
            message: message.into(),
        }
    }

    /// Create an InvalidOptions error with a message
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }

    /// Create a Backend error with a message
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

// Type alias for Result using the crate error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = Error::InvalidRange {
            axis: "y",
            min: 3.0,
            max: 3.0,
        };
        assert_eq!(err.to_string(), "Invalid y range: [3, 3]");
        assert_eq!(
            Error::invalid_sweep("step must be positive, got 0").to_string(),
            "Invalid sweep: step must be positive, got 0"
        );
        assert_eq!(Error::EmptySamples.to_string(), "Cannot autoscale an empty sample set");
        assert!(matches!(Error::backend("boom"), Error::Backend { .. }));
    }
}
