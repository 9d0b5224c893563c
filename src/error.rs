// src/error.rs
use thiserror::Error;

/// Error types for the exotic-mc library
#[derive(Debug, Clone, PartialEq, Error)]
pub enum McError {
    /// Two operands (or an operand and its expected shape) disagree in length
    #[error("Dimension mismatch in {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        found: usize,
    },

    /// Reduction over an empty collection
    #[error("Cannot compute {operation} of an empty input")]
    EmptyInput { operation: String },

    /// Payoff registry lookup miss
    #[error("Unknown payoff identifier '{id}'")]
    UnknownPayoff { id: String },

    /// Tree product priced on a tree built for a different expiry
    #[error("Mismatched product horizon: product expires at {product_time}, tree built for {tree_time}")]
    HorizonMismatch { product_time: f64, tree_time: f64 },

    /// Invalid parameter values
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// Numerical instability or non-finite results
    #[error("Numerical instability in {method}: {reason}")]
    NumericalInstability { method: String, reason: String },
}

/// Result type alias for exotic-mc operations
pub type McResult<T> = Result<T, McError>;

impl McError {
    pub(crate) fn dimension(context: &str, expected: usize, found: usize) -> Self {
        McError::DimensionMismatch {
            context: context.to_string(),
            expected,
            found,
        }
    }
}

/// Validation utilities
pub mod validation {
    use super::{McError, McResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> McResult<()> {
        if value <= 0.0 || value.is_nan() {
            Err(McError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> McResult<()> {
        if value < 0.0 || value.is_nan() {
            Err(McError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> McResult<()> {
        if !value.is_finite() {
            Err(McError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a sequence of times is non-empty and strictly increasing
    pub fn validate_increasing(name: &str, times: &[f64]) -> McResult<()> {
        if times.is_empty() {
            return Err(McError::EmptyInput {
                operation: name.to_string(),
            });
        }
        for pair in times.windows(2) {
            if pair[1] <= pair[0] {
                return Err(McError::InvalidParameters {
                    parameter: name.to_string(),
                    value: pair[1],
                    constraint: format!("must be strictly greater than {}", pair[0]),
                });
            }
        }
        Ok(())
    }

    /// Validate paths count
    pub fn validate_paths(paths: usize) -> McResult<()> {
        if paths == 0 {
            Err(McError::InvalidConfiguration {
                field: "paths".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if paths > 1_000_000_000 {
            Err(McError::InvalidConfiguration {
                field: "paths".to_string(),
                reason: "exceeds maximum allowed (1 billion)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate steps count
    pub fn validate_steps(steps: usize) -> McResult<()> {
        if steps == 0 {
            Err(McError::InvalidConfiguration {
                field: "steps".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if steps > 100_000 {
            Err(McError::InvalidConfiguration {
                field: "steps".to_string(),
                reason: "exceeds maximum allowed (100,000)".to_string(),
            })
        } else {
            Ok(())
        }
    }
}
