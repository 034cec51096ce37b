//! Error types for the capacitor simulator.
//!
//! The physics kernel and the permissive driver functions never fail. This
//! module provides [`CapsimError`] for the checked paths: constructing a
//! [`Capacitor`](crate::Capacitor), running through a
//! [`Simulator`](crate::Simulator), building sweeps and writing reports.

use thiserror::Error;

/// Result type alias using [`CapsimError`].
pub type Result<T> = std::result::Result<T, CapsimError>;

/// Unified error type for all Capsim operations.
#[derive(Error, Debug)]
pub enum CapsimError {
    // ============ Parameter Errors ============
    /// A run or component parameter is out of its physical range
    #[error("Invalid parameter '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    /// Capacitor record failed validation
    #[error("Invalid capacitor '{name}': {message}")]
    InvalidCapacitor { name: String, message: String },

    /// Capacitor label exceeds the bounded length
    #[error("Capacitor name '{name}' exceeds {max} characters")]
    NameTooLong { name: String, max: usize },

    // ============ Time Base Errors ============
    /// No time samples were supplied
    #[error("Time sample sequence is empty")]
    EmptyTimeSamples,

    /// Time samples decrease somewhere in the sequence
    #[error("Time samples must be non-decreasing: t[{index}] = {current:.6e} < {previous:.6e}")]
    UnorderedTimeSamples {
        index: usize,
        previous: f64,
        current: f64,
    },

    // ============ Sweep Errors ============
    /// Sweep axes are empty or malformed
    #[error("Invalid sweep: {message}")]
    InvalidSweep { message: String },

    // ============ I/O Errors ============
    /// Error writing a report
    #[error("Output error: {message}")]
    OutputError { message: String },
}

impl CapsimError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create an invalid capacitor error
    pub fn invalid_capacitor(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidCapacitor {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid sweep error
    pub fn invalid_sweep(message: impl Into<String>) -> Self {
        Self::InvalidSweep {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for CapsimError {
    fn from(e: std::io::Error) -> Self {
        Self::OutputError {
            message: e.to_string(),
        }
    }
}
