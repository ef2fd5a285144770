//! Error types for neuromass

use thiserror::Error;

/// Neuromass error type
#[derive(Debug, Error)]
pub enum NeuromassError {
    /// Non-positive or non-finite duration / step size
    #[error("Invalid parameter {name}: {value} (must be finite and > 0)")]
    InvalidParameter {
        name: &'static str,
        value: f64,
    },

    /// Duration shorter than a single step
    #[error("Duration {duration}s yields no steps at dt={dt}s")]
    TooFewSteps {
        duration: f64,
        dt: f64,
    },

    /// Step count too large to allocate
    #[error("Duration {duration}s at dt={dt}s needs more than {max} steps")]
    TooManySteps {
        duration: f64,
        dt: f64,
        max: usize,
    },

    /// Configuration parse error
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendering error
    #[error("Plot error: {0}")]
    Plot(String),
}

pub type Result<T> = std::result::Result<T, NeuromassError>;
