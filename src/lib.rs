//! # Neuromass - Stochastic Neural-Mass Behaviour Model
//!
//! Two coupled neural populations competing through self-excitation and
//! mutual inhibition, driven by Gaussian noise and integrated with the
//! Euler–Maruyama scheme.
//!
//! ## Core Components
//!
//! - **Gain**: piecewise-linear saturating nonlinearity `g(x)` in [0, 1]
//! - **ModelParams**: immutable parameter set (dt, drives, weights, noise)
//! - **NoiseSource**: explicit seeded standard-normal stream (no global RNG)
//! - **Integrator**: advances the 2-D SDE and returns a `StateHistory`
//! - **Plot**: downstream SVG rendering of a finished history
//!
//! ## Equations
//!
//! ```text
//! dh1 = (-h1 + b1 + (w_ee - alpha) g(h1) - alpha g(h2)) dt + sigma dW1
//! dh2 = (-h2 + b2 + (w_ee - alpha) g(h2) - alpha g(h1)) dt + sigma dW2
//! ```
//!
//! ## Example
//!
//! ```
//! use neuromass::{simulate, ModelParams, SeededNoise, REFERENCE_SEED};
//!
//! let params = ModelParams::default();
//! let mut noise = SeededNoise::from_seed(REFERENCE_SEED);
//!
//! let history = simulate(10.0, &params, &mut noise)?;
//! assert_eq!(history.len(), 1000);
//! assert_eq!(history.column(0), [0.0, 0.0]);
//! # Ok::<(), neuromass::NeuromassError>(())
//! ```

// Gain nonlinearity
pub mod gain;
pub use gain::gain;

// Model: parameters, noise, history, integrator
pub mod model;
pub use model::{
    simulate, Integrator, ModelParams, NoiseSource, Population, SeededNoise, StateHistory,
    REFERENCE_SEED,
};

// Run configuration (TOML)
pub mod config;
pub use config::{PlotConfig, SimulationConfig};

// Rendering - consumes StateHistory, never the other way round
pub mod plot;
pub use plot::{render_svg, PlotStyle};

// Error types
mod error;
pub use error::{NeuromassError, Result};
