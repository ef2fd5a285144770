//! # Behaviour Model - Two Competing Neural Populations
//!
//! Neural-mass model of a binary decision: each population excites itself
//! and inhibits the other, so noise pushes the pair toward one of two
//! attractors (one population high, the other suppressed).
//!
//! ## Components
//!
//! - **ModelParams**: dt, drives `b1`/`b2`, `w_ee`, `alpha`, `sigma`
//! - **NoiseSource**: the only source of randomness, passed explicitly
//! - **StateHistory**: 2×N matrix, row per population, column per step
//! - **Integrator**: Euler–Maruyama stepping of the coupled SDE
//!
//! ## Rules
//!
//! 1. Column 0 is always `(0, 0)` (both populations start at rest)
//! 2. Column `t+1` depends only on column `t`, the params and one fresh
//!    noise pair
//! 3. No global RNG: the same seed always reproduces the same trajectory
//!
//! ## Example
//!
//! ```
//! use neuromass::model::{Integrator, ModelParams, SeededNoise};
//!
//! let integrator = Integrator::new(ModelParams::noiseless());
//! let mut noise = SeededNoise::from_seed(7);
//! let history = integrator.simulate(1.0, &mut noise)?;
//!
//! assert_eq!(history.len(), 100);
//! # Ok::<(), neuromass::NeuromassError>(())
//! ```

// Parameter set
mod params;
pub use params::ModelParams;

// Noise source (explicit seeded generator)
mod noise;
pub use noise::{NoiseSource, SeededNoise, REFERENCE_SEED};

// Result matrix
mod history;
pub use history::{Population, StateHistory};

// Euler–Maruyama integrator
mod integrator;
pub use integrator::{simulate, Integrator, MAX_STEPS};
