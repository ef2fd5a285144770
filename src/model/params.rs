//! Model Parameter Set
//!
//! One immutable bundle per simulation call. Every recognised option is a
//! named field; nothing is positional.

use serde::{Deserialize, Serialize};

use crate::{NeuromassError, Result};

/// Behaviour model parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    /// Integration step (s)
    pub dt: f64,
    /// External drive to the first population
    pub b1: f64,
    /// External drive to the second population
    pub b2: f64,
    /// Self-excitation weight
    pub w_ee: f64,
    /// Mutual inhibition weight
    pub alpha: f64,
    /// Noise intensity (continuous time)
    pub sigma: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            dt: 0.01,
            b1: 0.8,
            b2: 0.8,
            w_ee: 3.0,
            alpha: 1.0,
            sigma: 0.5,
        }
    }
}

impl ModelParams {
    /// Reference parameters with the noise switched off
    pub fn noiseless() -> Self {
        Self {
            sigma: 0.0,
            ..Default::default()
        }
    }

    /// Net self-coupling applied to a population's own gain
    pub fn net_self_excitation(&self) -> f64 {
        self.w_ee - self.alpha
    }

    /// Per-step noise standard deviation, `sigma * sqrt(dt)`
    pub fn step_noise_std(&self) -> f64 {
        self.sigma * self.dt.sqrt()
    }

    /// Check the step size. Drives, weights and sigma are accepted as-is.
    pub fn validate(&self) -> Result<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(NeuromassError::InvalidParameter {
                name: "dt",
                value: self.dt,
            });
        }
        Ok(())
    }
}
