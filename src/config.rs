//! Run Configuration
//!
//! Loads a simulation run from TOML. Every section is optional: missing
//! keys fall back to the reference defaults.
//!
//! ```toml
//! duration = 10.0
//! seed = 1234
//!
//! [model]
//! dt = 0.01
//! b1 = 0.8
//! b2 = 0.8
//! w_ee = 3.0
//! alpha = 1.0
//! sigma = 0.5
//!
//! [plot]
//! output = "population_dynamics.svg"
//! title = "Time evolution of parameters"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::{Integrator, ModelParams, REFERENCE_SEED};
use crate::plot::PlotStyle;
use crate::{NeuromassError, Result};

/// One simulation run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulated time (s)
    pub duration: f64,
    /// Noise seed
    pub seed: u64,
    /// Model parameters
    pub model: ModelParams,
    /// Figure settings
    pub plot: PlotConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            duration: 10.0,
            seed: REFERENCE_SEED,
            model: ModelParams::default(),
            plot: PlotConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Load from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| NeuromassError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| NeuromassError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Check duration and step size, returning the step count
    pub fn validate(&self) -> Result<usize> {
        Integrator::new(self.model).step_count(self.duration)
    }
}

/// Figure output settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Output SVG path
    pub output: PathBuf,
    /// Figure title
    pub title: String,
    /// X axis label
    pub x_label: String,
    /// Y axis label
    pub y_label: String,
    /// Width (px)
    pub width: u32,
    /// Height (px)
    pub height: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        let style = PlotStyle::default();
        Self {
            output: PathBuf::from("population_dynamics.svg"),
            title: style.title,
            x_label: style.x_label,
            y_label: style.y_label,
            width: style.width,
            height: style.height,
        }
    }
}

impl PlotConfig {
    /// Rendering style for this config
    pub fn style(&self) -> PlotStyle {
        PlotStyle {
            title: self.title.clone(),
            x_label: self.x_label.clone(),
            y_label: self.y_label.clone(),
            width: self.width,
            height: self.height,
        }
    }
}
