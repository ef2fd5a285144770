//! Euler–Maruyama Integrator
//!
//! ## Equations
//!
//! ```text
//! h1' = h1 + dt (-h1 + b1 + (w_ee - alpha) g(h1) - alpha g(h2)) + sqrt(dt) sigma Z1
//! h2' = h2 + dt (-h2 + b2 + (w_ee - alpha) g(h2) - alpha g(h1)) + sqrt(dt) sigma Z2
//! ```
//!
//! Both populations update simultaneously from the previous column only.
//! `Z1`, `Z2` are fresh independent N(0, 1) draws every step, taken in that
//! order. The pair is drawn even when `sigma == 0` so a seed maps to the
//! same noise stream regardless of the noise level.

use super::{ModelParams, NoiseSource, StateHistory};
use crate::gain::gain;
use crate::{NeuromassError, Result};

/// Largest history that fits in one allocation per row
pub const MAX_STEPS: usize = isize::MAX as usize / (2 * std::mem::size_of::<f64>());

/// Stochastic integrator for the two-population model
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Integrator {
    params: ModelParams,
}

impl Integrator {
    /// Create from a parameter set
    pub fn new(params: ModelParams) -> Self {
        Self { params }
    }

    /// Parameters in use
    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Number of columns for `duration`: `floor(duration / dt)`
    pub fn step_count(&self, duration: f64) -> Result<usize> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(NeuromassError::InvalidParameter {
                name: "duration",
                value: duration,
            });
        }
        self.params.validate()?;

        let steps = (duration / self.params.dt).floor();
        if steps < 1.0 {
            return Err(NeuromassError::TooFewSteps {
                duration,
                dt: self.params.dt,
            });
        }
        if !steps.is_finite() || steps > MAX_STEPS as f64 {
            return Err(NeuromassError::TooManySteps {
                duration,
                dt: self.params.dt,
                max: MAX_STEPS,
            });
        }
        Ok(steps as usize)
    }

    /// Deterministic drift of both populations at `state`
    pub fn drift(&self, state: [f64; 2]) -> [f64; 2] {
        let p = &self.params;
        let [h1, h2] = state;
        let (g1, g2) = (gain(h1), gain(h2));
        let self_coupling = p.net_self_excitation();

        [
            -h1 + p.b1 + self_coupling * g1 - p.alpha * g2,
            -h2 + p.b2 + self_coupling * g2 - p.alpha * g1,
        ]
    }

    /// One Euler–Maruyama step from `state` with standard-normal pair `z`
    pub fn step(&self, state: [f64; 2], z: [f64; 2]) -> [f64; 2] {
        let dt = self.params.dt;
        let noise_std = self.params.step_noise_std();
        let [d1, d2] = self.drift(state);

        [
            state[0] + dt * d1 + noise_std * z[0],
            state[1] + dt * d2 + noise_std * z[1],
        ]
    }

    /// Integrate from rest over `duration` seconds
    pub fn simulate<N: NoiseSource + ?Sized>(
        &self,
        duration: f64,
        noise: &mut N,
    ) -> Result<StateHistory> {
        let steps = self.step_count(duration)?;
        if self.params.sigma < 0.0 {
            log::warn!(
                "Negative sigma {} (noise sign is flipped, magnitude |sigma|)",
                self.params.sigma
            );
        }
        log::debug!(
            "Simulating {} steps (duration={}s, dt={}s, sigma={})",
            steps,
            duration,
            self.params.dt,
            self.params.sigma
        );

        let mut history = StateHistory::zeros(steps, self.params.dt);
        let mut state = [0.0, 0.0];

        for t in 0..steps - 1 {
            let z = noise.normal_pair();
            state = self.step(state, z);
            history.set_column(t + 1, state);
        }

        log::debug!("Simulation complete: final state {:?}", state);
        Ok(history)
    }
}

/// Simulate one trajectory of `duration` seconds
pub fn simulate<N: NoiseSource + ?Sized>(
    duration: f64,
    params: &ModelParams,
    noise: &mut N,
) -> Result<StateHistory> {
    Integrator::new(*params).simulate(duration, noise)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Population, SeededNoise, REFERENCE_SEED};
    use approx::assert_relative_eq;

    /// Replays a fixed list of draws, then zeros
    struct ScriptedNoise {
        draws: Vec<f64>,
        next: usize,
    }

    impl ScriptedNoise {
        fn new(draws: Vec<f64>) -> Self {
            Self { draws, next: 0 }
        }
    }

    impl NoiseSource for ScriptedNoise {
        fn standard_normal(&mut self) -> f64 {
            let z = self.draws.get(self.next).copied().unwrap_or(0.0);
            self.next += 1;
            z
        }
    }

    fn end_to_end_params() -> ModelParams {
        ModelParams {
            dt: 0.1,
            sigma: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_column_is_rest() {
        let mut noise = SeededNoise::from_seed(REFERENCE_SEED);
        let history = simulate(2.0, &ModelParams::default(), &mut noise).unwrap();
        assert_eq!(history.column(0), [0.0, 0.0]);
    }

    #[test]
    fn test_shape_law() {
        let mut noise = SeededNoise::from_seed(1);
        for (duration, dt, expected) in [(10.0, 0.01, 1000), (1.0, 0.1, 10), (0.3, 0.1, 2), (0.7, 0.1, 6), (0.25, 0.1, 2)] {
            let params = ModelParams { dt, ..Default::default() };
            let history = simulate(duration, &params, &mut noise).unwrap();
            assert_eq!(history.len(), expected, "duration={} dt={}", duration, dt);
            assert_eq!(history.population_count(), 2);
        }
    }

    #[test]
    fn test_single_step_history() {
        let params = ModelParams { dt: 0.5, ..Default::default() };
        let mut noise = SeededNoise::from_seed(1);
        let history = simulate(0.7, &params, &mut noise).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.column(0), [0.0, 0.0]);
    }

    #[test]
    fn test_determinism() {
        let params = ModelParams::default();
        let a = simulate(5.0, &params, &mut SeededNoise::from_seed(REFERENCE_SEED)).unwrap();
        let b = simulate(5.0, &params, &mut SeededNoise::from_seed(REFERENCE_SEED)).unwrap();
        assert_eq!(a, b);

        let c = simulate(5.0, &params, &mut SeededNoise::from_seed(REFERENCE_SEED + 1)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_zero_noise_matches_recurrence() {
        let params = ModelParams { dt: 0.05, b1: 0.9, b2: 0.6, ..ModelParams::noiseless() };
        let history = simulate(3.0, &params, &mut SeededNoise::from_seed(5)).unwrap();

        let mut h = [0.0f64, 0.0f64];
        for t in 1..history.len() {
            let g1 = gain(h[0]);
            let g2 = gain(h[1]);
            h = [
                h[0] + params.dt * (-h[0] + params.b1 + (params.w_ee - params.alpha) * g1 - params.alpha * g2),
                h[1] + params.dt * (-h[1] + params.b2 + (params.w_ee - params.alpha) * g2 - params.alpha * g1),
            ];
            assert_eq!(history.column(t), h, "column {}", t);
        }
    }

    #[test]
    fn test_zero_noise_independent_of_seed() {
        let params = ModelParams::noiseless();
        let a = simulate(2.0, &params, &mut SeededNoise::from_seed(1)).unwrap();
        let b = simulate(2.0, &params, &mut SeededNoise::from_seed(999)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_symmetry_without_noise() {
        let params = ModelParams { b1: 0.7, b2: 0.7, ..ModelParams::noiseless() };
        let history = simulate(10.0, &params, &mut SeededNoise::default()).unwrap();
        assert_eq!(history.row(Population::First), history.row(Population::Second));
    }

    #[test]
    fn test_end_to_end_hand_verified() {
        let params = end_to_end_params();
        let history = simulate(1.0, &params, &mut SeededNoise::from_seed(REFERENCE_SEED)).unwrap();

        assert_eq!(history.len(), 10);
        assert_eq!(history.column(0), [0.0, 0.0]);

        // t=1: g(0)=0, so h = 0.1 * 0.8
        let [h1, h2] = history.column(1);
        assert_relative_eq!(h1, 0.08, epsilon = 1e-12);
        assert_relative_eq!(h2, 0.08, epsilon = 1e-12);

        // t=2: g(0.08)=0.08, drift = -0.08 + 0.8 + 2*0.08 - 0.08 = 0.8
        let [h1, h2] = history.column(2);
        assert_relative_eq!(h1, 0.16, epsilon = 1e-12);
        assert_relative_eq!(h2, 0.16, epsilon = 1e-12);

        // t=3: drift = -0.16 + 0.8 + 0.32 - 0.16 = 0.8
        let [h1, _] = history.column(3);
        assert_relative_eq!(h1, 0.24, epsilon = 1e-12);
    }

    #[test]
    fn test_noise_scaling() {
        let params = ModelParams { dt: 0.04, sigma: 0.5, ..Default::default() };
        let integrator = Integrator::new(params);
        let mut noise = ScriptedNoise::new(vec![1.0, -2.0]);

        let history = integrator.simulate(0.08, &mut noise).unwrap();
        assert_eq!(history.len(), 2);

        // drift at rest is (b1, b2); sqrt(0.04) * 0.5 = 0.1
        let [h1, h2] = history.column(1);
        assert_relative_eq!(h1, 0.04 * 0.8 + 0.1, epsilon = 1e-12);
        assert_relative_eq!(h2, 0.04 * 0.8 - 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_draws_two_per_step() {
        let integrator = Integrator::new(ModelParams { dt: 0.1, ..Default::default() });
        let mut noise = ScriptedNoise::new(vec![]);
        let history = integrator.simulate(1.0, &mut noise).unwrap();
        assert_eq!(noise.next, 2 * (history.len() - 1));
    }

    #[test]
    fn test_step_uses_previous_column_only() {
        let integrator = Integrator::new(ModelParams::noiseless());
        let state = [0.4, 1.5];
        let next = integrator.step(state, [0.0, 0.0]);

        let p = integrator.params();
        let expected1 = 0.4 + p.dt * (-0.4 + p.b1 + 2.0 * 0.4 - 1.0 * 1.0);
        let expected2 = 1.5 + p.dt * (-1.5 + p.b2 + 2.0 * 1.0 - 1.0 * 0.4);
        assert_relative_eq!(next[0], expected1, epsilon = 1e-12);
        assert_relative_eq!(next[1], expected2, epsilon = 1e-12);
    }

    #[test]
    fn test_winner_take_all_with_bias() {
        let params = ModelParams { b1: 1.0, b2: 0.5, ..ModelParams::noiseless() };
        let history = simulate(20.0, &params, &mut SeededNoise::default()).unwrap();
        let [h1, h2] = history.final_state().unwrap();
        assert!(h1 > h2);
        assert_eq!(history.dominant(), Some(Population::First));
    }

    #[test]
    fn test_invalid_duration() {
        let mut noise = SeededNoise::default();
        for duration in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = simulate(duration, &ModelParams::default(), &mut noise);
            assert!(
                matches!(result, Err(NeuromassError::InvalidParameter { name: "duration", .. })),
                "duration={} should be rejected",
                duration
            );
        }
    }

    #[test]
    fn test_invalid_dt() {
        let params = ModelParams { dt: 0.0, ..Default::default() };
        let result = simulate(1.0, &params, &mut SeededNoise::default());
        assert!(matches!(result, Err(NeuromassError::InvalidParameter { name: "dt", .. })));
    }

    #[test]
    fn test_duration_shorter_than_step() {
        let params = ModelParams { dt: 0.1, ..Default::default() };
        let result = simulate(0.05, &params, &mut SeededNoise::default());
        assert!(matches!(result, Err(NeuromassError::TooFewSteps { .. })));
    }

    #[test]
    fn test_step_count_overflow_rejected() {
        let params = ModelParams { dt: 1e-300, ..Default::default() };
        let integrator = Integrator::new(params);

        for duration in [1e300, f64::MAX] {
            assert!(
                matches!(integrator.step_count(duration), Err(NeuromassError::TooManySteps { .. })),
                "duration={} should be rejected",
                duration
            );
        }
        let result = integrator.simulate(1e300, &mut SeededNoise::default());
        assert!(matches!(result, Err(NeuromassError::TooManySteps { max: MAX_STEPS, .. })));
    }

    #[test]
    fn test_negative_sigma_mirrors_positive() {
        let positive = Integrator::new(ModelParams { sigma: 0.5, ..Default::default() });
        let negative = Integrator::new(ModelParams { sigma: -0.5, ..Default::default() });

        let mut draws = SeededNoise::from_seed(REFERENCE_SEED);
        let mut z = vec![0.0; 400];
        draws.fill_normal(&mut z);
        let flipped: Vec<f64> = z.iter().map(|v| -v).collect();

        let a = positive.simulate(2.0, &mut ScriptedNoise::new(z)).unwrap();
        let b = negative.simulate(2.0, &mut ScriptedNoise::new(flipped)).unwrap();

        assert!(b.columns().all(|[h1, h2]| h1.is_finite() && h2.is_finite()));
        for t in 0..a.len() {
            let [a1, a2] = a.column(t);
            let [b1, b2] = b.column(t);
            assert_relative_eq!(a1, b1, epsilon = 1e-12);
            assert_relative_eq!(a2, b2, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_bounded_under_heavy_drive() {
        let params = ModelParams { b1: 50.0, b2: -50.0, sigma: 2.0, ..Default::default() };
        let history = simulate(10.0, &params, &mut SeededNoise::default()).unwrap();
        assert!(history.columns().all(|[h1, h2]| h1.is_finite() && h2.is_finite()));
    }
}
