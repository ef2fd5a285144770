//! State History - dense 2×N trajectory matrix
//!
//! Row 0 is the first population, row 1 the second. Columns are time
//! steps on the implicit grid `t_i = i * dt`. The matrix is allocated
//! up front, filled left to right by the integrator and read-only once
//! handed back to the caller.

use serde::{Deserialize, Serialize};

/// The two competing populations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Population {
    /// Row 0
    First,
    /// Row 1
    Second,
}

impl Population {
    /// Both populations in row order
    pub const ALL: [Population; 2] = [Population::First, Population::Second];

    /// Row index in the history matrix
    pub fn index(&self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    /// The competing population
    pub fn other(&self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }

    /// Legend label
    pub fn label(&self) -> &'static str {
        match self {
            Self::First => "first population",
            Self::Second => "second population",
        }
    }
}

/// Population activity over time
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    /// Step size the history was produced with (s)
    dt: f64,
    /// One row per population, `len()` samples each
    rows: [Vec<f64>; 2],
}

impl StateHistory {
    /// Zero-filled history with `steps` columns
    pub(crate) fn zeros(steps: usize, dt: f64) -> Self {
        Self {
            dt,
            rows: [vec![0.0; steps], vec![0.0; steps]],
        }
    }

    /// Write column `t`
    pub(crate) fn set_column(&mut self, t: usize, state: [f64; 2]) {
        self.rows[0][t] = state[0];
        self.rows[1][t] = state[1];
    }

    /// Number of columns (time steps)
    pub fn len(&self) -> usize {
        self.rows[0].len()
    }

    /// True when there are no columns
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Always 2
    pub fn population_count(&self) -> usize {
        self.rows.len()
    }

    /// Step size (s)
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Activity trace of one population
    pub fn row(&self, population: Population) -> &[f64] {
        &self.rows[population.index()]
    }

    /// Both populations at step `t`
    ///
    /// # Panics
    ///
    /// Panics if `t >= len()`.
    pub fn column(&self, t: usize) -> [f64; 2] {
        [self.rows[0][t], self.rows[1][t]]
    }

    /// Both populations at step `t`, or `None` past the end
    pub fn get(&self, t: usize) -> Option<[f64; 2]> {
        (t < self.len()).then(|| self.column(t))
    }

    /// Iterate columns in time order
    pub fn columns(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.rows[0]
            .iter()
            .zip(self.rows[1].iter())
            .map(|(&h1, &h2)| [h1, h2])
    }

    /// Last column
    pub fn final_state(&self) -> Option<[f64; 2]> {
        self.len().checked_sub(1).map(|t| self.column(t))
    }

    /// Time of step `t` (s)
    pub fn time_at(&self, t: usize) -> f64 {
        t as f64 * self.dt
    }

    /// Time grid aligned with the columns: `0, dt, 2dt, ...`
    pub fn time_grid(&self) -> Vec<f64> {
        (0..self.len()).map(|t| self.time_at(t)).collect()
    }

    /// Simulated span covered by the grid, `len() * dt`
    pub fn duration(&self) -> f64 {
        self.len() as f64 * self.dt
    }

    /// Mean activity of one population over the whole run
    pub fn mean(&self, population: Population) -> f64 {
        let row = self.row(population);
        if row.is_empty() {
            return 0.0;
        }
        row.iter().sum::<f64>() / row.len() as f64
    }

    /// Population with the higher mean activity, `None` on a tie
    pub fn dominant(&self) -> Option<Population> {
        let first = self.mean(Population::First);
        let second = self.mean(Population::Second);
        if first > second {
            Some(Population::First)
        } else if second > first {
            Some(Population::Second)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_history() -> StateHistory {
        let mut history = StateHistory::zeros(4, 0.5);
        history.set_column(1, [0.1, 0.2]);
        history.set_column(2, [0.3, 0.1]);
        history.set_column(3, [0.8, -0.2]);
        history
    }

    #[test]
    fn test_zeros_shape() {
        let history = StateHistory::zeros(10, 0.1);
        assert_eq!(history.len(), 10);
        assert_eq!(history.population_count(), 2);
        assert!(history.columns().all(|c| c == [0.0, 0.0]));
    }

    #[test]
    fn test_column_and_row_access() {
        let history = sample_history();
        assert_eq!(history.column(2), [0.3, 0.1]);
        assert_eq!(history.row(Population::Second), &[0.0, 0.2, 0.1, -0.2]);
        assert_eq!(history.get(4), None);
        assert_eq!(history.final_state(), Some([0.8, -0.2]));
    }

    #[test]
    fn test_time_grid() {
        let history = sample_history();
        assert_eq!(history.time_grid(), vec![0.0, 0.5, 1.0, 1.5]);
        assert_eq!(history.duration(), 2.0);
    }

    #[test]
    fn test_mean_and_dominant() {
        let history = sample_history();
        assert!((history.mean(Population::First) - 0.3).abs() < 1e-12);
        assert!((history.mean(Population::Second) - 0.025).abs() < 1e-12);
        assert_eq!(history.dominant(), Some(Population::First));

        let flat = StateHistory::zeros(3, 0.1);
        assert_eq!(flat.dominant(), None);
    }

    #[test]
    fn test_population_labels() {
        assert_eq!(Population::First.label(), "first population");
        assert_eq!(Population::Second.label(), "second population");
        assert_eq!(Population::First.other(), Population::Second);
        assert_eq!(Population::ALL.map(|p| p.index()), [0, 1]);
    }

    #[test]
    fn test_history_serialization() {
        let history = sample_history();
        let json = serde_json::to_string(&history).unwrap();
        let restored: StateHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, history);
    }
}
