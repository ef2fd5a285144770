//! Gain Function
//!
//! Piecewise-linear saturating nonlinearity mapping raw population
//! activity to an effective output in [0, 1].
//!
//! ```text
//! g(x) = 0   x <= 0
//!        x   0 < x < 1
//!        1   x >= 1
//! ```

/// Rectify-and-saturate gain
///
/// Total over all reals. NaN falls through both comparisons and saturates to 1.
#[inline]
pub fn gain(x: f64) -> f64 {
    if x <= 0.0 {
        0.0
    } else if x < 1.0 {
        x
    } else {
        1.0
    }
}
