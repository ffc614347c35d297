//! Log-frequency interpolation of sparse calibration curves.
//!
//! Calibration grids are roughly log-spaced, so gains are interpolated
//! linearly in `ln(f)` rather than in `f`. Outside the grid the curve is held
//! flat at its boundary value.
//!
//! # Example
//!
//! ```rust
//! use swfir_dsp::interpolate::LogFrequencyCurve;
//!
//! let freqs = [100.0, 1000.0, 10000.0];
//! let gains = [0.0, 6.0, -6.0];
//! let curve = LogFrequencyCurve::new(&freqs, &gains).unwrap();
//!
//! assert_eq!(curve.gain_at(1000.0), 6.0);
//! assert_eq!(curve.gain_at(20.0), 0.0); // held below the grid
//! // Halfway between 100 Hz and 1 kHz in log-frequency
//! assert!((curve.gain_at(316.227766) - 3.0).abs() < 1e-6);
//! ```

use crate::error::{Error, Result};

/// Minimum number of points an interpolated curve needs.
pub const MIN_CURVE_POINTS: usize = 2;

/// Interpolate `gains_db` at `target_hz` on an ascending `freqs` grid.
///
/// Exact at every grid point. Below the first frequency returns the first
/// gain, above the last returns the last gain. A degenerate bracket (equal
/// frequencies) returns the lower gain.
///
/// Callers are expected to have validated the curve with [`validate_curve`];
/// indexing panics on an empty or mismatched curve.
pub fn interpolate(freqs: &[f32], gains_db: &[f32], target_hz: f64) -> f64 {
    let last = freqs.len() - 1;
    if target_hz <= f64::from(freqs[0]) {
        return f64::from(gains_db[0]);
    }
    if target_hz >= f64::from(freqs[last]) {
        return f64::from(gains_db[last]);
    }

    // First index with freqs[hi] > target; freqs[0] <= target guarantees hi >= 1.
    let hi = freqs.partition_point(|&f| f64::from(f) <= target_hz);
    let lo = hi - 1;

    let f_lo = f64::from(freqs[lo]);
    let f_hi = f64::from(freqs[hi]);
    let g_lo = f64::from(gains_db[lo]);
    let g_hi = f64::from(gains_db[hi]);

    let t = if f_hi != f_lo {
        (target_hz.ln() - f_lo.ln()) / (f_hi.ln() - f_lo.ln())
    } else {
        0.0
    };
    g_lo + t * (g_hi - g_lo)
}

/// Check that a curve can be interpolated.
///
/// Requires at least [`MIN_CURVE_POINTS`] points, equal lengths, finite
/// values, strictly positive frequencies (they pass through `ln`) and a
/// non-descending grid.
pub fn validate_curve(freqs: &[f32], gains_db: &[f32]) -> Result<()> {
    if freqs.len() < MIN_CURVE_POINTS {
        return Err(Error::InvalidCurve(format!(
            "need at least {MIN_CURVE_POINTS} points, got {}",
            freqs.len()
        )));
    }
    if freqs.len() != gains_db.len() {
        return Err(Error::InvalidCurve(format!(
            "{} frequencies but {} gains",
            freqs.len(),
            gains_db.len()
        )));
    }
    if let Some(i) = freqs.iter().position(|f| !f.is_finite() || *f <= 0.0) {
        return Err(Error::InvalidCurve(format!(
            "frequency {} at point {i} is not a positive finite value",
            freqs[i]
        )));
    }
    if let Some(i) = gains_db.iter().position(|g| !g.is_finite()) {
        return Err(Error::InvalidCurve(format!(
            "gain at point {i} is not finite"
        )));
    }
    if let Some(i) = freqs.windows(2).position(|w| w[1] < w[0]) {
        return Err(Error::InvalidCurve(format!(
            "frequencies descend at point {}",
            i + 1
        )));
    }
    Ok(())
}

/// A validated frequency/gain curve borrowed from a channel.
#[derive(Debug, Clone, Copy)]
pub struct LogFrequencyCurve<'a> {
    freqs: &'a [f32],
    gains_db: &'a [f32],
}

impl<'a> LogFrequencyCurve<'a> {
    /// Validate and wrap a curve.
    pub fn new(freqs: &'a [f32], gains_db: &'a [f32]) -> Result<Self> {
        validate_curve(freqs, gains_db)?;
        Ok(Self { freqs, gains_db })
    }

    /// Gain in dB at `freq_hz`.
    pub fn gain_at(&self, freq_hz: f64) -> f64 {
        interpolate(self.freqs, self.gains_db, freq_hz)
    }

    /// Resample onto `count` bins spaced `spacing_hz` apart, starting at 0 Hz.
    pub fn resample_linear(&self, count: usize, spacing_hz: f64) -> Vec<f64> {
        (0..count)
            .map(|k| self.gain_at(k as f64 * spacing_hz))
            .collect()
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.freqs.len()
    }

    /// Always false: validation rejects short curves.
    pub fn is_empty(&self) -> bool {
        self.freqs.is_empty()
    }
}
