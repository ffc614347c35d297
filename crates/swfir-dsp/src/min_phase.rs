//! Cepstral minimum-phase FIR synthesis.
//!
//! Turns a sparse frequency/gain curve into a causal impulse response whose
//! magnitude follows the curve and whose phase is the minimum-phase solution
//! for that magnitude.
//!
//! # Algorithm
//!
//! Homomorphic spectral factorization on an `N`-point grid:
//!
//! 1. Interpolate the curve onto `N/2 + 1` bins from DC to Nyquist
//! 2. Convert dB to linear magnitude, floor at [`MAGNITUDE_FLOOR`], take `ln`
//! 3. Mirror into a full, even-symmetric `N`-point log spectrum
//! 4. Real cepstrum = IFFT of the log spectrum
//! 5. Fold the cepstrum onto positive quefrency: keep `c[0]` and `c[N/2]`,
//!    double `c[1..N/2]`, zero the rest
//! 6. FFT of the folded cepstrum gives `ln|H| + j·φ_min`
//! 7. Exponentiate per bin, IFFT, keep the real part
//!
//! The real part of step 6 is exactly the even part of the folded cepstrum,
//! so the result's magnitude equals the target curve up to rounding.
//!
//! # Example
//!
//! ```rust
//! use swfir_dsp::min_phase::{MinimumPhaseSynth, SynthConfig};
//!
//! let freqs = [20.0, 1000.0, 20000.0];
//! let gains = [0.0, 0.0, 0.0];
//!
//! let synth = MinimumPhaseSynth::new(SynthConfig::default()).unwrap();
//! let ir = synth.synthesize(&freqs, &gains).unwrap();
//!
//! // A flat curve is a unit impulse
//! assert_eq!(ir.len(), 4096);
//! assert!((ir[0] - 1.0).abs() < 1e-9);
//! ```

use crate::error::{Error, Result};
use crate::fft::Fft;
use crate::interpolate::LogFrequencyCurve;
use rustfft::num_complex::Complex64;

/// Default output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 48000;

/// Default impulse response length in samples.
pub const DEFAULT_IR_LENGTH: usize = 4096;

/// Smallest IR length with distinct DC and Nyquist bins.
pub const MIN_IR_LENGTH: usize = 2;

/// Linear magnitude floor applied before the logarithm.
pub const MAGNITUDE_FLOOR: f64 = 1e-10;

/// Synthesis parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Impulse response length, a power of two.
    pub ir_length: usize,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            ir_length: DEFAULT_IR_LENGTH,
        }
    }
}

impl SynthConfig {
    /// Create a validated config.
    pub fn new(sample_rate: u32, ir_length: usize) -> Result<Self> {
        let config = Self {
            sample_rate,
            ir_length,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the sample rate is non-zero and the length a power of two.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(Error::InvalidConfig("sample rate must be non-zero".into()));
        }
        if self.ir_length < MIN_IR_LENGTH || !self.ir_length.is_power_of_two() {
            return Err(Error::InvalidConfig(format!(
                "IR length must be a power of two >= {MIN_IR_LENGTH}, got {}",
                self.ir_length
            )));
        }
        Ok(())
    }

    /// Number of bins from DC to Nyquist inclusive.
    pub fn bin_count(&self) -> usize {
        self.ir_length / 2 + 1
    }

    /// Spacing between bins in Hz.
    pub fn bin_spacing_hz(&self) -> f64 {
        f64::from(self.sample_rate) / self.ir_length as f64
    }
}

/// Build the full even-symmetric log-magnitude spectrum from DC..=Nyquist gains.
///
/// `bin_gains_db` holds `N/2 + 1` values; the result has `N` values, the
/// upper half mirroring bins `N/2 - 1` down to `1`.
pub fn log_magnitude_spectrum(bin_gains_db: &[f64]) -> Vec<f64> {
    let log_mag: Vec<f64> = bin_gains_db
        .iter()
        .map(|&g| 10.0_f64.powf(g / 20.0).max(MAGNITUDE_FLOOR).ln())
        .collect();

    let half = log_mag.len();
    let mut full = Vec::with_capacity(2 * half.saturating_sub(1));
    full.extend_from_slice(&log_mag);
    if half > 2 {
        full.extend(log_mag[1..half - 1].iter().rev());
    }
    full
}

/// Fold a real cepstrum onto positive quefrency in place.
pub fn apply_causal_window(cepstrum: &mut [f64]) {
    let n = cepstrum.len();
    if n < 2 {
        return;
    }
    let half = n / 2;
    for c in &mut cepstrum[1..half] {
        *c *= 2.0;
    }
    let zero_from = if n % 2 == 0 { half + 1 } else { half };
    for c in &mut cepstrum[zero_from..] {
        *c = 0.0;
    }
}

/// Minimum-phase synthesizer with a pre-planned FFT.
///
/// Reusable and shareable across threads; every call is a pure function of
/// its inputs and the config.
#[derive(Debug)]
pub struct MinimumPhaseSynth {
    config: SynthConfig,
    fft: Fft,
}

impl MinimumPhaseSynth {
    /// Plan a synthesizer for `config`.
    pub fn new(config: SynthConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            fft: Fft::new(config.ir_length),
        })
    }

    /// The synthesis parameters.
    pub fn config(&self) -> SynthConfig {
        self.config
    }

    /// Interpolate a curve onto the DC..=Nyquist bin grid, in dB.
    pub fn bin_gains_db(&self, freqs: &[f32], gains_db: &[f32]) -> Result<Vec<f64>> {
        let curve = LogFrequencyCurve::new(freqs, gains_db)?;
        let spacing = self.config.bin_spacing_hz();
        Ok(curve.resample_linear(self.config.bin_count(), spacing))
    }

    /// Synthesize an `ir_length`-sample minimum-phase impulse response.
    pub fn synthesize(&self, freqs: &[f32], gains_db: &[f32]) -> Result<Vec<f64>> {
        let bins = self.bin_gains_db(freqs, gains_db)?;
        self.synthesize_bins(&bins)
    }

    /// Synthesize from gains already sampled on the bin grid.
    pub fn synthesize_bins(&self, bin_gains_db: &[f64]) -> Result<Vec<f64>> {
        let expected = self.config.bin_count();
        if bin_gains_db.len() != expected {
            return Err(Error::InvalidCurve(format!(
                "expected {expected} bin gains, got {}",
                bin_gains_db.len()
            )));
        }

        let log_spectrum = log_magnitude_spectrum(bin_gains_db);

        let mut buffer: Vec<Complex64> = log_spectrum
            .iter()
            .map(|&x| Complex64::new(x, 0.0))
            .collect();
        self.fft.inverse_complex(&mut buffer);
        let mut cepstrum: Vec<f64> = buffer.iter().map(|c| c.re).collect();

        apply_causal_window(&mut cepstrum);

        let mut spectrum = self.fft.forward_real(&cepstrum);
        for bin in spectrum.iter_mut() {
            *bin = bin.exp();
        }
        self.fft.inverse_complex(&mut spectrum);

        Ok(spectrum
            .iter()
            .take(self.config.ir_length)
            .map(|c| c.re)
            .collect())
    }
}

/// One-shot synthesis; plans a fresh FFT for the call.
pub fn synthesize(freqs: &[f32], gains_db: &[f32], config: SynthConfig) -> Result<Vec<f64>> {
    MinimumPhaseSynth::new(config)?.synthesize(freqs, gains_db)
}
