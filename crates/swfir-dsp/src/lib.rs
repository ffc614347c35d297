//! swfir DSP - From calibration curves to FIR taps
//!
//! Turns the sparse correction curves parsed by `swfir-core` into
//! minimum-phase FIR filters and 16-bit PCM:
//!
//! - [`fft`] - Pre-planned forward/inverse FFT pair
//! - [`interpolate`] - Linear-in-log-frequency curve interpolation
//! - [`min_phase`] - Cepstral minimum-phase impulse response synthesis
//! - [`preamp`] - Global anti-clipping preamp from the peak boost
//! - [`pcm`] - Peak-normalized 16-bit quantization
//! - [`batch`] - Parallel per-channel synthesis over a profile
//!
//! ## Example Workflow
//!
//! ```rust
//! use swfir_dsp::{SynthConfig, render_pcm, synthesize};
//!
//! let freqs = [20.0, 200.0, 2000.0, 20000.0];
//! let left = [0.0, 3.0, -2.0, 0.0];
//! let right = [0.0, -1.0, 1.5, -6.0];
//!
//! let config = SynthConfig::new(48000, 1024).unwrap();
//! let ir_l = synthesize(&freqs, &left, config).unwrap();
//! let ir_r = synthesize(&freqs, &right, config).unwrap();
//!
//! let pcm = render_pcm(&[ir_l, ir_r]);
//! assert_eq!(pcm.len(), 2 * 1024);
//! ```

mod error;

pub mod batch;
pub mod fft;
pub mod interpolate;
pub mod min_phase;
pub mod pcm;
pub mod preamp;

pub use batch::{ImpulseResponse, synthesize_channels};
pub use error::{Error, Result};
pub use fft::Fft;
pub use interpolate::{LogFrequencyCurve, interpolate, validate_curve};
pub use min_phase::{
    DEFAULT_IR_LENGTH, DEFAULT_SAMPLE_RATE, MAGNITUDE_FLOOR, MinimumPhaseSynth, SynthConfig,
    synthesize,
};
pub use pcm::{NORMALIZED_PEAK, PCM_FULL_SCALE, peak_amplitude, render_mono, render_pcm};
pub use preamp::{DEFAULT_HEADROOM_DB, channel_preamp_db, compute_preamp_db};
