//! Integration tests for swfir-dsp.
//!
//! Checks the FFT synthesis path against a direct O(N²) DFT rendition of the
//! same cepstral algorithm, then exercises the public pipeline end to end on
//! realistic 355-point calibration grids.

use rustfft::num_complex::Complex64;
use std::f64::consts::PI;

use swfir_core::fixture::log_grid;
use swfir_core::Channel;
use swfir_dsp::{
    MinimumPhaseSynth, PCM_FULL_SCALE, SynthConfig, channel_preamp_db, render_pcm, synthesize,
    synthesize_channels,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Direct DFT; `sign = -1` forward, `+1` inverse (unscaled).
fn dft(input: &[Complex64], sign: f64) -> Vec<Complex64> {
    let n = input.len();
    (0..n)
        .map(|k| {
            input
                .iter()
                .enumerate()
                .map(|(t, x)| {
                    let angle = sign * 2.0 * PI * (k * t % n) as f64 / n as f64;
                    x * Complex64::new(angle.cos(), angle.sin())
                })
                .sum()
        })
        .collect()
}

/// Minimum-phase synthesis using only direct DFTs and index arithmetic.
///
/// The mirrored log spectrum and the causal fold are built by index here,
/// independent of `swfir_dsp::min_phase`.
fn oracle_synthesize(bin_gains_db: &[f64]) -> Vec<f64> {
    let half = bin_gains_db.len();
    let n = 2 * (half - 1);
    let scale = 1.0 / n as f64;

    let log_mag: Vec<f64> = bin_gains_db
        .iter()
        .map(|g| 10.0_f64.powf(g / 20.0).max(1e-10).ln())
        .collect();
    let spectrum: Vec<Complex64> = (0..n)
        .map(|k| {
            let bin = if k < half { k } else { n - k };
            Complex64::new(log_mag[bin], 0.0)
        })
        .collect();

    let cepstrum: Vec<f64> = dft(&spectrum, 1.0).iter().map(|c| c.re * scale).collect();
    let folded: Vec<Complex64> = (0..n)
        .map(|t| {
            let w = if t == 0 || t == n / 2 {
                1.0
            } else if t < n / 2 {
                2.0
            } else {
                0.0
            };
            Complex64::new(w * cepstrum[t], 0.0)
        })
        .collect();
    let min_phase: Vec<Complex64> = dft(&folded, -1.0).iter().map(|c| c.exp()).collect();
    dft(&min_phase, 1.0).iter().map(|c| c.re * scale).collect()
}

/// A smooth correction curve with boosts and cuts on the calibration grid.
fn correction_curve(depth_db: f32) -> (Vec<f32>, Vec<f32>) {
    let freqs = log_grid();
    let gains = freqs
        .iter()
        .map(|f| depth_db * (f.log10() * 2.7).sin())
        .collect();
    (freqs, gains)
}

fn channel(name: &str, index: i64, depth_db: f32) -> Channel {
    let (freqs, gains) = correction_curve(depth_db);
    let mut ch = Channel::new(name, index);
    ch.frequencies = freqs;
    ch.correction_db = gains;
    ch
}

// ===========================================================================
// Reference DFT agreement
// ===========================================================================

#[test]
fn fft_path_matches_direct_dft() {
    let config = SynthConfig::new(48000, 64).unwrap();
    let synth = MinimumPhaseSynth::new(config).unwrap();
    let (freqs, gains) = correction_curve(9.0);

    let bins = synth.bin_gains_db(&freqs, &gains).unwrap();
    let fast = synth.synthesize_bins(&bins).unwrap();
    let slow = oracle_synthesize(&bins);

    assert_eq!(fast.len(), slow.len());
    for (i, (a, b)) in fast.iter().zip(&slow).enumerate() {
        assert!((a - b).abs() < 1e-6, "tap {i}: fft {a} vs dft {b}");
    }
}

#[test]
fn oracle_agrees_on_deep_cuts() {
    let config = SynthConfig::new(44100, 64).unwrap();
    let synth = MinimumPhaseSynth::new(config).unwrap();
    let bins: Vec<f64> = (0..config.bin_count())
        .map(|k| if k % 5 == 0 { -60.0 } else { 3.0 })
        .collect();

    let fast = synth.synthesize_bins(&bins).unwrap();
    let slow = oracle_synthesize(&bins);
    for (a, b) in fast.iter().zip(&slow) {
        assert!((a - b).abs() < 1e-6);
    }
}

// ===========================================================================
// Synthesis properties
// ===========================================================================

#[test]
fn flat_correction_is_unit_impulse() {
    let freqs = log_grid();
    let gains = vec![0.0f32; freqs.len()];
    let ir = synthesize(&freqs, &gains, SynthConfig::default()).unwrap();

    assert_eq!(ir.len(), 4096);
    assert!((ir[0] - 1.0).abs() < 1e-3);
    assert!(ir[1..].iter().all(|x| x.abs() < 1e-3));
}

#[test]
fn response_magnitude_follows_target() {
    let config = SynthConfig::new(48000, 1024).unwrap();
    let synth = MinimumPhaseSynth::new(config).unwrap();
    let (freqs, gains) = correction_curve(12.0);

    let bins = synth.bin_gains_db(&freqs, &gains).unwrap();
    let ir = synth.synthesize_bins(&bins).unwrap();

    let mut buffer: Vec<Complex64> = ir.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    let mut planner = rustfft::FftPlanner::new();
    planner.plan_fft_forward(buffer.len()).process(&mut buffer);

    for (k, gain_db) in bins.iter().enumerate() {
        let target = 10.0_f64.powf(gain_db / 20.0);
        let actual = buffer[k].norm();
        assert!(
            (actual - target).abs() <= 1e-6 * target.max(1.0),
            "bin {k}: |H| {actual} vs target {target}"
        );
    }
}

#[test]
fn response_is_front_loaded() {
    let (freqs, gains) = correction_curve(10.0);
    let ir = synthesize(&freqs, &gains, SynthConfig::default()).unwrap();

    let total: f64 = ir.iter().map(|x| x * x).sum();
    let head: f64 = ir[..ir.len() / 4].iter().map(|x| x * x).sum();
    assert!(head / total > 0.9, "energy in first quarter {}", head / total);
}

// ===========================================================================
// Preamp and PCM
// ===========================================================================

#[test]
fn preamp_uses_global_peak() {
    let mut left = Channel::new("L", 0);
    left.correction_db = vec![-1.0, 2.3, 0.0];
    let mut right = Channel::new("R", 1);
    right.correction_db = vec![1.5, 3.0, -4.0];
    assert_eq!(channel_preamp_db(&[left, right], 1.0), -4.0);

    let mut quiet_l = Channel::new("L", 0);
    quiet_l.correction_db = vec![-3.0, -1.0];
    let mut quiet_r = Channel::new("R", 1);
    quiet_r.correction_db = vec![-0.5, 0.0];
    assert_eq!(channel_preamp_db(&[quiet_l, quiet_r], 1.0), 0.0);
}

#[test]
fn pcm_normalizes_to_shared_peak() {
    let pcm = render_pcm(&[vec![0.5, -2.0, 1.0], vec![0.25, 0.0, -0.1]]);
    assert_eq!(pcm.len(), 6);
    assert_eq!(pcm[2], -31129);
    assert!(pcm.iter().all(|s| s.unsigned_abs() <= PCM_FULL_SCALE as u16));
    assert_eq!(pcm.iter().map(|s| s.unsigned_abs()).max(), Some(31129));
}

// ===========================================================================
// Batch synthesis
// ===========================================================================

#[test]
fn parallel_batch_matches_serial() {
    let channels = [channel("L", 0, 6.0), channel("R", 1, -4.0), channel("C", 2, 2.0)];
    let config = SynthConfig::new(48000, 2048).unwrap();

    let batch = synthesize_channels(&channels, config).unwrap();
    let synth = MinimumPhaseSynth::new(config).unwrap();

    assert_eq!(batch.len(), channels.len());
    for (ir, ch) in batch.iter().zip(&channels) {
        assert_eq!(ir.channel, ch.name);
        let serial = synth.synthesize(&ch.frequencies, &ch.correction_db).unwrap();
        for (a, b) in ir.samples.iter().zip(&serial) {
            assert!((a - b).abs() < 1e-12);
        }
    }
}

#[test]
fn stereo_pipeline_renders_interleaved_pcm() {
    let channels = [channel("L", 0, 6.0), channel("R", 1, -3.0)];
    let config = SynthConfig::new(44100, 512).unwrap();
    let irs = synthesize_channels(&channels, config).unwrap();

    let pcm = render_pcm(&irs);
    assert_eq!(pcm.len(), 2 * 512);
    assert!(pcm[0] != 0 || pcm[1] != 0);
}
