//! Peak-normalized 16-bit PCM quantization.
//!
//! A stateless saturating quantizer: one global peak across all channels sets
//! the scale so the loudest sample lands at [`NORMALIZED_PEAK`] of full scale.
//! No dither, no noise shaping.

/// Largest magnitude a rendered sample may take.
pub const PCM_FULL_SCALE: i16 = 32767;

/// Fraction of full scale the global peak is normalized to.
pub const NORMALIZED_PEAK: f64 = 0.95;

/// Largest absolute sample across all channels, `0.0` when empty.
pub fn peak_amplitude<S: AsRef<[f64]>>(channels: &[S]) -> f64 {
    channels
        .iter()
        .flat_map(|c| c.as_ref().iter())
        .fold(0.0_f64, |peak, &s| peak.max(s.abs()))
}

fn quantize(sample: f64, scale: f64) -> i16 {
    let full = f64::from(PCM_FULL_SCALE);
    (sample * scale * full).round().clamp(-full, full) as i16
}

/// Render channels to interleaved 16-bit PCM with a shared peak.
///
/// Frames run to the longest channel; shorter channels are padded with
/// silence.
pub fn render_pcm<S: AsRef<[f64]>>(channels: &[S]) -> Vec<i16> {
    let peak = peak_amplitude(channels);
    let peak = if peak == 0.0 { 1.0 } else { peak };
    let scale = NORMALIZED_PEAK / peak;

    let frames = channels.iter().map(|c| c.as_ref().len()).max().unwrap_or(0);
    let mut out = Vec::with_capacity(frames * channels.len());
    for frame in 0..frames {
        for channel in channels {
            let sample = channel.as_ref().get(frame).copied().unwrap_or(0.0);
            out.push(quantize(sample, scale));
        }
    }
    out
}

/// Render a single channel with its own peak.
pub fn render_mono(samples: &[f64]) -> Vec<i16> {
    render_pcm(&[samples])
}
