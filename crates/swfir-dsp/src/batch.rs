//! Per-channel synthesis across a whole profile.
//!
//! Channels are independent, so they are mapped in parallel with rayon and
//! joined before returning; a failure on any channel fails the batch.

use crate::error::{Error, Result};
use crate::min_phase::{MinimumPhaseSynth, SynthConfig};
use rayon::prelude::*;
use swfir_core::Channel;

/// A synthesized impulse response tagged with its channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpulseResponse {
    /// Channel name the response was built from.
    pub channel: String,
    /// Sample rate the response was designed for, in Hz.
    pub sample_rate: u32,
    /// Filter taps.
    pub samples: Vec<f64>,
}

impl ImpulseResponse {
    /// Number of taps.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the response has no taps.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl AsRef<[f64]> for ImpulseResponse {
    fn as_ref(&self) -> &[f64] {
        &self.samples
    }
}

/// Synthesize every channel's correction curve, preserving channel order.
pub fn synthesize_channels(channels: &[Channel], config: SynthConfig) -> Result<Vec<ImpulseResponse>> {
    let synth = MinimumPhaseSynth::new(config)?;
    tracing::debug!(
        channels = channels.len(),
        ir_length = config.ir_length,
        sample_rate = config.sample_rate,
        "synthesizing impulse responses"
    );

    channels
        .par_iter()
        .map(|channel| {
            let samples = synth
                .synthesize(&channel.frequencies, &channel.correction_db)
                .map_err(|e| match e {
                    Error::InvalidCurve(reason) => {
                        Error::InvalidCurve(format!("channel {}: {reason}", channel.name))
                    }
                    other => other,
                })?;
            Ok(ImpulseResponse {
                channel: channel.name.clone(),
                sample_rate: config.sample_rate,
                samples,
            })
        })
        .collect()
}
