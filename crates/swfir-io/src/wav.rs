//! 16-bit PCM WAV reading and writing.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::collections::HashSet;
use std::path::Path;
use swfir_core::Channel;
use swfir_dsp::{ImpulseResponse, render_mono, render_pcm};

/// Bit depth of every file this crate writes.
pub const BITS_PER_SAMPLE: u16 = 16;

/// File name of the interleaved all-channel impulse response.
pub const MULTICHANNEL_WAV_NAME: &str = "correction_multichannel.wav";

/// Lowercase file stem for a channel name.
///
/// Anything outside `[a-z0-9_-]` becomes `_`, so the stem is always a single
/// relative path component whatever the project file contains.
fn channel_file_stem(channel: &str) -> String {
    let stem: String = channel
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '_' | '-' => c,
            'A'..='Z' => c.to_ascii_lowercase(),
            _ => '_',
        })
        .collect();
    if stem.is_empty() {
        "channel".to_string()
    } else {
        stem
    }
}

/// File name of a channel's mono impulse response.
pub fn channel_wav_name(channel: &str) -> String {
    format!("{}_correction.wav", channel_file_stem(channel))
}

/// Distinct mono impulse response file names for `channels`, in order.
///
/// Channels whose stems collide (same name at different indices, or names
/// differing only in case or punctuation) get their index appended; a numeric
/// suffix settles anything that still clashes.
pub fn channel_wav_names(channels: &[Channel]) -> Vec<String> {
    let stems: Vec<String> = channels.iter().map(|c| channel_file_stem(&c.name)).collect();
    let mut used = HashSet::new();

    stems
        .iter()
        .zip(channels)
        .map(|(stem, channel)| {
            let repeated = stems.iter().filter(|s| *s == stem).count() > 1;
            let base = if repeated {
                format!("{stem}_{}", channel.index)
            } else {
                stem.clone()
            };

            let mut name = base.clone();
            let mut suffix = 2;
            while !used.insert(name.clone()) {
                name = format!("{base}_{suffix}");
                suffix += 1;
            }
            format!("{name}_correction.wav")
        })
        .collect()
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavInfo {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Whether samples are integer PCM.
    pub is_pcm: bool,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
}

impl From<(hound::WavSpec, u32)> for WavInfo {
    fn from((spec, total_samples): (hound::WavSpec, u32)) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            is_pcm: spec.sample_format == SampleFormat::Int,
            num_frames: u64::from(total_samples) / u64::from(spec.channels.max(1)),
        }
    }
}

fn pcm_spec(channels: u16, sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    }
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    Ok(WavInfo::from((reader.spec(), reader.len())))
}

/// Read a 16-bit PCM file as interleaved samples.
///
/// Files with any other sample format fail with [`Error::Layout`].
pub fn read_pcm_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<i16>, WavInfo)> {
    let reader = WavReader::open(path)?;
    let info = WavInfo::from((reader.spec(), reader.len()));
    if !info.is_pcm || info.bits_per_sample != BITS_PER_SAMPLE {
        return Err(Error::Layout(format!(
            "expected {BITS_PER_SAMPLE}-bit PCM, found {} bits ({})",
            info.bits_per_sample,
            if info.is_pcm { "int" } else { "float" }
        )));
    }

    let samples = reader
        .into_samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((samples, info))
}

/// Write already-quantized interleaved samples as 16-bit PCM.
///
/// `samples.len()` must be a multiple of `channels`.
pub fn write_pcm_wav<P: AsRef<Path>>(
    path: P,
    samples: &[i16],
    channels: u16,
    sample_rate: u32,
) -> Result<()> {
    if channels == 0 || samples.len() % usize::from(channels) != 0 {
        return Err(Error::Layout(format!(
            "{} samples do not split into {channels} channels",
            samples.len()
        )));
    }

    let mut writer = WavWriter::create(path, pcm_spec(channels, sample_rate))?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Write one impulse response as a mono file normalized to its own peak.
pub fn write_impulse_response<P: AsRef<Path>>(path: P, ir: &ImpulseResponse) -> Result<()> {
    let pcm = render_mono(&ir.samples);
    write_pcm_wav(path, &pcm, 1, ir.sample_rate)
}

/// Write impulse responses as one interleaved file normalized to a shared peak.
///
/// Channel order follows `irs`; all responses must share a sample rate.
pub fn write_multichannel<P: AsRef<Path>>(path: P, irs: &[ImpulseResponse]) -> Result<()> {
    let Some(first) = irs.first() else {
        return Err(Error::Layout("no impulse responses to write".into()));
    };
    if let Some(odd) = irs.iter().find(|ir| ir.sample_rate != first.sample_rate) {
        return Err(Error::Layout(format!(
            "channel {} is at {} Hz but {} is at {} Hz",
            odd.channel, odd.sample_rate, first.channel, first.sample_rate
        )));
    }
    let channels = u16::try_from(irs.len())
        .map_err(|_| Error::Layout(format!("{} channels is too many", irs.len())))?;

    let pcm = render_pcm(irs);
    write_pcm_wav(path, &pcm, channels, first.sample_rate)
}
