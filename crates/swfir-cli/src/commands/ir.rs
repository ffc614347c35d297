//! Single-channel impulse response synthesis.

use super::common::{ConfigOverrides, load_profile};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use swfir_dsp::{ImpulseResponse, MinimumPhaseSynth};
use swfir_io::{channel_wav_name, write_impulse_response};

#[derive(Args)]
pub struct IrArgs {
    /// Input .swproj file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Channel name (case-insensitive)
    #[arg(short, long)]
    channel: String,

    /// Output WAV file (default: <channel>_correction.wav)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[command(flatten)]
    overrides: ConfigOverrides,
}

pub fn run(args: IrArgs) -> anyhow::Result<()> {
    let config = args.overrides.resolve()?;
    let profile = load_profile(&args.input, config.require_stereo)?;

    let Some(channel) = profile.channel(&args.channel) else {
        let names: Vec<&str> = profile.channels().iter().map(|c| c.name.as_str()).collect();
        anyhow::bail!(
            "Channel '{}' not found. Available: {}",
            args.channel,
            names.join(", ")
        );
    };

    let synth_config = config.synth_config();
    let synth = MinimumPhaseSynth::new(synth_config)?;
    let samples = synth
        .synthesize(&channel.frequencies, &channel.correction_db)
        .with_context(|| format!("synthesis failed for channel {}", channel.name))?;
    let ir = ImpulseResponse {
        channel: channel.name.clone(),
        sample_rate: synth_config.sample_rate,
        samples,
    };

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(channel_wav_name(&channel.name)));
    write_impulse_response(&output, &ir)?;

    println!(
        "{}: {} taps at {} Hz -> {}",
        ir.channel,
        ir.len(),
        ir.sample_rate,
        output.display()
    );
    Ok(())
}
