//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};
use swfir_config::ExportConfig;
use swfir_core::{Channel, Profile};

/// Options that override the export configuration file.
#[derive(Args, Debug, Default)]
pub struct ConfigOverrides {
    /// Configuration file (default: the user config file, if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output sample rate in Hz
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Impulse response length in samples (power of two)
    #[arg(long)]
    pub ir_length: Option<usize>,

    /// Preamp headroom in dB
    #[arg(long, value_name = "DB")]
    pub headroom: Option<f64>,

    /// Accept projects with any number of channels
    #[arg(long)]
    pub any_layout: bool,
}

impl ConfigOverrides {
    /// Load the configuration, apply overrides and validate the result.
    pub fn resolve(&self) -> anyhow::Result<ExportConfig> {
        let (mut config, source) = ExportConfig::discover(self.config.as_deref())
            .context("failed to load configuration")?;
        match &source {
            Some(path) => tracing::debug!(path = %path.display(), "loaded configuration"),
            None => tracing::debug!("using default configuration"),
        }

        if let Some(sample_rate) = self.sample_rate {
            config.sample_rate = sample_rate;
        }
        if let Some(ir_length) = self.ir_length {
            config.ir_length = ir_length;
        }
        if let Some(headroom) = self.headroom {
            config.headroom_db = headroom;
        }
        if self.any_layout {
            config.require_stereo = false;
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

/// Load and parse a project file.
pub fn load_profile(path: &Path, require_stereo: bool) -> anyhow::Result<Profile> {
    swfir_io::read_profile(path, require_stereo)
        .with_context(|| format!("failed to load {}", path.display()))
}

/// File name without extension, used to name exported artifacts.
pub fn project_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "profile".to_string())
}

/// Print a per-channel summary of a profile.
pub fn print_channels(channels: &[Channel]) {
    println!("Parsed {} channels:", channels.len());
    for ch in channels {
        println!("  {} (index={}, group={})", ch.name, ch.index, ch.group);
        println!("    Delay:      {:.4} ms", ch.delay_ms);
        if let Some((lo, hi)) = ch.frequency_range() {
            println!("    Freq range: {lo:.0} - {hi:.0} Hz");
        }
        if let Some((lo, hi)) = ch.correction_range() {
            println!("    Correction: {lo:.1} to {hi:.1} dB");
        }
    }
}
