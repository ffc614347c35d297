//! Export configuration file format and operations.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use swfir_dsp::{DEFAULT_HEADROOM_DB, DEFAULT_IR_LENGTH, DEFAULT_SAMPLE_RATE, SynthConfig};

use crate::error::ConfigError;
use crate::paths;
use crate::validation::{
    Collector, ValidationResult, validate_headroom, validate_ir_length, validate_sample_rate,
};

/// Settings for turning a project into correction artifacts.
///
/// Every field has a default, so a partial file is valid.
///
/// # TOML Format
///
/// ```toml
/// sample_rate = 48000
/// ir_length = 4096
/// headroom_db = 1.0
/// require_stereo = true
///
/// write_csv = true
/// write_graphic_eq = true
/// write_channel_wavs = true
/// write_multichannel_wav = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,

    /// Impulse response length in samples, a power of two.
    pub ir_length: usize,

    /// Extra attenuation added on top of the peak boost for the preamp, in dB.
    pub headroom_db: f64,

    /// Reject projects that do not hold exactly two channels.
    pub require_stereo: bool,

    /// Write the correction table as CSV.
    pub write_csv: bool,

    /// Write an EQ APO `GraphicEQ` preset.
    pub write_graphic_eq: bool,

    /// Write one mono impulse response WAV per channel.
    pub write_channel_wavs: bool,

    /// Write one interleaved impulse response WAV holding every channel.
    pub write_multichannel_wav: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            ir_length: DEFAULT_IR_LENGTH,
            headroom_db: DEFAULT_HEADROOM_DB,
            require_stereo: true,
            write_csv: true,
            write_graphic_eq: true,
            write_channel_wavs: true,
            write_multichannel_wav: true,
        }
    }
}

impl ExportConfig {
    /// Set the output sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the impulse response length.
    pub fn with_ir_length(mut self, ir_length: usize) -> Self {
        self.ir_length = ir_length;
        self
    }

    /// Set the preamp headroom.
    pub fn with_headroom_db(mut self, headroom_db: f64) -> Self {
        self.headroom_db = headroom_db;
        self
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load the configuration to use for a run.
    ///
    /// Reads `explicit` when given, else the user config file when it exists,
    /// else returns defaults. Also returns the file that was read, if any.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        match paths::resolve_config_file(explicit, &paths::user_config_file()) {
            Some(path) => Ok((Self::load(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }

    /// Load a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field, reporting all problems at once.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut c = Collector::default();
        c.absorb(validate_sample_rate(self.sample_rate));
        c.absorb(validate_ir_length(self.ir_length));
        c.absorb(validate_headroom(self.headroom_db));
        c.finish()
    }

    /// Synthesis parameters for this configuration.
    pub fn synth_config(&self) -> SynthConfig {
        SynthConfig {
            sample_rate: self.sample_rate,
            ir_length: self.ir_length,
        }
    }

    /// Whether any artifact would be written.
    pub fn writes_anything(&self) -> bool {
        self.write_csv || self.write_graphic_eq || self.write_channel_wavs || self.write_multichannel_wav
    }
}
