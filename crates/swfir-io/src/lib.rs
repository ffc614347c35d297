//! File I/O for swfir.
//!
//! This crate provides:
//!
//! - **Project loading**: [`read_profile`] reads a whole `.swproj` file and parses it
//! - **WAV sink**: [`write_pcm_wav`], [`write_impulse_response`] and
//!   [`write_multichannel`] for 16-bit PCM impulse response files
//! - **Text exporters**: [`export_csv`] and [`export_graphic_eq`] for curve tables
//!   and EQ APO `GraphicEQ` presets
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use swfir_dsp::{SynthConfig, synthesize_channels};
//! use swfir_io::{read_profile, write_multichannel};
//!
//! let profile = read_profile("studio.swproj", true)?;
//! let irs = synthesize_channels(profile.channels(), SynthConfig::default())?;
//! write_multichannel("correction_multichannel.wav", &irs)?;
//! # Ok::<(), swfir_io::Error>(())
//! ```

mod export;
mod profile;
mod wav;

pub use export::{
    GRAPHIC_EQ_HEADER, csv_file_name, export_csv, export_graphic_eq, graphic_eq_file_name,
    write_csv, write_graphic_eq,
};
pub use profile::read_profile;
pub use wav::{
    BITS_PER_SAMPLE, MULTICHANNEL_WAV_NAME, WavInfo, channel_wav_name, channel_wav_names, read_pcm_wav,
    read_wav_info, write_impulse_response, write_multichannel, write_pcm_wav,
};

use std::path::PathBuf;

/// Error types for swfir file I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// File system error on a specific path.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The project file could not be parsed.
    #[error(transparent)]
    Parse(#[from] swfir_core::Error),

    /// Synthesis or curve validation failed.
    #[error(transparent)]
    Dsp(#[from] swfir_dsp::Error),

    /// Impulse responses handed to a multi-channel writer disagree on shape.
    #[error("cannot write WAV: {0}")]
    Layout(String),
}

impl Error {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience result type for swfir file I/O.
pub type Result<T> = std::result::Result<T, Error>;
