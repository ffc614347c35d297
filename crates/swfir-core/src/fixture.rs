//! Encoder for synthetic `.swproj` buffers.
//!
//! Produces the subset of the format the parser reads: a preamble closed by
//! `</ProjectHeader>`, metadata runs, and data blocks. Useful for tests and
//! for reproducing parser issues without shipping customer files.
//!
//! ```rust
//! use swfir_core::fixture::{ProjectWriter, log_grid};
//!
//! let grid = log_grid();
//! let flat = vec![0.0; grid.len()];
//! let bytes = ProjectWriter::new()
//!     .channel("FL", 0, 0.0)
//!     .channel("FR", 1, 0.0)
//!     .correction_block(&grid, &flat)
//!     .measurement_block(&grid, &flat)
//!     .correction_block(&grid, &flat)
//!     .measurement_block(&grid, &flat)
//!     .finish();
//!
//! let profile = swfir_core::parse(&bytes, true).unwrap();
//! assert_eq!(profile.len(), 2);
//! ```

use crate::parser::{DATA_BLOCK_MARKER, POINTS_PER_CURVE};

const PREAMBLE: &[u8] =
    b"<?xml version=\"1.0\"?><ProjectHeader><Version>4</Version></ProjectHeader>";

/// 355 log-spaced frequencies from 20 Hz to 20 kHz.
pub fn log_grid() -> Vec<f32> {
    (0..POINTS_PER_CURVE)
        .map(|i| {
            let t = i as f64 / (POINTS_PER_CURVE - 1) as f64;
            (20.0 * 1000.0_f64.powf(t)) as f32
        })
        .collect()
}

/// Builder for a synthetic project buffer.
#[derive(Debug, Clone)]
pub struct ProjectWriter {
    buf: Vec<u8>,
}

impl Default for ProjectWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectWriter {
    /// Start a buffer with a valid preamble.
    pub fn new() -> Self {
        Self {
            buf: PREAMBLE.to_vec(),
        }
    }

    /// Start a buffer with no `</ProjectHeader>` terminator.
    pub fn without_header() -> Self {
        Self {
            buf: b"<?xml version=\"1.0\"?><Project>".to_vec(),
        }
    }

    /// Append a metadata run for a named channel.
    pub fn channel(self, name: &str, index: i64, delay_ms: f64) -> Self {
        let delay = format!("{delay_ms}");
        let index = index.to_string();
        self.raw_anchor(&[
            ("ChannelDelayMs", delay.as_str()),
            ("ChannelName", name),
            ("ChannelIndex", index.as_str()),
            ("ChannelGroup", "Main"),
        ])
    }

    /// Append arbitrary `key\0 len value` records.
    ///
    /// The run is only found by the parser if one key is `ChannelDelayMs`.
    pub fn raw_anchor(mut self, records: &[(&str, &str)]) -> Self {
        for (key, value) in records {
            self.buf.extend_from_slice(key.as_bytes());
            self.buf.push(0);
            self.buf
                .extend_from_slice(&(value.len() as u32).to_le_bytes());
            self.buf.extend_from_slice(value.as_bytes());
        }
        self
    }

    /// Append a 2-float-per-point block (frequency, correction).
    pub fn correction_block(self, frequencies: &[f32], gains_db: &[f32]) -> Self {
        self.block(frequencies, gains_db, None)
    }

    /// Append a 3-float-per-point block (frequency, measurement, extra).
    pub fn measurement_block(self, frequencies: &[f32], values_db: &[f32]) -> Self {
        self.block(frequencies, values_db, Some(0.0))
    }

    fn block(mut self, frequencies: &[f32], values: &[f32], extra: Option<f32>) -> Self {
        assert_eq!(frequencies.len(), POINTS_PER_CURVE, "frequency grid length");
        assert_eq!(values.len(), POINTS_PER_CURVE, "value curve length");
        self.buf.extend_from_slice(&DATA_BLOCK_MARKER);
        for (f, v) in frequencies.iter().zip(values) {
            self.buf.extend_from_slice(&f.to_le_bytes());
            self.buf.extend_from_slice(&v.to_le_bytes());
            if let Some(extra) = extra {
                self.buf.extend_from_slice(&extra.to_le_bytes());
            }
        }
        self
    }

    /// Append raw bytes, e.g. an opaque tail.
    pub fn bytes(mut self, raw: &[u8]) -> Self {
        self.buf.extend_from_slice(raw);
        self
    }

    /// The encoded buffer.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}
