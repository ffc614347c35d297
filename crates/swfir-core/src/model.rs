//! Curve model: calibration channels and the parsed profile.

use serde::Serialize;
use std::fmt;
use std::path::Path;

/// One loudspeaker channel's calibration data.
///
/// `frequencies`, `correction_db` and `measurement_db` share one grid: when a
/// curve is present it has exactly [`crate::POINTS_PER_CURVE`] points. A channel
/// whose data blocks were missing from the file keeps empty curves, and
/// `measurement_db` alone may be empty when the paired block was absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Channel {
    /// Display label, also the grouping key together with `index`.
    pub name: String,
    /// Ordering key assigned by the source file.
    pub index: i64,
    /// Free-form classification, may be empty.
    pub group: String,
    /// Acoustic delay compensation in milliseconds, always non-negative.
    pub delay_ms: f64,
    /// Grid frequencies in Hz, ascending.
    pub frequencies: Vec<f32>,
    /// Gain to apply in dB, aligned with `frequencies`.
    #[serde(rename = "correction_dB")]
    pub correction_db: Vec<f32>,
    /// Raw measured response in dB, aligned with `frequencies`.
    #[serde(rename = "measurement_dB")]
    pub measurement_db: Vec<f32>,
}

impl Channel {
    /// Create a channel with an identity and no curve data.
    pub fn new(name: impl Into<String>, index: i64) -> Self {
        Self {
            name: name.into(),
            index,
            group: String::new(),
            delay_ms: 0.0,
            frequencies: Vec::new(),
            correction_db: Vec::new(),
            measurement_db: Vec::new(),
        }
    }

    /// Number of grid points (0 when the channel carries no curves).
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Whether the channel carries no curve data.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Whether a measurement curve was paired with the correction curve.
    pub fn has_measurement(&self) -> bool {
        !self.measurement_db.is_empty()
    }

    /// Lowest and highest grid frequency in Hz.
    pub fn frequency_range(&self) -> Option<(f32, f32)> {
        Some((*self.frequencies.first()?, *self.frequencies.last()?))
    }

    /// Minimum and maximum correction gain in dB.
    pub fn correction_range(&self) -> Option<(f32, f32)> {
        min_max(&self.correction_db)
    }

    /// Peak correction gain in dB, `None` for an empty curve.
    pub fn max_correction_db(&self) -> Option<f32> {
        self.correction_range().map(|(_, max)| max)
    }
}

fn min_max(values: &[f32]) -> Option<(f32, f32)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

/// Opaque reference to where a profile came from.
///
/// The parser never interprets it; it only travels with the result for
/// display and for naming exported artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProfileSource(String);

impl ProfileSource {
    /// Source for a buffer that did not come from a file.
    pub fn memory() -> Self {
        Self("<memory>".to_string())
    }

    /// The source label.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Path> for ProfileSource {
    fn from(path: &Path) -> Self {
        Self(path.display().to_string())
    }
}

impl From<String> for ProfileSource {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl From<&str> for ProfileSource {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

impl fmt::Display for ProfileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The parse result: a source reference and its channels.
///
/// Channels are sorted ascending by index and unique by `(name, index)`.
/// A profile is only ever built whole by the parser and exposes no mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    source: ProfileSource,
    channels: Vec<Channel>,
}

impl Profile {
    pub(crate) fn new(source: ProfileSource, channels: Vec<Channel>) -> Self {
        Self { source, channels }
    }

    /// Where the profile was read from.
    pub fn source(&self) -> &ProfileSource {
        &self.source
    }

    /// Channels in ascending index order.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Number of channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether no channel metadata was found.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Find a channel by name, ignoring ASCII case.
    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}
