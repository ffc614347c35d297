//! `.swproj` buffer parsing: anchors, data blocks, and channel assembly.

use crate::error::{Error, Result};
use crate::model::{Channel, Profile, ProfileSource};
use crate::scanner::{ChannelMetadata, find, find_all, next_boundary};

/// Points in every correction or measurement curve.
pub const POINTS_PER_CURVE: usize = 355;

/// Type tag following the point count in a data-block marker.
///
/// Its meaning is unknown; it is matched as an opaque constant only.
pub const BLOCK_TYPE_TAG: u32 = 7;

/// Data-block marker: `u32 355` then `u32 7`, little-endian.
pub const DATA_BLOCK_MARKER: [u8; 8] = [0x63, 0x01, 0x00, 0x00, 0x07, 0x00, 0x00, 0x00];

/// Literal closing the XML-like preamble.
pub const HEADER_TERMINATOR: &[u8] = b"</ProjectHeader>";

/// Literal anchoring each run of channel metadata.
pub const DELAY_ANCHOR: &[u8] = b"ChannelDelayMs";

/// Channel count enforced by stereo validation.
pub const STEREO_CHANNELS: usize = 2;

const MARKER_LEN: usize = DATA_BLOCK_MARKER.len();
const FLOAT_LEN: usize = 4;
const MIN_FLOATS_PER_POINT: usize = 2;

/// One decoded data block.
///
/// `values` holds the second float of each point: a correction gain for the
/// first block of a channel's pair, a measurement for the second.
#[derive(Debug, Clone, PartialEq)]
pub struct DataBlock {
    /// Byte offset of the block marker.
    pub offset: usize,
    /// Detected stride in floats (2 for correction, 3 for measurement blocks).
    pub floats_per_point: usize,
    /// First float of each point, in Hz.
    pub frequencies: Vec<f32>,
    /// Second float of each point, in dB.
    pub values: Vec<f32>,
}

impl DataBlock {
    /// Decode the block whose marker sits at `offset`, bounded by `end`.
    ///
    /// The stride is inferred from the space up to the next structural
    /// boundary, so 2-float and 3-float layouts decode without a schema.
    pub fn decode(data: &[u8], offset: usize, end: usize) -> Result<Self> {
        let float_start = offset + MARKER_LEN;
        let span = end.saturating_sub(float_start);
        let floats_per_point =
            ((span / FLOAT_LEN) as f64 / POINTS_PER_CURVE as f64).round() as usize;

        let available = data.len().saturating_sub(float_start);
        let stride = floats_per_point.max(MIN_FLOATS_PER_POINT) * FLOAT_LEN;
        // The last point only needs its frequency and value floats.
        let needed = (POINTS_PER_CURVE - 1) * stride + 2 * FLOAT_LEN;
        if floats_per_point < MIN_FLOATS_PER_POINT || needed > available {
            return Err(Error::TruncatedBlock {
                offset,
                needed,
                available,
            });
        }

        let mut frequencies = Vec::with_capacity(POINTS_PER_CURVE);
        let mut values = Vec::with_capacity(POINTS_PER_CURVE);
        for point in data[float_start..]
            .chunks(stride)
            .take(POINTS_PER_CURVE)
        {
            frequencies.push(read_f32_le(&point[..FLOAT_LEN]));
            values.push(read_f32_le(&point[FLOAT_LEN..2 * FLOAT_LEN]));
        }

        tracing::debug!(offset, floats_per_point, "decoded data block");
        Ok(Self {
            offset,
            floats_per_point,
            frequencies,
            values,
        })
    }
}

fn read_f32_le(bytes: &[u8]) -> f32 {
    f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Parse a complete project buffer.
///
/// With `require_stereo`, anything but exactly two channels fails with
/// [`Error::ChannelCountMismatch`].
pub fn parse(data: &[u8], require_stereo: bool) -> Result<Profile> {
    parse_with_source(data, ProfileSource::memory(), require_stereo)
}

/// Parse a complete project buffer, tagging the result with its origin.
pub fn parse_with_source(
    data: &[u8],
    source: impl Into<ProfileSource>,
    require_stereo: bool,
) -> Result<Profile> {
    if find(data, HEADER_TERMINATOR).is_none() {
        return Err(Error::MissingHeader);
    }

    let block_offsets = find_all(data, &DATA_BLOCK_MARKER);
    if block_offsets.is_empty() {
        return Err(Error::NoDataBlocks);
    }
    let anchors = find_all(data, DELAY_ANCHOR);

    let mut boundaries: Vec<usize> = block_offsets.iter().chain(&anchors).copied().collect();
    boundaries.sort_unstable();

    tracing::debug!(
        blocks = block_offsets.len(),
        anchors = anchors.len(),
        "located structural anchors"
    );

    let blocks = block_offsets
        .iter()
        .map(|&offset| {
            let end = next_boundary(&boundaries, offset + MARKER_LEN, data.len());
            DataBlock::decode(data, offset, end)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut channels = assemble_channels(data, &anchors, &boundaries)?;
    attach_blocks(&mut channels, blocks);

    if require_stereo && channels.len() != STEREO_CHANNELS {
        return Err(Error::ChannelCountMismatch {
            expected: STEREO_CHANNELS,
            found: channels.len(),
        });
    }

    Ok(Profile::new(source.into(), channels))
}

/// Build one channel per distinct `(name, index)` identity, sorted by index.
fn assemble_channels(data: &[u8], anchors: &[usize], boundaries: &[usize]) -> Result<Vec<Channel>> {
    let mut channels: Vec<Channel> = Vec::new();

    for (ordinal, &anchor) in anchors.iter().enumerate() {
        let end = next_boundary(boundaries, anchor, data.len());
        let meta = ChannelMetadata::scan(data, anchor, end);

        let name = meta
            .name
            .clone()
            .unwrap_or_else(|| format!("Channel_{ordinal}"));
        let index = match &meta.index {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| Error::InvalidMetadata {
                    key: "ChannelIndex",
                    value: raw.clone(),
                })?,
            None => ordinal as i64,
        };
        let delay = parse_delay(meta.delay_ms.as_deref())?;

        let pos = match channels
            .iter()
            .position(|c| c.name == name && c.index == index)
        {
            Some(pos) => pos,
            None => {
                let mut channel = Channel::new(name, index);
                channel.group = meta.group.clone().unwrap_or_default();
                channels.push(channel);
                channels.len() - 1
            }
        };
        if delay != 0.0 {
            channels[pos].delay_ms = delay.abs();
        }
    }

    // Stable: equal indices keep file order.
    channels.sort_by_key(|c| c.index);
    Ok(channels)
}

/// `ChannelDelayMs` as a float; absent, `0` and `-0` all mean "no delay".
fn parse_delay(raw: Option<&str>) -> Result<f64> {
    let raw = match raw {
        None | Some("0" | "-0") => return Ok(0.0),
        Some(raw) => raw,
    };
    match raw.trim().parse::<f64>() {
        Ok(delay) if delay.is_finite() => Ok(delay),
        _ => Err(Error::InvalidMetadata {
            key: "ChannelDelayMs",
            value: raw.to_string(),
        }),
    }
}

/// Hand out blocks in discovery order: `2i` is channel `i`'s correction,
/// `2i + 1` its measurement on the same frequency grid.
fn attach_blocks(channels: &mut [Channel], blocks: Vec<DataBlock>) {
    let expected = channels.len() * 2;
    if blocks.len() > expected {
        tracing::warn!(
            blocks = blocks.len(),
            channels = channels.len(),
            discarded = blocks.len() - expected,
            "more data blocks than channels; discarding the excess"
        );
    } else if blocks.len() < expected {
        tracing::warn!(
            blocks = blocks.len(),
            channels = channels.len(),
            "fewer data blocks than channels; some curves stay empty"
        );
    }

    let mut blocks = blocks.into_iter();
    for channel in channels.iter_mut() {
        if let Some(correction) = blocks.next() {
            channel.frequencies = correction.frequencies;
            channel.correction_db = correction.values;
        }
        if let Some(measurement) = blocks.next() {
            channel.measurement_db = measurement.values;
        }
    }
}
