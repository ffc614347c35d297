//! Error types for project parsing.

use thiserror::Error;

/// Errors that can occur while parsing a project buffer.
///
/// Parsing is all-or-nothing: any of these aborts before a [`crate::Profile`]
/// is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The buffer lacks the `</ProjectHeader>` terminator.
    #[error("not a valid .swproj file (no ProjectHeader)")]
    MissingHeader,

    /// No 355-point / type-7 data-block marker anywhere in the buffer.
    #[error("could not find curve data blocks")]
    NoDataBlocks,

    /// Stereo validation was requested but the channel count differs.
    #[error("only stereo profiles are supported; got {found} channels")]
    ChannelCountMismatch {
        /// Channel count required by the caller.
        expected: usize,
        /// Channel count recovered from the file.
        found: usize,
    },

    /// A data block runs past the end of the buffer, or is too short to hold
    /// frequency/value pairs.
    #[error("data block at offset {offset} is truncated: needs {needed} bytes, {available} available")]
    TruncatedBlock {
        /// Byte offset of the block marker.
        offset: usize,
        /// Bytes required to decode every point.
        needed: usize,
        /// Bytes left in the buffer after the marker.
        available: usize,
    },

    /// A recognized metadata value could not be interpreted.
    #[error("invalid value '{value}' for metadata key '{key}'")]
    InvalidMetadata {
        /// Metadata key, e.g. `ChannelIndex`.
        key: &'static str,
        /// Raw decoded value.
        value: String,
    },
}

/// Convenience result type for parsing.
pub type Result<T> = std::result::Result<T, Error>;
