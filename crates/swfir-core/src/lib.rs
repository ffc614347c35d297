//! swfir Core - calibration curve model and `.swproj` parser
//!
//! This crate recovers loudspeaker calibration curves from the undocumented binary
//! project format written by Sonarworks SoundID Reference.
//!
//! # Core Abstractions
//!
//! ## Curve Model
//!
//! - [`Channel`] - One loudspeaker channel: identity, delay, and the 355-point
//!   correction and measurement curves
//! - [`Profile`] - Immutable parse result, channels sorted by index
//!
//! ## Parser
//!
//! - [`parse`] / [`parse_with_source`] - All-or-nothing decode of a whole byte buffer
//! - [`scanner`] - Explicit-cursor metadata scanner with byte-level resynchronization
//! - [`fixture`] - Encoder for synthetic projects (tests and tooling)
//!
//! # Format Overview
//!
//! The file starts with an XML-like preamble terminated by `</ProjectHeader>`,
//! followed by binary structures located purely by marker scanning:
//!
//! - Data blocks: `u32 355`, `u32 7`, then 355 points of 2 or 3 little-endian `f32`
//! - Metadata runs: anchored at the ASCII literal `ChannelDelayMs`, a sequence of
//!   `key\0 u32 len value` records
//!
//! Anything past the last consumed structure is opaque and never read.
//!
//! # Example
//!
//! ```rust,no_run
//! let bytes = std::fs::read("studio.swproj").unwrap();
//! let profile = swfir_core::parse(&bytes, true).unwrap();
//!
//! for channel in profile.channels() {
//!     println!("{} (index {}): {} points", channel.name, channel.index, channel.len());
//! }
//! ```

mod error;
mod model;
mod parser;

pub mod fixture;
pub mod scanner;

pub use error::{Error, Result};
pub use model::{Channel, Profile, ProfileSource};
pub use parser::{
    BLOCK_TYPE_TAG, DATA_BLOCK_MARKER, DELAY_ANCHOR, DataBlock, HEADER_TERMINATOR,
    POINTS_PER_CURVE, STEREO_CHANNELS, parse, parse_with_source,
};
