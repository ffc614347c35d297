//! Integration tests for swfir-core.
//!
//! Builds synthetic project buffers with known contents and checks that the
//! parser recovers exactly what was written.

use swfir_core::fixture::{ProjectWriter, log_grid};
use swfir_core::{Error, POINTS_PER_CURVE, ProfileSource, parse, parse_with_source};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A hand-written curve: linear frequency steps and a repeating gain pattern.
fn curve(base_hz: f32, step_hz: f32, pattern: &[f32]) -> (Vec<f32>, Vec<f32>) {
    let freqs = (0..POINTS_PER_CURVE)
        .map(|i| base_hz + step_hz * i as f32)
        .collect();
    let values = (0..POINTS_PER_CURVE)
        .map(|i| pattern[i % pattern.len()])
        .collect();
    (freqs, values)
}

// ===========================================================================
// End-to-end stereo file
// ===========================================================================

#[test]
fn recovers_two_channels_with_exact_values() {
    let (fl_freqs, fl_corr) = curve(20.0, 56.25, &[-1.5, 0.25, 3.0, -6.125]);
    let (_, fl_meas) = curve(20.0, 56.25, &[80.5, 81.0, 79.75]);
    let (fr_freqs, fr_corr) = curve(25.0, 50.0, &[2.5, -0.5]);
    let (_, fr_meas) = curve(25.0, 50.0, &[78.0, 77.25, 76.5, 75.0, 74.125]);

    let data = ProjectWriter::new()
        .channel("FL", 0, 0.0)
        .channel("FR", 1, 0.0)
        .correction_block(&fl_freqs, &fl_corr)
        .measurement_block(&fl_freqs, &fl_meas)
        .correction_block(&fr_freqs, &fr_corr)
        .measurement_block(&fr_freqs, &fr_meas)
        .finish();

    let profile = parse(&data, true).expect("synthetic stereo project parses");
    let channels = profile.channels();
    assert_eq!(channels.len(), 2);

    assert_eq!(channels[0].name, "FL");
    assert_eq!(channels[0].index, 0);
    assert_eq!(channels[0].group, "Main");
    assert_eq!(channels[0].frequencies, fl_freqs);
    assert_eq!(channels[0].correction_db, fl_corr);
    assert_eq!(channels[0].measurement_db, fl_meas);

    assert_eq!(channels[1].name, "FR");
    assert_eq!(channels[1].index, 1);
    assert_eq!(channels[1].frequencies, fr_freqs);
    assert_eq!(channels[1].correction_db, fr_corr);
    assert_eq!(channels[1].measurement_db, fr_meas);
}

#[test]
fn opaque_tail_is_ignored() {
    let grid = log_grid();
    let gains: Vec<f32> = (0..POINTS_PER_CURVE).map(|i| i as f32 * 0.01).collect();
    let tail: Vec<u8> = (0..200u32).map(|i| (i * 37 % 251) as u8).collect();

    let data = ProjectWriter::new()
        .channel("FL", 0, 0.0)
        .channel("FR", 1, 0.0)
        .correction_block(&grid, &gains)
        .measurement_block(&grid, &gains)
        .correction_block(&grid, &gains)
        .measurement_block(&grid, &gains)
        .bytes(&tail)
        .finish();

    let profile = parse(&data, true).unwrap();
    assert_eq!(profile.channels()[1].measurement_db, gains);
}

#[test]
fn delay_is_recorded_as_magnitude() {
    let grid = log_grid();
    let flat = vec![0.0; POINTS_PER_CURVE];
    let data = ProjectWriter::new()
        .channel("FL", 0, -0.3125)
        .channel("FR", 1, 0.0625)
        .correction_block(&grid, &flat)
        .correction_block(&grid, &flat)
        .finish();

    let profile = parse(&data, true).unwrap();
    assert_eq!(profile.channels()[0].delay_ms, 0.3125);
    assert_eq!(profile.channels()[1].delay_ms, 0.0625);
}

#[test]
fn source_label_travels_with_profile() {
    let grid = log_grid();
    let flat = vec![0.0; POINTS_PER_CURVE];
    let data = ProjectWriter::new()
        .channel("FL", 0, 0.0)
        .channel("FR", 1, 0.0)
        .correction_block(&grid, &flat)
        .finish();

    let profile = parse_with_source(&data, "studio.swproj", true).unwrap();
    assert_eq!(profile.source(), &ProfileSource::from("studio.swproj"));
    assert_eq!(parse(&data, true).unwrap().source(), &ProfileSource::memory());
}

// ===========================================================================
// Failure modes
// ===========================================================================

#[test]
fn no_header_fails_before_anything_else() {
    let grid = log_grid();
    let data = ProjectWriter::without_header()
        .channel("FL", 0, 0.0)
        .correction_block(&grid, &grid)
        .finish();
    assert_eq!(parse(&data, false), Err(Error::MissingHeader));
}

#[test]
fn header_but_no_blocks() {
    let data = ProjectWriter::new()
        .channel("FL", 0, 0.0)
        .channel("FR", 1, 0.0)
        .finish();
    assert_eq!(parse(&data, true), Err(Error::NoDataBlocks));
}

#[test]
fn surround_layout_rejected_only_when_stereo_required() {
    let grid = log_grid();
    let flat = vec![0.0; POINTS_PER_CURVE];
    let mut writer = ProjectWriter::new();
    for (i, name) in ["FL", "FR", "C"].iter().enumerate() {
        writer = writer.channel(name, i as i64, 0.0);
    }
    for _ in 0..3 {
        writer = writer.correction_block(&grid, &flat).measurement_block(&grid, &flat);
    }
    let data = writer.finish();

    assert_eq!(
        parse(&data, true),
        Err(Error::ChannelCountMismatch {
            expected: 2,
            found: 3
        })
    );
    let profile = parse(&data, false).unwrap();
    let names: Vec<_> = profile.channels().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["FL", "FR", "C"]);
}
