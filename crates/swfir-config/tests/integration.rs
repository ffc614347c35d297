//! Integration tests for swfir-config.
//!
//! These tests verify end-to-end functionality across modules.

use swfir_config::{ConfigError, ExportConfig, ValidationError};
use swfir_dsp::{MinimumPhaseSynth, SynthConfig};
use tempfile::TempDir;

/// A saved configuration loads back and drives the synthesizer.
#[test]
fn test_saved_config_drives_synthesis() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("swfir.toml");

    let config = ExportConfig::default()
        .with_sample_rate(44100)
        .with_ir_length(256);
    config.save(&path).unwrap();

    let (loaded, source) = ExportConfig::discover(Some(path.as_path())).unwrap();
    assert_eq!(source.as_deref(), Some(path.as_path()));
    assert_eq!(loaded, config);
    loaded.validate().unwrap();

    let synth = MinimumPhaseSynth::new(loaded.synth_config()).unwrap();
    assert_eq!(
        synth.config(),
        SynthConfig {
            sample_rate: 44100,
            ir_length: 256,
        }
    );

    let freqs = [20.0, 1000.0, 20000.0];
    let gains = [0.0, 0.0, 0.0];
    let ir = synth.synthesize(&freqs, &gains).unwrap();
    assert_eq!(ir.len(), 256);
}

/// A partial file keeps defaults for everything it leaves out.
#[test]
fn test_partial_file_inherits_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("partial.toml");
    std::fs::write(&path, "headroom_db = 3.0\nwrite_csv = false\n").unwrap();

    let config = ExportConfig::load(&path).unwrap();
    let defaults = ExportConfig::default();
    assert_eq!(config.headroom_db, 3.0);
    assert!(!config.write_csv);
    assert_eq!(config.sample_rate, defaults.sample_rate);
    assert_eq!(config.ir_length, defaults.ir_length);
    assert!(config.writes_anything());
}

/// An explicit path that does not exist is an error, not a silent default.
#[test]
fn test_missing_explicit_file_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");

    let err = ExportConfig::discover(Some(path.as_path())).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

/// Every bad field shows up in one validation error.
#[test]
fn test_validation_reports_every_field() {
    let toml = "sample_rate = 1000\nir_length = 100\nheadroom_db = -2.0\n";
    let config = ExportConfig::from_toml(toml).unwrap();

    match config.validate() {
        Err(ValidationError::Multiple(errors)) => assert_eq!(errors.len(), 3),
        other => panic!("expected three errors, got {other:?}"),
    }
}

/// Malformed TOML surfaces as a parse error.
#[test]
fn test_malformed_toml() {
    let err = ExportConfig::from_toml("ir_length = \"long\"").unwrap_err();
    assert!(matches!(err, ConfigError::TomlParse(_)));
}
