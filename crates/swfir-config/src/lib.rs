//! Export configuration for swfir.
//!
//! Settings that turn a parsed project into correction artifacts: synthesis
//! parameters, preamp headroom, the stereo requirement and which artifacts to
//! write. Stored as TOML.
//!
//! # Features
//!
//! - **Export config**: Load and save [`ExportConfig`] from TOML files, partial files allowed
//! - **Validation**: Range checks that report every bad field at once
//! - **Paths**: Platform-specific config directory and lookup order
//!
//! # Example
//!
//! ```rust,no_run
//! use swfir_config::{ExportConfig, user_config_file};
//!
//! let config = ExportConfig::default().with_ir_length(8192);
//! config.validate().unwrap();
//! config.save(user_config_file()).unwrap();
//!
//! let (loaded, from) = ExportConfig::discover(None).unwrap();
//! assert_eq!(loaded.ir_length, 8192);
//! assert!(from.is_some());
//! ```

mod error;
mod export_config;

/// Platform-specific configuration paths.
pub mod paths;

/// Export configuration validation.
pub mod validation;

pub use error::ConfigError;
pub use export_config::ExportConfig;
pub use paths::{
    CONFIG_FILE_NAME, ensure_user_config_dir, resolve_config_file, user_config_dir,
    user_config_file,
};
pub use validation::{
    MAX_SAMPLE_RATE, MIN_SAMPLE_RATE, ValidationError, ValidationResult, validate_headroom,
    validate_ir_length, validate_sample_rate,
};
