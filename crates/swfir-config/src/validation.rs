//! Export configuration validation.

use thiserror::Error;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A single field holds an unusable value.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// Description of what is wrong with the value.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Lowest accepted output sample rate in Hz.
pub const MIN_SAMPLE_RATE: u32 = 8000;

/// Highest accepted output sample rate in Hz.
pub const MAX_SAMPLE_RATE: u32 = 384_000;

/// Collects field errors and folds them into one [`ValidationError`].
#[derive(Debug, Default)]
pub(crate) struct Collector {
    errors: Vec<ValidationError>,
}

impl Collector {
    pub(crate) fn check(&mut self, ok: bool, field: &'static str, reason: impl FnOnce() -> String) {
        if !ok {
            self.errors.push(ValidationError::InvalidField {
                field,
                reason: reason(),
            });
        }
    }

    pub(crate) fn absorb(&mut self, result: ValidationResult<()>) {
        if let Err(e) = result {
            self.errors.push(e);
        }
    }

    pub(crate) fn finish(mut self) -> ValidationResult<()> {
        match self.errors.len() {
            0 => Ok(()),
            1 => Err(self.errors.remove(0)),
            _ => Err(ValidationError::Multiple(self.errors)),
        }
    }
}

/// Check an output sample rate.
pub fn validate_sample_rate(sample_rate: u32) -> ValidationResult<()> {
    let mut c = Collector::default();
    c.check(
        (MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&sample_rate),
        "sample_rate",
        || format!("{sample_rate} Hz is outside [{MIN_SAMPLE_RATE}, {MAX_SAMPLE_RATE}]"),
    );
    c.finish()
}

/// Check an impulse response length.
pub fn validate_ir_length(ir_length: usize) -> ValidationResult<()> {
    let min = swfir_dsp::min_phase::MIN_IR_LENGTH;
    let mut c = Collector::default();
    c.check(
        ir_length >= min && ir_length.is_power_of_two(),
        "ir_length",
        || format!("{ir_length} is not a power of two >= {min}"),
    );
    c.finish()
}

/// Check a preamp headroom in dB.
pub fn validate_headroom(headroom_db: f64) -> ValidationResult<()> {
    let mut c = Collector::default();
    c.check(
        headroom_db.is_finite() && headroom_db >= 0.0,
        "headroom_db",
        || format!("{headroom_db} is not a finite, non-negative value"),
    );
    c.finish()
}
