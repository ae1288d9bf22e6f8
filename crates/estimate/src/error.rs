//! Error types for the flexwave-estimate crate.

/// Error type for flexural parameter estimation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EstimateError {
    /// Returned when observation arrays differ in length.
    #[error("length mismatch for '{name}': expected {expected}, got {got}")]
    LengthMismatch {
        /// Name of the offending array.
        name: &'static str,
        /// Number of wavenumbers.
        expected: usize,
        /// Length of the offending array.
        got: usize,
    },

    /// Returned when admittance and coherence spectra use different wavenumbers.
    #[error("admittance and coherence spectra have different wavenumbers")]
    WavenumberMismatch,

    /// Returned when no wavenumber has a finite value with a finite, positive error.
    #[error("no usable observations for {mode} fit")]
    NoUsableData {
        /// Fit mode that was requested.
        mode: &'static str,
    },

    /// Returned when the configuration fails validation.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of failed checks.
        count: usize,
        /// Semicolon-separated descriptions.
        details: String,
    },
}
