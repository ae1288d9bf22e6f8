//! Error types for the flexwave-spectral crate.

/// Error type for estimators that combine two coefficient tensors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SpectralError {
    /// Returned when the two tensors were built with different angle counts.
    #[error("angle count mismatch: {first} vs {second}")]
    AngleMismatch {
        /// Angles in the first tensor.
        first: usize,
        /// Angles in the second tensor.
        second: usize,
    },

    /// Returned when the two tensors were built with different central wavenumbers.
    #[error("k0 mismatch: {first} vs {second}")]
    K0Mismatch {
        /// `k0` of the first tensor.
        first: f64,
        /// `k0` of the second tensor.
        second: f64,
    },

    /// Returned when the two tensors cover different grids.
    #[error("tensor shape mismatch: {first:?} vs {second:?}")]
    ShapeMismatch {
        /// `[nx, ny, na, ns]` of the first tensor.
        first: [usize; 4],
        /// `[nx, ny, na, ns]` of the second tensor.
        second: [usize; 4],
    },

    /// Returned when the two tensors use different scale sets.
    #[error("scale sets differ between the two tensors")]
    ScaleMismatch,
}
