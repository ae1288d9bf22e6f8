//! Error types for the flexwave-wavelet crate.

/// Error type for all fallible operations in the flexwave-wavelet crate.
///
/// Every variant is a precondition violation detected at the entry of the
/// offending component; the transform never produces partial output.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WaveletError {
    /// Returned when a grid has fewer than the minimum number of nodes per axis.
    #[error("grid too small: got {nx}x{ny}, need at least {min} nodes per axis")]
    GridTooSmall {
        /// Number of nodes along x.
        nx: usize,
        /// Number of nodes along y.
        ny: usize,
        /// Minimum nodes per axis.
        min: usize,
    },

    /// Returned when the input grid contains non-finite values (NaN or infinity).
    #[error("grid contains non-finite values")]
    NonFiniteData,

    /// Returned when a sampling interval is non-finite or non-positive.
    #[error("invalid grid spacing: dx = {dx}, dy = {dy} (must be finite and > 0)")]
    InvalidSpacing {
        /// Sampling interval along x (metres).
        dx: f64,
        /// Sampling interval along y (metres).
        dy: f64,
    },

    /// Returned when a flat value buffer does not match the requested shape.
    #[error("buffer of length {len} cannot be shaped as {nx}x{ny}")]
    BufferShape {
        /// Buffer length.
        len: usize,
        /// Requested nodes along x.
        nx: usize,
        /// Requested nodes along y.
        ny: usize,
    },

    /// Returned when a scale set has no wavenumbers.
    #[error("scale set is empty")]
    EmptyScaleSet,

    /// Returned when a wavenumber in a scale set is non-finite or non-positive.
    #[error("wavenumber {index} is {value}, must be finite and > 0")]
    InvalidWavenumber {
        /// Position in the scale set.
        index: usize,
        /// Offending value (rad/m).
        value: f64,
    },

    /// Returned when the padded FFT domain is smaller than the grid.
    #[error("padded size {nnx}x{nny} is smaller than grid {nx}x{ny}")]
    PaddingTooSmall {
        /// Requested padded nodes along x.
        nnx: usize,
        /// Requested padded nodes along y.
        nny: usize,
        /// Grid nodes along x.
        nx: usize,
        /// Grid nodes along y.
        ny: usize,
    },

    /// Returned when a coefficient tensor does not agree with its scale set or config.
    #[error("coefficient tensor shape {got:?} does not match expected {expected:?}")]
    TensorShape {
        /// Expected `[nx, ny, na, ns]`.
        expected: [usize; 4],
        /// Actual tensor shape.
        got: [usize; 4],
    },

    /// Returned when configuration parameters are invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
