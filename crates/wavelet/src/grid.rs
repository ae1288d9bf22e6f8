//! Validated gridded field.

use ndarray::{Array2, ArrayView2};

use crate::error::WaveletError;

/// Minimum number of nodes along each axis.
const MIN_NODES: usize = 2;

/// A regularly sampled scalar field of finite `f64` values.
///
/// Axis 0 runs along x (`nx` nodes, spacing `dx`), axis 1 along y (`ny`
/// nodes, spacing `dy`). Spacings are in metres.
///
/// Guarantees:
/// - `nx >= 2` and `ny >= 2`
/// - all values are finite
/// - `dx` and `dy` are finite and strictly positive
///
/// # Example
///
/// ```ignore
/// use flexwave_wavelet::Grid;
///
/// let grid = Grid::from_shape_vec(3, 2, vec![0.0; 6], 1000.0, 1000.0)?;
/// assert_eq!(grid.nx(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct Grid {
    data: Array2<f64>,
    dx: f64,
    dy: f64,
}

impl Grid {
    /// Creates a new `Grid` after validating the data and spacing.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`WaveletError::GridTooSmall`] | fewer than 2 nodes on either axis |
    /// | [`WaveletError::NonFiniteData`] | any value is NaN or infinite |
    /// | [`WaveletError::InvalidSpacing`] | `dx` or `dy` non-finite or `<= 0` |
    pub fn new(data: Array2<f64>, dx: f64, dy: f64) -> Result<Self, WaveletError> {
        let (nx, ny) = data.dim();
        if nx < MIN_NODES || ny < MIN_NODES {
            return Err(WaveletError::GridTooSmall {
                nx,
                ny,
                min: MIN_NODES,
            });
        }
        if !data.iter().all(|v| v.is_finite()) {
            return Err(WaveletError::NonFiniteData);
        }
        if !(dx.is_finite() && dx > 0.0 && dy.is_finite() && dy > 0.0) {
            return Err(WaveletError::InvalidSpacing { dx, dy });
        }
        Ok(Self { data, dx, dy })
    }

    /// Creates a `Grid` from a flat buffer laid out x-major (`values[i * ny + j]`).
    ///
    /// # Errors
    ///
    /// [`WaveletError::BufferShape`] when `values.len() != nx * ny`, otherwise
    /// the same conditions as [`Grid::new`].
    pub fn from_shape_vec(
        nx: usize,
        ny: usize,
        values: Vec<f64>,
        dx: f64,
        dy: f64,
    ) -> Result<Self, WaveletError> {
        let len = values.len();
        let data = Array2::from_shape_vec((nx, ny), values)
            .map_err(|_| WaveletError::BufferShape { len, nx, ny })?;
        Self::new(data, dx, dy)
    }

    /// Returns a read-only view of the field.
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// Number of nodes along x.
    pub fn nx(&self) -> usize {
        self.data.nrows()
    }

    /// Number of nodes along y.
    pub fn ny(&self) -> usize {
        self.data.ncols()
    }

    /// Sampling interval along x (metres).
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Sampling interval along y (metres).
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Arithmetic mean of the field.
    pub fn mean(&self) -> f64 {
        self.data.sum() / self.data.len() as f64
    }

    /// Returns `true` if `other` has the same shape and spacing.
    pub fn is_colocated(&self, other: &Grid) -> bool {
        self.data.dim() == other.data.dim() && self.dx == other.dx && self.dy == other.dy
    }
}

impl AsRef<Array2<f64>> for Grid {
    fn as_ref(&self) -> &Array2<f64> {
        &self.data
    }
}
