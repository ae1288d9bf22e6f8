//! 2D complex FFT and quadrant swap.
//!
//! Both directions are unnormalized: `inverse(forward(x)) == x * nnx * nny`.

use std::sync::Arc;

use ndarray::{Array2, Axis};
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};

/// Planned forward and inverse 2D transforms for one `nnx x nny` domain.
///
/// Plans are built once and shared read-only, so a single `Fft2` can serve
/// every scale/angle task of a transform in parallel.
#[derive(Clone)]
pub struct Fft2 {
    shape: (usize, usize),
    forward_x: Arc<dyn Fft<f64>>,
    forward_y: Arc<dyn Fft<f64>>,
    inverse_x: Arc<dyn Fft<f64>>,
    inverse_y: Arc<dyn Fft<f64>>,
}

impl Fft2 {
    /// Plans transforms for arrays of shape `(nnx, nny)`.
    pub fn new(nnx: usize, nny: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            shape: (nnx, nny),
            forward_x: planner.plan_fft_forward(nnx),
            forward_y: planner.plan_fft_forward(nny),
            inverse_x: planner.plan_fft_inverse(nnx),
            inverse_y: planner.plan_fft_inverse(nny),
        }
    }

    /// Domain shape `(nnx, nny)`.
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Forward transform in place.
    ///
    /// # Panics
    ///
    /// Panics if `data` does not have the planned shape.
    pub fn forward(&self, data: &mut Array2<Complex64>) {
        self.check_shape(data);
        transform_axis(data, Axis(0), self.forward_x.as_ref());
        transform_axis(data, Axis(1), self.forward_y.as_ref());
    }

    /// Inverse transform in place, without the `1 / (nnx * nny)` factor.
    ///
    /// # Panics
    ///
    /// Panics if `data` does not have the planned shape.
    pub fn inverse(&self, data: &mut Array2<Complex64>) {
        self.check_shape(data);
        transform_axis(data, Axis(0), self.inverse_x.as_ref());
        transform_axis(data, Axis(1), self.inverse_y.as_ref());
    }

    fn check_shape(&self, data: &Array2<Complex64>) {
        assert_eq!(
            data.dim(),
            self.shape,
            "Fft2: array shape does not match planned shape"
        );
    }
}

impl std::fmt::Debug for Fft2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fft2").field("shape", &self.shape).finish()
    }
}

/// Runs a 1D transform over every lane of `data` along `axis`.
///
/// Lanes along axis 0 are strided, so each lane is staged through a
/// contiguous buffer.
fn transform_axis(data: &mut Array2<Complex64>, axis: Axis, fft: &dyn Fft<f64>) {
    let mut buffer = vec![Complex64::default(); data.len_of(axis)];
    let mut scratch = vec![Complex64::default(); fft.get_inplace_scratch_len()];
    for mut lane in data.lanes_mut(axis) {
        for (b, v) in buffer.iter_mut().zip(lane.iter()) {
            *b = *v;
        }
        fft.process_with_scratch(&mut buffer, &mut scratch);
        for (v, b) in lane.iter_mut().zip(buffer.iter()) {
            *v = *b;
        }
    }
}

/// Swaps quadrants so the zero-lag / zero-wavenumber node moves to the centre.
///
/// Equivalent to `fftshift` over both axes: node `(i, j)` moves to
/// `((i + nx/2) % nx, (j + ny/2) % ny)`.
pub fn quadrant_swap<T: Clone>(data: &Array2<T>) -> Array2<T> {
    let (nx, ny) = data.dim();
    let (hx, hy) = (nx / 2, ny / 2);
    Array2::from_shape_fn((nx, ny), |(i, j)| {
        data[[(i + nx - hx) % nx, (j + ny - hy) % ny]].clone()
    })
}
