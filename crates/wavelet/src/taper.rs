//! Edge tapering ahead of zero padding.

use std::f64::consts::PI;

use ndarray::{Array2, ArrayView2};

/// Tapers a field toward its mean over `width` samples at every edge.
///
/// Each node is mapped to `mean + wx[i] * wy[j] * (value - mean)`, with `wx`
/// and `wy` cosine ramps rising from 0 at the border to 1 after `width`
/// samples. Tapering toward the mean rather than toward zero leaves a
/// constant field untouched. The width is clamped to half of each axis;
/// `width == 0` returns an unmodified copy.
pub fn taper(field: ArrayView2<'_, f64>, width: usize) -> Array2<f64> {
    let (nx, ny) = field.dim();
    if width == 0 || field.is_empty() {
        return field.to_owned();
    }
    let mean = field.sum() / field.len() as f64;
    let wx = edge_weights(nx, width);
    let wy = edge_weights(ny, width);

    Array2::from_shape_fn((nx, ny), |(i, j)| {
        mean + wx[i] * wy[j] * (field[[i, j]] - mean)
    })
}

/// Cosine ramp weights for an axis of `n` samples.
fn edge_weights(n: usize, width: usize) -> Vec<f64> {
    let w = width.min(n / 2);
    let mut weights = vec![1.0; n];
    for i in 0..w {
        let ramp = 0.5 * (1.0 - (PI * i as f64 / w as f64).cos());
        weights[i] = ramp;
        weights[n - 1 - i] = ramp;
    }
    weights
}
