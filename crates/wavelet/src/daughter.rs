//! Directional Morlet daughter wavelets in the Fourier domain.

use ndarray::Array2;
use num_complex::Complex64;

use crate::wavenumber::WavenumberArrays;

/// Evaluates one daughter wavelet over the full padded wavenumber grid.
///
/// `D(k) = scale * exp(-0.5 * ((scale*kx - k0*cos(angle))^2 + (scale*ky - k0*sin(angle))^2))`
///
/// The filter is a Gaussian centred on wavenumber `k0 / scale` in direction
/// `angle`, with width `1 / scale`. The `scale` prefactor keeps the energy of
/// the spatial wavelet independent of scale. `scale` must be in the inverse
/// units of the wavenumber arrays.
pub fn daughter_wavelet(
    wavenumbers: &WavenumberArrays,
    k0: f64,
    scale: f64,
    angle: f64,
) -> Array2<Complex64> {
    let (kx0, ky0) = (k0 * angle.cos(), k0 * angle.sin());
    let kx = wavenumbers.kx();
    let ky = wavenumbers.ky();

    // Separable Gaussian: one exponential per axis, then an outer product.
    let gx: Vec<f64> = kx
        .iter()
        .map(|&k| (-0.5 * (scale * k - kx0).powi(2)).exp())
        .collect();
    let gy: Vec<f64> = ky
        .iter()
        .map(|&k| (-0.5 * (scale * k - ky0).powi(2)).exp())
        .collect();

    Array2::from_shape_fn((kx.len(), ky.len()), |(i, j)| {
        Complex64::new(scale * gx[i] * gy[j], 0.0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn peak_index(d: &Array2<Complex64>) -> (usize, usize) {
        let mut best = ((0, 0), f64::MIN);
        for ((i, j), v) in d.indexed_iter() {
            if v.re > best.1 {
                best = ((i, j), v.re);
            }
        }
        best.0
    }

    #[test]
    fn shape_matches_grid() {
        let w = WavenumberArrays::new(32, 16, 1.0, 1.0);
        let d = daughter_wavelet(&w, 5.336, 4.0, 0.0);
        assert_eq!(d.dim(), (32, 16));
    }

    #[test]
    fn real_and_non_negative() {
        let w = WavenumberArrays::new(16, 16, 1.0, 1.0);
        let d = daughter_wavelet(&w, 5.336, 3.0, 0.7);
        for v in d.iter() {
            assert_eq!(v.im, 0.0);
            assert!(v.re >= 0.0);
        }
    }

    #[test]
    fn peak_on_positive_kx_for_zero_angle() {
        // Centre at k0/scale = 2 * dk along +x.
        let n = 64;
        let w = WavenumberArrays::new(n, n, 1.0, 1.0);
        let dk = 2.0 * PI / n as f64;
        let scale = 5.336 / (8.0 * dk);
        let d = daughter_wavelet(&w, 5.336, scale, 0.0);
        assert_eq!(peak_index(&d), (8, 0));
        assert_relative_eq!(d[[8, 0]].re, scale, max_relative = 1e-12);
    }

    #[test]
    fn peak_on_negative_ky_for_minus_half_pi() {
        let n = 64;
        let w = WavenumberArrays::new(n, n, 1.0, 1.0);
        let dk = 2.0 * PI / n as f64;
        let scale = 5.336 / (8.0 * dk);
        let d = daughter_wavelet(&w, 5.336, scale, -PI / 2.0);
        assert_eq!(peak_index(&d), (0, n - 8));
    }

    #[test]
    fn small_at_zero_wavenumber() {
        let w = WavenumberArrays::new(32, 32, 1.0, 1.0);
        let scale = 4.0;
        let d = daughter_wavelet(&w, 5.336, scale, 0.3);
        let expected = scale * (-0.5 * 5.336_f64.powi(2)).exp();
        assert_relative_eq!(d[[0, 0]].re, expected, max_relative = 1e-12);
        assert!(d[[0, 0]].re < 1e-5 * scale);
    }
}
