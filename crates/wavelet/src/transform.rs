//! Directional wavelet transform of a gridded field.

use ndarray::{Array2, Array4, ArrayView4, ArrayViewMut2, Axis, s};
use num_complex::Complex64;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::TransformConfig;
use crate::daughter::daughter_wavelet;
use crate::error::WaveletError;
use crate::fft::{Fft2, quadrant_swap};
use crate::grid::Grid;
use crate::scales::{M_PER_KM, ScaleSet};
use crate::taper::taper;
use crate::wavenumber::WavenumberArrays;

/// Complex wavelet coefficients of one field.
///
/// The tensor is indexed `[x, y, angle, scale]` with shape
/// `(nx, ny, n_angles, n_scales)`. The scale set and config that produced it
/// travel with the coefficients so downstream estimators can check that two
/// tensors are comparable.
#[derive(Clone, Debug)]
pub struct WaveletCoefficients {
    coefficients: Array4<Complex64>,
    scales: ScaleSet,
    config: TransformConfig,
}

impl WaveletCoefficients {
    /// Wraps an existing coefficient tensor.
    ///
    /// # Errors
    ///
    /// [`WaveletError::TensorShape`] if the angle or scale axis does not
    /// match `config.n_angles()` or `scales.len()`.
    pub fn from_parts(
        coefficients: Array4<Complex64>,
        scales: ScaleSet,
        config: TransformConfig,
    ) -> Result<Self, WaveletError> {
        let (nx, ny, na, ns) = coefficients.dim();
        if na != config.n_angles() || ns != scales.len() {
            return Err(WaveletError::TensorShape {
                expected: [nx, ny, config.n_angles(), scales.len()],
                got: [nx, ny, na, ns],
            });
        }
        Ok(Self {
            coefficients,
            scales,
            config,
        })
    }

    /// Read-only view of the `[x, y, angle, scale]` tensor.
    pub fn coefficients(&self) -> ArrayView4<'_, Complex64> {
        self.coefficients.view()
    }

    /// Consumes the wrapper and returns the tensor.
    pub fn into_coefficients(self) -> Array4<Complex64> {
        self.coefficients
    }

    pub fn scales(&self) -> &ScaleSet {
        &self.scales
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    pub fn nx(&self) -> usize {
        self.coefficients.dim().0
    }

    pub fn ny(&self) -> usize {
        self.coefficients.dim().1
    }

    pub fn n_angles(&self) -> usize {
        self.coefficients.dim().2
    }

    pub fn n_scales(&self) -> usize {
        self.coefficients.dim().3
    }

    /// Tensor shape `(nx, ny, n_angles, n_scales)`.
    pub fn dim(&self) -> (usize, usize, usize, usize) {
        self.coefficients.dim()
    }
}

/// Default padded domain for an `nx x ny` grid: the next power of two of
/// twice each axis.
pub fn padded_shape(nx: usize, ny: usize) -> (usize, usize) {
    ((2 * nx).next_power_of_two(), (2 * ny).next_power_of_two())
}

/// Computes the directional wavelet transform of `grid`.
///
/// The field is tapered toward its mean, de-meaned and zero padded into an
/// `nnx x nny` domain, then Fourier transformed once. For every
/// (scale, angle) pair the conjugated spectrum is multiplied by the daughter
/// wavelet, inverse transformed, normalised by `1 / (nnx * nny)`, quadrant
/// swapped and cropped back to `nx x ny` so that entry `(x, y)` is the
/// coefficient at grid node `(x, y)`. Pairs are independent and run in
/// parallel, each writing its own `[.., .., a, s]` slab of the output.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`WaveletError::InvalidConfig`] | `config` fails validation |
/// | [`WaveletError::PaddingTooSmall`] | `nnx < nx` or `nny < ny` |
#[tracing::instrument(skip_all, fields(nx = grid.nx(), ny = grid.ny(), nnx = nnx, nny = nny, ns = scales.len()))]
pub fn transform(
    grid: &Grid,
    nnx: usize,
    nny: usize,
    scales: &ScaleSet,
    config: &TransformConfig,
) -> Result<WaveletCoefficients, WaveletError> {
    config.validate()?;
    let (nx, ny) = (grid.nx(), grid.ny());
    if nnx < nx || nny < ny {
        return Err(WaveletError::PaddingTooSmall { nnx, nny, nx, ny });
    }

    let tapered = taper(grid.view(), config.taper_width());
    let mean = tapered.sum() / tapered.len() as f64;

    let mut spectrum = Array2::<Complex64>::zeros((nnx, nny));
    spectrum
        .slice_mut(s![..nx, ..ny])
        .zip_mut_with(&tapered, |dst, &v| *dst = Complex64::new(v - mean, 0.0));

    let fft = Fft2::new(nnx, nny);
    fft.forward(&mut spectrum);
    spectrum.mapv_inplace(|c| c.conj());
    debug!(mean, "forward spectrum ready");

    let wavenumbers = WavenumberArrays::new(nnx, nny, grid.dx() / M_PER_KM, grid.dy() / M_PER_KM);
    let (na, ns) = (config.n_angles(), scales.len());
    let norm = 1.0 / (nnx * nny) as f64;

    let mut coefficients = Array4::<Complex64>::zeros((nx, ny, na, ns));
    coefficients
        .axis_iter_mut(Axis(3))
        .into_par_iter()
        .enumerate()
        .for_each(|(sc, mut per_scale)| {
            let scale = scales.scale_factor(sc, config.k0());
            per_scale
                .axis_iter_mut(Axis(2))
                .into_par_iter()
                .enumerate()
                .for_each(|(a, mut slab)| {
                    let mut product =
                        daughter_wavelet(&wavenumbers, config.k0(), scale, config.angle(a));
                    product.zip_mut_with(&spectrum, |d, f| *d *= *f);
                    fft.inverse(&mut product);
                    let shifted = quadrant_swap(&product);
                    crop_mirrored(&shifted, norm, &mut slab);
                });
            debug!(scale = sc, kf = scales.as_slice()[sc], "scale assembled");
        });
    info!(n_tasks = na * ns, "wavelet transform complete");

    WaveletCoefficients::from_parts(coefficients, scales.clone(), config.clone())
}

/// Copies the `nx x ny` block of `shifted` that lines up with the field into
/// `out`, scaled by `norm`.
///
/// Filtering the conjugated spectrum reverses the field, and the quadrant
/// swap then moves field node `x` to `nnx/2 - x` (mod `nnx`). Reading through
/// that map puts the coefficient of node `(x, y)` at `out[[x, y]]` for any
/// padding.
fn crop_mirrored(shifted: &Array2<Complex64>, norm: f64, out: &mut ArrayViewMut2<'_, Complex64>) {
    let (nnx, nny) = shifted.dim();
    let (hx, hy) = (nnx / 2, nny / 2);
    for ((x, y), c) in out.indexed_iter_mut() {
        *c = shifted[[(hx + nnx - x) % nnx, (hy + nny - y) % nny]] * norm;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_shape_next_power_of_two() {
        assert_eq!(padded_shape(64, 64), (128, 128));
        assert_eq!(padded_shape(50, 33), (128, 128));
        assert_eq!(padded_shape(3, 2), (8, 4));
    }

    #[test]
    fn from_parts_checks_axes() {
        let scales = ScaleSet::new(vec![1e-3, 2e-3]).unwrap();
        let config = TransformConfig::new().with_n_angles(4);
        let ok = WaveletCoefficients::from_parts(
            Array4::zeros((3, 5, 4, 2)),
            scales.clone(),
            config.clone(),
        )
        .unwrap();
        assert_eq!(ok.dim(), (3, 5, 4, 2));
        assert_eq!(ok.nx(), 3);
        assert_eq!(ok.ny(), 5);
        assert_eq!(ok.n_angles(), 4);
        assert_eq!(ok.n_scales(), 2);

        let err =
            WaveletCoefficients::from_parts(Array4::zeros((3, 5, 3, 2)), scales, config).unwrap_err();
        assert!(matches!(
            err,
            WaveletError::TensorShape {
                expected: [3, 5, 4, 2],
                got: [3, 5, 3, 2]
            }
        ));
    }

    #[test]
    fn padding_smaller_than_grid_rejected() {
        let grid = Grid::new(Array2::zeros((16, 16)), 1000.0, 1000.0).unwrap();
        let scales = ScaleSet::new(vec![1e-3]).unwrap();
        let err = transform(&grid, 8, 32, &scales, &TransformConfig::new()).unwrap_err();
        assert!(matches!(
            err,
            WaveletError::PaddingTooSmall {
                nnx: 8,
                nny: 32,
                nx: 16,
                ny: 16
            }
        ));
    }

    #[test]
    fn invalid_config_rejected() {
        let grid = Grid::new(Array2::zeros((8, 8)), 1000.0, 1000.0).unwrap();
        let scales = ScaleSet::new(vec![1e-3]).unwrap();
        let config = TransformConfig::new().with_n_angles(1);
        let err = transform(&grid, 16, 16, &scales, &config).unwrap_err();
        assert!(matches!(err, WaveletError::InvalidConfig(_)));
    }
}
