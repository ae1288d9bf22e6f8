//! Wavenumber scale sets.

use std::f64::consts::PI;

use crate::error::WaveletError;
use crate::grid::Grid;

/// Metres per kilometre. Scale sets are in rad/m while the transform works
/// on wavenumber arrays in rad/km.
pub(crate) const M_PER_KM: f64 = 1000.0;

/// Shortest wavelength of an automatic scale set, in grid spacings.
const MIN_WAVELENGTH_SPACINGS: f64 = 2.5;

/// Ordered, validated set of analysis wavenumbers `kf[s]` in rad/m.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleSet {
    wavenumbers: Vec<f64>,
}

impl ScaleSet {
    /// Creates a `ScaleSet` from explicit wavenumbers (rad/m).
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`WaveletError::EmptyScaleSet`] | `wavenumbers` is empty |
    /// | [`WaveletError::InvalidWavenumber`] | any value non-finite or `<= 0` |
    pub fn new(wavenumbers: Vec<f64>) -> Result<Self, WaveletError> {
        if wavenumbers.is_empty() {
            return Err(WaveletError::EmptyScaleSet);
        }
        if let Some((index, &value)) = wavenumbers
            .iter()
            .enumerate()
            .find(|&(_, &k)| !(k.is_finite() && k > 0.0))
        {
            return Err(WaveletError::InvalidWavenumber { index, value });
        }
        Ok(Self { wavenumbers })
    }

    /// Builds `ns` wavenumbers whose wavelengths are log-spaced between the
    /// grid extent and a few grid spacings.
    ///
    /// `lambda_max = min(nx * dx, ny * dy)` and `lambda_min = 2.5 * max(dx, dy)`.
    /// Wavenumbers `2 * pi / lambda` increase with the scale index. A single
    /// scale uses `lambda_max`.
    ///
    /// # Errors
    ///
    /// [`WaveletError::InvalidConfig`] if `ns == 0` or the grid is too small
    /// for `lambda_max > lambda_min`.
    pub fn for_grid(grid: &Grid, ns: usize) -> Result<Self, WaveletError> {
        if ns == 0 {
            return Err(WaveletError::InvalidConfig(
                "number of scales must be >= 1".to_string(),
            ));
        }
        let lambda_max = (grid.nx() as f64 * grid.dx()).min(grid.ny() as f64 * grid.dy());
        let lambda_min = MIN_WAVELENGTH_SPACINGS * grid.dx().max(grid.dy());
        if lambda_max <= lambda_min {
            return Err(WaveletError::InvalidConfig(format!(
                "grid extent {lambda_max} m does not exceed minimum wavelength {lambda_min} m"
            )));
        }

        let ratio = lambda_min / lambda_max;
        let wavenumbers = (0..ns)
            .map(|s| {
                let frac = if ns == 1 {
                    0.0
                } else {
                    s as f64 / (ns - 1) as f64
                };
                2.0 * PI / (lambda_max * ratio.powf(frac))
            })
            .collect();
        Self::new(wavenumbers)
    }

    /// Returns the wavenumbers (rad/m).
    pub fn as_slice(&self) -> &[f64] {
        &self.wavenumbers
    }

    /// Number of scales.
    pub fn len(&self) -> usize {
        self.wavenumbers.len()
    }

    /// Always `false` for a validated set.
    pub fn is_empty(&self) -> bool {
        self.wavenumbers.is_empty()
    }

    /// Wavelet scale factor `k0 / (kf[s] * 1000)` for scale `s`, in km.
    pub fn scale_factor(&self, s: usize, k0: f64) -> f64 {
        k0 / (self.wavenumbers[s] * M_PER_KM)
    }
}

impl AsRef<[f64]> for ScaleSet {
    fn as_ref(&self) -> &[f64] {
        &self.wavenumbers
    }
}
