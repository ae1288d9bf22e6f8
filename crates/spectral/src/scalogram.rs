//! Angle-averaged wavelet power of one field.

use flexwave_wavelet::WaveletCoefficients;
use ndarray::{Array3, ArrayView3};
use tracing::debug;

use crate::global::GlobalSpectrum;
use crate::jackknife::jackknife_error;
use crate::reduce::reduce_angles;

/// Wavelet scalogram `[x, y, scale]` with its jackknife error.
#[derive(Clone, Debug)]
pub struct Scalogram {
    values: Array3<f64>,
    error: Array3<f64>,
    wavenumbers: Vec<f64>,
}

impl Scalogram {
    /// Angular mean of `|w|^2`.
    pub fn values(&self) -> ArrayView3<'_, f64> {
        self.values.view()
    }

    /// Leave-one-angle-out standard error of [`values`](Self::values).
    pub fn error(&self) -> ArrayView3<'_, f64> {
        self.error.view()
    }

    /// Analysis wavenumbers (rad/m).
    pub fn wavenumbers(&self) -> &[f64] {
        &self.wavenumbers
    }

    /// Per-scale spatial average.
    pub fn global(&self) -> GlobalSpectrum {
        GlobalSpectrum::from_fields(&self.wavenumbers, self.values.view(), self.error.view())
    }

    /// Consumes the scalogram, returning `(values, error)`.
    pub fn into_parts(self) -> (Array3<f64>, Array3<f64>) {
        (self.values, self.error)
    }
}

/// Computes the scalogram of `wt`.
///
/// Power `|w(x, y, a, s)|^2` is averaged over the `na` angles; the error is
/// the jackknife standard error of that mean.
#[tracing::instrument(skip_all, fields(dim = ?wt.dim()))]
pub fn scalogram(wt: &WaveletCoefficients) -> Scalogram {
    let reduced = reduce_angles(wt, wt, |w, _| w.norm_sqr());
    debug!("angular reduction done");
    let error = jackknife_error(reduced.per_angle.view());
    Scalogram {
        values: reduced.mean,
        error,
        wavenumbers: wt.scales().as_slice().to_vec(),
    }
}
