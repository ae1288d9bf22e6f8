//! Angle-averaged cross-power of two fields.

use flexwave_wavelet::WaveletCoefficients;
use ndarray::{Array3, ArrayView3, Zip};
use num_complex::Complex64;
use tracing::debug;

use crate::error::SpectralError;
use crate::global::GlobalSpectrum;
use crate::jackknife::jackknife_error;
use crate::reduce::{check_compatible, reduce_angles};

/// Complex cross-scalogram `[x, y, scale]` with its jackknife error.
#[derive(Clone, Debug)]
pub struct CrossScalogram {
    values: Array3<Complex64>,
    error: Array3<f64>,
    wavenumbers: Vec<f64>,
}

impl CrossScalogram {
    /// Angular mean of `w1 * conj(w2)`.
    pub fn values(&self) -> ArrayView3<'_, Complex64> {
        self.values.view()
    }

    /// `sqrt(err_re^2 + err_im^2)` from separate jackknifes of the real and
    /// imaginary parts. The correlation between the two parts is ignored.
    pub fn error(&self) -> ArrayView3<'_, f64> {
        self.error.view()
    }

    /// Analysis wavenumbers (rad/m).
    pub fn wavenumbers(&self) -> &[f64] {
        &self.wavenumbers
    }

    /// Per-scale spatial average of the real part.
    pub fn global(&self) -> GlobalSpectrum {
        let real = self.values.mapv(|c| c.re);
        GlobalSpectrum::from_fields(&self.wavenumbers, real.view(), self.error.view())
    }

    /// Per-scale spatial average of the modulus.
    pub fn global_modulus(&self) -> GlobalSpectrum {
        let modulus = self.values.mapv(|c| c.norm());
        GlobalSpectrum::from_fields(&self.wavenumbers, modulus.view(), self.error.view())
    }

    /// Consumes the cross-scalogram, returning `(values, error)`.
    pub fn into_parts(self) -> (Array3<Complex64>, Array3<f64>) {
        (self.values, self.error)
    }
}

/// Computes the cross-scalogram of `wt1` against `wt2`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SpectralError::AngleMismatch`] | different angle counts |
/// | [`SpectralError::K0Mismatch`] | different central wavenumbers |
/// | [`SpectralError::ShapeMismatch`] | different tensor shapes |
/// | [`SpectralError::ScaleMismatch`] | different scale sets |
#[tracing::instrument(skip_all, fields(dim = ?wt1.dim()))]
pub fn cross_scalogram(
    wt1: &WaveletCoefficients,
    wt2: &WaveletCoefficients,
) -> Result<CrossScalogram, SpectralError> {
    check_compatible(wt1, wt2)?;
    let reduced = reduce_angles(wt1, wt2, |w1, w2| w1 * w2.conj());
    debug!("angular reduction done");

    let err_re = jackknife_error(reduced.per_angle.mapv(|c| c.re).view());
    let err_im = jackknife_error(reduced.per_angle.mapv(|c| c.im).view());
    let error = Zip::from(&err_re)
        .and(&err_im)
        .map_collect(|&re, &im| re.hypot(im));

    Ok(CrossScalogram {
        values: reduced.mean,
        error,
        wavenumbers: wt1.scales().as_slice().to_vec(),
    })
}
