//! Wavelet admittance and coherence between two fields.

use flexwave_wavelet::WaveletCoefficients;
use ndarray::{Array3, ArrayView3};
use tracing::debug;

use crate::error::SpectralError;
use crate::global::GlobalSpectrum;
use crate::jackknife::jackknife_admit_coh;
use crate::reduce::{JointSample, check_compatible, reduce_angles};

/// Admittance and coherence `[x, y, scale]` with their joint jackknife errors.
///
/// Pixels where the angle-averaged power is zero hold `NaN` or `Inf`.
#[derive(Clone, Debug)]
pub struct AdmitCoh {
    admittance: Array3<f64>,
    admittance_error: Array3<f64>,
    coherence: Array3<f64>,
    coherence_error: Array3<f64>,
    wavenumbers: Vec<f64>,
}

impl AdmitCoh {
    /// `Re(<w1 conj(w2)>) / <|w1|^2>`.
    pub fn admittance(&self) -> ArrayView3<'_, f64> {
        self.admittance.view()
    }

    pub fn admittance_error(&self) -> ArrayView3<'_, f64> {
        self.admittance_error.view()
    }

    /// `|<w1 conj(w2)>|^2 / (<|w1|^2> <|w2|^2>)`. Not clamped to `[0, 1]`.
    pub fn coherence(&self) -> ArrayView3<'_, f64> {
        self.coherence.view()
    }

    pub fn coherence_error(&self) -> ArrayView3<'_, f64> {
        self.coherence_error.view()
    }

    /// Analysis wavenumbers (rad/m).
    pub fn wavenumbers(&self) -> &[f64] {
        &self.wavenumbers
    }

    pub fn global_admittance(&self) -> GlobalSpectrum {
        GlobalSpectrum::from_fields(
            &self.wavenumbers,
            self.admittance.view(),
            self.admittance_error.view(),
        )
    }

    pub fn global_coherence(&self) -> GlobalSpectrum {
        GlobalSpectrum::from_fields(
            &self.wavenumbers,
            self.coherence.view(),
            self.coherence_error.view(),
        )
    }
}

/// Computes admittance and coherence of `wt2` against `wt1` in one angular pass.
///
/// # Errors
///
/// Same conditions as [`cross_scalogram`](crate::cross_scalogram).
#[tracing::instrument(skip_all, fields(dim = ?wt1.dim()))]
pub fn admit_coh(
    wt1: &WaveletCoefficients,
    wt2: &WaveletCoefficients,
) -> Result<AdmitCoh, SpectralError> {
    check_compatible(wt1, wt2)?;
    let reduced = reduce_angles(wt1, wt2, JointSample::new);
    debug!("angular reduction done");

    let admittance = reduced.mean.mapv(|j| j.admittance());
    let coherence = reduced.mean.mapv(|j| j.coherence());
    let (admittance_error, coherence_error) = jackknife_admit_coh(reduced.per_angle.view());

    let non_finite = coherence.iter().filter(|v| !v.is_finite()).count();
    if non_finite > 0 {
        debug!(non_finite, "zero-power pixels in coherence");
    }

    Ok(AdmitCoh {
        admittance,
        admittance_error,
        coherence,
        coherence_error,
        wavenumbers: wt1.scales().as_slice().to_vec(),
    })
}
