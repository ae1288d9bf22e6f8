//! Spatially averaged spectra.

use flexwave_stats::finite_mean;
use ndarray::{ArrayView3, Axis};

/// Per-scale spatial mean of an estimate and of its error field.
///
/// Non-finite pixels are skipped. A scale with no finite pixel is `NaN`.
#[derive(Clone, Debug, PartialEq)]
pub struct GlobalSpectrum {
    wavenumbers: Vec<f64>,
    values: Vec<f64>,
    errors: Vec<f64>,
}

impl GlobalSpectrum {
    /// Averages `[x, y, scale]` fields over `x` and `y`.
    ///
    /// `wavenumbers` labels the scale axis and must have one entry per scale.
    pub(crate) fn from_fields(
        wavenumbers: &[f64],
        values: ArrayView3<'_, f64>,
        errors: ArrayView3<'_, f64>,
    ) -> Self {
        let per_scale = |field: ArrayView3<'_, f64>| -> Vec<f64> {
            field
                .axis_iter(Axis(2))
                .map(|slab| finite_mean(slab.iter().copied()))
                .collect()
        };
        Self {
            wavenumbers: wavenumbers.to_vec(),
            values: per_scale(values),
            errors: per_scale(errors),
        }
    }

    /// Analysis wavenumbers (rad/m), one per scale.
    pub fn wavenumbers(&self) -> &[f64] {
        &self.wavenumbers
    }

    /// Spatial mean of the estimate per scale.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Spatial mean of the error field per scale.
    pub fn errors(&self) -> &[f64] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
