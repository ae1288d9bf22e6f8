//! Leave-one-angle-out error fields.

use flexwave_stats::{jackknife_replicates, jackknife_std_error};
use ndarray::{Array3, ArrayView4, Axis, Zip};

use crate::reduce::JointSample;

/// Jackknife standard error of the angular mean at every pixel and scale.
///
/// `per_angle` is `[x, y, angle, scale]`; the result is `[x, y, scale]`.
pub(crate) fn jackknife_error(per_angle: ArrayView4<'_, f64>) -> Array3<f64> {
    let (nx, ny, _, ns) = per_angle.dim();
    let mut error = Array3::zeros((nx, ny, ns));
    Zip::from(&mut error)
        .and(per_angle.lanes(Axis(2)))
        .par_for_each(|e, lane| {
            let samples = lane.to_vec();
            *e = jackknife_std_error(&jackknife_replicates(&samples));
        });
    error
}

/// Joint jackknife errors of admittance and coherence.
///
/// Each leave-one-out replicate of `(xsg, sg1, sg2)` is mapped to
/// `Re(xsg) / sg1` and `|xsg|^2 / (sg1 * sg2)` before taking the standard
/// error. Zero powers give non-finite replicates, which propagate.
pub(crate) fn jackknife_admit_coh(
    per_angle: ArrayView4<'_, JointSample>,
) -> (Array3<f64>, Array3<f64>) {
    let (nx, ny, _, ns) = per_angle.dim();
    let mut admittance = Array3::zeros((nx, ny, ns));
    let mut coherence = Array3::zeros((nx, ny, ns));
    Zip::from(&mut admittance)
        .and(&mut coherence)
        .and(per_angle.lanes(Axis(2)))
        .par_for_each(|ea, ec, lane| {
            let samples = lane.to_vec();
            let replicates = jackknife_replicates(&samples);
            let admit: Vec<f64> = replicates.iter().map(JointSample::admittance).collect();
            let coh: Vec<f64> = replicates.iter().map(JointSample::coherence).collect();
            *ea = jackknife_std_error(&admit);
            *ec = jackknife_std_error(&coh);
        });
    (admittance, coherence)
}
