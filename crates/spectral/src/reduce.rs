//! Angular reduction shared by every estimator.

use std::ops::{Add, Div, Sub};

use flexwave_wavelet::WaveletCoefficients;
use ndarray::{Array3, Array4, Axis, Zip};
use num_complex::Complex64;

use crate::error::SpectralError;

/// Per-angle samples `[x, y, angle, scale]` and their angular mean `[x, y, scale]`.
#[derive(Clone, Debug)]
pub(crate) struct AngularReduction<T> {
    pub(crate) per_angle: Array4<T>,
    pub(crate) mean: Array3<T>,
}

/// Cross-power and both auto-powers of one angular sample.
///
/// Resampled as a unit so the admittance and coherence replicates are
/// formed from matching leave-one-out means.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct JointSample {
    pub(crate) xsg: Complex64,
    pub(crate) sg1: f64,
    pub(crate) sg2: f64,
}

impl JointSample {
    pub(crate) fn new(w1: Complex64, w2: Complex64) -> Self {
        Self {
            xsg: w1 * w2.conj(),
            sg1: w1.norm_sqr(),
            sg2: w2.norm_sqr(),
        }
    }

    /// `Re(xsg) / sg1`.
    pub(crate) fn admittance(&self) -> f64 {
        self.xsg.re / self.sg1
    }

    /// `|xsg|^2 / (sg1 * sg2)`.
    pub(crate) fn coherence(&self) -> f64 {
        self.xsg.norm_sqr() / (self.sg1 * self.sg2)
    }
}

impl Add for JointSample {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            xsg: self.xsg + rhs.xsg,
            sg1: self.sg1 + rhs.sg1,
            sg2: self.sg2 + rhs.sg2,
        }
    }
}

impl Sub for JointSample {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            xsg: self.xsg - rhs.xsg,
            sg1: self.sg1 - rhs.sg1,
            sg2: self.sg2 - rhs.sg2,
        }
    }
}

impl Div<f64> for JointSample {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self {
            xsg: self.xsg / rhs,
            sg1: self.sg1 / rhs,
            sg2: self.sg2 / rhs,
        }
    }
}

/// Evaluates `sample` on every coefficient pair and averages over angles.
///
/// Both passes run per element in parallel. The per-angle tensor is kept for
/// the jackknife.
pub(crate) fn reduce_angles<T, F>(
    wt1: &WaveletCoefficients,
    wt2: &WaveletCoefficients,
    sample: F,
) -> AngularReduction<T>
where
    T: Copy + Default + Add<Output = T> + Div<f64, Output = T> + Send + Sync,
    F: Fn(Complex64, Complex64) -> T + Sync,
{
    let (nx, ny, na, ns) = wt1.dim();
    let mut per_angle = Array4::from_elem((nx, ny, na, ns), T::default());
    Zip::from(&mut per_angle)
        .and(wt1.coefficients())
        .and(wt2.coefficients())
        .par_for_each(|p, &w1, &w2| *p = sample(w1, w2));

    let mut mean = Array3::from_elem((nx, ny, ns), T::default());
    let n = na as f64;
    Zip::from(&mut mean)
        .and(per_angle.lanes(Axis(2)))
        .par_for_each(|m, lane| {
            *m = lane.iter().fold(T::default(), |acc, &v| acc + v) / n;
        });

    AngularReduction { per_angle, mean }
}

/// Checks that two tensors can be combined pixel by pixel.
pub(crate) fn check_compatible(
    wt1: &WaveletCoefficients,
    wt2: &WaveletCoefficients,
) -> Result<(), SpectralError> {
    let (c1, c2) = (wt1.config(), wt2.config());
    if c1.n_angles() != c2.n_angles() {
        return Err(SpectralError::AngleMismatch {
            first: c1.n_angles(),
            second: c2.n_angles(),
        });
    }
    if c1.k0() != c2.k0() {
        return Err(SpectralError::K0Mismatch {
            first: c1.k0(),
            second: c2.k0(),
        });
    }
    if wt1.dim() != wt2.dim() {
        let (a, b, c, d) = wt1.dim();
        let (e, f, g, h) = wt2.dim();
        return Err(SpectralError::ShapeMismatch {
            first: [a, b, c, d],
            second: [e, f, g, h],
        });
    }
    if wt1.scales() != wt2.scales() {
        return Err(SpectralError::ScaleMismatch);
    }
    Ok(())
}
