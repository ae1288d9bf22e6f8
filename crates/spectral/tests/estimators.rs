//! Integration tests for the spectral estimators on synthetic tensors.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use flexwave_spectral::{SpectralError, admit_coh, cross_scalogram, scalogram};
use flexwave_wavelet::{ScaleSet, TransformConfig, WaveletCoefficients};
use ndarray::Array4;
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn wrap(values: Array4<Complex64>) -> WaveletCoefficients {
    let (_, _, na, ns) = values.dim();
    let scales = ScaleSet::new((1..=ns).map(|s| s as f64 * 2e-4).collect()).unwrap();
    let config = TransformConfig::new().with_n_angles(na);
    WaveletCoefficients::from_parts(values, scales, config).unwrap()
}

fn random_tensor(dim: (usize, usize, usize, usize), seed: u64) -> WaveletCoefficients {
    let mut rng = StdRng::seed_from_u64(seed);
    let values = Array4::from_shape_simple_fn(dim, || {
        Complex64::new(rng.random::<f64>() - 0.5, rng.random::<f64>() - 0.5)
    });
    wrap(values)
}

#[test]
fn identical_angular_power_has_zero_error() {
    // |w| depends on pixel and scale only; the phase rotates with angle.
    let values = Array4::from_shape_fn((6, 5, 23, 3), |(x, y, a, s)| {
        let amplitude = 1.0 + x as f64 + 0.5 * y as f64 + 2.0 * s as f64;
        Complex64::from_polar(amplitude, 0.37 * a as f64)
    });
    let wt = wrap(values);
    let sg = scalogram(&wt);
    assert_eq!(sg.values().dim(), (6, 5, 3));
    for ((x, y, s), &v) in sg.values().indexed_iter() {
        let amplitude = 1.0 + x as f64 + 0.5 * y as f64 + 2.0 * s as f64;
        assert_relative_eq!(v, amplitude * amplitude, max_relative = 1e-12);
    }
    for &e in sg.error().iter() {
        assert_abs_diff_eq!(e, 0.0, epsilon = 1e-9);
    }
}

#[test]
fn cross_with_itself_is_scalogram() {
    let wt = random_tensor((5, 4, 7, 2), 7);
    let sg = scalogram(&wt);
    let xs = cross_scalogram(&wt, &wt).unwrap();
    for (c, &p) in xs.values().iter().zip(sg.values().iter()) {
        assert_relative_eq!(c.re, p, max_relative = 1e-12);
        assert_abs_diff_eq!(c.im, 0.0, epsilon = 1e-15);
    }
    // The imaginary replicates are all zero, so the error reduces to the
    // real-part jackknife.
    for (&e, &se) in xs.error().iter().zip(sg.error().iter()) {
        assert_relative_eq!(e, se, max_relative = 1e-9);
    }
    assert_eq!(xs.wavenumbers(), sg.wavenumbers());
}

#[test]
fn admittance_and_coherence_of_field_with_itself_are_one() {
    let wt = random_tensor((4, 4, 23, 2), 11);
    let ac = admit_coh(&wt, &wt).unwrap();
    for &v in ac.admittance().iter() {
        assert_relative_eq!(v, 1.0, max_relative = 1e-12);
    }
    for &v in ac.coherence().iter() {
        assert_relative_eq!(v, 1.0, max_relative = 1e-12);
    }
    for (&ea, &ec) in ac.admittance_error().iter().zip(ac.coherence_error().iter()) {
        assert_abs_diff_eq!(ea, 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(ec, 0.0, epsilon = 1e-10);
    }
}

#[test]
fn admittance_recovers_linear_transfer() {
    // wt2 = 0.25 * wt1 -> admittance = 0.25 everywhere, coherence = 1.
    let wt1 = random_tensor((3, 3, 11, 2), 3);
    let wt2 = wrap(wt1.coefficients().mapv(|c| c * 0.25));
    let ac = admit_coh(&wt1, &wt2).unwrap();
    for &v in ac.admittance().iter() {
        assert_relative_eq!(v, 0.25, max_relative = 1e-12);
    }
    let global = ac.global_coherence();
    for &v in global.values() {
        assert_relative_eq!(v, 1.0, max_relative = 1e-12);
    }
}

#[test]
fn coherence_bounded_for_independent_fields() {
    let wt1 = random_tensor((8, 8, 23, 3), 1);
    let wt2 = random_tensor((8, 8, 23, 3), 2);
    let ac = admit_coh(&wt1, &wt2).unwrap();
    for &c in ac.coherence().iter() {
        assert!((-1e-12..=1.0 + 1e-12).contains(&c), "coherence {c} out of range");
    }
    for &e in ac.coherence_error().iter() {
        assert!(e.is_finite() && e >= 0.0);
    }
    for &e in ac.admittance_error().iter() {
        assert!(e.is_finite() && e > 0.0);
    }
}

#[test]
fn zero_tensor_gives_zero_scalogram_and_nan_coherence() {
    let wt = wrap(Array4::zeros((3, 3, 5, 2)));
    let sg = scalogram(&wt);
    assert!(sg.values().iter().all(|&v| v == 0.0));
    assert!(sg.error().iter().all(|&v| v == 0.0));

    let ac = admit_coh(&wt, &wt).unwrap();
    assert!(ac.admittance().iter().all(|v| v.is_nan()));
    assert!(ac.coherence().iter().all(|v| v.is_nan()));
    assert!(ac.global_coherence().values().iter().all(|v| v.is_nan()));
}

#[test]
fn mismatched_tensors_rejected() {
    let a = random_tensor((4, 4, 6, 2), 1);
    let b = random_tensor((4, 4, 8, 2), 2);
    assert!(matches!(
        cross_scalogram(&a, &b),
        Err(SpectralError::AngleMismatch {
            first: 6,
            second: 8
        })
    ));
    let c = random_tensor((4, 3, 6, 2), 3);
    assert!(matches!(
        admit_coh(&a, &c),
        Err(SpectralError::ShapeMismatch { .. })
    ));
}

#[test]
fn global_spectrum_per_scale() {
    // Power 1 at scale 0 and 4 at scale 1 on every pixel and angle.
    let values = Array4::from_shape_fn((4, 6, 5, 2), |(_, _, _, s)| {
        Complex64::new(0.0, 1.0 + s as f64)
    });
    let sg = scalogram(&wrap(values));
    let global = sg.global();
    assert_eq!(global.len(), 2);
    assert_relative_eq!(global.values()[0], 1.0, max_relative = 1e-12);
    assert_relative_eq!(global.values()[1], 4.0, max_relative = 1e-12);
    assert_eq!(global.wavenumbers(), sg.wavenumbers());
}
