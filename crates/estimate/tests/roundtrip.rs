//! Recovery of known plate parameters from synthetic spectra.

use std::f64::consts::PI;

use approx::assert_abs_diff_eq;
use flexwave_estimate::{
    EstimateConfig, FitMode, FlexureParams, Observations, UNCORRELATED_ALPHA, estimate,
    real_xspec_functions,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ADM_SIGMA: f64 = 1e-4;
const COH_SIGMA: f64 = 0.005;

/// 30 wavenumbers (rad/m) for wavelengths log-spaced from 20 to 2000 km.
fn wavenumbers() -> Vec<f64> {
    (0..30)
        .map(|i| {
            let lambda_km = 20.0 * 100f64.powf(i as f64 / 29.0);
            2.0 * PI / (lambda_km * 1e3)
        })
        .collect()
}

fn synthetic(te: f64, load_ratio: f64, alpha: f64, adm_sigma: f64, coh_sigma: f64) -> Observations {
    let k = wavenumbers();
    let model = real_xspec_functions(&k, te, load_ratio, alpha, &FlexureParams::default());
    let n = k.len();
    Observations::new(
        k,
        model.admittance,
        vec![adm_sigma; n],
        model.coherence,
        vec![coh_sigma; n],
    )
    .unwrap()
}

#[test]
fn recovers_on_grid_parameters_in_every_mode() {
    let obs = synthetic(40.0, 0.5, UNCORRELATED_ALPHA, ADM_SIGMA, COH_SIGMA);
    for mode in [FitMode::Admit, FitMode::Coh, FitMode::AdmitCoh] {
        let fit = estimate(&obs, &EstimateConfig::new().with_mode(mode)).unwrap();
        assert_abs_diff_eq!(fit.te.best, 40.0, epsilon = 1e-6);
        assert_abs_diff_eq!(fit.load_ratio.best, 0.5, epsilon = 1e-6);
        assert!(fit.chi2 < 1e-12, "{mode:?}: chi2 {}", fit.chi2);
        assert_eq!(fit.mode, mode);
    }
}

#[test]
fn posterior_mean_sits_on_truth_for_joint_fit() {
    let obs = synthetic(40.0, 0.5, UNCORRELATED_ALPHA, ADM_SIGMA, COH_SIGMA);
    let fit = estimate(&obs, &EstimateConfig::new()).unwrap();
    assert_eq!(fit.n_obs, 60);
    assert_abs_diff_eq!(fit.te.mean, 40.0, epsilon = 0.5);
    assert_abs_diff_eq!(fit.load_ratio.mean, 0.5, epsilon = 0.01);
    assert!(fit.te.std < 1.0);
    assert!(fit.load_ratio.std < 0.02);
}

#[test]
fn refinement_moves_off_the_grid() {
    let obs = synthetic(40.3, 0.47, UNCORRELATED_ALPHA, ADM_SIGMA, COH_SIGMA);
    let coarse = estimate(&obs, &EstimateConfig::new().with_refine(false)).unwrap();
    let refined = estimate(&obs, &EstimateConfig::new()).unwrap();
    assert!(refined.chi2 < coarse.chi2);
    assert_abs_diff_eq!(refined.te.best, 40.3, epsilon = 0.05);
    assert_abs_diff_eq!(refined.load_ratio.best, 0.47, epsilon = 0.005);
}

#[test]
fn load_phase_is_recovered_when_fitted() {
    let obs = synthetic(40.0, 0.5, UNCORRELATED_ALPHA, ADM_SIGMA, COH_SIGMA);
    let config = EstimateConfig::new()
        .with_fit_alpha(true)
        .with_grid(125, 50, 19);
    let fit = estimate(&obs, &config).unwrap();
    let alpha = fit.alpha.expect("alpha is fitted");
    assert_abs_diff_eq!(fit.te.best, 40.0, epsilon = 0.5);
    assert_abs_diff_eq!(fit.load_ratio.best, 0.5, epsilon = 0.01);
    assert_abs_diff_eq!(alpha.best, UNCORRELATED_ALPHA, epsilon = 0.05);
    assert!((0.0..=PI).contains(&alpha.mean));
}

#[test]
fn noisy_spectra_still_constrain_te() {
    let (adm_sigma, coh_sigma) = (2e-3, 0.02);
    let clean = synthetic(40.0, 0.5, UNCORRELATED_ALPHA, adm_sigma, coh_sigma);
    let mut rng = StdRng::seed_from_u64(11);
    let mut jitter = |v: &[f64], sigma: f64| -> Vec<f64> {
        v.iter()
            .map(|x| x + sigma * (2.0 * rng.random::<f64>() - 1.0))
            .collect()
    };
    let obs = Observations::new(
        clean.wavenumbers().to_vec(),
        jitter(clean.admittance(), adm_sigma),
        clean.admittance_error().to_vec(),
        jitter(clean.coherence(), coh_sigma),
        clean.coherence_error().to_vec(),
    )
    .unwrap();
    let fit = estimate(&obs, &EstimateConfig::new()).unwrap();
    assert_abs_diff_eq!(fit.te.mean, 40.0, epsilon = 5.0);
    assert_abs_diff_eq!(fit.load_ratio.mean, 0.5, epsilon = 0.1);
    assert!(fit.te.std > 0.0);
}

#[test]
fn predicted_curves_match_best_parameters() {
    let obs = synthetic(60.0, 0.2, UNCORRELATED_ALPHA, ADM_SIGMA, COH_SIGMA);
    let fit = estimate(&obs, &EstimateConfig::new()).unwrap();
    let pred = fit.predicted(obs.wavenumbers(), &FlexureParams::default());
    for (p, o) in pred.coherence.iter().zip(obs.coherence()) {
        assert_abs_diff_eq!(p, o, epsilon = 1e-9);
    }
}
