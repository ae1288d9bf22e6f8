//! Grid-search estimation of elastic thickness and load ratio.

use std::f64::consts::PI;

use flexwave_spectral::GlobalSpectrum;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::EstimateError;
use crate::flexure::{FlexureParams, FlexureSpectra, UNCORRELATED_ALPHA, real_xspec_functions, xspec_at};
use crate::refine;

/// Upper bound of the load ratio; `F = 1` has no surface load.
pub const MAX_LOAD_RATIO: f64 = 0.99999;

/// Which observed spectra enter the misfit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FitMode {
    /// Admittance only.
    Admit,
    /// Coherence only.
    Coh,
    /// Admittance and coherence jointly.
    #[default]
    AdmitCoh,
}

impl FitMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admit => "admit",
            Self::Coh => "coh",
            Self::AdmitCoh => "admit_coh",
        }
    }

    fn uses_admittance(self) -> bool {
        matches!(self, Self::Admit | Self::AdmitCoh)
    }

    fn uses_coherence(self) -> bool {
        matches!(self, Self::Coh | Self::AdmitCoh)
    }
}

/// Observed global admittance and coherence with their standard errors.
#[derive(Debug, Clone, PartialEq)]
pub struct Observations {
    wavenumbers: Vec<f64>,
    admittance: Vec<f64>,
    admittance_error: Vec<f64>,
    coherence: Vec<f64>,
    coherence_error: Vec<f64>,
}

impl Observations {
    /// Creates observations at `wavenumbers` (rad/m).
    ///
    /// # Errors
    ///
    /// [`EstimateError::LengthMismatch`] if any array differs in length from
    /// `wavenumbers`.
    pub fn new(
        wavenumbers: Vec<f64>,
        admittance: Vec<f64>,
        admittance_error: Vec<f64>,
        coherence: Vec<f64>,
        coherence_error: Vec<f64>,
    ) -> Result<Self, EstimateError> {
        let expected = wavenumbers.len();
        for (name, len) in [
            ("admittance", admittance.len()),
            ("admittance_error", admittance_error.len()),
            ("coherence", coherence.len()),
            ("coherence_error", coherence_error.len()),
        ] {
            if len != expected {
                return Err(EstimateError::LengthMismatch {
                    name,
                    expected,
                    got: len,
                });
            }
        }
        Ok(Self {
            wavenumbers,
            admittance,
            admittance_error,
            coherence,
            coherence_error,
        })
    }

    /// Takes the global admittance and coherence of one wavelet analysis.
    ///
    /// # Errors
    ///
    /// [`EstimateError::WavenumberMismatch`] if the two spectra were computed
    /// on different scales.
    pub fn from_global(
        admittance: &GlobalSpectrum,
        coherence: &GlobalSpectrum,
    ) -> Result<Self, EstimateError> {
        if admittance.wavenumbers() != coherence.wavenumbers() {
            return Err(EstimateError::WavenumberMismatch);
        }
        Self::new(
            admittance.wavenumbers().to_vec(),
            admittance.values().to_vec(),
            admittance.errors().to_vec(),
            coherence.values().to_vec(),
            coherence.errors().to_vec(),
        )
    }

    pub fn wavenumbers(&self) -> &[f64] {
        &self.wavenumbers
    }

    pub fn admittance(&self) -> &[f64] {
        &self.admittance
    }

    pub fn admittance_error(&self) -> &[f64] {
        &self.admittance_error
    }

    pub fn coherence(&self) -> &[f64] {
        &self.coherence
    }

    pub fn coherence_error(&self) -> &[f64] {
        &self.coherence_error
    }

    pub fn len(&self) -> usize {
        self.wavenumbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavenumbers.is_empty()
    }
}

/// Configuration for [`estimate`].
#[derive(Debug, Clone)]
pub struct EstimateConfig {
    mode: FitMode,
    fit_alpha: bool,
    te_range: (f64, f64),
    n_te: usize,
    n_load_ratio: usize,
    n_alpha: usize,
    refine: bool,
    flexure: FlexureParams,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            mode: FitMode::default(),
            fit_alpha: false,
            te_range: (2.0, 250.0),
            n_te: 249,
            n_load_ratio: 100,
            n_alpha: 37,
            refine: true,
            flexure: FlexureParams::default(),
        }
    }
}

impl EstimateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: FitMode) -> Self {
        self.mode = mode;
        self
    }

    /// Also estimates the phase `alpha` between the two loads.
    pub fn with_fit_alpha(mut self, fit_alpha: bool) -> Self {
        self.fit_alpha = fit_alpha;
        self
    }

    /// Sets the searched elastic thickness interval (km).
    pub fn with_te_range(mut self, min: f64, max: f64) -> Self {
        self.te_range = (min, max);
        self
    }

    /// Sets the number of grid nodes along Te, F and alpha.
    pub fn with_grid(mut self, n_te: usize, n_load_ratio: usize, n_alpha: usize) -> Self {
        self.n_te = n_te;
        self.n_load_ratio = n_load_ratio;
        self.n_alpha = n_alpha;
        self
    }

    /// Enables Nelder-Mead polishing of the best grid node.
    pub fn with_refine(mut self, refine: bool) -> Self {
        self.refine = refine;
        self
    }

    pub fn with_flexure(mut self, flexure: FlexureParams) -> Self {
        self.flexure = flexure;
        self
    }

    pub fn mode(&self) -> FitMode {
        self.mode
    }

    pub fn fit_alpha(&self) -> bool {
        self.fit_alpha
    }

    pub fn te_range(&self) -> (f64, f64) {
        self.te_range
    }

    pub fn flexure(&self) -> &FlexureParams {
        &self.flexure
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::Validation`] listing every failed check.
    pub fn validate(&self) -> Result<(), EstimateError> {
        let mut problems = Vec::new();
        let (lo, hi) = self.te_range;
        if !(lo.is_finite() && hi.is_finite() && lo > 0.0 && lo < hi) {
            problems.push(format!("te_range must satisfy 0 < min < max, got [{lo}, {hi}]"));
        }
        if self.n_te < 2 {
            problems.push(format!("n_te must be >= 2, got {}", self.n_te));
        }
        if self.n_load_ratio < 2 {
            problems.push(format!("n_load_ratio must be >= 2, got {}", self.n_load_ratio));
        }
        if self.fit_alpha && self.n_alpha < 2 {
            problems.push(format!("n_alpha must be >= 2, got {}", self.n_alpha));
        }
        if let Err(EstimateError::Validation { details, .. }) = self.flexure.validate() {
            problems.extend(details.split("; ").map(str::to_string));
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(EstimateError::Validation {
                count: problems.len(),
                details: problems.join("; "),
            })
        }
    }
}

/// Posterior summary of one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSummary {
    /// Posterior mean.
    pub mean: f64,
    /// Posterior standard deviation.
    pub std: f64,
    /// Minimum-misfit (maximum a posteriori) value.
    pub best: f64,
}

/// Result of [`estimate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    /// Elastic thickness (km).
    pub te: ParamSummary,
    /// Subsurface-to-total load ratio `F`.
    pub load_ratio: ParamSummary,
    /// Load phase (rad), when estimated.
    pub alpha: Option<ParamSummary>,
    /// Misfit at the best parameters.
    pub chi2: f64,
    /// Number of observations in the misfit.
    pub n_obs: usize,
    pub mode: FitMode,
}

impl Estimate {
    /// Load phase used by the best model.
    pub fn best_alpha(&self) -> f64 {
        self.alpha.map_or(UNCORRELATED_ALPHA, |a| a.best)
    }

    /// Model spectra at the best parameters.
    pub fn predicted(&self, wavenumbers: &[f64], params: &FlexureParams) -> FlexureSpectra {
        real_xspec_functions(
            wavenumbers,
            self.te.best,
            self.load_ratio.best,
            self.best_alpha(),
            params,
        )
    }
}

/// One observed value with its standard error.
#[derive(Debug, Clone, Copy)]
struct Datum {
    k: f64,
    value: f64,
    sigma: f64,
}

/// Observations entering the misfit, with unusable entries removed.
#[derive(Debug)]
pub(crate) struct Misfit<'a> {
    admittance: Vec<Datum>,
    coherence: Vec<Datum>,
    params: &'a FlexureParams,
}

impl<'a> Misfit<'a> {
    fn new(obs: &Observations, mode: FitMode, params: &'a FlexureParams) -> Self {
        let usable = |values: &[f64], errors: &[f64]| -> Vec<Datum> {
            obs.wavenumbers
                .iter()
                .zip(values.iter().zip(errors))
                .filter(|&(k, (v, s))| k.is_finite() && *k > 0.0 && v.is_finite() && s.is_finite() && *s > 0.0)
                .map(|(&k, (&value, &sigma))| Datum { k, value, sigma })
                .collect()
        };
        Self {
            admittance: if mode.uses_admittance() {
                usable(&obs.admittance, &obs.admittance_error)
            } else {
                Vec::new()
            },
            coherence: if mode.uses_coherence() {
                usable(&obs.coherence, &obs.coherence_error)
            } else {
                Vec::new()
            },
            params,
        }
    }

    fn len(&self) -> usize {
        self.admittance.len() + self.coherence.len()
    }

    /// Error-weighted sum of squared residuals; `INFINITY` if the model is
    /// not finite.
    pub(crate) fn chi2(&self, te: f64, load_ratio: f64, alpha: f64) -> f64 {
        let mut total = 0.0;
        for d in &self.admittance {
            let (adm, _) = xspec_at(d.k, te, load_ratio, alpha, self.params);
            total += ((d.value - adm) / d.sigma).powi(2);
        }
        for d in &self.coherence {
            let (_, coh) = xspec_at(d.k, te, load_ratio, alpha, self.params);
            total += ((d.value - coh) / d.sigma).powi(2);
        }
        if total.is_finite() { total } else { f64::INFINITY }
    }
}

/// Evenly spaced nodes from `lo` to `hi` inclusive.
fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    let step = (hi - lo) / (n - 1) as f64;
    (0..n).map(|i| lo + i as f64 * step).collect()
}

/// Parameter bounds in `[te, F, alpha]` order.
pub(crate) struct Bounds {
    pub(crate) lower: Vec<f64>,
    pub(crate) upper: Vec<f64>,
}

/// Estimates elastic thickness `Te` and load ratio `F` (and optionally the
/// load phase) from observed admittance and coherence.
///
/// Uniform priors over `te_range`, `F` in `[0, 1)` and `alpha` in `[0, pi]`
/// are combined with a Gaussian likelihood whose widths are the observation
/// errors. The posterior is evaluated on a regular grid, which gives the
/// mean and standard deviation of each parameter. The best grid node is then
/// polished with Nelder-Mead unless refinement is disabled.
///
/// Entries with a non-finite value or a non-finite or non-positive error are
/// left out of the misfit.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`EstimateError::Validation`] | `config` fails validation |
/// | [`EstimateError::NoUsableData`] | no observation survives filtering |
#[tracing::instrument(skip_all, fields(mode = config.mode.as_str(), n_k = obs.len()))]
pub fn estimate(obs: &Observations, config: &EstimateConfig) -> Result<Estimate, EstimateError> {
    config.validate()?;
    let misfit = Misfit::new(obs, config.mode, &config.flexure);
    let n_obs = misfit.len();
    if n_obs == 0 {
        return Err(EstimateError::NoUsableData {
            mode: config.mode.as_str(),
        });
    }

    let (te_lo, te_hi) = config.te_range;
    let te_grid = linspace(te_lo, te_hi, config.n_te);
    let f_grid: Vec<f64> = (0..config.n_load_ratio)
        .map(|j| j as f64 / config.n_load_ratio as f64)
        .collect();
    let alpha_grid = if config.fit_alpha {
        linspace(0.0, PI, config.n_alpha)
    } else {
        vec![UNCORRELATED_ALPHA]
    };
    let (n_f, n_a) = (f_grid.len(), alpha_grid.len());
    let n_nodes = te_grid.len() * n_f * n_a;
    let node = |idx: usize| -> [f64; 3] {
        [
            te_grid[idx / (n_f * n_a)],
            f_grid[(idx / n_a) % n_f],
            alpha_grid[idx % n_a],
        ]
    };
    debug!(n_nodes, n_obs, "evaluating misfit grid");

    let chi2: Vec<f64> = (0..n_nodes)
        .into_par_iter()
        .map(|idx| {
            let [te, f, a] = node(idx);
            misfit.chi2(te, f, a)
        })
        .collect();

    let (best_idx, chi2_min) = chi2
        .iter()
        .copied()
        .enumerate()
        .fold((0, f64::INFINITY), |best, (i, c)| if c < best.1 { (i, c) } else { best });
    if !chi2_min.is_finite() {
        return Err(EstimateError::NoUsableData {
            mode: config.mode.as_str(),
        });
    }

    // Posterior moments over the grid, relative to the best node to keep
    // the exponentials in range.
    let weights: Vec<f64> = chi2.iter().map(|&c| (-0.5 * (c - chi2_min)).exp()).collect();
    let total: f64 = weights.iter().sum();
    let mut mean = [0.0; 3];
    for (idx, w) in weights.iter().enumerate() {
        let p = node(idx);
        for d in 0..3 {
            mean[d] += w * p[d];
        }
    }
    mean.iter_mut().for_each(|m| *m /= total);
    let mut var = [0.0; 3];
    for (idx, w) in weights.iter().enumerate() {
        let p = node(idx);
        for d in 0..3 {
            var[d] += w * (p[d] - mean[d]).powi(2);
        }
    }
    var.iter_mut().for_each(|v| *v /= total);

    let mut best = node(best_idx);
    let mut best_chi2 = chi2_min;
    if config.refine {
        let dims = if config.fit_alpha { 3 } else { 2 };
        let bounds = Bounds {
            lower: [te_lo, 0.0, 0.0][..dims].to_vec(),
            upper: [te_hi, MAX_LOAD_RATIO, PI][..dims].to_vec(),
        };
        let steps = [
            (te_hi - te_lo) / (config.n_te - 1) as f64,
            1.0 / config.n_load_ratio as f64,
            PI / config.n_alpha.saturating_sub(1).max(1) as f64,
        ];
        let fixed_alpha = best[2];
        if let Some((params, cost)) =
            refine::polish(&misfit, &best[..dims], &steps[..dims], &bounds, fixed_alpha)
        {
            if cost < best_chi2 {
                best[..dims].copy_from_slice(&params);
                best_chi2 = cost;
            }
        }
    }

    let summary = |d: usize| ParamSummary {
        mean: mean[d],
        std: var[d].sqrt(),
        best: best[d],
    };
    let result = Estimate {
        te: summary(0),
        load_ratio: summary(1),
        alpha: config.fit_alpha.then(|| summary(2)),
        chi2: best_chi2,
        n_obs,
        mode: config.mode,
    };
    info!(
        te = result.te.best,
        te_mean = result.te.mean,
        te_std = result.te.std,
        load_ratio = result.load_ratio.best,
        chi2 = result.chi2,
        "flexural parameters estimated"
    );
    Ok(result)
}
