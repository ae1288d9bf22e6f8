//! Analytical admittance and coherence of a loaded elastic plate.
//!
//! The plate carries two statistically independent initial loads: one on
//! the surface and one at the Moho. Each load leaves final topography `H`
//! and Moho relief `W`. For a unit surface load and a subsurface load `f`
//! times as heavy, with `psi = D k^4 / g`, `drho = rho_m - rho_c`, and the
//! common factor `1 / (rho_m + psi)` dropped:
//!
//! ```text
//! surface load:    H_t = drho + psi      W_t = -rho_c
//! subsurface load: H_b = -f rho_c        W_b = f rho_c (rho_c + psi) / drho
//! ```
//!
//! The Bouguer anomaly is `2 pi G drho exp(-k z_c) W`. When the loads have a
//! phase difference `alpha`, the real cross-power, topography power and Moho
//! power pick up `cos(alpha)` cross terms. `alpha = pi/2` is the uncorrelated
//! case.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::EstimateError;

/// Newtonian gravitational constant (m^3 kg^-1 s^-2).
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67e-11;

/// m/s^2 to mGal.
const MGAL_PER_MS2: f64 = 1e5;

/// Uncorrelated initial loads.
pub const UNCORRELATED_ALPHA: f64 = FRAC_PI_2;

/// Physical constants of the plate model, in SI units.
///
/// The [`Default`] implementation describes continental lithosphere with a
/// 35 km crust.
#[derive(Clone, Debug, PartialEq)]
pub struct FlexureParams {
    young_modulus: f64,
    poisson_ratio: f64,
    gravity: f64,
    rho_mantle: f64,
    rho_crust: f64,
    moho_depth: f64,
}

impl Default for FlexureParams {
    fn default() -> Self {
        Self {
            young_modulus: 1e11,
            poisson_ratio: 0.25,
            gravity: 9.81,
            rho_mantle: 3200.0,
            rho_crust: 2700.0,
            moho_depth: 35e3,
        }
    }
}

impl FlexureParams {
    /// Creates the default parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets Young's modulus (Pa).
    pub fn with_young_modulus(mut self, e: f64) -> Self {
        self.young_modulus = e;
        self
    }

    pub fn with_poisson_ratio(mut self, nu: f64) -> Self {
        self.poisson_ratio = nu;
        self
    }

    /// Sets the gravitational acceleration (m/s^2).
    pub fn with_gravity(mut self, g: f64) -> Self {
        self.gravity = g;
        self
    }

    /// Sets the mantle density (kg/m^3).
    pub fn with_rho_mantle(mut self, rho: f64) -> Self {
        self.rho_mantle = rho;
        self
    }

    /// Sets the crustal density (kg/m^3).
    pub fn with_rho_crust(mut self, rho: f64) -> Self {
        self.rho_crust = rho;
        self
    }

    /// Sets the depth of the subsurface load interface (m).
    pub fn with_moho_depth(mut self, depth: f64) -> Self {
        self.moho_depth = depth;
        self
    }

    pub fn young_modulus(&self) -> f64 {
        self.young_modulus
    }

    pub fn poisson_ratio(&self) -> f64 {
        self.poisson_ratio
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn rho_mantle(&self) -> f64 {
        self.rho_mantle
    }

    pub fn rho_crust(&self) -> f64 {
        self.rho_crust
    }

    pub fn moho_depth(&self) -> f64 {
        self.moho_depth
    }

    /// Flexural rigidity `E Te^3 / (12 (1 - nu^2))` for `te_km` in km.
    pub fn rigidity(&self, te_km: f64) -> f64 {
        let te = te_km * 1e3;
        self.young_modulus * te.powi(3) / (12.0 * (1.0 - self.poisson_ratio.powi(2)))
    }

    /// Validates this parameter set.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::Validation`] listing every failed check.
    pub fn validate(&self) -> Result<(), EstimateError> {
        let mut problems = Vec::new();
        let positive = [
            ("young_modulus", self.young_modulus),
            ("gravity", self.gravity),
            ("rho_crust", self.rho_crust),
        ];
        for (name, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                problems.push(format!("{name} must be finite and > 0, got {v}"));
            }
        }
        if !(0.0..0.5).contains(&self.poisson_ratio) {
            problems.push(format!(
                "poisson_ratio must be in [0, 0.5), got {}",
                self.poisson_ratio
            ));
        }
        if !(self.rho_mantle > self.rho_crust && self.rho_mantle.is_finite()) {
            problems.push(format!(
                "rho_mantle ({}) must exceed rho_crust ({})",
                self.rho_mantle, self.rho_crust
            ));
        }
        if !(self.moho_depth.is_finite() && self.moho_depth >= 0.0) {
            problems.push(format!(
                "moho_depth must be finite and >= 0, got {}",
                self.moho_depth
            ));
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

/// Predicted real admittance (mGal/m) and coherence at each wavenumber.
#[derive(Clone, Debug, PartialEq)]
pub struct FlexureSpectra {
    pub admittance: Vec<f64>,
    pub coherence: Vec<f64>,
}

/// Real admittance and coherence at one wavenumber `k` (rad/m).
///
/// `load_ratio` is `F` in `[0, 1)`, the subsurface share of the total initial
/// load, and `alpha` the phase between the two loads in radians.
pub fn xspec_at(
    k: f64,
    te_km: f64,
    load_ratio: f64,
    alpha: f64,
    params: &FlexureParams,
) -> (f64, f64) {
    let rho_c = params.rho_crust;
    let drho = params.rho_mantle - rho_c;
    let psi = params.rigidity(te_km) * k.powi(4) / params.gravity;
    let f = load_ratio / (1.0 - load_ratio);

    let (h_t, w_t) = (drho + psi, -rho_c);
    let (h_b, w_b) = (-f * rho_c, f * rho_c * (rho_c + psi) / drho);
    let cos_a = alpha.cos();

    let cross = w_t * h_t + w_b * h_b + (w_t * h_b + w_b * h_t) * cos_a;
    let hh = h_t * h_t + h_b * h_b + 2.0 * h_t * h_b * cos_a;
    let ww = w_t * w_t + w_b * w_b + 2.0 * w_t * w_b * cos_a;

    let bouguer = 2.0 * PI * GRAVITATIONAL_CONSTANT * drho * (-k * params.moho_depth).exp();
    let admittance = MGAL_PER_MS2 * bouguer * cross / hh;
    let coherence = cross * cross / (hh * ww);
    (admittance, coherence)
}

/// [`xspec_at`] over a set of wavenumbers.
pub fn real_xspec_functions(
    k: &[f64],
    te_km: f64,
    load_ratio: f64,
    alpha: f64,
    params: &FlexureParams,
) -> FlexureSpectra {
    let (admittance, coherence) = k
        .iter()
        .map(|&kk| xspec_at(kk, te_km, load_ratio, alpha, params))
        .unzip();
    FlexureSpectra {
        admittance,
        coherence,
    }
}
