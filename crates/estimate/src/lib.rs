//! # flexwave-estimate
//!
//! Elastic thickness `Te` and load ratio `F` from global wavelet admittance
//! and coherence.
//!
//! - [`real_xspec_functions`]: predicted admittance and coherence of a
//!   plate with surface and subsurface loads
//! - [`estimate`]: posterior mean, standard deviation and best value of
//!   `Te`, `F` and optionally the load phase, weighted by the jackknife
//!   errors
//!
//! ## Quick Start
//!
//! ```ignore
//! use flexwave_estimate::{EstimateConfig, FitMode, Observations, estimate};
//!
//! let obs = Observations::from_global(&ac.global_admittance(), &ac.global_coherence())?;
//! let fit = estimate(&obs, &EstimateConfig::new().with_mode(FitMode::AdmitCoh))?;
//! println!("Te = {:.1} +/- {:.1} km", fit.te.mean, fit.te.std);
//! ```

mod error;
mod fit;
mod flexure;
mod refine;

pub use error::EstimateError;
pub use fit::{
    Estimate, EstimateConfig, FitMode, MAX_LOAD_RATIO, Observations, ParamSummary, estimate,
};
pub use flexure::{
    FlexureParams, FlexureSpectra, GRAVITATIONAL_CONSTANT, UNCORRELATED_ALPHA, real_xspec_functions,
    xspec_at,
};
