//! # flexwave-spectral
//!
//! Angle-averaged spectral estimators over directional wavelet coefficients,
//! each paired with a leave-one-angle-out jackknife error.
//!
//! - [`scalogram`]: mean power of one field
//! - [`cross_scalogram`]: mean cross-power `w1 * conj(w2)` of two fields
//! - [`admit_coh`]: admittance and coherence of two fields
//!
//! All outputs are `[x, y, scale]` arrays. Every estimator first reduces
//! the per-angle samples to their mean, then runs the jackknife per pixel.
//!
//! ## Quick Start
//!
//! ```ignore
//! use flexwave_spectral::{admit_coh, scalogram};
//!
//! let sg = scalogram(&wt_topo);
//! let ac = admit_coh(&wt_topo, &wt_grav)?;
//! let global = ac.global_coherence();
//! ```

mod admit;
mod cross;
mod error;
mod global;
mod jackknife;
mod reduce;
mod scalogram;

pub use admit::{AdmitCoh, admit_coh};
pub use cross::{CrossScalogram, cross_scalogram};
pub use error::SpectralError;
pub use global::GlobalSpectrum;
pub use scalogram::{Scalogram, scalogram};
