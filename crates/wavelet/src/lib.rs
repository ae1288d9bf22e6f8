//! # flexwave-wavelet
//!
//! Directional Morlet wavelet transform of regularly gridded 2D fields.
//!
//! ## Transform Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["Grid::new(data, dx, dy)?"] -->|"validate"| B["Grid"]
//!     B -->|"taper + de-mean + pad"| C["padded field"]
//!     C -->|"Fft2::forward, conj"| D["spectrum"]
//!     D -->|"x daughter_wavelet(s, a)"| E["filtered"]
//!     E -->|"Fft2::inverse, quadrant_swap, crop"| F["WaveletCoefficients"]
//! ```
//!
//! Coefficients are indexed `[x, y, angle, scale]`. Wavenumbers in a
//! [`ScaleSet`] are in rad/m; grid spacings are in metres.
//!
//! ## Quick Start
//!
//! ```ignore
//! use flexwave_wavelet::{Grid, ScaleSet, TransformConfig, padded_shape, transform};
//!
//! let grid = Grid::new(data, 1000.0, 1000.0)?;
//! let scales = ScaleSet::for_grid(&grid, 16)?;
//! let (nnx, nny) = padded_shape(grid.nx(), grid.ny());
//! let wt = transform(&grid, nnx, nny, &scales, &TransformConfig::new())?;
//! assert_eq!(wt.n_scales(), 16);
//! ```

mod config;
mod daughter;
mod error;
mod fft;
mod grid;
mod scales;
mod taper;
mod transform;
mod wavenumber;

pub use config::{DEFAULT_K0, DEFAULT_N_ANGLES, DEFAULT_TAPER_WIDTH, TransformConfig};
pub use daughter::daughter_wavelet;
pub use error::WaveletError;
pub use fft::{Fft2, quadrant_swap};
pub use grid::Grid;
pub use scales::ScaleSet;
pub use taper::taper;
pub use transform::{WaveletCoefficients, padded_shape, transform};
pub use wavenumber::WavenumberArrays;
