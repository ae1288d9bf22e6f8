//! Wavenumber coordinates of an FFT-padded domain.

use std::f64::consts::PI;

/// Angular wavenumbers of each FFT bin along x and y.
///
/// Units are rad per unit of the spacing passed to [`WavenumberArrays::new`];
/// the transform passes kilometres, giving rad/km.
#[derive(Clone, Debug)]
pub struct WavenumberArrays {
    kx: Vec<f64>,
    ky: Vec<f64>,
}

impl WavenumberArrays {
    /// Builds the arrays for an `nnx x nny` domain sampled at `dx`, `dy`.
    pub fn new(nnx: usize, nny: usize, dx: f64, dy: f64) -> Self {
        Self {
            kx: fft_wavenumbers(nnx, dx),
            ky: fft_wavenumbers(nny, dy),
        }
    }

    /// Wavenumbers along x, FFT bin order.
    pub fn kx(&self) -> &[f64] {
        &self.kx
    }

    /// Wavenumbers along y, FFT bin order.
    pub fn ky(&self) -> &[f64] {
        &self.ky
    }

    /// Padded domain shape `(nnx, nny)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.kx.len(), self.ky.len())
    }
}

/// Angular wavenumbers for an `n`-point FFT.
///
/// Non-negative for `i = 0..=n/2`, negative for `i = n/2+1..n`.
fn fft_wavenumbers(n: usize, d: f64) -> Vec<f64> {
    let dk = 2.0 * PI / (n as f64 * d);
    (0..n)
        .map(|i| {
            if i <= n / 2 {
                i as f64 * dk
            } else {
                -((n - i) as f64) * dk
            }
        })
        .collect()
}
