//! Run-wide transform configuration.

use std::f64::consts::PI;

use crate::error::WaveletError;

/// Central wavenumber of the directional Morlet family.
pub const DEFAULT_K0: f64 = 5.336;

/// Number of orientations spanning a half-turn.
pub const DEFAULT_N_ANGLES: usize = 23;

/// Edge taper footprint in samples.
pub const DEFAULT_TAPER_WIDTH: usize = 10;

/// Immutable configuration shared by every transform in a run.
///
/// Holds the constants that must agree between any two coefficient tensors
/// used together: the wavelet central wavenumber `k0` and the angular
/// discretisation `n_angles`. Each [`WaveletCoefficients`](crate::WaveletCoefficients)
/// keeps a copy of the config that produced it.
///
/// # Example
///
/// ```ignore
/// use flexwave_wavelet::TransformConfig;
///
/// let config = TransformConfig::new()
///     .with_k0(5.336)
///     .with_n_angles(23)
///     .with_taper_width(10);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TransformConfig {
    /// Central wavenumber of the mother wavelet.
    k0: f64,
    /// Orientations over a half-turn.
    n_angles: usize,
    /// Edge taper footprint in samples.
    taper_width: usize,
}

impl TransformConfig {
    /// Creates a new `TransformConfig` with default parameters.
    ///
    /// Defaults: `k0 = 5.336`, `n_angles = 23`, `taper_width = 10`.
    pub fn new() -> Self {
        Self {
            k0: DEFAULT_K0,
            n_angles: DEFAULT_N_ANGLES,
            taper_width: DEFAULT_TAPER_WIDTH,
        }
    }

    /// Sets the central wavenumber.
    pub fn with_k0(mut self, k0: f64) -> Self {
        self.k0 = k0;
        self
    }

    /// Sets the number of orientations.
    pub fn with_n_angles(mut self, n_angles: usize) -> Self {
        self.n_angles = n_angles;
        self
    }

    /// Sets the edge taper width (0 disables tapering).
    pub fn with_taper_width(mut self, taper_width: usize) -> Self {
        self.taper_width = taper_width;
        self
    }

    /// Returns the central wavenumber.
    pub fn k0(&self) -> f64 {
        self.k0
    }

    /// Returns the number of orientations.
    pub fn n_angles(&self) -> usize {
        self.n_angles
    }

    /// Returns the edge taper width.
    pub fn taper_width(&self) -> usize {
        self.taper_width
    }

    /// Orientation of angle bin `a` (zero-based), in radians.
    ///
    /// `a * pi / n_angles - pi / 2`, so the bins cover `[-pi/2, pi/2)`.
    pub fn angle(&self, a: usize) -> f64 {
        a as f64 * (PI / self.n_angles as f64) - PI / 2.0
    }

    /// All orientations in bin order.
    pub fn angles(&self) -> Vec<f64> {
        (0..self.n_angles).map(|a| self.angle(a)).collect()
    }

    /// Validates the configuration.
    ///
    /// The jackknife needs at least two angular samples, so `n_angles >= 2`.
    ///
    /// # Errors
    ///
    /// [`WaveletError::InvalidConfig`] if `k0` is not finite and positive or
    /// `n_angles < 2`.
    pub fn validate(&self) -> Result<(), WaveletError> {
        if !(self.k0.is_finite() && self.k0 > 0.0) {
            return Err(WaveletError::InvalidConfig(format!(
                "k0 must be finite and > 0, got {}",
                self.k0
            )));
        }
        if self.n_angles < 2 {
            return Err(WaveletError::InvalidConfig(format!(
                "n_angles must be >= 2, got {}",
                self.n_angles
            )));
        }
        Ok(())
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn config_defaults() {
        let config = TransformConfig::new();
        assert_relative_eq!(config.k0(), 5.336);
        assert_eq!(config.n_angles(), 23);
        assert_eq!(config.taper_width(), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_builder() {
        let config = TransformConfig::new()
            .with_k0(6.0)
            .with_n_angles(12)
            .with_taper_width(0);
        assert_relative_eq!(config.k0(), 6.0);
        assert_eq!(config.n_angles(), 12);
        assert_eq!(config.taper_width(), 0);
    }

    #[test]
    fn config_default_trait() {
        assert_eq!(TransformConfig::new(), TransformConfig::default());
    }

    #[test]
    fn angles_span_half_turn() {
        let config = TransformConfig::new();
        let angles = config.angles();
        assert_eq!(angles.len(), 23);
        assert_relative_eq!(angles[0], -PI / 2.0, epsilon = 1e-12);
        let step = PI / 23.0;
        for w in angles.windows(2) {
            assert_relative_eq!(w[1] - w[0], step, epsilon = 1e-12);
        }
        assert!(*angles.last().unwrap() < PI / 2.0);
    }

    #[test]
    fn invalid_k0() {
        for k0 in [0.0, -1.0, f64::NAN] {
            let err = TransformConfig::new().with_k0(k0).validate().unwrap_err();
            assert!(matches!(err, WaveletError::InvalidConfig(_)));
        }
    }

    #[test]
    fn invalid_n_angles() {
        let err = TransformConfig::new()
            .with_n_angles(1)
            .validate()
            .unwrap_err();
        assert!(matches!(err, WaveletError::InvalidConfig(_)));
    }

    #[test]
    fn config_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<TransformConfig>();
    }
}
