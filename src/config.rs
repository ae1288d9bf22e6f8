use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use flexwave_estimate::FlexureParams;
use flexwave_wavelet::{DEFAULT_K0, DEFAULT_N_ANGLES, DEFAULT_TAPER_WIDTH};

/// Top-level flexwave configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlexwaveConfig {
    /// Wavelet transform settings.
    #[serde(default)]
    pub transform: TransformToml,

    /// Analysis scale settings.
    #[serde(default)]
    pub scales: ScalesToml,

    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Elastic thickness estimation settings.
    #[serde(default)]
    pub estimate: EstimateToml,

    /// Plate and density constants of the flexure model.
    #[serde(default)]
    pub flexure: FlexureToml,
}

impl FlexwaveConfig {
    /// Loads the TOML file at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformToml {
    #[serde(default = "default_k0")]
    pub k0: f64,
    #[serde(default = "default_n_angles")]
    pub n_angles: usize,
    #[serde(default = "default_taper_width")]
    pub taper_width: usize,
    /// Padded FFT size `[nnx, nny]`; derived from the grid when absent.
    #[serde(default)]
    pub pad: Option<[usize; 2]>,
}

impl Default for TransformToml {
    fn default() -> Self {
        Self {
            k0: default_k0(),
            n_angles: default_n_angles(),
            taper_width: default_taper_width(),
            pad: None,
        }
    }
}

fn default_k0() -> f64 {
    DEFAULT_K0
}
fn default_n_angles() -> usize {
    DEFAULT_N_ANGLES
}
fn default_taper_width() -> usize {
    DEFAULT_TAPER_WIDTH
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScalesToml {
    /// Explicit wavenumbers in rad/m.
    #[serde(default)]
    pub wavenumbers: Option<Vec<f64>>,
    /// Number of automatic scales when `wavenumbers` is absent.
    #[serde(default = "default_n_scales")]
    pub n_scales: usize,
}

impl Default for ScalesToml {
    fn default() -> Self {
        Self {
            wavenumbers: None,
            n_scales: default_n_scales(),
        }
    }
}

fn default_n_scales() -> usize {
    20
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    #[serde(default = "default_coord_scale")]
    pub coord_scale: f64,
    #[serde(default = "default_spacing_tol")]
    pub spacing_tol: f64,
    /// NetCDF field variable, tried before `z`.
    #[serde(default)]
    pub z_var: Option<String>,
    #[serde(default = "default_compression")]
    pub compression: String,
    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            coord_scale: default_coord_scale(),
            spacing_tol: default_spacing_tol(),
            z_var: None,
            compression: default_compression(),
            row_group_size: default_row_group_size(),
        }
    }
}

fn default_coord_scale() -> f64 {
    1.0
}
fn default_spacing_tol() -> f64 {
    1e-6
}
fn default_compression() -> String {
    "snappy".to_string()
}
fn default_row_group_size() -> usize {
    1_000_000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EstimateToml {
    /// `admit`, `coh` or `admit_coh`.
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default)]
    pub fit_alpha: bool,
    /// Searched elastic thickness interval in km.
    #[serde(default = "default_te_range")]
    pub te_range: [f64; 2],
    #[serde(default = "default_n_te")]
    pub n_te: usize,
    #[serde(default = "default_n_load_ratio")]
    pub n_load_ratio: usize,
    #[serde(default = "default_n_alpha")]
    pub n_alpha: usize,
    #[serde(default = "default_refine")]
    pub refine: bool,
}

impl Default for EstimateToml {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            fit_alpha: false,
            te_range: default_te_range(),
            n_te: default_n_te(),
            n_load_ratio: default_n_load_ratio(),
            n_alpha: default_n_alpha(),
            refine: default_refine(),
        }
    }
}

fn default_mode() -> String {
    "admit_coh".to_string()
}
fn default_te_range() -> [f64; 2] {
    [2.0, 250.0]
}
fn default_n_te() -> usize {
    249
}
fn default_n_load_ratio() -> usize {
    100
}
fn default_n_alpha() -> usize {
    37
}
fn default_refine() -> bool {
    true
}

/// SI units throughout; `moho_depth` in metres.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlexureToml {
    #[serde(default = "default_young_modulus")]
    pub young_modulus: f64,
    #[serde(default = "default_poisson_ratio")]
    pub poisson_ratio: f64,
    #[serde(default = "default_gravity")]
    pub gravity: f64,
    #[serde(default = "default_rho_mantle")]
    pub rho_mantle: f64,
    #[serde(default = "default_rho_crust")]
    pub rho_crust: f64,
    #[serde(default = "default_moho_depth")]
    pub moho_depth: f64,
}

impl Default for FlexureToml {
    fn default() -> Self {
        Self {
            young_modulus: default_young_modulus(),
            poisson_ratio: default_poisson_ratio(),
            gravity: default_gravity(),
            rho_mantle: default_rho_mantle(),
            rho_crust: default_rho_crust(),
            moho_depth: default_moho_depth(),
        }
    }
}

fn default_young_modulus() -> f64 {
    FlexureParams::default().young_modulus()
}
fn default_poisson_ratio() -> f64 {
    FlexureParams::default().poisson_ratio()
}
fn default_gravity() -> f64 {
    FlexureParams::default().gravity()
}
fn default_rho_mantle() -> f64 {
    FlexureParams::default().rho_mantle()
}
fn default_rho_crust() -> f64 {
    FlexureParams::default().rho_crust()
}
fn default_moho_depth() -> f64 {
    FlexureParams::default().moho_depth()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: FlexwaveConfig = toml::from_str("").unwrap();
        assert_eq!(config.transform.k0, DEFAULT_K0);
        assert_eq!(config.transform.n_angles, 23);
        assert_eq!(config.transform.taper_width, 10);
        assert!(config.transform.pad.is_none());
        assert!(config.scales.wavenumbers.is_none());
        assert_eq!(config.scales.n_scales, 20);
        assert_eq!(config.io.compression, "snappy");
        assert_eq!(config.io.row_group_size, 1_000_000);
        assert_eq!(config.estimate.mode, "admit_coh");
        assert_eq!(config.estimate.te_range, [2.0, 250.0]);
        assert!(!config.estimate.fit_alpha);
        assert_eq!(config.flexure.rho_crust, 2700.0);
        assert_eq!(config.flexure.moho_depth, 35e3);
    }

    #[test]
    fn estimate_and_flexure_sections_parse() {
        let text = r#"
            [estimate]
            mode = "coh"
            fit_alpha = true
            te_range = [5.0, 120.0]
            n_te = 116

            [flexure]
            rho_crust = 2800.0
            moho_depth = 30e3
        "#;
        let config: FlexwaveConfig = toml::from_str(text).unwrap();
        assert_eq!(config.estimate.mode, "coh");
        assert!(config.estimate.fit_alpha);
        assert_eq!(config.estimate.n_te, 116);
        assert_eq!(config.estimate.n_load_ratio, 100);
        assert_eq!(config.flexure.rho_crust, 2800.0);
        assert_eq!(config.flexure.rho_mantle, 3200.0);
        assert!(toml::from_str::<FlexwaveConfig>("[flexure]\nte = 20.0\n").is_err());
    }

    #[test]
    fn full_file_parses() {
        let text = r#"
            [transform]
            k0 = 2.668
            n_angles = 11
            taper_width = 0
            pad = [256, 128]

            [scales]
            wavenumbers = [1e-5, 2e-5, 4e-5]

            [io]
            coord_scale = 1000.0
            compression = "zstd"
            row_group_size = 5000
        "#;
        let config: FlexwaveConfig = toml::from_str(text).unwrap();
        assert_eq!(config.transform.k0, 2.668);
        assert_eq!(config.transform.pad, Some([256, 128]));
        assert_eq!(config.scales.wavenumbers.as_deref(), Some(&[1e-5, 2e-5, 4e-5][..]));
        assert_eq!(config.io.coord_scale, 1000.0);
        assert_eq!(config.io.compression, "zstd");
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(toml::from_str::<FlexwaveConfig>("[transform]\nk_0 = 5.0\n").is_err());
        assert!(toml::from_str::<FlexwaveConfig>("[plot]\n").is_err());
    }

    #[test]
    fn load_without_path_is_default() {
        let config = FlexwaveConfig::load(None).unwrap();
        assert_eq!(config.scales.n_scales, 20);
    }

    #[test]
    fn load_missing_file_has_context() {
        let err = FlexwaveConfig::load(Some(Path::new("/tmp/flexwave_no_such.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config file"));
    }
}
