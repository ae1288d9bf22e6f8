//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use flexwave_estimate::{EstimateConfig, FitMode, FlexureParams};
use flexwave_io::{Compression, ReaderConfig, WriterConfig};
use flexwave_wavelet::{Grid, ScaleSet, TransformConfig, padded_shape};

use crate::config::{EstimateToml, FlexureToml, IoToml, ScalesToml, TransformToml};

/// Parses a compression algorithm name string into the corresponding enum variant.
pub fn parse_compression(s: &str) -> Result<Compression> {
    match s.to_lowercase().as_str() {
        "none" => Ok(Compression::None),
        "snappy" => Ok(Compression::Snappy),
        "zstd" => Ok(Compression::Zstd),
        other => bail!("unknown compression: {other:?}"),
    }
}

/// Builds a [`TransformConfig`] from the TOML transform section.
pub fn build_transform_config(transform: &TransformToml) -> Result<TransformConfig> {
    let cfg = TransformConfig::new()
        .with_k0(transform.k0)
        .with_n_angles(transform.n_angles)
        .with_taper_width(transform.taper_width);
    cfg.validate()?;
    Ok(cfg)
}

/// Padded FFT domain for `grid`: the configured `pad`, or [`padded_shape`].
pub fn padding(transform: &TransformToml, grid: &Grid) -> Result<(usize, usize)> {
    match transform.pad {
        Some([nnx, nny]) => {
            if nnx < grid.nx() || nny < grid.ny() {
                bail!(
                    "pad [{nnx}, {nny}] is smaller than the {}x{} grid",
                    grid.nx(),
                    grid.ny()
                );
            }
            Ok((nnx, nny))
        }
        None => Ok(padded_shape(grid.nx(), grid.ny())),
    }
}

/// Builds the analysis [`ScaleSet`]: explicit wavenumbers when given,
/// otherwise `n_scales` automatic scales fitted to `grid`.
pub fn build_scale_set(scales: &ScalesToml, grid: &Grid) -> Result<ScaleSet> {
    let set = match scales.wavenumbers {
        Some(ref kf) => ScaleSet::new(kf.clone())?,
        None => ScaleSet::for_grid(grid, scales.n_scales)?,
    };
    Ok(set)
}

/// Builds a [`ReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoToml) -> Result<ReaderConfig> {
    let mut cfg = ReaderConfig::default()
        .with_coord_scale(io.coord_scale)
        .with_spacing_tol(io.spacing_tol);
    if let Some(ref v) = io.z_var {
        cfg = cfg.with_z_var(v);
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`WriterConfig`] from the TOML I/O configuration.
pub fn build_writer_config(io: &IoToml) -> Result<WriterConfig> {
    let compression = parse_compression(&io.compression)?;
    let cfg = WriterConfig::default()
        .with_compression(compression)
        .with_row_group_size(io.row_group_size);
    cfg.validate()?;
    Ok(cfg)
}

/// Parses a fit mode name.
pub fn parse_fit_mode(s: &str) -> Result<FitMode> {
    match s.to_lowercase().as_str() {
        "admit" => Ok(FitMode::Admit),
        "coh" => Ok(FitMode::Coh),
        "admit_coh" => Ok(FitMode::AdmitCoh),
        other => bail!("unknown fit mode: {other:?} (expected admit, coh or admit_coh)"),
    }
}

/// Builds [`FlexureParams`] from the TOML flexure section.
pub fn build_flexure_params(flexure: &FlexureToml) -> FlexureParams {
    FlexureParams::new()
        .with_young_modulus(flexure.young_modulus)
        .with_poisson_ratio(flexure.poisson_ratio)
        .with_gravity(flexure.gravity)
        .with_rho_mantle(flexure.rho_mantle)
        .with_rho_crust(flexure.rho_crust)
        .with_moho_depth(flexure.moho_depth)
}

/// Builds an [`EstimateConfig`] from the TOML estimate and flexure sections.
pub fn build_estimate_config(estimate: &EstimateToml, flexure: &FlexureToml) -> Result<EstimateConfig> {
    let [te_min, te_max] = estimate.te_range;
    let cfg = EstimateConfig::new()
        .with_mode(parse_fit_mode(&estimate.mode)?)
        .with_fit_alpha(estimate.fit_alpha)
        .with_te_range(te_min, te_max)
        .with_grid(estimate.n_te, estimate.n_load_ratio, estimate.n_alpha)
        .with_refine(estimate.refine)
        .with_flexure(build_flexure_params(flexure));
    cfg.validate()?;
    Ok(cfg)
}
