//! Steps shared by every command: grid loading, the wavelet transform and
//! the JSON summary.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use flexwave_io::{GridTable, ReaderConfig, WriterConfig, read_xyz, write_parquet};
use flexwave_spectral::GlobalSpectrum;
use flexwave_wavelet::{Grid, ScaleSet, TransformConfig, WaveletCoefficients, transform};

use crate::config::FlexwaveConfig;
use crate::convert;

/// Extensions routed to the NetCDF reader.
const NETCDF_EXTENSIONS: &[&str] = &["nc", "grd", "nc4"];

fn is_netcdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| NETCDF_EXTENSIONS.contains(&e.to_lowercase().as_str()))
}

/// Reads a grid, choosing the reader from the file extension.
pub fn load_grid(path: &Path, reader: &ReaderConfig) -> Result<Grid> {
    info!(path = %path.display(), "reading grid");
    let grid = if is_netcdf(path) {
        read_netcdf_grid(path, reader)?
    } else {
        read_xyz(path, reader)
            .with_context(|| format!("failed to read XYZ grid: {}", path.display()))?
    };
    info!(
        nx = grid.nx(),
        ny = grid.ny(),
        dx = grid.dx(),
        dy = grid.dy(),
        "grid loaded"
    );
    Ok(grid)
}

/// Reads two grids and checks they share shape and spacing.
pub fn load_pair(path1: &Path, path2: &Path, reader: &ReaderConfig) -> Result<(Grid, Grid)> {
    let grid1 = load_grid(path1, reader)?;
    let grid2 = load_grid(path2, reader)?;
    if !grid1.is_colocated(&grid2) {
        anyhow::bail!(
            "grids are not co-located: {} is {}x{} at ({}, {}) m, {} is {}x{} at ({}, {}) m",
            path1.display(),
            grid1.nx(),
            grid1.ny(),
            grid1.dx(),
            grid1.dy(),
            path2.display(),
            grid2.nx(),
            grid2.ny(),
            grid2.dx(),
            grid2.dy()
        );
    }
    Ok((grid1, grid2))
}

#[cfg(feature = "netcdf")]
fn read_netcdf_grid(path: &Path, reader: &ReaderConfig) -> Result<Grid> {
    flexwave_io::read_netcdf(path, reader)
        .with_context(|| format!("failed to read NetCDF grid: {}", path.display()))
}

#[cfg(not(feature = "netcdf"))]
fn read_netcdf_grid(path: &Path, _reader: &ReaderConfig) -> Result<Grid> {
    anyhow::bail!(
        "{} looks like a NetCDF grid but flexwave was built without the `netcdf` feature",
        path.display()
    )
}

/// Transform settings resolved against a concrete grid.
#[derive(Debug)]
pub struct Analysis {
    pub config: TransformConfig,
    pub scales: ScaleSet,
    pub pad: (usize, usize),
}

impl Analysis {
    /// Resolves the TOML sections into library configs for `grid`.
    pub fn new(config: &FlexwaveConfig, grid: &Grid) -> Result<Self> {
        let analysis = Self {
            config: convert::build_transform_config(&config.transform)?,
            scales: convert::build_scale_set(&config.scales, grid)?,
            pad: convert::padding(&config.transform, grid)?,
        };
        info!(
            n_scales = analysis.scales.len(),
            n_angles = analysis.config.n_angles(),
            nnx = analysis.pad.0,
            nny = analysis.pad.1,
            "analysis resolved"
        );
        Ok(analysis)
    }

    /// Wavelet transform of `grid` under these settings.
    pub fn transform(&self, grid: &Grid) -> Result<WaveletCoefficients> {
        let (nnx, nny) = self.pad;
        transform(grid, nnx, nny, &self.scales, &self.config).context("wavelet transform failed")
    }
}

/// Writes `table` to Parquet.
pub fn write_table(path: &Path, table: &GridTable, writer: &WriterConfig) -> Result<()> {
    write_parquet(path, table, writer)
        .with_context(|| format!("failed to write Parquet: {}", path.display()))?;
    info!(path = %path.display(), rows = table.n_rows(), "results written");
    Ok(())
}

/// JSON summary of one run.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub command: &'static str,
    pub inputs: Vec<PathBuf>,
    pub grid: GridSummary,
    pub transform: TransformSummary,
    pub spectra: BTreeMap<&'static str, SpectrumSummary>,
}

#[derive(Debug, Serialize)]
pub struct GridSummary {
    pub nx: usize,
    pub ny: usize,
    pub dx: f64,
    pub dy: f64,
}

#[derive(Debug, Serialize)]
pub struct TransformSummary {
    pub k0: f64,
    pub n_angles: usize,
    pub taper_width: usize,
    pub pad: [usize; 2],
    pub wavenumbers: Vec<f64>,
}

/// Global spectrum; non-finite entries serialise as `null`.
#[derive(Debug, Serialize)]
pub struct SpectrumSummary {
    pub wavenumbers: Vec<f64>,
    pub values: Vec<Option<f64>>,
    pub errors: Vec<Option<f64>>,
}

impl From<&GlobalSpectrum> for SpectrumSummary {
    fn from(spectrum: &GlobalSpectrum) -> Self {
        let finite = |v: &f64| v.is_finite().then_some(*v);
        Self {
            wavenumbers: spectrum.wavenumbers().to_vec(),
            values: spectrum.values().iter().map(finite).collect(),
            errors: spectrum.errors().iter().map(finite).collect(),
        }
    }
}

impl Summary {
    /// Summary skeleton for `grid` analysed with `analysis`.
    pub fn new(command: &'static str, inputs: Vec<PathBuf>, grid: &Grid, analysis: &Analysis) -> Self {
        Self {
            command,
            inputs,
            grid: GridSummary {
                nx: grid.nx(),
                ny: grid.ny(),
                dx: grid.dx(),
                dy: grid.dy(),
            },
            transform: TransformSummary {
                k0: analysis.config.k0(),
                n_angles: analysis.config.n_angles(),
                taper_width: analysis.config.taper_width(),
                pad: [analysis.pad.0, analysis.pad.1],
                wavenumbers: analysis.scales.as_slice().to_vec(),
            },
            spectra: BTreeMap::new(),
        }
    }

    /// Adds a named global spectrum.
    pub fn with_spectrum(mut self, name: &'static str, spectrum: &GlobalSpectrum) -> Self {
        self.spectra.insert(name, SpectrumSummary::from(spectrum));
        self
    }

    /// Serialises the summary to pretty JSON at `path`.
    pub fn write(&self, path: &Path) -> Result<()> {
        write_json(path, self)
    }
}

/// Writes `value` as pretty JSON to `path`.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialise summary")?;
    std::fs::write(path, &json)
        .with_context(|| format!("failed to write summary: {}", path.display()))?;
    info!(path = %path.display(), "summary written");
    Ok(())
}
