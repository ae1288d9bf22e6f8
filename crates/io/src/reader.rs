//! Grid readers and their configuration.

use std::path::Path;

use flexwave_wavelet::Grid;
use tracing::{debug, info};

use crate::error::IoError;
use crate::xyz;

/// Configuration for reading gridded fields.
///
/// The [`Default`] implementation takes coordinates as metres and accepts
/// a relative spacing jitter of `1e-6`.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Factor converting file coordinates to metres.
    coord_scale: f64,
    /// Relative tolerance on the step between neighbouring coordinates.
    spacing_tol: f64,
    /// Variable names tried in order for the x axis (NetCDF only).
    x_aliases: Vec<String>,
    /// Variable names tried in order for the y axis (NetCDF only).
    y_aliases: Vec<String>,
    /// Variable names tried in order for the field (NetCDF only).
    z_aliases: Vec<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            coord_scale: 1.0,
            spacing_tol: 1e-6,
            x_aliases: vec!["x".into(), "lon".into(), "longitude".into()],
            y_aliases: vec!["y".into(), "lat".into(), "latitude".into()],
            z_aliases: vec!["z".into(), "Band1".into()],
        }
    }
}

impl ReaderConfig {
    /// Sets the factor converting file coordinates to metres.
    pub fn with_coord_scale(mut self, scale: f64) -> Self {
        self.coord_scale = scale;
        self
    }

    /// Sets the relative spacing tolerance.
    pub fn with_spacing_tol(mut self, tol: f64) -> Self {
        self.spacing_tol = tol;
        self
    }

    /// Sets the NetCDF field variable name, tried before the defaults.
    pub fn with_z_var(mut self, name: impl Into<String>) -> Self {
        self.z_aliases.insert(0, name.into());
        self
    }

    pub fn coord_scale(&self) -> f64 {
        self.coord_scale
    }

    pub fn spacing_tol(&self) -> f64 {
        self.spacing_tol
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every failed check.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut problems = Vec::new();
        if !(self.coord_scale.is_finite() && self.coord_scale > 0.0) {
            problems.push(format!(
                "coord_scale must be finite and > 0, got {}",
                self.coord_scale
            ));
        }
        if !(self.spacing_tol.is_finite() && (0.0..0.5).contains(&self.spacing_tol)) {
            problems.push(format!(
                "spacing_tol must be in [0, 0.5), got {}",
                self.spacing_tol
            ));
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: problems.len(),
                details: problems.join("; "),
            })
        }
    }
}

/// Read a gridded field from a text file of `x y z` triples.
///
/// Columns may be separated by whitespace or commas. Blank lines and lines
/// starting with `#` are skipped. Node order is free; axes are rebuilt from
/// the unique coordinates, sorted ascending.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`IoError::Validation`] | invalid `config` |
/// | [`IoError::FileNotFound`] | `path` does not exist |
/// | [`IoError::Parse`] | a line is not three numbers |
/// | [`IoError::IrregularSpacing`] | uneven coordinate steps |
/// | [`IoError::DuplicateNode`] / [`IoError::MissingNodes`] | incomplete grid |
/// | [`IoError::Grid`] | fewer than 2 nodes per axis or non-finite values |
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_xyz(path: &Path, config: &ReaderConfig) -> Result<Grid, IoError> {
    config.validate()?;
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|e| IoError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let nodes = xyz::parse_nodes(&text, config.coord_scale)?;
    debug!(n_nodes = nodes.len(), "parsed xyz nodes");
    let grid = xyz::assemble(&nodes, config.spacing_tol)?;
    info!(
        nx = grid.nx(),
        ny = grid.ny(),
        dx = grid.dx(),
        dy = grid.dy(),
        "grid loaded"
    );
    Ok(grid)
}

/// Read a GMT-style NetCDF grid: 1-D `x`/`lon` and `y`/`lat` coordinate
/// variables and a 2-D field stored `z(y, x)`.
///
/// # Errors
///
/// As [`read_xyz`], plus [`IoError::MissingVariable`],
/// [`IoError::DimensionMismatch`] and [`IoError::Netcdf`].
#[cfg(feature = "netcdf")]
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_netcdf(path: &Path, config: &ReaderConfig) -> Result<Grid, IoError> {
    use ndarray::Array2;

    use crate::netcdf_read;

    config.validate()?;
    let file = netcdf_read::open_file(path)?;

    let x_refs: Vec<&str> = config.x_aliases.iter().map(String::as_str).collect();
    let y_refs: Vec<&str> = config.y_aliases.iter().map(String::as_str).collect();
    let z_refs: Vec<&str> = config.z_aliases.iter().map(String::as_str).collect();

    let xs = netcdf_read::read_1d_f64(&file, &x_refs, path)?;
    let ys = netcdf_read::read_1d_f64(&file, &y_refs, path)?;
    let (values, [ny, nx]) = netcdf_read::read_2d_f64(&file, &z_refs, path)?;

    if xs.len() != nx {
        return Err(IoError::DimensionMismatch {
            name: "x".to_string(),
            expected: nx,
            got: xs.len(),
        });
    }
    if ys.len() != ny {
        return Err(IoError::DimensionMismatch {
            name: "y".to_string(),
            expected: ny,
            got: ys.len(),
        });
    }

    let scaled = |v: &[f64]| -> Vec<f64> { v.iter().map(|c| c * config.coord_scale).collect() };
    let (xs, ys) = (scaled(&xs), scaled(&ys));
    let dx = regular_spacing(&xs, config.spacing_tol, "x")?;
    let dy = regular_spacing(&ys, config.spacing_tol, "y")?;

    // Stored row-major as (y, x); axes may run in either direction.
    let x_rev = xs.len() > 1 && xs[1] < xs[0];
    let y_rev = ys.len() > 1 && ys[1] < ys[0];
    let data = Array2::from_shape_fn((nx, ny), |(i, j)| {
        let src_i = if x_rev { nx - 1 - i } else { i };
        let src_j = if y_rev { ny - 1 - j } else { j };
        values[src_j * nx + src_i]
    });

    let grid = Grid::new(data, dx, dy)?;
    info!(nx, ny, dx, dy, "grid loaded");
    Ok(grid)
}

/// Step of an evenly spaced coordinate vector, in either direction.
///
/// Every neighbouring step must match `|last - first| / (n - 1)` within the
/// relative tolerance `tol`.
///
/// # Errors
///
/// [`IoError::IrregularSpacing`] on an uneven or zero step. Vectors with
/// fewer than two entries are accepted with a spacing of 1.0; the grid
/// constructor then rejects them as too small.
pub(crate) fn regular_spacing(coords: &[f64], tol: f64, axis: &'static str) -> Result<f64, IoError> {
    let n = coords.len();
    if n < 2 {
        return Ok(1.0);
    }
    let expected = (coords[n - 1] - coords[0]).abs() / (n - 1) as f64;
    for w in coords.windows(2) {
        let step = (w[1] - w[0]).abs();
        if !(expected > 0.0) || (step - expected).abs() > tol * expected {
            return Err(IoError::IrregularSpacing {
                axis,
                expected,
                step,
            });
        }
    }
    Ok(expected)
}
