//! Low-level NetCDF extraction helpers.

use std::path::Path;

use crate::error::IoError;

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Read a 1-D `f64` variable, trying each alias in order.
///
/// Returns the data from the first alias that matches. If none match,
/// returns [`IoError::MissingVariable`] with the first alias as the name.
pub(crate) fn read_1d_f64(
    file: &netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<Vec<f64>, IoError> {
    for &alias in aliases {
        if let Some(var) = file.variable(alias) {
            return Ok(var.get_values::<f64, _>(..)?);
        }
    }
    Err(missing(aliases, path))
}

/// Read a 2-D `f64` variable (first alias found) and return the flattened
/// data with its shape `[ny, nx]`.
pub(crate) fn read_2d_f64(
    file: &netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<(Vec<f64>, [usize; 2]), IoError> {
    let var = aliases
        .iter()
        .find_map(|&alias| file.variable(alias))
        .ok_or_else(|| missing(aliases, path))?;

    let dims = var.dimensions();
    if dims.len() != 2 {
        return Err(IoError::DimensionMismatch {
            name: format!("{} dimensions", var.name()),
            expected: 2,
            got: dims.len(),
        });
    }
    let ny = dims[0].len();
    let nx = dims[1].len();

    let data = var.get_values::<f64, _>(..)?;
    Ok((data, [ny, nx]))
}

fn missing(aliases: &[&str], path: &Path) -> IoError {
    let name = aliases.first().copied().unwrap_or("unknown");
    IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    }
}
