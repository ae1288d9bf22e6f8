//! Long-form tables of per-pixel, per-scale results.

use flexwave_wavelet::Grid;
use ndarray::{Array3, ArrayView3};

use crate::error::IoError;

/// Named `[x, y, scale]` fields laid out for tabular output.
///
/// Every column shares the grid geometry and the scale axis. Rows run over
/// scale first, then x, then y, so each scale is a contiguous block of
/// `nx * ny` rows. Node coordinates are in metres from the first grid node.
#[derive(Clone, Debug)]
pub struct GridTable {
    x: Vec<f64>,
    y: Vec<f64>,
    wavenumbers: Vec<f64>,
    columns: Vec<(String, Array3<f64>)>,
}

impl GridTable {
    /// Creates an empty table over `grid` and the given scale axis (rad/m).
    pub fn new(grid: &Grid, wavenumbers: &[f64]) -> Self {
        Self {
            x: (0..grid.nx()).map(|i| i as f64 * grid.dx()).collect(),
            y: (0..grid.ny()).map(|j| j as f64 * grid.dy()).collect(),
            wavenumbers: wavenumbers.to_vec(),
            columns: Vec::new(),
        }
    }

    /// Appends a named `Float64` column.
    ///
    /// # Errors
    ///
    /// [`IoError::DimensionMismatch`] if `values` is not `nx x ny x ns`.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        values: ArrayView3<'_, f64>,
    ) -> Result<(), IoError> {
        let name = name.into();
        let expected = [self.x.len(), self.y.len(), self.wavenumbers.len()];
        for (axis, (&want, &got)) in expected.iter().zip(values.shape()).enumerate() {
            if want != got {
                return Err(IoError::DimensionMismatch {
                    name: format!("{name} axis {axis}"),
                    expected: want,
                    got,
                });
            }
        }
        self.columns.push((name, values.to_owned()));
        Ok(())
    }

    /// Builder form of [`add_column`](Self::add_column).
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: ArrayView3<'_, f64>,
    ) -> Result<Self, IoError> {
        self.add_column(name, values)?;
        Ok(self)
    }

    /// Number of rows, `nx * ny * ns`.
    pub fn n_rows(&self) -> usize {
        self.x.len() * self.y.len() * self.wavenumbers.len()
    }

    /// Names of the value columns in insertion order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub(crate) fn columns(&self) -> &[(String, Array3<f64>)] {
        &self.columns
    }

    /// Per-row `(x, y, scale index, wavenumber)` in row order.
    pub(crate) fn keys(&self) -> impl Iterator<Item = (f64, f64, u32, f64)> + '_ {
        self.wavenumbers.iter().enumerate().flat_map(move |(s, &kf)| {
            self.x.iter().flat_map(move |&x| {
                self.y.iter().map(move |&y| (x, y, s as u32, kf))
            })
        })
    }

    /// Column values in row order.
    pub(crate) fn column_values(values: &Array3<f64>) -> Vec<f64> {
        let (nx, ny, ns) = values.dim();
        let mut out = Vec::with_capacity(nx * ny * ns);
        for s in 0..ns {
            for i in 0..nx {
                for j in 0..ny {
                    out.push(values[[i, j, s]]);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn grid() -> Grid {
        Grid::new(Array2::zeros((3, 2)), 100.0, 200.0).unwrap()
    }

    #[test]
    fn rows_and_keys() {
        let table = GridTable::new(&grid(), &[1e-3, 2e-3]);
        assert_eq!(table.n_rows(), 12);
        let keys: Vec<_> = table.keys().collect();
        assert_eq!(keys.len(), 12);
        assert_eq!(keys[0], (0.0, 0.0, 0, 1e-3));
        assert_eq!(keys[1], (0.0, 200.0, 0, 1e-3));
        assert_eq!(keys[2], (100.0, 0.0, 0, 1e-3));
        assert_eq!(keys[6], (0.0, 0.0, 1, 2e-3));
        assert_eq!(keys[11], (200.0, 200.0, 1, 2e-3));
    }

    #[test]
    fn column_values_follow_key_order() {
        let values = Array3::from_shape_fn((3, 2, 2), |(i, j, s)| (100 * s + 10 * i + j) as f64);
        let flat = GridTable::column_values(&values);
        assert_eq!(&flat[..4], &[0.0, 1.0, 10.0, 11.0]);
        assert_eq!(flat[6], 100.0);
    }

    #[test]
    fn add_column_checks_shape() {
        let mut table = GridTable::new(&grid(), &[1e-3]);
        table
            .add_column("scalogram", Array3::zeros((3, 2, 1)).view())
            .unwrap();
        let err = table
            .add_column("error", Array3::zeros((3, 3, 1)).view())
            .unwrap_err();
        match err {
            IoError::DimensionMismatch {
                name,
                expected,
                got,
            } => {
                assert_eq!(name, "error axis 1");
                assert_eq!(expected, 2);
                assert_eq!(got, 3);
            }
            other => panic!("expected DimensionMismatch, got {other:?}"),
        }
        assert_eq!(table.column_names(), vec!["scalogram"]);
    }
}
