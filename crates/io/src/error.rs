//! Error types for flexwave-io.

use std::path::PathBuf;

use flexwave_wavelet::WaveletError;

/// Error type for all fallible operations in the flexwave-io crate.
///
/// Covers file access, text parsing of XYZ grids, grid-geometry problems,
/// format-specific failures from NetCDF and Parquet, and shape mismatches
/// when assembling output tables.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps a failure reading or creating a file.
    #[error("i/o error on {}: {reason}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a line of an XYZ file cannot be parsed.
    #[error("parse error on line {line}: {reason}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// Returned when node coordinates along an axis are not evenly spaced.
    #[error("irregular {axis} spacing: step {step} differs from {expected}")]
    IrregularSpacing {
        /// Axis name (`x` or `y`).
        axis: &'static str,
        /// Spacing implied by the axis extent and node count.
        expected: f64,
        /// Offending step between neighbouring coordinates.
        step: f64,
    },

    /// Returned when some grid nodes have no value.
    #[error("grid has {got} of {expected} nodes")]
    MissingNodes {
        /// `nx * ny`.
        expected: usize,
        /// Nodes present in the file.
        got: usize,
    },

    /// Returned when the same node appears twice.
    #[error("duplicate node at x = {x}, y = {y}")]
    DuplicateNode {
        /// Node x coordinate (metres).
        x: f64,
        /// Node y coordinate (metres).
        y: f64,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Wraps an error originating from the Parquet or Arrow libraries.
    #[error("parquet error: {reason}")]
    Parquet {
        /// Description of the underlying Parquet failure.
        reason: String,
    },

    /// Returned when one or more configuration checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a required variable is not present in a file.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a dimension has an unexpected size.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when the assembled values do not form a valid grid.
    #[error("invalid grid: {0}")]
    Grid(#[from] WaveletError),
}

#[cfg(feature = "netcdf")]
impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<parquet::errors::ParquetError> for IoError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<arrow::error::ArrowError> for IoError {
    fn from(e: arrow::error::ArrowError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.xyz"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.xyz");
    }

    #[test]
    fn display_parse() {
        let err = IoError::Parse {
            line: 12,
            reason: "expected 3 columns, got 2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "parse error on line 12: expected 3 columns, got 2"
        );
    }

    #[test]
    fn display_irregular_spacing() {
        let err = IoError::IrregularSpacing {
            axis: "y",
            expected: 1000.0,
            step: 1500.0,
        };
        assert_eq!(
            err.to_string(),
            "irregular y spacing: step 1500 differs from 1000"
        );
    }

    #[test]
    fn display_missing_nodes() {
        let err = IoError::MissingNodes {
            expected: 12,
            got: 11,
        };
        assert_eq!(err.to_string(), "grid has 11 of 12 nodes");
    }

    #[test]
    fn display_duplicate_node() {
        let err = IoError::DuplicateNode { x: 0.0, y: 250.0 };
        assert_eq!(err.to_string(), "duplicate node at x = 0, y = 250");
    }

    #[test]
    fn display_parquet() {
        let err = IoError::Parquet {
            reason: "corrupt footer".to_string(),
        };
        assert_eq!(err.to_string(), "parquet error: corrupt footer");
    }

    #[test]
    fn display_dimension_mismatch() {
        let err = IoError::DimensionMismatch {
            name: "coherence".to_string(),
            expected: 64,
            got: 63,
        };
        assert_eq!(
            err.to_string(),
            "dimension 'coherence' mismatch: expected 64, got 63"
        );
    }

    #[test]
    fn from_wavelet_error() {
        let err: IoError = WaveletError::NonFiniteData.into();
        assert!(matches!(err, IoError::Grid(_)));
        assert_eq!(err.to_string(), "invalid grid: grid contains non-finite values");
    }

    #[test]
    fn from_parquet_error() {
        let pq_err = parquet::errors::ParquetError::General("test pq error".to_string());
        let err: IoError = pq_err.into();
        assert!(matches!(err, IoError::Parquet { .. }));
        assert!(err.to_string().contains("test pq error"));
    }

    #[cfg(feature = "netcdf")]
    #[test]
    fn from_netcdf_error() {
        let nc_err = netcdf::Error::Str("test nc error".to_string());
        let err: IoError = nc_err.into();
        assert!(matches!(err, IoError::Netcdf { .. }));
        assert!(err.to_string().contains("test nc error"));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
