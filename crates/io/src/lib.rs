//! # flexwave-io
//!
//! Read gridded fields from XYZ text (and NetCDF with the `netcdf`
//! feature) into validated [`Grid`](flexwave_wavelet::Grid)s, and write
//! per-pixel, per-scale results to long-form Parquet tables.

mod error;
#[cfg(feature = "netcdf")]
mod netcdf_read;
mod parquet_write;
mod reader;
mod table;
mod writer;
mod xyz;

pub use error::IoError;
#[cfg(feature = "netcdf")]
pub use reader::read_netcdf;
pub use reader::{ReaderConfig, read_xyz};
pub use table::GridTable;
pub use writer::{Compression, WriterConfig, write_parquet};
