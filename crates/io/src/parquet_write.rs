//! Low-level Parquet column building.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, RecordBatch, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::error::IoError;
use crate::table::GridTable;

/// Builds the Arrow schema for a [`GridTable`].
///
/// Key columns `x`, `y`, `scale`, `wavenumber` come first, then one
/// nullable `Float64` column per value field (non-finite estimates are kept
/// as-is, not nulled).
pub(crate) fn build_schema(table: &GridTable) -> Schema {
    let mut fields = vec![
        Field::new("x", DataType::Float64, false),
        Field::new("y", DataType::Float64, false),
        Field::new("scale", DataType::UInt32, false),
        Field::new("wavenumber", DataType::Float64, false),
    ];
    for name in table.column_names() {
        fields.push(Field::new(name, DataType::Float64, true));
    }
    Schema::new(fields)
}

/// Converts a [`GridTable`] into a single Arrow [`RecordBatch`].
pub(crate) fn table_to_record_batch(
    table: &GridTable,
    schema: &Schema,
) -> Result<RecordBatch, IoError> {
    let n = table.n_rows();
    let mut xs = Vec::with_capacity(n);
    let mut ys = Vec::with_capacity(n);
    let mut scales = Vec::with_capacity(n);
    let mut wavenumbers = Vec::with_capacity(n);
    for (x, y, s, kf) in table.keys() {
        xs.push(x);
        ys.push(y);
        scales.push(s);
        wavenumbers.push(kf);
    }

    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(Float64Array::from(xs)),
        Arc::new(Float64Array::from(ys)),
        Arc::new(UInt32Array::from(scales)),
        Arc::new(Float64Array::from(wavenumbers)),
    ];
    for (_, values) in table.columns() {
        columns.push(Arc::new(Float64Array::from(GridTable::column_values(
            values,
        ))));
    }

    Ok(RecordBatch::try_new(Arc::new(schema.clone()), columns)?)
}

/// Writes a sequence of [`RecordBatch`]es to a Parquet file at `path`.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be created and
/// [`IoError::Parquet`] if batch writing or finalisation fails.
pub(crate) fn write_batches(
    path: &Path,
    batches: &[RecordBatch],
    schema: &Schema,
    props: WriterProperties,
) -> Result<(), IoError> {
    let file = std::fs::File::create(path).map_err(|e| IoError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut writer = ArrowWriter::try_new(file, Arc::new(schema.clone()), Some(props))?;

    for batch in batches {
        writer.write(batch)?;
    }

    writer.close()?;
    Ok(())
}
