//! Scalogram command: wavelet power of one grid.

use anyhow::Result;
use tracing::{info, info_span};

use flexwave_io::GridTable;
use flexwave_spectral::scalogram;

use crate::cli::ScalogramArgs;
use crate::config::FlexwaveConfig;
use crate::convert;
use crate::pipeline::{self, Analysis, Summary};

/// Run the single-grid scalogram pipeline.
pub fn run(args: ScalogramArgs) -> Result<()> {
    let _cmd = info_span!("scalogram").entered();
    let config = FlexwaveConfig::load(args.config.as_deref())?;
    let reader_cfg = convert::build_reader_config(&config.io)?;
    let writer_cfg = convert::build_writer_config(&config.io)?;

    let grid = pipeline::load_grid(&args.grid, &reader_cfg)?;
    let analysis = Analysis::new(&config, &grid)?;
    let wt = analysis.transform(&grid)?;

    let result = scalogram(&wt);
    info!(n_scales = result.wavenumbers().len(), "scalogram computed");

    let table = GridTable::new(&grid, result.wavenumbers())
        .with_column("scalogram", result.values())?
        .with_column("scalogram_error", result.error())?;
    pipeline::write_table(&args.output, &table, &writer_cfg)?;

    if let Some(path) = args.summary {
        Summary::new("scalogram", vec![args.grid], &grid, &analysis)
            .with_spectrum("scalogram", &result.global())
            .write(&path)?;
    }
    Ok(())
}
