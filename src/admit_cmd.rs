//! Admit command: wavelet admittance and coherence of two co-located grids.

use anyhow::Result;
use tracing::{info, info_span, warn};

use flexwave_io::GridTable;
use flexwave_spectral::admit_coh;

use crate::cli::PairArgs;
use crate::config::FlexwaveConfig;
use crate::convert;
use crate::pipeline::{self, Analysis, Summary};

/// Run the admittance/coherence pipeline.
pub fn run(args: PairArgs) -> Result<()> {
    let _cmd = info_span!("admit").entered();
    let config = FlexwaveConfig::load(args.config.as_deref())?;
    let reader_cfg = convert::build_reader_config(&config.io)?;
    let writer_cfg = convert::build_writer_config(&config.io)?;

    let (grid1, grid2) = pipeline::load_pair(&args.grid1, &args.grid2, &reader_cfg)?;
    let analysis = Analysis::new(&config, &grid1)?;
    let wt1 = analysis.transform(&grid1)?;
    let wt2 = analysis.transform(&grid2)?;

    let result = admit_coh(&wt1, &wt2)?;
    let undefined = result
        .coherence()
        .iter()
        .filter(|v| !v.is_finite())
        .count();
    if undefined > 0 {
        warn!(undefined, "coherence undefined where wavelet power vanishes");
    }
    info!(n_scales = result.wavenumbers().len(), "admittance and coherence computed");

    let table = GridTable::new(&grid1, result.wavenumbers())
        .with_column("admittance", result.admittance())?
        .with_column("admittance_error", result.admittance_error())?
        .with_column("coherence", result.coherence())?
        .with_column("coherence_error", result.coherence_error())?;
    pipeline::write_table(&args.output, &table, &writer_cfg)?;

    if let Some(path) = args.summary {
        Summary::new("admit", vec![args.grid1, args.grid2], &grid1, &analysis)
            .with_spectrum("admittance", &result.global_admittance())
            .with_spectrum("coherence", &result.global_coherence())
            .write(&path)?;
    }
    Ok(())
}
