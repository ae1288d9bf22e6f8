use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Directional wavelet spectra of gridded fields.
#[derive(Parser)]
#[command(
    name = "flexwave",
    version,
    about = "Directional wavelet scalograms, admittance and coherence of gridded fields"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Wavelet scalogram of one grid.
    Scalogram(ScalogramArgs),
    /// Wavelet cross-scalogram of two co-located grids.
    Xscalogram(PairArgs),
    /// Wavelet admittance and coherence of two co-located grids.
    Admit(PairArgs),
    /// Elastic thickness and load ratio from wavelet admittance and coherence.
    Estimate(EstimateArgs),
}

/// Arguments for the `scalogram` subcommand.
#[derive(clap::Args)]
pub struct ScalogramArgs {
    /// Path to TOML configuration file (defaults apply when omitted).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Input grid (XYZ text, or NetCDF with the `netcdf` feature).
    #[arg(short, long)]
    pub grid: PathBuf,

    /// Output Parquet path.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Optional JSON summary with the global spectrum.
    #[arg(short, long)]
    pub summary: Option<PathBuf>,
}

/// Arguments for the two-grid subcommands.
#[derive(clap::Args)]
pub struct PairArgs {
    /// Path to TOML configuration file (defaults apply when omitted).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// First grid (e.g. topography).
    #[arg(long)]
    pub grid1: PathBuf,

    /// Second grid (e.g. gravity), same shape and spacing as the first.
    #[arg(long)]
    pub grid2: PathBuf,

    /// Output Parquet path.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Optional JSON summary with the global spectra.
    #[arg(short, long)]
    pub summary: Option<PathBuf>,
}

/// Arguments for the `estimate` subcommand.
#[derive(clap::Args)]
pub struct EstimateArgs {
    /// Path to TOML configuration file (defaults apply when omitted).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Topography grid (m).
    #[arg(long)]
    pub grid1: PathBuf,

    /// Bouguer gravity grid (mGal), same shape and spacing as the first.
    #[arg(long)]
    pub grid2: PathBuf,

    /// Output JSON report.
    #[arg(short, long)]
    pub output: PathBuf,
}
