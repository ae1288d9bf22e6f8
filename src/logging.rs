use tracing_subscriber::EnvFilter;

/// All workspace crate targets that should receive log output.
const CRATE_TARGETS: &[&str] = &[
    "flexwave",
    "flexwave_estimate",
    "flexwave_io",
    "flexwave_spectral",
    "flexwave_stats",
    "flexwave_wavelet",
];

/// Initialize tracing based on CLI verbosity level.
///
/// Mapping:
/// - 0 (none) -> warn
/// - 1 (-v)   -> info
/// - 2 (-vv)  -> debug
/// - 3+ (-vvv)-> trace
///
/// `RUST_LOG` env var overrides the CLI flag if set.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn default_directives(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_every_crate() {
        let d = default_directives(2);
        assert_eq!(d.split(',').count(), CRATE_TARGETS.len());
        assert!(d.contains("flexwave_wavelet=debug"));
    }

    #[test]
    fn verbosity_saturates_at_trace() {
        assert!(default_directives(9).starts_with("flexwave=trace"));
        assert!(default_directives(0).starts_with("flexwave=warn"));
    }
}
