use tracing_subscriber::EnvFilter;

/// Installs the process-wide tracing subscriber. `verbose` raises the
/// default filter from `warn` to `debug`; `RUST_LOG` always wins when set.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .compact()
        .init();
}
