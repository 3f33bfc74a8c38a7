use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter, e.g. `STRATA_LOG=strata_enforce=debug`.
pub(crate) const LOG_ENV: &str = "STRATA_LOG";

/// Log to stderr. `--debug` wins over the environment; the default level is `warn`.
pub(crate) fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
