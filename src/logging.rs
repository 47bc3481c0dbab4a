use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "ENVKEY_LOG";

/// Install the stderr subscriber. Filter comes from ENVKEY_LOG (default `warn`)
/// so stdout only ever carries command output.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second init (e.g. from tests) is harmless; ignore it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
