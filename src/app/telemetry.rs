use tracing_subscriber::{EnvFilter, fmt};

// stdout is reserved for the option echo and dry-run output.
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
}
