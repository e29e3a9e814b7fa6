#![forbid(unsafe_code)]

//! Log setup: `tracing-subscriber` formatting to stderr so stdout stays
//! reserved for the rendered form.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber with the given filter directive.
///
/// Fails if the directive does not parse or a subscriber is already set.
pub fn init(filter: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_new(filter)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
}
