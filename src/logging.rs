//! Tracing setup for the lightbnb binary
//!
//! Usage:
//!   lightbnb --verbose ...            # Debug logging (includes assembled SQL)
//!   RUST_LOG=lightbnb_lib=trace ...   # Fine-grained log control

use crate::error::{LightbnbError, Result};
use tracing_subscriber::EnvFilter;

/// Initialize console tracing on stderr, leaving stdout for JSON output
pub fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|e| LightbnbError::Generic(e.to_string()))
}
