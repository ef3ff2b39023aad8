//! API request handlers.

mod clean;

pub use clean::*;

/// Liveness probe.
pub async fn health() -> &'static str {
    "ok"
}
