//! Tracing subscriber setup for binaries and examples.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the executable.

use tracing::subscriber::SetGlobalDefaultError;

/// Install a compact fmt subscriber as the global default.
///
/// Fails if another global subscriber was already installed.
pub fn install_logger() -> Result<(), SetGlobalDefaultError> {
    let subscriber = tracing_subscriber::fmt().compact().finish();
    tracing::subscriber::set_global_default(subscriber)
}
