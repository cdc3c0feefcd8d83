//! Process-wide logging setup for the inkpost binaries.

pub mod tracing;

pub use tracing::{LOG_FORMAT_ENV, LogFormat, init_with};

/// Install the global subscriber, format chosen by `INKPOST_LOG_FORMAT`.
///
/// Later calls leave the first subscriber in place.
pub fn init() {
    tracing::init();
}
