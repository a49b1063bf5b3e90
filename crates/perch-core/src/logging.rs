#![forbid(unsafe_code)]

//! Structured event macros for placement and lifecycle diagnostics.
//!
//! With the `tracing` feature, `debug!`, `info!` and `trace!` forward to
//! `tracing` and are re-exported at the crate root, so downstream crates
//! write `perch_core::debug!` and never name `tracing` themselves. Without
//! it, same-named no-op macros swallow their arguments.
//!
//! Event names are dotted (`popover.place`, `popover.off_screen`,
//! `popover.attached`) and carry structured fields.

#[cfg(feature = "tracing")]
pub use tracing::{debug, info, trace};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// Discards a debug event.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Discards an info event.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// Discards a trace event.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
}

/// Install a JSON `tracing` subscriber filtered by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .is_ok()
}
