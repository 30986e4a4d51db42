#![forbid(unsafe_code)]

//! Structured logging shims.
//!
//! With the `tracing` feature the macros below are the `tracing` crate's.
//! Without it they expand to nothing, so call sites never need their own
//! `#[cfg]`.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop {
    #[macro_export]
    #[doc(hidden)]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    #[doc(hidden)]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    #[doc(hidden)]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}

/// Install a JSON `tracing` subscriber filtered by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .is_ok()
}
