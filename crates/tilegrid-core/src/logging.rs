#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature the `trace!`, `debug!` and `warn!` macros are
//! the `tracing` ones. Without it they expand to nothing, so the layout
//! solver stays dependency-free for hosts that never install a subscriber.
//!
//! Every tilegrid crate logs under one of the targets below, which keeps an
//! `EnvFilter` directive such as `tilegrid::sizer=debug` stable.

/// Target for solver decisions (candidate scans, chosen plans).
pub const TARGET_LAYOUT: &str = "tilegrid::layout";

/// Target for sizer applications and the resize coalescer.
pub const TARGET_SIZER: &str = "tilegrid::sizer";

/// Target for host adapters (CSS parsing, DOM binding).
pub const TARGET_WEB: &str = "tilegrid::web";

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
mod disabled {
    /// Discards its arguments; `tracing` is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// Discards its arguments; `tracing` is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Discards its arguments; `tracing` is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}
