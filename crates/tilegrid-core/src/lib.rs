#![forbid(unsafe_code)]

//! Core: pixel geometry, host events, and the logging facade shared by the
//! layout, runtime, and web crates.

pub mod event;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};
