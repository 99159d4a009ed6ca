#![forbid(unsafe_code)]

//! Host events.
//!
//! The host (a browser page, a test harness) owns the event loop and pushes
//! these into the runtime. Nothing here blocks or allocates.

use crate::geometry::Size;

/// An event delivered by the host to the tile grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The tile set is known and the container has been measured.
    ///
    /// Delivered once, before any resize.
    Ready { container: Size },
    /// The viewport changed and the container was re-measured.
    Resize { container: Size },
    /// A periodic tick; lets a pending, coalesced resize apply.
    Tick,
}

impl HostEvent {
    /// Shorthand for a [`HostEvent::Resize`].
    #[inline]
    pub const fn resize(width: f64, height: f64) -> Self {
        Self::Resize {
            container: Size::new(width, height),
        }
    }

    /// Shorthand for a [`HostEvent::Ready`].
    #[inline]
    pub const fn ready(width: f64, height: f64) -> Self {
        Self::Ready {
            container: Size::new(width, height),
        }
    }

    /// The measured container carried by this event, if any.
    #[inline]
    pub const fn container(&self) -> Option<Size> {
        match self {
            Self::Ready { container } | Self::Resize { container } => Some(*container),
            Self::Tick => None,
        }
    }
}
