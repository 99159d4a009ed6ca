#![forbid(unsafe_code)]

//! Host event driver.
//!
//! [`ResizeDriver`] is the "on container resize" handler. It owns the
//! tiles (through a [`TileSink`]), a [`GridSizer`] and a
//! [`ResizeCoalescer`], and turns [`HostEvent`]s into tile updates.
//!
//! - `Ready` applies synchronously, bypassing the coalescer.
//! - `Resize` goes through the coalescer (passthrough by default).
//! - `Tick` releases a coalesced resize whose quiet period has elapsed.
//!
//! Until `Ready` arrives there is no measured container and every other
//! event is ignored.

use std::time::Duration;

use tilegrid_core::event::HostEvent;
use tilegrid_core::geometry::Size;
use tilegrid_core::logging::TARGET_SIZER;
use tracing::trace;

use crate::resize_coalescer::{CoalesceAction, CoalescerConfig, ResizeCoalescer};
use crate::sizer::{GridSizer, SizerConfig, SizerOutcome, TileSink};

/// Drives a [`GridSizer`] from host events.
#[derive(Debug)]
pub struct ResizeDriver<S> {
    sink: S,
    sizer: GridSizer,
    coalescer: ResizeCoalescer,
    ready: bool,
}

impl<S: TileSink> ResizeDriver<S> {
    /// Create a driver. The tile count is read from `sink` here, once.
    pub fn new(sink: S, sizer: SizerConfig, coalescer: CoalescerConfig) -> Self {
        let sizer = GridSizer::for_sink(sizer, &sink);
        Self {
            sink,
            sizer,
            coalescer: ResizeCoalescer::new(coalescer),
            ready: false,
        }
    }

    /// Create a driver with default sizing and no debouncing.
    pub fn with_defaults(sink: S) -> Self {
        Self::new(sink, SizerConfig::default(), CoalescerConfig::default())
    }

    /// Whether `Ready` has been handled.
    #[inline]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    /// The sizer.
    #[inline]
    pub const fn sizer(&self) -> &GridSizer {
        &self.sizer
    }

    /// The coalescer.
    #[inline]
    pub const fn coalescer(&self) -> &ResizeCoalescer {
        &self.coalescer
    }

    /// The tiles.
    #[inline]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the tiles.
    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the driver and return the tiles.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Handle one host event at monotonic time `now`.
    ///
    /// Returns the sizer outcome when the event led to an update.
    pub fn handle(&mut self, event: HostEvent, now: Duration) -> Option<SizerOutcome> {
        match event {
            HostEvent::Ready { container } => {
                self.ready = true;
                self.coalescer.clear();
                Some(self.apply(container))
            }
            HostEvent::Resize { container } => {
                if !self.ready {
                    trace!(target: TARGET_SIZER, "resize before ready ignored");
                    return None;
                }
                let action = self.coalescer.handle_resize(container, now);
                self.release(action)
            }
            HostEvent::Tick => {
                if !self.ready {
                    return None;
                }
                let action = self.coalescer.tick(now);
                self.release(action)
            }
        }
    }

    fn release(&mut self, action: CoalesceAction) -> Option<SizerOutcome> {
        match action {
            CoalesceAction::ApplyResize { container, .. } => Some(self.apply(container)),
            CoalesceAction::None => None,
        }
    }

    fn apply(&mut self, container: Size) -> SizerOutcome {
        self.sizer.update(container, &mut self.sink)
    }
}
