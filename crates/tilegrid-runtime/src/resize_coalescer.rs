//! Resize stream coalescer.
//!
//! Browsers fire `resize` continuously while a window edge is dragged. By
//! default every event re-solves the grid, which is cheap but not free. A
//! [`ResizeCoalescer`] sits between the event stream and the sizer and
//! decides when a measurement is worth applying.
//!
//! - **Latest-wins**: only the newest pending measurement is applied.
//! - **Quiet period**: a pending measurement applies once no resize has
//!   arrived for `delay_ms`.
//! - **Bounded latency**: a pending measurement applies once
//!   `hard_deadline_ms` has passed since the first unapplied resize, even
//!   while events keep arriving.
//!
//! Time is passed in by the caller as a monotonic [`Duration`], so decisions
//! are deterministic and the type works on `wasm32` without a clock.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use tilegrid_core::geometry::Size;
//! use tilegrid_runtime::resize_coalescer::{CoalesceAction, CoalescerConfig, ResizeCoalescer};
//!
//! let mut coalescer = ResizeCoalescer::new(CoalescerConfig::debounced());
//! let ms = Duration::from_millis;
//!
//! assert_eq!(coalescer.handle_resize(Size::new(800.0, 600.0), ms(0)), CoalesceAction::None);
//! assert_eq!(coalescer.handle_resize(Size::new(820.0, 600.0), ms(5)), CoalesceAction::None);
//!
//! // Quiet for 16ms: the latest size applies.
//! match coalescer.tick(ms(21)) {
//!     CoalesceAction::ApplyResize { container, .. } => assert_eq!(container.width, 820.0),
//!     CoalesceAction::None => unreachable!(),
//! }
//! ```
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | `delay_ms = 0` | Apply on every resize (passthrough) |
//! | `hard_deadline_ms = 0` | Apply on every resize |
//! | No pending size | `tick` returns [`CoalesceAction::None`] |
//! | Clock goes backwards | Elapsed time saturates at zero |

#![forbid(unsafe_code)]

use std::time::Duration;

use tilegrid_core::geometry::Size;
use tilegrid_core::logging::TARGET_SIZER;
use tracing::trace;

/// Timing for the resize coalescer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoalescerConfig {
    /// Quiet period after the last resize before applying (ms).
    pub delay_ms: u64,
    /// Hard deadline: always apply within this time of the first pending
    /// resize (ms).
    pub hard_deadline_ms: u64,
}

impl CoalescerConfig {
    /// Apply every resize immediately.
    pub const PASSTHROUGH: Self = Self {
        delay_ms: 0,
        hard_deadline_ms: 0,
    };

    /// Frame-paced coalescing: ~60fps quiet period, 100ms worst case.
    #[must_use]
    pub const fn debounced() -> Self {
        Self {
            delay_ms: 16,
            hard_deadline_ms: 100,
        }
    }

    /// Set the quiet period.
    #[must_use]
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Set the hard deadline.
    #[must_use]
    pub fn with_hard_deadline_ms(mut self, hard_deadline_ms: u64) -> Self {
        self.hard_deadline_ms = hard_deadline_ms;
        self
    }

    /// Whether every resize applies immediately.
    #[must_use]
    pub const fn is_passthrough(&self) -> bool {
        self.delay_ms == 0 || self.hard_deadline_ms == 0
    }
}

impl Default for CoalescerConfig {
    fn default() -> Self {
        Self::PASSTHROUGH
    }
}

/// Action returned by the coalescer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoalesceAction {
    /// Nothing to apply yet.
    None,
    /// Apply this measurement now.
    ApplyResize {
        container: Size,
        /// Time the measurement spent pending.
        coalesce_time: Duration,
        /// Whether the hard deadline forced the apply.
        forced_by_deadline: bool,
    },
}

/// Running counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoalescerStats {
    /// Resize events received.
    pub events: u64,
    /// Measurements applied.
    pub applied: u64,
    /// Measurements replaced by a newer one before applying.
    pub superseded: u64,
    /// Applies forced by the hard deadline.
    pub forced: u64,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    container: Size,
    first_at: Duration,
    last_at: Duration,
}

/// Latest-wins resize coalescer with a hard deadline.
#[derive(Debug, Clone, Default)]
pub struct ResizeCoalescer {
    config: CoalescerConfig,
    pending: Option<Pending>,
    stats: CoalescerStats,
}

impl ResizeCoalescer {
    /// Create a coalescer.
    pub fn new(config: CoalescerConfig) -> Self {
        Self {
            config,
            pending: None,
            stats: CoalescerStats::default(),
        }
    }

    /// Configuration in use.
    #[inline]
    pub const fn config(&self) -> CoalescerConfig {
        self.config
    }

    /// Counters since construction.
    #[inline]
    pub const fn stats(&self) -> CoalescerStats {
        self.stats
    }

    /// Whether a measurement is waiting to apply.
    #[inline]
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a resize at `now` and decide whether to apply.
    pub fn handle_resize(&mut self, container: Size, now: Duration) -> CoalesceAction {
        self.stats.events += 1;
        match &mut self.pending {
            Some(pending) => {
                self.stats.superseded += 1;
                pending.container = container;
                pending.last_at = now;
            }
            None => {
                self.pending = Some(Pending {
                    container,
                    first_at: now,
                    last_at: now,
                });
            }
        }
        self.decide(now)
    }

    /// Re-check a pending measurement at `now`.
    pub fn tick(&mut self, now: Duration) -> CoalesceAction {
        self.decide(now)
    }

    /// Drop any pending measurement.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    fn decide(&mut self, now: Duration) -> CoalesceAction {
        let Some(pending) = self.pending else {
            return CoalesceAction::None;
        };

        let quiet = now.saturating_sub(pending.last_at);
        let waited = now.saturating_sub(pending.first_at);
        let quiet_enough = quiet >= Duration::from_millis(self.config.delay_ms);
        let deadline_hit = waited >= Duration::from_millis(self.config.hard_deadline_ms);

        if !quiet_enough && !deadline_hit {
            trace!(
                target: TARGET_SIZER,
                quiet_ms = quiet.as_millis() as u64,
                waited_ms = waited.as_millis() as u64,
                "resize coalesced"
            );
            return CoalesceAction::None;
        }

        let forced_by_deadline = deadline_hit && !quiet_enough;
        self.pending = None;
        self.stats.applied += 1;
        if forced_by_deadline {
            self.stats.forced += 1;
        }
        trace!(
            target: TARGET_SIZER,
            width = pending.container.width,
            height = pending.container.height,
            waited_ms = waited.as_millis() as u64,
            forced_by_deadline,
            "resize released"
        );
        CoalesceAction::ApplyResize {
            container: pending.container,
            coalesce_time: waited,
            forced_by_deadline,
        }
    }
}
