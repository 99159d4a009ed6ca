#![forbid(unsafe_code)]

//! `tilegrid-web` adapts the tile grid to a browser page.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding page pushes computed-style lengths and
//!   the tile count; this crate answers with the style mutations to perform.
//! - **Deterministic time**: the host advances a monotonic clock explicitly,
//!   which keeps resize coalescing reproducible in tests.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! [`WebGridHost`] is the portable core. On `wasm32` the `TileGridWeb` type
//! binds it to the live DOM through `web-sys`, and `CentrePicker` wires the
//! [`centre_picker`] geometry to the result page's images.

pub mod centre_picker;
pub mod css;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{CentrePicker, TileGridWeb};

use core::time::Duration;

use serde::Serialize;
use tilegrid_core::event::HostEvent;
use tilegrid_core::geometry::Size;
use tilegrid_core::logging::TARGET_WEB;
use tilegrid_runtime::{CoalescerConfig, ResizeDriver, SizerConfig, SizerOutcome, TileSink};

pub use centre_picker::{
    Centre, CentreError, CentrePick, ImageMetrics, PickError, centre_endpoint,
    centre_from_dataset, pick_centre,
};
pub use css::{format_fractional_px, format_px, parse_css_px};

/// Default selector for the grid container.
pub const CONTAINER_SELECTOR: &str = ".content-panel";

/// Default selector for the tiles inside the container.
pub const TILE_SELECTOR: &str = ".content-panel .grid";

/// Web host error type.
#[derive(Debug)]
pub enum WebHostError {
    /// `resize` or `tick` was called before `ready`.
    NotReady,
    /// `ready` was called twice.
    AlreadyReady,
    /// Outputs could not be encoded for the host.
    Encode(serde_json::Error),
}

impl core::fmt::Display for WebHostError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotReady => write!(f, "tile grid is not ready"),
            Self::AlreadyReady => write!(f, "tile grid is already ready"),
            Self::Encode(err) => write!(f, "failed to encode outputs: {err}"),
        }
    }
}

impl std::error::Error for WebHostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for WebHostError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err)
    }
}

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Current monotonic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Set current monotonic time.
    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

/// One tile's new inline size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleMutation {
    /// Tile index in document order.
    pub index: usize,
    /// Value for `style.width`.
    pub width: String,
    /// Value for `style.height`.
    pub height: String,
}

/// Captured outputs for host consumption.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct WebOutputs {
    /// Style mutations in the order they were made.
    pub mutations: Vec<StyleMutation>,
    /// Log lines for the host console.
    pub logs: Vec<String>,
}

impl WebOutputs {
    /// Whether there is nothing for the host to do.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty() && self.logs.is_empty()
    }

    /// Encode as JSON for the JS bridge.
    pub fn to_json(&self) -> Result<String, WebHostError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Tiles that record style mutations instead of touching a DOM.
#[derive(Debug, Clone)]
pub struct RecordedTiles {
    count: usize,
    mutations: Vec<StyleMutation>,
}

impl RecordedTiles {
    /// Record mutations for `count` tiles.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            count,
            mutations: Vec::new(),
        }
    }

    /// Drain recorded mutations.
    pub fn drain(&mut self) -> impl Iterator<Item = StyleMutation> + '_ {
        self.mutations.drain(..)
    }
}

impl TileSink for RecordedTiles {
    fn tile_count(&self) -> usize {
        self.count
    }

    fn set_tile_edge(&mut self, index: usize, edge_px: u32) {
        let px = format_px(edge_px);
        self.mutations.push(StyleMutation {
            index,
            width: px.clone(),
            height: px,
        });
    }
}

/// Host configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WebHostConfig {
    pub sizer: SizerConfig,
    pub coalescer: CoalescerConfig,
}

/// Host-driven tile grid.
///
/// Call [`ready`](Self::ready) once the tiles are in the document, then
/// [`resize`](Self::resize) from the window's resize listener and
/// [`tick`](Self::tick) from an animation frame when coalescing is enabled.
/// Drain the work to perform with [`take_outputs`](Self::take_outputs).
#[derive(Debug)]
pub struct WebGridHost {
    config: WebHostConfig,
    clock: DeterministicClock,
    driver: Option<ResizeDriver<RecordedTiles>>,
    logs: Vec<String>,
}

impl WebGridHost {
    /// Create a host that is not yet ready.
    #[must_use]
    pub fn new(config: WebHostConfig) -> Self {
        Self {
            config,
            clock: DeterministicClock::new(),
            driver: None,
            logs: Vec::new(),
        }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> WebHostConfig {
        self.config
    }

    /// The host clock.
    #[must_use]
    pub const fn clock(&self) -> &DeterministicClock {
        &self.clock
    }

    /// Mutable access to the host clock.
    pub fn clock_mut(&mut self) -> &mut DeterministicClock {
        &mut self.clock
    }

    /// Whether [`ready`](Self::ready) has been called.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.driver.is_some()
    }

    /// Last applied tile size (before padding).
    #[must_use]
    pub fn tile_size(&self) -> Option<u32> {
        self.driver.as_ref().and_then(|d| d.sizer().last_applied())
    }

    /// The tiles are known: capture the count and size them once.
    pub fn ready(
        &mut self,
        tile_count: usize,
        width: &str,
        height: &str,
    ) -> Result<Option<SizerOutcome>, WebHostError> {
        if self.driver.is_some() {
            return Err(WebHostError::AlreadyReady);
        }
        let container = self.measure(width, height);
        let mut driver = ResizeDriver::new(
            RecordedTiles::new(tile_count),
            self.config.sizer,
            self.config.coalescer,
        );
        let outcome = driver.handle(HostEvent::Ready { container }, self.clock.now());
        self.driver = Some(driver);
        Ok(outcome)
    }

    /// The viewport resized and the container was re-measured.
    pub fn resize(&mut self, width: &str, height: &str) -> Result<Option<SizerOutcome>, WebHostError> {
        if self.driver.is_none() {
            return Err(WebHostError::NotReady);
        }
        let container = self.measure(width, height);
        let now = self.clock.now();
        let driver = self.driver.as_mut().ok_or(WebHostError::NotReady)?;
        Ok(driver.handle(HostEvent::Resize { container }, now))
    }

    /// Release a coalesced resize if its quiet period has elapsed.
    pub fn tick(&mut self) -> Result<Option<SizerOutcome>, WebHostError> {
        let now = self.clock.now();
        let driver = self.driver.as_mut().ok_or(WebHostError::NotReady)?;
        Ok(driver.handle(HostEvent::Tick, now))
    }

    /// Drain pending style mutations and log lines.
    pub fn take_outputs(&mut self) -> WebOutputs {
        let mutations: Vec<StyleMutation> = self
            .driver
            .as_mut()
            .map(|d| d.sink_mut().drain().collect())
            .unwrap_or_default();
        WebOutputs {
            mutations,
            logs: std::mem::take(&mut self.logs),
        }
    }

    /// Parse computed-style lengths. Unparseable lengths measure as zero,
    /// which collapses the tiles instead of failing the resize.
    fn measure(&mut self, width: &str, height: &str) -> Size {
        Size::new(self.length(width, "width"), self.length(height, "height"))
    }

    fn length(&mut self, value: &str, property: &str) -> f64 {
        match parse_css_px(value) {
            Some(px) => px,
            None => {
                tilegrid_core::warn!(
                    target: TARGET_WEB,
                    property,
                    value,
                    "unparseable container length"
                );
                self.logs
                    .push(format!("tilegrid: container {property} {value:?} is not a length"));
                0.0
            }
        }
    }
}

impl Default for WebGridHost {
    fn default() -> Self {
        Self::new(WebHostConfig::default())
    }
}
