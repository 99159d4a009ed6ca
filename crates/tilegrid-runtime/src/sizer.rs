#![forbid(unsafe_code)]

//! Stateful grid auto-sizer.
//!
//! [`GridSizer`] remembers the last edge it applied and only touches the
//! tiles when a new measurement changes the solved size. Tiles are reached
//! through the [`TileSink`] trait, so the same sizer drives a browser DOM,
//! a test double, or anything else that can set a square size by index.
//!
//! # State
//!
//! ```text
//!   unset ──update──▶ applied ──update (same size)──▶ applied (no mutation)
//!                        ▲                                │
//!                        └──────update (new size)─────────┘
//! ```
//!
//! # Invariants
//!
//! - Every tile receives the same edge in one update.
//! - The tile count is captured at construction and never re-read.
//! - Two updates with the same measurement mutate the sink at most once.

use tilegrid_core::geometry::Size;
use tilegrid_core::logging::TARGET_SIZER;
use tilegrid_layout::{DEFAULT_MAX_COLUMNS, TilePlan, plan};
use tracing::{debug, trace};

/// Default gutter, in pixels, subtracted from the solved edge.
pub const DEFAULT_PADDING: u32 = 6;

/// Sizing knobs. Both are fixed for the lifetime of a sizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizerConfig {
    /// Pixels subtracted from the solved edge before it is applied.
    pub padding: u32,
    /// Largest column count the solver considers.
    pub max_columns: u32,
}

impl Default for SizerConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            max_columns: DEFAULT_MAX_COLUMNS,
        }
    }
}

impl SizerConfig {
    /// Set the gutter padding.
    #[must_use]
    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Set the column bound.
    #[must_use]
    pub fn with_max_columns(mut self, max_columns: u32) -> Self {
        self.max_columns = max_columns;
        self
    }
}

/// The tiles being sized.
pub trait TileSink {
    /// Number of tiles. Read once when a sizer is attached.
    fn tile_count(&self) -> usize;

    /// Set tile `index` to a square of `edge_px` pixels (width and height).
    fn set_tile_edge(&mut self, index: usize, edge_px: u32);
}

impl<T: TileSink + ?Sized> TileSink for &mut T {
    fn tile_count(&self) -> usize {
        (**self).tile_count()
    }

    fn set_tile_edge(&mut self, index: usize, edge_px: u32) {
        (**self).set_tile_edge(index, edge_px);
    }
}

/// Result of one [`GridSizer::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizerOutcome {
    /// A new size was solved and every tile was set to `edge`.
    Applied {
        /// Solved edge before padding.
        size: u32,
        /// Edge written to the tiles (`size - padding`, floored at 0).
        edge: u32,
    },
    /// The solved size matched the last applied one; tiles untouched.
    Unchanged { size: u32 },
}

impl SizerOutcome {
    /// Solved edge before padding.
    #[must_use]
    pub const fn size(&self) -> u32 {
        match self {
            Self::Applied { size, .. } | Self::Unchanged { size } => *size,
        }
    }

    /// Whether the tiles were mutated.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Sizes a fixed set of square tiles to fill a container.
#[derive(Debug, Clone)]
pub struct GridSizer {
    config: SizerConfig,
    tile_count: u32,
    last_applied: Option<u32>,
}

impl GridSizer {
    /// Create a sizer for `tile_count` tiles.
    pub fn new(config: SizerConfig, tile_count: usize) -> Self {
        Self {
            config,
            tile_count: u32::try_from(tile_count).unwrap_or(u32::MAX),
            last_applied: None,
        }
    }

    /// Create a sizer for the tiles currently held by `sink`.
    pub fn for_sink<S: TileSink + ?Sized>(config: SizerConfig, sink: &S) -> Self {
        Self::new(config, sink.tile_count())
    }

    /// Sizing configuration.
    #[inline]
    pub const fn config(&self) -> SizerConfig {
        self.config
    }

    /// Number of tiles captured at construction.
    #[inline]
    pub const fn tile_count(&self) -> u32 {
        self.tile_count
    }

    /// Last size applied to the tiles, or `None` before the first update.
    #[inline]
    pub const fn last_applied(&self) -> Option<u32> {
        self.last_applied
    }

    /// Solve the grid for `container` without touching any state.
    pub fn plan(&self, container: Size) -> Option<TilePlan> {
        plan(container, self.tile_count, self.config.max_columns)
    }

    /// Solved edge for `container`, before padding.
    pub fn compute(&self, container: Size) -> u32 {
        self.plan(container).map_or(0, |p| p.size)
    }

    /// Edge written to the tiles for a solved `size`.
    #[inline]
    pub const fn edge_for(&self, size: u32) -> u32 {
        size.saturating_sub(self.config.padding)
    }

    /// Re-solve for `container` and resize every tile if the size changed.
    pub fn update<S: TileSink + ?Sized>(&mut self, container: Size, sink: &mut S) -> SizerOutcome {
        let size = self.compute(container);
        if self.last_applied == Some(size) {
            trace!(
                target: TARGET_SIZER,
                size,
                width = container.width,
                height = container.height,
                "tile size unchanged"
            );
            return SizerOutcome::Unchanged { size };
        }

        let edge = self.edge_for(size);
        for index in 0..self.tile_count as usize {
            sink.set_tile_edge(index, edge);
        }
        debug!(
            target: TARGET_SIZER,
            previous = ?self.last_applied,
            size,
            edge,
            tiles = self.tile_count,
            width = container.width,
            height = container.height,
            "tile size applied"
        );
        self.last_applied = Some(size);
        SizerOutcome::Applied { size, edge }
    }

    /// Forget the applied size so the next update always mutates.
    pub fn invalidate(&mut self) {
        self.last_applied = None;
    }
}
