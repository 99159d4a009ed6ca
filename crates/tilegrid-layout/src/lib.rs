#![forbid(unsafe_code)]

//! Square tile layout.
//!
//! Given a container and a fixed number of tiles, find the largest square
//! edge that lets every tile fit in a row-major grid inside the container.
//!
//! - [`TileCandidate`] - one column count and the tile size it yields
//! - [`plan`] - scan column counts and keep the best candidate
//! - [`compute_optimal_size`] - the scan reduced to its edge length
//! - [`TilePlan`] - the winning candidate, with row-major placement
//!
//! # Example
//!
//! ```
//! use tilegrid_layout::{Size, compute_optimal_size, plan};
//!
//! // Twelve tiles in a 1000x600 panel.
//! assert_eq!(compute_optimal_size(1000.0, 600.0, 12, 20), 200);
//!
//! let plan = plan(Size::new(1000.0, 600.0), 12, 20).unwrap();
//! assert_eq!(plan.size, 200);
//! assert_eq!(plan.rows, 3);
//! ```
//!
//! # Tie-breaking
//!
//! Column counts are scanned from `max_columns` down to 1 and a candidate
//! only replaces the best one when it is strictly larger. On an exact tie
//! the wider grid (more columns) wins.
//!
//! # Degenerate input
//!
//! Zero tiles, zero columns, and containers with a zero, negative, NaN or
//! infinite side all produce size 0. Nothing here panics.

pub use tilegrid_core::geometry::{Rect, Size};

/// Default upper bound on the column count scanned by [`plan`].
pub const DEFAULT_MAX_COLUMNS: u32 = 20;

/// One layout candidate: a column count and the square tile it allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCandidate {
    /// Number of columns.
    pub columns: u32,
    /// Rows needed to hold every tile, `ceil(items / columns)`.
    pub rows: u32,
    /// Widest tile that fits, `floor(width / columns)`.
    pub tile_width: u32,
    /// Tallest tile that fits, `floor(height / rows)`.
    pub tile_height: u32,
}

impl TileCandidate {
    /// Evaluate a column count against a container.
    ///
    /// The container is sanitized first. With zero items or zero columns the
    /// candidate has no rows and a tile height of 0.
    pub fn evaluate(container: Size, items: u32, columns: u32) -> Self {
        let container = container.sanitized();
        if items == 0 || columns == 0 {
            return Self {
                columns,
                rows: 0,
                tile_width: floor_div(container.width, columns),
                tile_height: 0,
            };
        }

        let rows = items.div_ceil(columns);
        Self {
            columns,
            rows,
            tile_width: floor_div(container.width, columns),
            tile_height: floor_div(container.height, rows),
        }
    }

    /// Square edge length this candidate allows.
    #[inline]
    pub const fn size(&self) -> u32 {
        if self.tile_width < self.tile_height {
            self.tile_width
        } else {
            self.tile_height
        }
    }
}

/// `floor(px / divisor)` in whole pixels. `px` must already be sanitized.
#[inline]
fn floor_div(px: f64, divisor: u32) -> u32 {
    if divisor == 0 {
        return 0;
    }
    // Float-to-int `as` saturates, so huge containers clamp to u32::MAX.
    (px / f64::from(divisor)).floor() as u32
}

/// The chosen grid: column and row counts plus the shared tile edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TilePlan {
    pub columns: u32,
    pub rows: u32,
    /// Edge length of every tile, before any gutter padding.
    pub size: u32,
}

impl From<TileCandidate> for TilePlan {
    fn from(candidate: TileCandidate) -> Self {
        Self {
            columns: candidate.columns,
            rows: candidate.rows,
            size: candidate.size(),
        }
    }
}

impl TilePlan {
    /// Placement of the tile at `index` in row-major order.
    ///
    /// Indices past `columns * rows` keep flowing into further rows; callers
    /// decide whether those are visible.
    pub fn tile_rect(&self, index: u32) -> Rect {
        let columns = self.columns.max(1);
        let col = index % columns;
        let row = index / columns;
        Rect::square(
            col.saturating_mul(self.size),
            row.saturating_mul(self.size),
            self.size,
        )
    }

    /// Placements of the first `count` tiles, row-major.
    pub fn tiles(&self, count: u32) -> impl Iterator<Item = Rect> + '_ {
        (0..count).map(move |index| self.tile_rect(index))
    }

    /// Bounding box of a full grid of this plan.
    pub fn extent(&self) -> Rect {
        Rect::new(
            0,
            0,
            self.columns.saturating_mul(self.size),
            self.rows.saturating_mul(self.size),
        )
    }
}

/// Candidates for every column count from `max_columns` down to 1.
pub fn candidates(
    container: Size,
    items: u32,
    max_columns: u32,
) -> impl Iterator<Item = TileCandidate> {
    (1..=max_columns)
        .rev()
        .map(move |columns| TileCandidate::evaluate(container, items, columns))
}

/// Choose the column count that maximizes the tile edge.
///
/// Returns `None` when no candidate yields a positive edge.
pub fn plan(container: Size, items: u32, max_columns: u32) -> Option<TilePlan> {
    let mut best: Option<TileCandidate> = None;
    for candidate in candidates(container, items, max_columns) {
        if candidate.size() > best.map_or(0, |b| b.size()) {
            best = Some(candidate);
        }
    }

    let chosen = best.map(TilePlan::from);
    tilegrid_core::trace!(
        target: tilegrid_core::logging::TARGET_LAYOUT,
        items,
        max_columns,
        plan = ?chosen,
        "tile scan finished"
    );
    chosen
}

/// Largest square tile edge that fits `items` tiles in a `width` x `height`
/// container using at most `max_columns` columns.
pub fn compute_optimal_size(width: f64, height: f64, items: u32, max_columns: u32) -> u32 {
    plan(Size::new(width, height), items, max_columns).map_or(0, |p| p.size)
}
