#![forbid(unsafe_code)]

//! tilegrid runtime
//!
//! Ties the pure solver in `tilegrid-layout` to a live set of tiles.
//!
//! # Key Components
//!
//! - [`GridSizer`] - remembers the applied edge and resizes tiles on change
//! - [`TileSink`] - the host's tiles (DOM elements, test doubles)
//! - [`ResizeCoalescer`] - optional latest-wins debouncing of resize bursts
//! - [`ResizeDriver`] - turns [`HostEvent`]s into sizer updates
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tilegrid_core::event::HostEvent;
//! use tilegrid_runtime::{ResizeDriver, SizerOutcome, TileSink};
//!
//! struct Tiles(Vec<u32>);
//!
//! impl TileSink for Tiles {
//!     fn tile_count(&self) -> usize {
//!         self.0.len()
//!     }
//!     fn set_tile_edge(&mut self, index: usize, edge_px: u32) {
//!         self.0[index] = edge_px;
//!     }
//! }
//!
//! let mut driver = ResizeDriver::with_defaults(Tiles(vec![0; 12]));
//! let outcome = driver.handle(HostEvent::ready(1000.0, 600.0), Duration::ZERO);
//! assert_eq!(outcome, Some(SizerOutcome::Applied { size: 200, edge: 194 }));
//! assert!(driver.sink().0.iter().all(|&edge| edge == 194));
//! ```

pub mod driver;
pub mod resize_coalescer;
pub mod sizer;

pub use driver::ResizeDriver;
pub use resize_coalescer::{CoalesceAction, CoalescerConfig, CoalescerStats, ResizeCoalescer};
pub use sizer::{DEFAULT_PADDING, GridSizer, SizerConfig, SizerOutcome, TileSink};
pub use tilegrid_core::event::HostEvent;
pub use tilegrid_layout::{DEFAULT_MAX_COLUMNS, TilePlan};
