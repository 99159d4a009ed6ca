//! Property-based invariant tests for the tile-size solver.
//!
//! 1. The chosen edge is bounded by the container's smaller side.
//! 2. Every tile of the chosen plan fits inside the container.
//! 3. Tiles of the chosen plan never overlap.
//! 4. The chosen edge is at least as large as any single candidate.
//! 5. Ties resolve to the largest column count.
//! 6. Degenerate containers always give zero.
//! 7. Same input, same plan.

use proptest::prelude::*;
use tilegrid_layout::{Rect, Size, TileCandidate, candidates, compute_optimal_size, plan};

fn container() -> impl Strategy<Value = (f64, f64)> {
    (1.0f64..4000.0, 1.0f64..4000.0)
}

fn degenerate_side() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        -5000.0f64..0.0,
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
    ]
}

proptest! {
    #[test]
    fn size_bounded_by_smaller_side(
        (w, h) in container(),
        items in 1u32..200,
        max_columns in 1u32..40,
    ) {
        let size = compute_optimal_size(w, h, items, max_columns);
        prop_assert!(f64::from(size) <= w.min(h), "size {} exceeds min({}, {})", size, w, h);
    }

    #[test]
    fn chosen_tiles_fit_inside_container(
        (w, h) in container(),
        items in 1u32..200,
        max_columns in 1u32..40,
    ) {
        if let Some(p) = plan(Size::new(w, h), items, max_columns) {
            let bounds = Rect::new(0, 0, w.floor() as u32, h.floor() as u32);
            for tile in p.tiles(items) {
                prop_assert!(bounds.contains_rect(&tile), "{:?} escapes {:?}", tile, bounds);
            }
        }
    }

    #[test]
    fn chosen_tiles_never_overlap(
        (w, h) in (1.0f64..800.0, 1.0f64..800.0),
        items in 1u32..40,
        max_columns in 1u32..12,
    ) {
        if let Some(p) = plan(Size::new(w, h), items, max_columns) {
            let tiles: Vec<Rect> = p.tiles(items).collect();
            for (i, a) in tiles.iter().enumerate() {
                for b in &tiles[i + 1..] {
                    prop_assert_eq!(a.intersection_opt(b), None);
                }
            }
        }
    }

    #[test]
    fn chosen_size_dominates_every_candidate(
        (w, h) in container(),
        items in 1u32..200,
        max_columns in 1u32..40,
    ) {
        let container = Size::new(w, h);
        let best = compute_optimal_size(w, h, items, max_columns);
        for candidate in candidates(container, items, max_columns) {
            prop_assert!(candidate.size() <= best);
        }
    }

    #[test]
    fn ties_resolve_to_most_columns(
        (w, h) in container(),
        items in 1u32..200,
        max_columns in 1u32..40,
    ) {
        let container = Size::new(w, h);
        if let Some(p) = plan(container, items, max_columns) {
            let widest = ((p.columns + 1)..=max_columns)
                .map(|c| TileCandidate::evaluate(container, items, c).size())
                .max()
                .unwrap_or(0);
            prop_assert!(widest < p.size, "a wider grid also reaches {}", p.size);
        }
    }

    #[test]
    fn degenerate_container_gives_zero(
        w in degenerate_side(),
        h in 1.0f64..4000.0,
        items in 0u32..50,
        max_columns in 0u32..40,
    ) {
        prop_assert_eq!(compute_optimal_size(w, h, items, max_columns), 0);
        prop_assert_eq!(compute_optimal_size(h, w, items, max_columns), 0);
    }

    #[test]
    fn deterministic(
        (w, h) in container(),
        items in 0u32..200,
        max_columns in 0u32..40,
    ) {
        let a = plan(Size::new(w, h), items, max_columns);
        let b = plan(Size::new(w, h), items, max_columns);
        prop_assert_eq!(a, b);
    }
}
