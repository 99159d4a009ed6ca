//! Property-based invariant tests for geometry primitives (Size, Rect).
//!
//! 1. `Size::sanitized` is idempotent and never yields a negative or
//!    non-finite side.
//! 2. `Size::is_empty` agrees with the sanitized sides.
//! 3. Rect intersection is commutative and fits within both inputs.
//! 4. A point is in the intersection iff it is in both rects.
//! 5. No panics on extreme u32 values.

use tilegrid_core::geometry::{Rect, Size};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn any_px() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1.0e6f64..1.0e6,
        Just(0.0),
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
    ]
}

fn small_rect() -> impl Strategy<Value = Rect> {
    (0u32..=500, 0u32..=500, 0u32..=500, 0u32..=500).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn any_rect() -> impl Strategy<Value = Rect> {
    (any::<u32>(), any::<u32>(), any::<u32>(), any::<u32>())
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn sanitized_is_idempotent_and_finite(w in any_px(), h in any_px()) {
        let once = Size::new(w, h).sanitized();
        prop_assert!(once.width.is_finite() && once.width >= 0.0);
        prop_assert!(once.height.is_finite() && once.height >= 0.0);
        prop_assert_eq!(once.sanitized(), once);
    }

    #[test]
    fn is_empty_agrees_with_sanitized(w in any_px(), h in any_px()) {
        let raw = Size::new(w, h);
        let clean = raw.sanitized();
        let finite_nonempty = clean.width > 0.0 && clean.height > 0.0;
        // Infinite sides are non-empty but sanitize to zero.
        if w.is_finite() && h.is_finite() {
            prop_assert_eq!(raw.is_empty(), !finite_nonempty);
        }
        prop_assert_eq!(clean.is_empty(), !finite_nonempty);
    }

    #[test]
    fn intersection_commutative(a in small_rect(), b in small_rect()) {
        prop_assert_eq!(a.intersection_opt(&b), b.intersection_opt(&a));
    }

    #[test]
    fn intersection_within_both(a in small_rect(), b in small_rect()) {
        if let Some(i) = a.intersection_opt(&b) {
            prop_assert!(a.contains_rect(&i), "{:?} not inside {:?}", i, a);
            prop_assert!(b.contains_rect(&i), "{:?} not inside {:?}", i, b);
            prop_assert!(!i.is_empty());
        }
    }

    #[test]
    fn contains_agrees_with_intersection(
        a in small_rect(),
        b in small_rect(),
        px in 0u32..=1000,
        py in 0u32..=1000,
    ) {
        let in_both = a.contains(px, py) && b.contains(px, py);
        let in_inter = a.intersection_opt(&b).is_some_and(|i| i.contains(px, py));
        prop_assert_eq!(in_both, in_inter);
    }

    #[test]
    fn extreme_values_do_not_panic(a in any_rect(), b in any_rect()) {
        let _ = a.right();
        let _ = a.bottom();
        let _ = a.area();
        let _ = a.intersection_opt(&b);
        let _ = a.contains_rect(&b);
    }
}
