//! Property-based invariant tests for CSS length parsing and centre
//! conversion.
//!
//! 1. Any finite length formatted as `"{x}px"` parses back exactly.
//! 2. Leading whitespace and trailing units never change the value.
//! 3. Arbitrary strings never panic.
//! 4. Click -> natural -> marker lands within one displayed pixel of the click.

use proptest::prelude::*;
use tilegrid_core::geometry::{Point, Size};
use tilegrid_web::{ImageMetrics, parse_css_px};

proptest! {
    #[test]
    fn formatted_lengths_round_trip(x in -1.0e9f64..1.0e9) {
        prop_assert_eq!(parse_css_px(&format!("{x}px")), Some(x));
    }

    #[test]
    fn whitespace_and_units_are_ignored(
        x in 0.0f64..10_000.0,
        pad in "[ \t\n]{0,4}",
        unit in prop_oneof![Just("px"), Just("em"), Just("%"), Just("")],
    ) {
        prop_assert_eq!(parse_css_px(&format!("{pad}{x}{unit}")), Some(x));
    }

    #[test]
    fn arbitrary_input_never_panics(s in ".*") {
        let _ = parse_css_px(&s);
    }

    #[test]
    fn click_round_trips_within_a_pixel(
        nat_w in 100.0f64..8000.0,
        nat_h in 100.0f64..8000.0,
        scale in 0.05f64..1.0,
        fx in 0.0f64..1.0,
        fy in 0.0f64..1.0,
    ) {
        let displayed = Size::new(nat_w * scale, nat_h * scale);
        let m = ImageMetrics::new(Size::new(nat_w, nat_h), displayed, Point::ORIGIN);
        let click = Point::new(fx * displayed.width, fy * displayed.height);

        let centre = m.natural_from_click(click).unwrap();
        let marker = m.marker_position(centre.to_point()).unwrap();

        // Rounding moves the centre by at most half a natural pixel, which is
        // at most half a displayed pixel after scaling down.
        prop_assert!((marker.x - click.x).abs() <= 0.5 + 1e-6);
        prop_assert!((marker.y - click.y).abs() <= 0.5 + 1e-6);
    }
}
