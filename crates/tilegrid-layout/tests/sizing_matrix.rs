#![forbid(unsafe_code)]

//! Tile sizing matrix (container x tile count x column bound).
//!
//! Hand-checked scenarios covering common viewport shapes.
//!
//! | Case        | What it pins down                                  |
//! |-------------|----------------------------------------------------|
//! | landscape   | wide panels spread tiles across columns            |
//! | portrait    | tall panels stack tiles into rows                  |
//! | bound       | `max_columns` caps the scan                        |
//! | tie         | equal edges resolve to the wider grid              |
//! | resize      | a narrower container yields a smaller edge         |
//!
//! # Running Tests
//!
//! ```sh
//! cargo test -p tilegrid-layout --test sizing_matrix
//! ```

use tilegrid_layout::{DEFAULT_MAX_COLUMNS, Size, TilePlan, compute_optimal_size, plan};

struct Case {
    name: &'static str,
    width: f64,
    height: f64,
    items: u32,
    max_columns: u32,
    expected: Option<TilePlan>,
}

const fn grid(columns: u32, rows: u32, size: u32) -> Option<TilePlan> {
    Some(TilePlan {
        columns,
        rows,
        size,
    })
}

const CASES: &[Case] = &[
    Case {
        name: "tie/landscape/12",
        width: 1000.0,
        height: 600.0,
        items: 12,
        max_columns: DEFAULT_MAX_COLUMNS,
        expected: grid(5, 3, 200),
    },
    Case {
        name: "landscape/hd/24",
        width: 1920.0,
        height: 1080.0,
        items: 24,
        max_columns: DEFAULT_MAX_COLUMNS,
        expected: grid(7, 4, 270),
    },
    Case {
        name: "portrait/6",
        width: 400.0,
        height: 900.0,
        items: 6,
        max_columns: DEFAULT_MAX_COLUMNS,
        expected: grid(2, 3, 200),
    },
    Case {
        name: "bound/strip",
        width: 1000.0,
        height: 100.0,
        items: 10,
        max_columns: 2,
        expected: grid(2, 5, 20),
    },
    Case {
        name: "single",
        width: 640.0,
        height: 480.0,
        items: 1,
        max_columns: DEFAULT_MAX_COLUMNS,
        expected: grid(1, 1, 480),
    },
    Case {
        name: "square/4",
        width: 300.0,
        height: 300.0,
        items: 4,
        max_columns: DEFAULT_MAX_COLUMNS,
        expected: grid(2, 2, 150),
    },
    Case {
        name: "empty/items",
        width: 300.0,
        height: 300.0,
        items: 0,
        max_columns: DEFAULT_MAX_COLUMNS,
        expected: None,
    },
];

#[test]
fn sizing_matrix_cases() {
    for case in CASES {
        let got = plan(Size::new(case.width, case.height), case.items, case.max_columns);
        assert_eq!(got, case.expected, "case {}", case.name);
        assert_eq!(
            compute_optimal_size(case.width, case.height, case.items, case.max_columns),
            case.expected.map_or(0, |p| p.size),
            "case {} (size only)",
            case.name
        );
    }
}

#[test]
fn sizing_matrix_resize_narrower_shrinks_edge() {
    let wide = compute_optimal_size(1000.0, 600.0, 12, DEFAULT_MAX_COLUMNS);
    let narrow = compute_optimal_size(500.0, 600.0, 12, DEFAULT_MAX_COLUMNS);
    assert_eq!(wide, 200);
    assert_eq!(narrow, 150);
    assert!(narrow < wide);
}

#[test]
fn sizing_matrix_same_width_same_plan() {
    let first = plan(Size::new(1280.0, 720.0), 30, DEFAULT_MAX_COLUMNS);
    for _ in 0..10 {
        assert_eq!(plan(Size::new(1280.0, 720.0), 30, DEFAULT_MAX_COLUMNS), first);
    }
}
