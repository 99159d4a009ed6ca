//! End-to-end host sessions: page ready, window drags, and the JSON the
//! page receives.

use std::time::Duration;

use pretty_assertions::assert_eq;
use tilegrid_runtime::{CoalescerConfig, SizerConfig, SizerOutcome};
use tilegrid_web::{WebGridHost, WebHostConfig, WebOutputs};

fn edges(outputs: &WebOutputs) -> Vec<&str> {
    outputs.mutations.iter().map(|m| m.width.as_str()).collect()
}

#[test]
fn page_load_then_window_narrows() {
    let mut host = WebGridHost::default();

    host.ready(12, "1000px", "600px").unwrap();
    let out = host.take_outputs();
    assert_eq!(edges(&out), vec!["194px"; 12]);
    assert!(out.mutations.iter().all(|m| m.width == m.height));
    let indices: Vec<usize> = out.mutations.iter().map(|m| m.index).collect();
    assert_eq!(indices, (0..12).collect::<Vec<_>>());

    host.resize("500px", "600px").unwrap();
    assert_eq!(edges(&host.take_outputs()), vec!["144px"; 12]);
    assert_eq!(host.tile_size(), Some(150));
}

#[test]
fn drag_without_size_change_touches_nothing() {
    let mut host = WebGridHost::default();
    host.ready(12, "1000px", "600px").unwrap();
    host.take_outputs();

    // Wider but the height still caps the tiles at 200.
    for width in ["1010px", "1050px", "1100.5px"] {
        let outcome = host.resize(width, "600px").unwrap();
        assert_eq!(outcome, Some(SizerOutcome::Unchanged { size: 200 }));
    }
    assert!(host.take_outputs().is_empty());
}

#[test]
fn debounced_drag_applies_only_the_last_size() {
    let mut host = WebGridHost::new(WebHostConfig {
        sizer: SizerConfig::default(),
        coalescer: CoalescerConfig::debounced(),
    });
    host.ready(12, "1000px", "600px").unwrap();
    host.take_outputs();

    for width in [950, 900, 850, 800, 750, 700, 650, 600, 550, 500] {
        host.clock_mut().advance(Duration::from_millis(4));
        assert_eq!(host.resize(&format!("{width}px"), "600px").unwrap(), None);
    }
    assert!(host.take_outputs().is_empty());

    host.clock_mut().advance(Duration::from_millis(16));
    let outcome = host.tick().unwrap();
    assert_eq!(outcome, Some(SizerOutcome::Applied { size: 150, edge: 144 }));
    assert_eq!(edges(&host.take_outputs()), vec!["144px"; 12]);
}

#[test]
fn custom_padding_and_column_bound() {
    let mut host = WebGridHost::new(WebHostConfig {
        sizer: SizerConfig::default().with_padding(0).with_max_columns(2),
        coalescer: CoalescerConfig::default(),
    });
    host.ready(10, "1000px", "100px").unwrap();
    assert_eq!(edges(&host.take_outputs()), vec!["20px"; 10]);
}

#[test]
fn empty_page_has_nothing_to_size() {
    let mut host = WebGridHost::default();
    let outcome = host.ready(0, "1000px", "600px").unwrap();
    assert_eq!(outcome, Some(SizerOutcome::Applied { size: 0, edge: 0 }));
    assert!(host.take_outputs().is_empty());
}
