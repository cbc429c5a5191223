//! End-to-end tests for responsive value resolution and writes.
//!
//! Covers breakpoint fallback, copy-on-write promotion, idempotence, and
//! the guarantee that an edit at one breakpoint leaves the others alone.

use std::collections::BTreeMap;

use blockstyle::{Breakpoint, ResponsiveStyle, StyleMode};
use blockstyle::model::responsive::{resolve, write};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn any_breakpoint() -> impl Strategy<Value = Breakpoint> {
    prop_oneof![
        Just(Breakpoint::Desktop),
        Just(Breakpoint::Sm),
        Just(Breakpoint::Xs),
    ]
}

fn css_value() -> impl Strategy<Value = String> {
    "[a-z0-9%.()-]{1,12}"
}

fn any_style() -> impl Strategy<Value = ResponsiveStyle> {
    prop_oneof![
        css_value().prop_map(ResponsiveStyle::Global),
        proptest::collection::btree_map(any_breakpoint(), css_value(), 0..=3)
            .prop_map(ResponsiveStyle::PerBreakpoint),
    ]
}

// ============================================================================
// 1. Fixed scenarios
// ============================================================================

#[test]
fn test_mobile_falls_back_to_desktop() {
    let m = ResponsiveStyle::per_breakpoint([(Breakpoint::Desktop, "10px")]);
    assert_eq!(resolve(&m, Breakpoint::Xs), "10px");
}

#[test]
fn test_tablet_wins_over_desktop_for_mobile() {
    let m = ResponsiveStyle::per_breakpoint([(Breakpoint::Desktop, "10px"), (Breakpoint::Sm, "6px")]);
    assert_eq!(resolve(&m, Breakpoint::Xs), "6px");
    assert_eq!(resolve(&m, Breakpoint::Desktop), "10px");
}

#[test]
fn test_grid_columns_promotion() {
    let prev = ResponsiveStyle::global("1fr");
    let next = write("3", Breakpoint::Desktop, &prev, StyleMode::Responsive);

    let mut expected = BTreeMap::new();
    expected.insert(Breakpoint::Xs, "1fr".to_string());
    expected.insert(Breakpoint::Sm, "1fr".to_string());
    expected.insert(Breakpoint::Desktop, "3".to_string());
    assert_eq!(next, ResponsiveStyle::PerBreakpoint(expected));
}

#[test]
fn test_empty_mapping_resolves_empty() {
    let m = ResponsiveStyle::PerBreakpoint(BTreeMap::new());
    for bp in Breakpoint::ALL {
        assert_eq!(resolve(&m, bp), "");
    }
}

// ============================================================================
// 2. Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_global_ignores_breakpoint(v in css_value(), bp in any_breakpoint()) {
        let style = ResponsiveStyle::Global(v.clone());
        prop_assert_eq!(resolve(&style, bp), v.as_str());
    }

    #[test]
    fn prop_nothing_wider_resolves_empty(v in css_value(), bp in any_breakpoint()) {
        // only entries strictly narrower than bp
        let entries: Vec<_> = Breakpoint::ALL.into_iter().filter(|b| *b > bp).map(|b| (b, v.clone())).collect();
        let style = ResponsiveStyle::per_breakpoint(entries);
        prop_assert_eq!(resolve(&style, bp), "");
    }

    #[test]
    fn prop_write_is_idempotent(
        prev in any_style(),
        v in css_value(),
        bp in any_breakpoint(),
        global in any::<bool>(),
    ) {
        let mode = if global { StyleMode::Global } else { StyleMode::Responsive };
        let once = write(v.clone(), bp, &prev, mode);
        let twice = write(v.clone(), bp, &once, mode);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_write_reads_back(prev in any_style(), v in css_value(), bp in any_breakpoint()) {
        let next = write(v.clone(), bp, &prev, StyleMode::Responsive);
        prop_assert_eq!(resolve(&next, bp), v.as_str());
    }

    #[test]
    fn prop_tablet_write_preserves_desktop(
        desktop in css_value(),
        rest in proptest::collection::btree_map(
            prop_oneof![Just(Breakpoint::Sm), Just(Breakpoint::Xs)], css_value(), 0..=2),
        v in css_value(),
    ) {
        let mut map = rest;
        map.insert(Breakpoint::Desktop, desktop.clone());
        let prev = ResponsiveStyle::PerBreakpoint(map);

        let next = write(v, Breakpoint::Sm, &prev, StyleMode::Responsive);
        prop_assert_eq!(resolve(&next, Breakpoint::Desktop), desktop.as_str());
    }

    #[test]
    fn prop_write_never_mutates_previous(prev in any_style(), v in css_value(), bp in any_breakpoint()) {
        let before = prev.clone();
        let _ = write(v, bp, &prev, StyleMode::Responsive);
        prop_assert_eq!(prev, before);
    }

    #[test]
    fn prop_serde_round_trip(style in any_style()) {
        let json = serde_json::to_string(&style).unwrap();
        let back: ResponsiveStyle = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, style);
    }
}
