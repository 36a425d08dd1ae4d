// Host-side tests for pure input functions.
// Included directly so the keyboard rules build without the rest of the crate.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use input::*;

#[test]
fn enter_activates_on_keydown() {
    assert_eq!(button_key_action(KeyPhase::Down, "Enter", "Enter"), ButtonKey::Activate);
    assert_eq!(button_key_action(KeyPhase::Up, "Enter", "Enter"), ButtonKey::Ignore);
}

#[test]
fn space_is_suppressed_on_keydown_and_activates_on_keyup() {
    assert_eq!(button_key_action(KeyPhase::Down, " ", "Space"), ButtonKey::Suppress);
    assert_eq!(button_key_action(KeyPhase::Up, " ", "Space"), ButtonKey::Activate);
    // Some layouts report only one of the two fields.
    assert_eq!(button_key_action(KeyPhase::Up, " ", ""), ButtonKey::Activate);
    assert_eq!(button_key_action(KeyPhase::Up, "Spacebar", "Space"), ButtonKey::Activate);
}

#[test]
fn other_keys_are_ignored_by_buttons() {
    for key in ["a", "Tab", "Escape", "ArrowDown"] {
        assert_eq!(button_key_action(KeyPhase::Down, key, key), ButtonKey::Ignore);
        assert_eq!(button_key_action(KeyPhase::Up, key, key), ButtonKey::Ignore);
    }
}

#[test]
fn shortcuts_are_case_insensitive() {
    assert_eq!(shortcut_for_key("m", false, false), Some(Shortcut::ToggleParallax));
    assert_eq!(shortcut_for_key("M", false, false), Some(Shortcut::ToggleParallax));
    assert_eq!(shortcut_for_key("d", false, false), Some(Shortcut::ToggleDebugOverlay));
    assert_eq!(shortcut_for_key("D", false, false), Some(Shortcut::ToggleDebugOverlay));
    assert_eq!(shortcut_for_key("x", false, false), None);
}

#[test]
fn shortcuts_skip_repeats_and_modified_keys() {
    assert_eq!(shortcut_for_key("m", true, false), None);
    assert_eq!(shortcut_for_key("d", false, true), None);
}

#[test]
fn arrow_keys_map_to_moves() {
    assert_eq!(nav_move_for_key("ArrowRight"), Some(NavMove::Next));
    assert_eq!(nav_move_for_key("ArrowDown"), Some(NavMove::Next));
    assert_eq!(nav_move_for_key("ArrowLeft"), Some(NavMove::Prev));
    assert_eq!(nav_move_for_key("ArrowUp"), Some(NavMove::Prev));
    assert_eq!(nav_move_for_key("Home"), Some(NavMove::First));
    assert_eq!(nav_move_for_key("End"), Some(NavMove::Last));
    assert_eq!(nav_move_for_key("Enter"), None);
}

#[test]
fn navigation_wraps_around() {
    assert_eq!(nav_target(Some(2), 3, NavMove::Next), Some(0));
    assert_eq!(nav_target(Some(0), 3, NavMove::Prev), Some(2));
    assert_eq!(nav_target(Some(1), 3, NavMove::First), Some(0));
    assert_eq!(nav_target(Some(1), 3, NavMove::Last), Some(2));
    assert_eq!(nav_target(Some(0), 1, NavMove::Next), Some(0));
}

#[test]
fn navigation_from_unknown_position_starts_at_zero() {
    assert_eq!(nav_target(None, 4, NavMove::Next), Some(1));
    assert_eq!(nav_target(Some(9), 4, NavMove::Prev), Some(3));
    assert_eq!(nav_target(None, 0, NavMove::Next), None);
}
