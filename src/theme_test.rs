use super::*;
use crate::error::PageError;
use crate::storage::MemoryStore;

/// Store whose every operation fails, like disabled storage.
struct BrokenStore;

impl PreferenceStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, PageError> {
        Err(PageError::Storage("disabled".to_owned()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), PageError> {
        Err(PageError::Storage("quota exceeded".to_owned()))
    }
}

fn store_with(value: &str) -> MemoryStore {
    let store = MemoryStore::new();
    store.set("theme", value).unwrap();
    store
}

fn config() -> ThemeConfig {
    ThemeConfig::default()
}

// =============================================================
// Theme values
// =============================================================

#[test]
fn parse_accepts_only_exact_values() {
    assert_eq!(Theme::parse("light"), Some(Theme::Light));
    assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
    assert_eq!(Theme::parse("Dark"), None);
    assert_eq!(Theme::parse(" dark"), None);
    assert_eq!(Theme::parse("true"), None);
}

#[test]
fn toggled_flips() {
    assert_eq!(Theme::Light.toggled(), Theme::Dark);
    assert_eq!(Theme::Dark.toggled(), Theme::Light);
}

// =============================================================
// Initial resolution
// =============================================================

#[test]
fn stored_preference_beats_system() {
    let controller = ThemeController::init(store_with("light"), &config(), true);
    assert_eq!(controller.current(), Theme::Light);
    assert!(controller.state().explicit);
}

#[test]
fn absent_preference_follows_system() {
    let dark = ThemeController::init(MemoryStore::new(), &config(), true);
    assert_eq!(dark.current(), Theme::Dark);
    assert!(!dark.state().explicit);
    let light = ThemeController::init(MemoryStore::new(), &config(), false);
    assert_eq!(light.current(), Theme::Light);
}

#[test]
fn invalid_stored_value_counts_as_absent() {
    let controller = ThemeController::init(store_with("purple"), &config(), true);
    assert_eq!(controller.current(), Theme::Dark);
    assert!(!controller.state().explicit);
}

#[test]
fn unreadable_store_counts_as_absent() {
    let controller = ThemeController::init(BrokenStore, &config(), false);
    assert_eq!(controller.current(), Theme::Light);
}

#[test]
fn initial_effects_reflect_theme() {
    let controller = ThemeController::init(store_with("dark"), &config(), false);
    assert_eq!(
        controller.effects(),
        vec![
            Effect::set_attribute(Node::Root, "data-theme", "dark"),
            Effect::set_attribute(Node::ThemeControl, "aria-pressed", "true"),
        ]
    );
}

// =============================================================
// Toggle
// =============================================================

#[test]
fn double_toggle_restores_and_persists_second_value() {
    let mut controller = ThemeController::init(MemoryStore::new(), &config(), false);
    let first = controller.toggle();
    assert_eq!(first.theme, Theme::Dark);
    assert!(first.persisted);
    let second = controller.toggle();
    assert_eq!(second.theme, Theme::Light);
    assert_eq!(controller.current(), Theme::Light);
    assert_eq!(controller.store().get("theme").unwrap().as_deref(), Some("light"));
}

#[test]
fn toggle_uses_configured_key() {
    let cfg = ThemeConfig { storage_key: "site-theme".to_owned(), ..ThemeConfig::default() };
    let mut controller = ThemeController::init(MemoryStore::new(), &cfg, false);
    controller.toggle();
    assert_eq!(controller.store().get("site-theme").unwrap().as_deref(), Some("dark"));
    assert_eq!(controller.store().get("theme").unwrap(), None);
}

#[test]
fn storage_failure_still_changes_theme() {
    let mut controller = ThemeController::init(BrokenStore, &config(), false);
    let change = controller.toggle();
    assert!(!change.persisted);
    assert_eq!(change.theme, Theme::Dark);
    assert_eq!(controller.current(), Theme::Dark);
    assert!(change.effects.contains(&Effect::set_attribute(Node::Root, "data-theme", "dark")));
}

// =============================================================
// Live system follow
// =============================================================

#[test]
fn system_changes_apply_until_first_toggle() {
    let mut controller = ThemeController::init(MemoryStore::new(), &config(), false);
    let effects = controller.system_changed(true).unwrap();
    assert!(effects.contains(&Effect::set_attribute(Node::Root, "data-theme", "dark")));
    assert_eq!(controller.current(), Theme::Dark);

    controller.toggle();
    assert_eq!(controller.current(), Theme::Light);
    assert_eq!(controller.system_changed(true), None);
    assert_eq!(controller.system_changed(false), None);
    assert_eq!(controller.current(), Theme::Light);
}

#[test]
fn system_change_to_same_theme_is_noop() {
    let mut controller = ThemeController::init(MemoryStore::new(), &config(), true);
    assert_eq!(controller.system_changed(true), None);
}

#[test]
fn stored_preference_ignores_system_changes() {
    let mut controller = ThemeController::init(store_with("light"), &config(), false);
    assert_eq!(controller.system_changed(true), None);
}

// =============================================================
// Pulse
// =============================================================

#[test]
fn pulse_plays_with_element_and_motion() {
    let controller = ThemeController::init(MemoryStore::new(), &config(), false);
    let pulse = controller.pulse(false, true).unwrap();
    assert_eq!(pulse.start, Effect::add_class(Node::ThemePulse, "is-pulsing"));
    assert_eq!(pulse.end, Effect::remove_class(Node::ThemePulse, "is-pulsing"));
    assert_eq!(pulse.duration_ms, 600);
}

#[test]
fn pulse_suppressed_for_reduced_motion_or_missing_element() {
    let controller = ThemeController::init(MemoryStore::new(), &config(), false);
    assert_eq!(controller.pulse(true, true), None);
    assert_eq!(controller.pulse(false, false), None);
}

#[test]
fn rejected_pulse_selector_only_disables_pulse() {
    let rejected: Result<Option<&str>, PageError> = Err(PageError::Dom("SyntaxError: '[' is not a valid selector".to_owned()));
    assert_eq!(optional_part(rejected).flatten(), None);
    assert_eq!(optional_part(Ok::<_, PageError>(Some("pulse"))).flatten(), Some("pulse"));
    assert_eq!(optional_part(Ok::<Option<&str>, PageError>(None)).flatten(), None);

    let controller = ThemeController::init(MemoryStore::new(), &config(), false);
    assert_eq!(controller.pulse(false, false), None);
}
