//! Light/dark theme toggle with a persisted explicit preference.
//!
//! Reads the user's preference from a `PreferenceStore` and reflects the theme
//! as a `data-theme` attribute on `<html>` plus `aria-pressed` on the toggle
//! control. Until the user toggles once, the theme follows the system color
//! scheme live; after that, system changes are ignored.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort. A store failure is logged and the in-memory
//! theme still changes, so the page never gets stuck on the old theme.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use crate::config::ThemeConfig;
use crate::consts::THEME_PRESSED_ATTR;
use crate::effect::{Effect, Node};
use crate::error::PageError;
use crate::storage::PreferenceStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored value. Only the exact strings `light` and `dark` count.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// The two-state machine plus whether the user has chosen explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    pub current: Theme,
    pub explicit: bool,
}

impl ThemeState {
    /// Stored preference wins; otherwise the system preference decides.
    #[must_use]
    pub fn resolve(stored: Option<Theme>, system_dark: bool) -> Self {
        match stored {
            Some(theme) => Self { current: theme, explicit: true },
            None => Self { current: Theme::from_system(system_dark), explicit: false },
        }
    }

    /// Flip the theme and mark the choice explicit.
    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        self.explicit = true;
        self.current
    }

    /// Follow a system preference change. Returns the new theme when it changed.
    pub fn follow_system(&mut self, prefers_dark: bool) -> Option<Theme> {
        if self.explicit {
            return None;
        }
        let next = Theme::from_system(prefers_dark);
        if next == self.current {
            return None;
        }
        self.current = next;
        Some(next)
    }
}

/// Mutations reflecting `theme` on the root element and the control.
pub fn theme_effects(theme: Theme, root_attr: &str) -> Vec<Effect> {
    let pressed = if theme == Theme::Dark { "true" } else { "false" };
    vec![
        Effect::set_attribute(Node::Root, root_attr, theme.as_str()),
        Effect::set_attribute(Node::ThemeControl, THEME_PRESSED_ATTR, pressed),
    ]
}

/// A short transition pulse on the control's inner element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pulse {
    pub start: Effect,
    pub end: Effect,
    pub duration_ms: u32,
}

/// Result of a toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeChange {
    pub theme: Theme,
    /// Whether the new preference reached the store.
    pub persisted: bool,
    pub effects: Vec<Effect>,
}

pub struct ThemeController<S: PreferenceStore> {
    state: ThemeState,
    store: S,
    storage_key: String,
    root_attr: String,
    pulse_class: String,
    pulse_ms: u32,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Resolve the initial theme from `store`, falling back to `system_dark`.
    ///
    /// An unreadable store or an invalid stored value both count as "no
    /// preference".
    pub fn init(store: S, config: &ThemeConfig, system_dark: bool) -> Self {
        let stored = match store.get(&config.storage_key) {
            Ok(value) => value.as_deref().and_then(Theme::parse),
            Err(err) => {
                log::warn!("theme: reading preference failed: {err}");
                None
            }
        };
        Self {
            state: ThemeState::resolve(stored, system_dark),
            store,
            storage_key: config.storage_key.clone(),
            root_attr: config.root_attr.clone(),
            pulse_class: config.pulse_class.clone(),
            pulse_ms: config.pulse_ms,
        }
    }

    #[must_use]
    pub fn state(&self) -> ThemeState {
        self.state
    }

    #[must_use]
    pub fn current(&self) -> Theme {
        self.state.current
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Effects that reflect the current theme, for the first paint.
    #[must_use]
    pub fn effects(&self) -> Vec<Effect> {
        theme_effects(self.state.current, &self.root_attr)
    }

    /// Flip the theme and persist it.
    pub fn toggle(&mut self) -> ThemeChange {
        let theme = self.state.toggle();
        let persisted = match self.store.set(&self.storage_key, theme.as_str()) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("theme: preference not persisted: {err}");
                false
            }
        };
        ThemeChange { theme, persisted, effects: theme_effects(theme, &self.root_attr) }
    }

    /// React to a system color-scheme change. `None` when nothing changes.
    pub fn system_changed(&mut self, prefers_dark: bool) -> Option<Vec<Effect>> {
        self.state
            .follow_system(prefers_dark)
            .map(|theme| theme_effects(theme, &self.root_attr))
    }

    /// The pulse to play after a toggle, unless motion is reduced or there is
    /// no pulse element.
    #[must_use]
    pub fn pulse(&self, reduced_motion: bool, has_pulse_element: bool) -> Option<Pulse> {
        if reduced_motion || !has_pulse_element || self.pulse_ms == 0 {
            return None;
        }
        Some(Pulse {
            start: Effect::add_class(Node::ThemePulse, &self.pulse_class),
            end: Effect::remove_class(Node::ThemePulse, &self.pulse_class),
            duration_ms: self.pulse_ms,
        })
    }
}

/// A lookup for an optional part of the toggle. Failure (a missing element or
/// a selector the browser rejects) only disables that part.
pub fn optional_part<T>(result: Result<T, PageError>) -> Option<T> {
    match result {
        Ok(found) => Some(found),
        Err(err) => {
            log::debug!("theme: {err}");
            None
        }
    }
}

#[cfg(feature = "hydrate")]
pub use browser::install;

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gloo_events::EventListener;
    use web_sys::{Document, Element, MediaQueryList, Window};

    use super::{Theme, ThemeController, optional_part};
    use crate::config::ThemeConfig;
    use crate::consts::{PREFERS_DARK_QUERY, PREFERS_REDUCED_MOTION_QUERY};
    use crate::dom;
    use crate::effect::{Effect, Node};
    use crate::error::PageError;
    use crate::storage::LocalStore;
    use crate::timers::TimerSlot;

    struct ThemeBinding {
        window: Window,
        controller: RefCell<ThemeController<LocalStore>>,
        root: Element,
        control: Option<Element>,
        pulse: Option<Element>,
        pulse_timer: TimerSlot,
    }

    impl ThemeBinding {
        fn resolve(&self, node: Node) -> Option<Element> {
            match node {
                Node::Root => Some(self.root.clone()),
                Node::ThemeControl => self.control.clone(),
                Node::ThemePulse => self.pulse.clone(),
                _ => None,
            }
        }

        fn apply(&self, effects: &[Effect]) {
            dom::apply_all(effects, |node| self.resolve(node));
        }

        fn toggle(self: &Rc<Self>) {
            let change = self.controller.borrow_mut().toggle();
            self.apply(&change.effects);
            log::debug!("theme: toggled to {} (persisted: {})", change.theme.as_str(), change.persisted);

            let reduced_motion = dom::media_matches(&self.window, PREFERS_REDUCED_MOTION_QUERY);
            let pulse = self.controller.borrow().pulse(reduced_motion, self.pulse.is_some());
            if let Some(pulse) = pulse {
                self.apply(std::slice::from_ref(&pulse.start));
                let handle = Rc::clone(self);
                let end = pulse.end;
                self.pulse_timer
                    .arm(pulse.duration_ms, move || handle.apply(std::slice::from_ref(&end)));
            }
        }

        fn system_changed(&self, list: &MediaQueryList) {
            let effects = self.controller.borrow_mut().system_changed(list.matches());
            if let Some(effects) = effects {
                self.apply(&effects);
            }
        }
    }

    /// Apply the initial theme and wire the toggle. Returns the initial theme.
    pub fn install(window: &Window, document: &Document, config: &ThemeConfig) -> Result<Theme, PageError> {
        let root = dom::root(document)?;
        let control = optional_part(dom::query_one(document, &config.control_selector));
        let pulse = control
            .as_ref()
            .and_then(|control| optional_part(dom::query_within(control, &config.pulse_selector)).flatten());
        let system = dom::media_query(window, PREFERS_DARK_QUERY);
        let system_dark = system.as_ref().is_some_and(MediaQueryList::matches);

        let binding = Rc::new(ThemeBinding {
            window: window.clone(),
            controller: RefCell::new(ThemeController::init(LocalStore::open(), config, system_dark)),
            root,
            control,
            pulse,
            pulse_timer: TimerSlot::default(),
        });
        let initial = binding.controller.borrow().current();
        binding.apply(&binding.controller.borrow().effects());

        match system {
            Some(list) if dom::has_property(&list, "addEventListener") => {
                let handle = Rc::clone(&binding);
                let target = list.clone();
                EventListener::new(&target, "change", move |_| handle.system_changed(&list)).forget();
            }
            _ => log::debug!("theme: system preference changes not observable"),
        }

        if let Some(control) = &binding.control {
            let handle = Rc::clone(&binding);
            EventListener::new(control, "click", move |_| handle.toggle()).forget();
        }

        Ok(initial)
    }
}
