//! Page-load duration diagnostics.

#[cfg(test)]
#[path = "load_timer_test.rs"]
mod load_timer_test;

/// Elapsed milliseconds between navigation start and load completion.
///
/// `navigation_start` and `load_event_end` are epoch milliseconds from
/// navigation timing; `now_since_origin` is `performance.now()`. When
/// `load_event_end` is not populated yet (zero) the time since the time origin
/// stands in for it. Returns `None` when no sensible value exists.
pub fn load_duration_ms(navigation_start: f64, load_event_end: f64, now_since_origin: f64) -> Option<f64> {
    let elapsed = if navigation_start > 0.0 && load_event_end >= navigation_start {
        load_event_end - navigation_start
    } else {
        now_since_origin
    };
    (elapsed.is_finite() && elapsed >= 0.0).then_some(elapsed)
}

/// `document.readyState` at the moment a component installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

/// How to run a post-load hook from a given ready state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadHook {
    /// `load` already fired; run the hook now.
    RunNow,
    /// Wait for the window `load` event.
    AwaitLoad,
}

impl ReadyState {
    /// Parse the `readyState` string. Unknown values count as still loading.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "complete" => Self::Complete,
            "interactive" => Self::Interactive,
            _ => Self::Loading,
        }
    }

    /// The WASM module is usually fetched asynchronously, so `load` has often
    /// fired before install; listening for it then would never run the hook.
    #[must_use]
    pub fn load_hook(self) -> LoadHook {
        match self {
            Self::Complete => LoadHook::RunNow,
            Self::Loading | Self::Interactive => LoadHook::AwaitLoad,
        }
    }
}

/// The single diagnostic line emitted per page load.
#[must_use]
pub fn report(elapsed_ms: f64) -> String {
    format!("page loaded in {}ms", elapsed_ms.round())
}

#[cfg(feature = "hydrate")]
pub use browser::install;

#[cfg(feature = "hydrate")]
mod browser {
    use gloo_timers::callback::Timeout;
    use web_sys::{Document, Window};

    use super::{load_duration_ms, report};
    use crate::dom;

    fn log_load_time(window: &Window) {
        let Some(performance) = window.performance() else {
            return;
        };
        let now = performance.now();
        let (navigation_start, load_event_end) = if dom::has_property(&performance, "timing") {
            let timing = performance.timing();
            (timing.navigation_start(), timing.load_event_end())
        } else {
            (0.0, 0.0)
        };
        if let Some(elapsed) = load_duration_ms(navigation_start, load_event_end, now) {
            log::debug!("{}", report(elapsed));
        }
    }

    /// Log the load duration once, after `load` (or right away when the page
    /// already finished loading). A page without the `performance` API is
    /// silently skipped.
    pub fn install(window: &Window, document: &Document) {
        if window.performance().is_none() {
            return;
        }
        let handle = window.clone();
        dom::after_load(window, document, move || {
            // `loadEventEnd` is only populated once the load handlers return.
            Timeout::new(0, move || log_load_time(&handle)).forget();
        });
    }
}
