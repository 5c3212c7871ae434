//! # page-behaviors
//!
//! Browser-side presentation behaviors for a rendered page, compiled to
//! WebAssembly: hover/focus spotlight, two-column height equalization, lazy
//! images, a persisted light/dark toggle and a page-load timer.
//!
//! Every component is a pure state core that emits [`effect::Effect`]s,
//! plus a thin adapter behind the `hydrate` feature that binds it to the live
//! document with `web_sys` and `gloo`. The cores build and test natively.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`spotlight`] | Delayed hover reveal with dimming; instant focus mirror |
//! | [`equalizer`] | Measured-column height applied to its sibling |
//! | [`lazy_images`] | Deferred `src` assignment on viewport intersection |
//! | [`theme`] | Light/dark state, persistence and system follow |
//! | [`load_timer`] | Load-duration diagnostics |
//! | [`effect`] | Class/attribute mutations emitted by the cores |
//! | [`storage`] | Preference store trait and implementations |
//! | [`config`] | Page configuration from an inline JSON block |
//! | [`consts`] | Default markup contract and timings |
//! | [`error`] | Shared error type |

pub mod config;
pub mod consts;
pub mod effect;
pub mod equalizer;
pub mod error;
pub mod lazy_images;
pub mod load_timer;
pub mod spotlight;
pub mod storage;
pub mod theme;

#[cfg(feature = "hydrate")]
mod dom;
#[cfg(feature = "hydrate")]
mod page;
#[cfg(feature = "hydrate")]
mod timers;

/// WASM entry point: set up console logging and install every behavior.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("logger already set: {err}").into());
    }
    if let Err(err) = page::install() {
        log::warn!("page behaviors not installed: {err}");
    }
}
