//! Default markup contract and timing constants shared by every component.
//!
//! Each value here is only a default; `config::PageConfig` can override it.

// ── Timers ──────────────────────────────────────────────────────

/// Longest delay a browser timeout honours (`setTimeout` takes a signed
/// 32-bit value; larger delays wrap and fire immediately).
pub const MAX_TIMER_DELAY_MS: u32 = 2_147_483_647;

// ── Spotlight ───────────────────────────────────────────────────

/// Class that marks an element as a spotlight candidate.
pub const SPOTLIGHT_SELECTOR: &str = ".spotlight";

/// Class placed on the single active candidate.
pub const SPOTLIGHT_ACTIVE_CLASS: &str = "is-spotlit";

/// Class placed on `<body>` while a candidate is spotlit.
pub const SPOTLIGHT_DIM_CLASS: &str = "is-dimmed";

/// Custom property on the root element that overrides the reveal delay.
pub const SPOTLIGHT_DELAY_VAR: &str = "--spotlight-delay";

/// Reveal delay used when the custom property is absent or unparseable.
pub const SPOTLIGHT_DEFAULT_DELAY_MS: u32 = 3400;

/// `KeyboardEvent.key` that clears every spotlight.
pub const SPOTLIGHT_CANCEL_KEY: &str = "Escape";

// ── Column equalizer ────────────────────────────────────────────

pub const EQUALIZER_GROUP_SELECTOR: &str = ".col-pair";
pub const EQUALIZER_DIRECTION_ATTR: &str = "data-measure";
pub const EQUALIZER_LEFT_SELECTOR: &str = ".col-left";
pub const EQUALIZER_RIGHT_SELECTOR: &str = ".col-right";

/// Breakpoint below which a group collapses to a single column.
pub const EQUALIZER_SINGLE_COLUMN_QUERY: &str = "(max-width: 48em)";

/// Resize bursts shorter than this collapse into one recomputation.
pub const EQUALIZER_DEBOUNCE_MS: u32 = 120;

// ── Lazy images ─────────────────────────────────────────────────

pub const LAZY_SOURCE_ATTR: &str = "data-src";
pub const LAZY_ROOT_MARGIN: &str = "0px";

// ── Theme ───────────────────────────────────────────────────────

pub const THEME_CONTROL_SELECTOR: &str = "#theme-toggle";
pub const THEME_PULSE_SELECTOR: &str = ".theme-toggle__pulse";
pub const THEME_PULSE_CLASS: &str = "is-pulsing";
pub const THEME_PULSE_MS: u32 = 600;
pub const THEME_STORAGE_KEY: &str = "theme";
pub const THEME_ROOT_ATTR: &str = "data-theme";

/// Attribute on the toggle control reflecting dark mode.
pub const THEME_PRESSED_ATTR: &str = "aria-pressed";

pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";
pub const PREFERS_REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

// ── Config ──────────────────────────────────────────────────────

/// Id of the optional inline JSON block holding a `PageConfig`.
pub const CONFIG_ELEMENT_ID: &str = "page-behaviors-config";
