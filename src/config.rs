//! Page configuration parsed from an optional inline JSON block.
//!
//! The page may embed
//! `<script type="application/json" id="page-behaviors-config">` with any
//! subset of the fields below (camelCase). Missing fields keep their defaults,
//! so an absent block and `{}` are equivalent.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::*;
use crate::error::PageError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    pub spotlight: SpotlightConfig,
    pub equalizer: EqualizerConfig,
    pub lazy_images: LazyImagesConfig,
    pub theme: ThemeConfig,
    pub load_timer: LoadTimerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpotlightConfig {
    pub selector: String,
    pub active_class: String,
    pub dim_class: String,
    pub delay_var: String,
    pub default_delay_ms: u32,
    pub cancel_key: String,
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        Self {
            selector: SPOTLIGHT_SELECTOR.to_owned(),
            active_class: SPOTLIGHT_ACTIVE_CLASS.to_owned(),
            dim_class: SPOTLIGHT_DIM_CLASS.to_owned(),
            delay_var: SPOTLIGHT_DELAY_VAR.to_owned(),
            default_delay_ms: SPOTLIGHT_DEFAULT_DELAY_MS,
            cancel_key: SPOTLIGHT_CANCEL_KEY.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EqualizerConfig {
    pub group_selector: String,
    pub direction_attr: String,
    pub left_selector: String,
    pub right_selector: String,
    pub single_column_query: String,
    pub debounce_ms: u32,
}

impl Default for EqualizerConfig {
    fn default() -> Self {
        Self {
            group_selector: EQUALIZER_GROUP_SELECTOR.to_owned(),
            direction_attr: EQUALIZER_DIRECTION_ATTR.to_owned(),
            left_selector: EQUALIZER_LEFT_SELECTOR.to_owned(),
            right_selector: EQUALIZER_RIGHT_SELECTOR.to_owned(),
            single_column_query: EQUALIZER_SINGLE_COLUMN_QUERY.to_owned(),
            debounce_ms: EQUALIZER_DEBOUNCE_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LazyImagesConfig {
    pub source_attr: String,
    pub root_margin: String,
}

impl Default for LazyImagesConfig {
    fn default() -> Self {
        Self { source_attr: LAZY_SOURCE_ATTR.to_owned(), root_margin: LAZY_ROOT_MARGIN.to_owned() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeConfig {
    pub control_selector: String,
    pub pulse_selector: String,
    pub pulse_class: String,
    pub pulse_ms: u32,
    pub storage_key: String,
    pub root_attr: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            control_selector: THEME_CONTROL_SELECTOR.to_owned(),
            pulse_selector: THEME_PULSE_SELECTOR.to_owned(),
            pulse_class: THEME_PULSE_CLASS.to_owned(),
            pulse_ms: THEME_PULSE_MS,
            storage_key: THEME_STORAGE_KEY.to_owned(),
            root_attr: THEME_ROOT_ATTR.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoadTimerConfig {
    pub enabled: bool,
}

impl Default for LoadTimerConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl PageConfig {
    /// Parse and validate a JSON config block.
    pub fn from_json(raw: &str) -> Result<Self, PageError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the config from an optional block, falling back to defaults.
    ///
    /// A malformed block is logged and ignored rather than disabling the page.
    pub fn from_optional_json(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring page config: {err}");
                Self::default()
            }
        }
    }

    /// Reject values that would make a component silently match nothing.
    pub fn validate(&self) -> Result<(), PageError> {
        let required = [
            ("spotlight.selector", &self.spotlight.selector),
            ("spotlight.activeClass", &self.spotlight.active_class),
            ("spotlight.dimClass", &self.spotlight.dim_class),
            ("equalizer.groupSelector", &self.equalizer.group_selector),
            ("equalizer.leftSelector", &self.equalizer.left_selector),
            ("equalizer.rightSelector", &self.equalizer.right_selector),
            ("lazyImages.sourceAttr", &self.lazy_images.source_attr),
            ("theme.controlSelector", &self.theme.control_selector),
            ("theme.storageKey", &self.theme.storage_key),
            ("theme.rootAttr", &self.theme.root_attr),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(PageError::Config(format!("{name} must not be empty")));
        }
        if self.equalizer.debounce_ms == 0 {
            return Err(PageError::Config("equalizer.debounceMs must be positive".to_owned()));
        }
        let delays = [
            ("spotlight.defaultDelayMs", self.spotlight.default_delay_ms),
            ("equalizer.debounceMs", self.equalizer.debounce_ms),
            ("theme.pulseMs", self.theme.pulse_ms),
        ];
        if let Some((name, _)) = delays.iter().find(|(_, ms)| *ms > MAX_TIMER_DELAY_MS) {
            return Err(PageError::Config(format!("{name} exceeds {MAX_TIMER_DELAY_MS}ms")));
        }
        Ok(())
    }
}
