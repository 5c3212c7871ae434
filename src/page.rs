//! Page bootstrap: load configuration and install every component.
//!
//! Components are independent. A component whose markup is absent (no
//! candidates, no layout groups, no deferred images) is skipped and logged;
//! the rest still install.

use web_sys::Document;

use crate::config::PageConfig;
use crate::consts::CONFIG_ELEMENT_ID;
use crate::error::PageError;
use crate::{dom, equalizer, lazy_images, load_timer, spotlight, theme};

fn read_config(document: &Document) -> PageConfig {
    let raw = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content());
    PageConfig::from_optional_json(raw.as_deref())
}

fn report<T: std::fmt::Debug>(component: &str, result: Result<T, PageError>) {
    match result {
        Ok(value) => log::debug!("{component}: installed ({value:?})"),
        Err(PageError::MissingElement { selector }) => {
            log::debug!("{component}: skipped, no {selector}");
        }
        Err(err) => log::warn!("{component}: not installed: {err}"),
    }
}

/// Install every component on the current document.
pub fn install() -> Result<(), PageError> {
    let window = dom::window()?;
    let document = dom::document(&window)?;
    let config = read_config(&document);

    report("theme", theme::install(&window, &document, &config.theme));
    report("spotlight", spotlight::install(&window, &document, &config.spotlight));
    report("lazy images", lazy_images::install(&window, &document, &config.lazy_images));
    report("equalizer", equalizer::install(&window, &document, &config.equalizer));
    if config.load_timer.enabled {
        load_timer::install(&window, &document);
    }
    Ok(())
}
