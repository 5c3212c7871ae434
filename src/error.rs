//! Error type shared by the component adapters.
//!
//! Pure cores never fail; errors only arise at the browser boundary
//! (storage, DOM calls) and while loading configuration.

/// Errors raised while wiring or running page behaviors.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The preference store is unavailable or rejected an operation.
    #[error("preference store failed: {0}")]
    Storage(String),

    /// A DOM call threw.
    #[error("dom call failed: {0}")]
    Dom(String),

    /// An element the component needs is not in the document.
    #[error("missing element: {selector}")]
    MissingElement { selector: String },

    /// The inline configuration block could not be parsed or is invalid.
    #[error("config invalid: {0}")]
    Config(String),
}

impl From<serde_json::Error> for PageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(feature = "hydrate")]
impl From<wasm_bindgen::JsValue> for PageError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(format!("{value:?}"))
    }
}
