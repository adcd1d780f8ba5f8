use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::util::js_error_text;

/// Failures that stop the overlay from being set up at all.
#[derive(Debug, Error)]
pub enum ZoomError {
    #[error("no global `window` exists")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("dom call failed: {0}")]
    Dom(String),
    #[error("zoom config is not valid json: {0}")]
    Config(#[from] serde_json::Error),
    #[error("invalid zoom config: {0}")]
    InvalidConfig(String),
}

impl From<JsValue> for ZoomError {
    fn from(value: JsValue) -> Self {
        ZoomError::Dom(js_error_text(&value))
    }
}
