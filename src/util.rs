// Small helpers shared by the dom layer

use wasm_bindgen::JsValue;

/// Best-effort message for a thrown JS value.
pub fn js_error_text(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
