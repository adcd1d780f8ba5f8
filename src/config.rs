use serde::Deserialize;
use web_sys::Document;

use crate::error::ZoomError;

pub const DOUBLE_TAP_DELAY_MS: f64 = 300.0;
pub const WHEEL_SENSITIVITY: f64 = 0.001;
pub const SMOOTHING: f64 = 0.15;
pub const SETTLE_EPSILON: f64 = 0.001;
pub const CLEAR_DELAY_MS: u32 = 200;

/// Id of the optional `<script type="application/json">` block holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "zoom-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub overlay_id: String,
    pub image_id: String,
    pub active_class: String,
    pub container_selector: String,
    pub image_selector: String,
    pub cursor: String,
    pub double_tap_ms: f64,
    pub wheel_sensitivity: f64,
    pub smoothing: f64,
    pub settle_epsilon: f64,
    pub clear_delay_ms: u32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            overlay_id: "zoom-overlay".to_string(),
            image_id: "zoom-img".to_string(),
            active_class: "active".to_string(),
            container_selector: ".zoomable".to_string(),
            image_selector: "img[data-zoomable]".to_string(),
            cursor: "zoom-in".to_string(),
            double_tap_ms: DOUBLE_TAP_DELAY_MS,
            wheel_sensitivity: WHEEL_SENSITIVITY,
            smoothing: SMOOTHING,
            settle_epsilon: SETTLE_EPSILON,
            clear_delay_ms: CLEAR_DELAY_MS,
        }
    }
}

impl ZoomConfig {
    pub fn from_json(text: &str) -> Result<Self, ZoomError> {
        let config: ZoomConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `#zoom-config` if the page has one, defaults otherwise.
    pub fn from_document(document: &Document) -> Result<Self, ZoomError> {
        let text = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
            .filter(|t| !t.trim().is_empty());
        match text {
            Some(text) => {
                log::debug!("zoom config: loading overrides from #{}", CONFIG_ELEMENT_ID);
                Self::from_json(&text)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ZoomError> {
        let named = [
            ("overlay_id", &self.overlay_id),
            ("image_id", &self.image_id),
            ("active_class", &self.active_class),
            ("container_selector", &self.container_selector),
            ("image_selector", &self.image_selector),
        ];
        for (name, value) in named {
            if value.trim().is_empty() {
                return Err(ZoomError::InvalidConfig(format!("{name} must not be empty")));
            }
        }
        if self.overlay_id == self.image_id {
            return Err(ZoomError::InvalidConfig(
                "overlay_id and image_id must differ".to_string(),
            ));
        }
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(ZoomError::InvalidConfig(format!(
                "smoothing must be in (0, 1], got {}",
                self.smoothing
            )));
        }
        if !(self.double_tap_ms > 0.0) {
            return Err(ZoomError::InvalidConfig(format!(
                "double_tap_ms must be positive, got {}",
                self.double_tap_ms
            )));
        }
        if !(self.wheel_sensitivity >= 0.0) {
            return Err(ZoomError::InvalidConfig(format!(
                "wheel_sensitivity must not be negative, got {}",
                self.wheel_sensitivity
            )));
        }
        if !(self.settle_epsilon > 0.0) {
            return Err(ZoomError::InvalidConfig(format!(
                "settle_epsilon must be positive, got {}",
                self.settle_epsilon
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ZoomConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.double_tap_ms, 300.0);
        assert_eq!(config.smoothing, 0.15);
        assert_eq!(config.clear_delay_ms, 200);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ZoomConfig::from_json(r#"{ "container_selector": ".gallery", "clear_delay_ms": 250 }"#)
            .unwrap();
        assert_eq!(config.container_selector, ".gallery");
        assert_eq!(config.clear_delay_ms, 250);
        assert_eq!(config.overlay_id, "zoom-overlay");
        assert_eq!(config.wheel_sensitivity, 0.001);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = ZoomConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ZoomError::Config(_)));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for text in [
            r#"{ "smoothing": 0.0 }"#,
            r#"{ "smoothing": 1.5 }"#,
            r#"{ "double_tap_ms": 0 }"#,
            r#"{ "wheel_sensitivity": -0.1 }"#,
            r#"{ "settle_epsilon": 0 }"#,
            r#"{ "overlay_id": "  " }"#,
            r#"{ "image_id": "zoom-overlay" }"#,
        ] {
            let err = ZoomConfig::from_json(text).unwrap_err();
            assert!(matches!(err, ZoomError::InvalidConfig(_)), "{text}");
        }
    }
}
