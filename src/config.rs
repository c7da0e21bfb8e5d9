//! Page-level configuration: default constants plus an optional JSON override
//! supplied by the host page.

use log::warn;
use serde::Deserialize;

// Timeline behavior
pub const RESIZE_DEBOUNCE_MS: u32 = 120;
pub const SCROLL_DEBOUNCE_MS: u32 = 40;
pub const EDGE_TOLERANCE_PX: f64 = 2.0;
pub const DEFAULT_GAP_PX: f64 = 32.0;
pub const FALLBACK_STEP_PX: f64 = 352.0;

// Visibility thresholds (fraction of the element in view)
pub const REVEAL_THRESHOLD: f64 = 0.3;
pub const COUNTER_THRESHOLD: f64 = 0.5;

// Counters
pub const COUNTER_DURATION_MS: f64 = 2000.0;

// Direction sync
pub const LANG_POLL_MS: u32 = 1000;
pub const RTL_LANGUAGES: [&str; 4] = ["ar", "he", "fa", "ur"];
pub const RTL_BODY_CLASS: &str = "rtl-active";

/// Id of the `<script type="application/json">` element holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "page-enhancer-config";

/// CSS selectors for every element the enhancer looks up.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub timeline: String,
    pub left_button: String,
    pub right_button: String,
    pub card: String,
    pub indicators: String,
    pub reveal: String,
    pub stat: String,
    pub lang_toggle: String,
    pub lang_dropdown: String,
    pub contact_form: String,
    pub contact_modal: String,
    pub confirmation_modal: String,
    pub carousel_track: String,
    pub carousel_slide: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            timeline: ".timeline".into(),
            left_button: ".left-btn".into(),
            right_button: ".right-btn".into(),
            card: ".cards-section".into(),
            indicators: ".timeline-indicators".into(),
            reveal: ".cards-section".into(),
            stat: ".stat-number".into(),
            lang_toggle: ".lang-toggle".into(),
            lang_dropdown: ".lang-dropdown".into(),
            contact_form: "#contactForm".into(),
            contact_modal: "#contactModal".into(),
            confirmation_modal: "#confirmationModal".into(),
            carousel_track: ".carousel-inner".into(),
            carousel_slide: ".carousel-item".into(),
        }
    }
}

/// Timing and geometry knobs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub resize_debounce_ms: u32,
    pub scroll_debounce_ms: u32,
    pub edge_tolerance_px: f64,
    pub default_gap_px: f64,
    pub fallback_step_px: f64,
    pub reveal_threshold: f64,
    pub counter_threshold: f64,
    pub counter_duration_ms: f64,
    pub lang_poll_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            scroll_debounce_ms: SCROLL_DEBOUNCE_MS,
            edge_tolerance_px: EDGE_TOLERANCE_PX,
            default_gap_px: DEFAULT_GAP_PX,
            fallback_step_px: FALLBACK_STEP_PX,
            reveal_threshold: REVEAL_THRESHOLD,
            counter_threshold: COUNTER_THRESHOLD,
            counter_duration_ms: COUNTER_DURATION_MS,
            lang_poll_ms: LANG_POLL_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub selectors: Selectors,
    pub timings: Timings,
}

impl PageConfig {
    /// Parse a JSON override document. Missing fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Read overrides from the host page, falling back to defaults when the
    /// config element is absent or malformed.
    pub fn from_document(document: &web_sys::Document) -> Self {
        let Some(raw) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return Self::default();
        };

        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed #{}: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = PageConfig::from_json(
            r##"{ "selectors": { "timeline": "#journey" }, "timings": { "lang_poll_ms": 250 } }"##,
        )
        .unwrap();

        assert_eq!(config.selectors.timeline, "#journey");
        assert_eq!(config.selectors.card, ".cards-section");
        assert_eq!(config.timings.lang_poll_ms, 250);
        assert_eq!(config.timings.resize_debounce_ms, RESIZE_DEBOUNCE_MS);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(PageConfig::from_json("{}").unwrap(), PageConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(PageConfig::from_json("{ selectors: ").is_err());
    }
}
