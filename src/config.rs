//! Configuration handling for the site scripts
//!
//! Everything has a default matching the shipped markup. A page can override
//! any subset through a JSON block:
//!
//! ```html
//! <script type="application/json" id="site-config">
//!   { "form": { "fallback_email": "me@example.org" } }
//! </script>
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Id of the markup element holding the JSON overrides
pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// Address offered as a manual fallback when submission fails
pub const DEFAULT_FALLBACK_EMAIL: &str = "hello@example.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid site config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    pub form: FormConfig,
    pub effects: EffectsConfig,
}

impl SiteConfig {
    /// Parse overrides from the markup config block
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(content)?)
    }
}

/// Contact form identifiers and rules
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FormConfig {
    /// Id of the `<form>` element
    pub form_id: String,
    /// Id of the submit button
    pub submit_id: String,
    /// Id of the status container
    pub status_id: String,
    /// Name of the decoy input
    pub honeypot_name: String,
    /// Address shown in the mailto fallback
    pub fallback_email: String,
    /// How long a success status stays visible
    pub success_clear_ms: u64,
    /// Minimum trimmed length of single-line text fields
    pub text_min_length: usize,
    /// Minimum trimmed length of textareas
    pub multiline_min_length: usize,
}

impl FormConfig {
    pub fn success_clear_delay(&self) -> Duration {
        Duration::from_millis(self.success_clear_ms)
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            form_id: "contactForm".to_string(),
            submit_id: "cf-submit".to_string(),
            status_id: "cf-status".to_string(),
            honeypot_name: "_gotcha".to_string(),
            fallback_email: DEFAULT_FALLBACK_EMAIL.to_string(),
            success_clear_ms: 10_000,
            text_min_length: 2,
            multiline_min_length: 10,
        }
    }
}

/// Page effect thresholds and target selectors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EffectsConfig {
    /// Height of the fixed header subtracted from smooth-scroll targets
    pub header_offset: f64,
    /// Scroll offset above which the back-to-top button shows
    pub back_to_top_threshold: f64,
    /// Look-ahead added to the scroll offset when picking the active nav link
    pub nav_offset: f64,
    /// Length of the counter animation
    pub counter_duration_ms: u64,
    /// Visible fraction of the trigger element that starts the counters
    pub counter_visibility_threshold: f64,
    pub smooth_scroll_selector: String,
    pub back_to_top_id: String,
    pub year_selector: String,
    pub progress_bar_id: String,
    pub counter_selector: String,
    /// Element whose visibility starts the counters (falls back to `<body>`)
    pub counter_trigger_selector: String,
    pub reveal_class: String,
    pub revealed_class: String,
    pub lightbox_id: String,
    pub lightbox_image_id: String,
    pub lightbox_caption_id: String,
    pub gallery_item_selector: String,
    pub nav_link_selector: String,
}

impl EffectsConfig {
    pub fn counter_duration(&self) -> Duration {
        Duration::from_millis(self.counter_duration_ms)
    }
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            header_offset: 80.0,
            back_to_top_threshold: 300.0,
            nav_offset: 120.0,
            counter_duration_ms: 1200,
            counter_visibility_threshold: 0.2,
            smooth_scroll_selector: "[data-scroll]".to_string(),
            back_to_top_id: "backToTopBtn".to_string(),
            year_selector: "#currentYear".to_string(),
            progress_bar_id: "scrollProgressBar".to_string(),
            counter_selector: ".fun-counter".to_string(),
            counter_trigger_selector: "#home".to_string(),
            reveal_class: "shimmer-on-load".to_string(),
            revealed_class: "shimmer-on-load-loaded".to_string(),
            lightbox_id: "galleryLightbox".to_string(),
            lightbox_image_id: "galleryLightboxImage".to_string(),
            lightbox_caption_id: "galleryLightboxCaption".to_string(),
            gallery_item_selector: ".gallery-item-btn".to_string(),
            nav_link_selector: "header .nav-link[href^=\"#\"]".to_string(),
        }
    }
}
