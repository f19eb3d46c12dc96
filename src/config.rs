use log::{warn, Level};
use serde::Deserialize;
use web_sys::Document;

use crate::error::BehaviorError;

/// Id of the optional JSON block overriding the defaults.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Share of the element that must be inside the viewport.
    pub threshold: f64,
    pub root_margin: String,
    /// Delay before a replayed element is revealed again.
    pub replay_delay_ms: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px".to_string(),
            replay_delay_ms: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub navbar_scroll_threshold: f64,
    pub scroll_top_threshold: f64,
    pub reveal: RevealConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            navbar_scroll_threshold: 50.0,
            scroll_top_threshold: 500.0,
            reveal: RevealConfig::default(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, BehaviorError> {
        let config: SiteConfig = serde_json::from_str(raw)?;
        if !(0.0..=1.0).contains(&config.reveal.threshold) {
            return Err(BehaviorError::InvalidConfig(format!(
                "reveal.threshold must be within 0..=1, got {}",
                config.reveal.threshold
            )));
        }
        Ok(config)
    }

    /// Reads the `#site-config` block, falling back to defaults when it is
    /// missing or malformed.
    pub fn load(document: &Document) -> Self {
        let Some(raw) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|element| element.text_content())
        else {
            return Self::default();
        };

        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring site config: {}", e);
                Self::default()
            }
        }
    }
}
