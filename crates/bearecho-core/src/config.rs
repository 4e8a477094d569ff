//! Landing page configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    engine::{AUTO_START_DELAY, AnimationOptions, LOOP_HOLD},
    error::{CoreError, Result},
    session::SEARCH_STUB_DELAY,
    speed::TickInterval,
};

/// Main configuration structure for the landing page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandingConfig {
    /// Page chrome.
    #[serde(default)]
    pub page: PageConfig,

    /// Typing animation settings.
    #[serde(default)]
    pub animation: AnimationConfig,

    /// Search box settings.
    #[serde(default)]
    pub search: SearchConfig,
}

/// Page-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Document title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Logo image source.
    #[serde(default = "default_logo_src")]
    pub logo_src: String,

    /// Logo alt text.
    #[serde(default = "default_logo_alt")]
    pub logo_alt: String,

    /// Whether to render the animation control panel.
    #[serde(default = "default_true")]
    pub show_controls: bool,
}

/// Typing animation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Text typed into the search box.
    #[serde(default = "default_target_text")]
    pub target_text: String,

    /// Tick interval in milliseconds.
    #[serde(default = "default_speed_ms")]
    pub speed_ms: u32,

    /// Start without user interaction.
    #[serde(default = "default_true")]
    pub auto_start: bool,

    /// Delay before the automatic start.
    #[serde(default = "default_auto_start_delay_ms")]
    pub auto_start_delay_ms: u64,

    /// Start over after the full text was shown.
    #[serde(default = "default_true", rename = "loop")]
    pub loop_enabled: bool,

    /// How long the full text stays before starting over.
    #[serde(default = "default_loop_hold_ms")]
    pub loop_hold_ms: u64,

    /// Arm auto-start again when the target text changes.
    #[serde(default)]
    pub rearm_auto_start_on_text_change: bool,
}

/// Search box settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Duration of the stubbed search request.
    #[serde(default = "default_stub_delay_ms")]
    pub stub_delay_ms: u64,

    /// Label of the search button.
    #[serde(default = "default_button_label")]
    pub button_label: String,

    /// Label of the search button while a search runs.
    #[serde(default = "default_busy_label")]
    pub busy_label: String,
}

// Default value functions
fn default_title() -> String {
    "BearEcho".to_string()
}

fn default_logo_src() -> String {
    "/logo.png".to_string()
}

fn default_logo_alt() -> String {
    "Logo".to_string()
}

fn default_true() -> bool {
    true
}

fn default_target_text() -> String {
    "bearecho.com".to_string()
}

fn default_speed_ms() -> u32 {
    100
}

fn default_auto_start_delay_ms() -> u64 {
    AUTO_START_DELAY.as_millis() as u64
}

fn default_loop_hold_ms() -> u64 {
    LOOP_HOLD.as_millis() as u64
}

fn default_stub_delay_ms() -> u64 {
    SEARCH_STUB_DELAY.as_millis() as u64
}

fn default_button_label() -> String {
    "Search".to_string()
}

fn default_busy_label() -> String {
    "Searching...".to_string()
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            logo_src: default_logo_src(),
            logo_alt: default_logo_alt(),
            show_controls: true,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            target_text: default_target_text(),
            speed_ms: default_speed_ms(),
            auto_start: true,
            auto_start_delay_ms: default_auto_start_delay_ms(),
            loop_enabled: true,
            loop_hold_ms: default_loop_hold_ms(),
            rearm_auto_start_on_text_change: false,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            stub_delay_ms: default_stub_delay_ms(),
            button_label: default_button_label(),
            busy_label: default_busy_label(),
        }
    }
}

impl AnimationConfig {
    /// Tick interval, rejecting zero.
    pub fn speed(&self) -> Result<TickInterval> {
        TickInterval::from_millis(self.speed_ms)
    }

    /// Engine options for this configuration.
    pub fn options(&self) -> Result<AnimationOptions> {
        Ok(AnimationOptions {
            speed: self.speed()?,
            auto_start: self.auto_start,
            auto_start_delay: Duration::from_millis(self.auto_start_delay_ms),
            loop_enabled: self.loop_enabled,
            loop_hold: Duration::from_millis(self.loop_hold_ms),
            rearm_auto_start_on_text_change: self.rearm_auto_start_on_text_change,
        })
    }
}

impl SearchConfig {
    pub fn stub_delay(&self) -> Duration {
        Duration::from_millis(self.stub_delay_ms)
    }
}

impl LandingConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: LandingConfig = toml::from_str(content)
            .map_err(|e| CoreError::config_with_source("Failed to parse landing config", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.page.title.trim().is_empty() {
            return Err(CoreError::config("page.title cannot be empty"));
        }

        if self.animation.speed_ms == 0 {
            return Err(CoreError::config("animation.speed_ms must be greater than zero"));
        }

        if self.animation.target_text.trim().is_empty() {
            tracing::warn!("animation.target_text is blank, the typing animation will never run");
        }

        Ok(())
    }
}
