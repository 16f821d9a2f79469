use std::time::Duration;

use anyhow::Context;
use email_delivery::EmailJsConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scroll_threshold_px: f64,
    pub scroll_debounce_ms: u64,
    pub header_offset_px: f64,
    pub progress_stagger_ms: u64,
    pub toast_enter_delay_ms: u64,
    pub toast_display_ms: u64,
    pub toast_exit_ms: u64,
    pub focus_delay_ms: u64,
    pub email: EmailJsConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scroll_threshold_px: 20.0,
            scroll_debounce_ms: 10,
            header_offset_px: 80.0,
            progress_stagger_ms: 100,
            toast_enter_delay_ms: 100,
            toast_display_ms: 4000,
            toast_exit_ms: 300,
            focus_delay_ms: 500,
            email: EmailJsConfig::default(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let settings: Settings = toml::from_str(raw).context("failed to parse page settings")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.scroll_threshold_px.is_finite() && self.scroll_threshold_px >= 0.0,
            "scroll_threshold_px must be a non-negative number"
        );
        anyhow::ensure!(
            self.header_offset_px.is_finite(),
            "header_offset_px must be a finite number"
        );
        anyhow::ensure!(self.toast_display_ms > 0, "toast_display_ms must be positive");
        anyhow::ensure!(self.email.timeout_ms > 0, "email.timeout_ms must be positive");
        Ok(())
    }

    pub fn scroll_debounce(&self) -> Duration {
        Duration::from_millis(self.scroll_debounce_ms)
    }

    pub fn progress_stagger(&self) -> Duration {
        Duration::from_millis(self.progress_stagger_ms)
    }

    pub fn toast_enter_delay(&self) -> Duration {
        Duration::from_millis(self.toast_enter_delay_ms)
    }

    pub fn toast_display(&self) -> Duration {
        Duration::from_millis(self.toast_display_ms)
    }

    pub fn toast_exit(&self) -> Duration {
        Duration::from_millis(self.toast_exit_ms)
    }

    /// Deadline after which an unanswered send is treated as failed.
    pub fn delivery_timeout(&self) -> Duration {
        self.email.timeout()
    }

    pub fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }
}
