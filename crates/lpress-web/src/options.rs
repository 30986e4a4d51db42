#![forbid(unsafe_code)]

//! Host-facing options.
//!
//! Mirrors the option names a JS caller passes (`holdDurationMs`, ...).
//! Every field is optional; [`LongPressOptions::into_config`] fills the
//! defaults and validates the result.

use lpress_core::config::{ConfigError, LongPressConfig};
use web_time::Duration;

/// Optional overrides for [`LongPressConfig`], in host units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "input-parser",
    derive(serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct LongPressOptions {
    pub hold_duration_ms: Option<u64>,
    pub movement_threshold_px: Option<f64>,
    pub vertical_threshold_multiplier: Option<f64>,
    pub velocity_threshold_px_per_ms: Option<f64>,
    pub commit_delay_ms: Option<u64>,
    pub scroll_reset_delay_ms: Option<u64>,
}

impl LongPressOptions {
    /// Resolve to a validated config; unset fields take their defaults.
    pub fn into_config(self) -> Result<LongPressConfig, ConfigError> {
        let mut config = LongPressConfig::default();
        if let Some(ms) = self.hold_duration_ms {
            config = config.with_hold_duration(Duration::from_millis(ms));
        }
        if let Some(px) = self.movement_threshold_px {
            config = config.with_movement_threshold_px(px);
        }
        if let Some(multiplier) = self.vertical_threshold_multiplier {
            config = config.with_vertical_threshold_multiplier(multiplier);
        }
        if let Some(velocity) = self.velocity_threshold_px_per_ms {
            config = config.with_velocity_threshold_px_per_ms(velocity);
        }
        if let Some(ms) = self.commit_delay_ms {
            config = config.with_commit_delay(Duration::from_millis(ms));
        }
        if let Some(ms) = self.scroll_reset_delay_ms {
            config = config.with_scroll_reset_delay(Duration::from_millis(ms));
        }
        config.validate()?;
        Ok(config)
    }
}
