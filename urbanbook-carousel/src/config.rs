//! Carousel configuration
//!
//! [`CarouselOverrides`] carries optional, user-adjustable overrides with
//! accessor methods falling back to [`crate::constants`]. Resolving it
//! yields a validated [`CarouselConfig`], the only form the controller
//! accepts.

use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::constants::{env, pulse, timing};
use crate::error::{ConfigurationError, Result};

/// Optional overrides for carousel timing. Fields are `None` by default,
/// falling back to compiled constants.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselOverrides {
    /// Auto-advance interval (ms)
    pub auto_scroll_interval_ms: Option<u64>,
    /// Duration of each pulse half (ms)
    pub pulse_duration_ms: Option<u64>,
    /// Scale applied while the pulse is expanded
    pub pulse_scale: Option<f32>,
    /// Delay before an outer-copy settle jumps into the middle copy (ms)
    pub loop_correction_delay_ms: Option<u64>,
    /// Grace period after a tap before auto-advance resumes (ms)
    pub interaction_grace_ms: Option<u64>,
    /// Fallback settle deadline for unreported arrivals (ms)
    pub settle_fallback_ms: Option<u64>,
}

impl CarouselOverrides {
    /// No overrides; every accessor yields its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read overrides from `URBANBOOK_CAROUSEL_*` environment variables.
    pub fn from_environment() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through an arbitrary key lookup. Values that fail to
    /// parse are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            auto_scroll_interval_ms: parse_var(
                &lookup,
                env::AUTO_SCROLL_INTERVAL_MS,
            ),
            pulse_duration_ms: parse_var(&lookup, env::PULSE_DURATION_MS),
            pulse_scale: parse_var(&lookup, env::PULSE_SCALE),
            loop_correction_delay_ms: parse_var(
                &lookup,
                env::LOOP_CORRECTION_DELAY_MS,
            ),
            interaction_grace_ms: parse_var(
                &lookup,
                env::INTERACTION_GRACE_MS,
            ),
            settle_fallback_ms: parse_var(&lookup, env::SETTLE_FALLBACK_MS),
        }
    }

    // ========== ACCESSORS ==========

    /// Auto-advance interval (ms).
    pub fn auto_scroll_interval_ms(&self) -> u64 {
        self.auto_scroll_interval_ms
            .unwrap_or(timing::AUTO_SCROLL_INTERVAL_MS)
    }

    /// Duration of each pulse half (ms).
    pub fn pulse_duration_ms(&self) -> u64 {
        self.pulse_duration_ms.unwrap_or(timing::PULSE_DURATION_MS)
    }

    /// Expanded pulse scale.
    pub fn pulse_scale(&self) -> f32 {
        self.pulse_scale.unwrap_or(pulse::EXPANDED_SCALE)
    }

    /// Delay before the silent loop correction (ms).
    pub fn loop_correction_delay_ms(&self) -> u64 {
        self.loop_correction_delay_ms
            .unwrap_or(timing::LOOP_CORRECTION_DELAY_MS)
    }

    /// Hold-off after a tap settles (ms).
    pub fn interaction_grace_ms(&self) -> u64 {
        self.interaction_grace_ms
            .unwrap_or(timing::INTERACTION_GRACE_MS)
    }

    /// Wait for an arrival report before settling anyway (ms).
    pub fn settle_fallback_ms(&self) -> u64 {
        self.settle_fallback_ms.unwrap_or(timing::SETTLE_FALLBACK_MS)
    }

    /// Validate and resolve into a [`CarouselConfig`].
    pub fn resolve(&self) -> Result<CarouselConfig> {
        let interval_ms = self.auto_scroll_interval_ms();
        if interval_ms == 0 {
            return Err(ConfigurationError::ZeroInterval);
        }
        let scale = self.pulse_scale();
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ConfigurationError::InvalidScale(scale));
        }
        Ok(CarouselConfig {
            auto_scroll_interval: Duration::from_millis(interval_ms),
            pulse_duration: Duration::from_millis(self.pulse_duration_ms()),
            pulse_scale: scale,
            loop_correction_delay: Duration::from_millis(
                self.loop_correction_delay_ms(),
            ),
            interaction_grace: Duration::from_millis(
                self.interaction_grace_ms(),
            ),
            settle_fallback: Duration::from_millis(self.settle_fallback_ms()),
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!(
                "[CarouselOverrides] Ignoring unparsable {}='{}'",
                key,
                raw
            );
            None
        }
    }
}

/// Validated carousel timings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselConfig {
    /// Time between auto-advance ticks. Never zero.
    pub auto_scroll_interval: Duration,
    /// Duration of each pulse half.
    pub pulse_duration: Duration,
    /// Scale while the pulse is expanded.
    pub pulse_scale: f32,
    /// Settle-to-jump delay for outer-copy settles.
    pub loop_correction_delay: Duration,
    /// Auto-advance hold-off after a tap arrives.
    pub interaction_grace: Duration,
    /// How long a requested scroll may go unreported.
    pub settle_fallback: Duration,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            auto_scroll_interval: Duration::from_millis(
                timing::AUTO_SCROLL_INTERVAL_MS,
            ),
            pulse_duration: Duration::from_millis(timing::PULSE_DURATION_MS),
            pulse_scale: pulse::EXPANDED_SCALE,
            loop_correction_delay: Duration::from_millis(
                timing::LOOP_CORRECTION_DELAY_MS,
            ),
            interaction_grace: Duration::from_millis(
                timing::INTERACTION_GRACE_MS,
            ),
            settle_fallback: Duration::from_millis(timing::SETTLE_FALLBACK_MS),
        }
    }
}

impl CarouselConfig {
    /// Defaults with a caller-supplied auto-advance interval.
    pub fn with_interval_ms(interval_ms: u64) -> Result<Self> {
        CarouselOverrides {
            auto_scroll_interval_ms: Some(interval_ms),
            ..CarouselOverrides::default()
        }
        .resolve()
    }
}
