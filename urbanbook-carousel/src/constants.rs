//! Carousel constants
//!
//! Compiled defaults for carousel timing and feel. Tuning should happen
//! here so every carousel updates consistently; per-instance changes go
//! through [`crate::config::CarouselOverrides`].

/// Timing defaults for auto-advance and the delayed continuations.
pub mod timing {
    /// Default auto-advance interval (ms).
    pub const AUTO_SCROLL_INTERVAL_MS: u64 = 3000;
    /// Duration of each half of the settle pulse (scale up, then down) (ms).
    pub const PULSE_DURATION_MS: u64 = 200;
    /// Delay between a settle in an outer copy and the silent jump back
    /// into the middle copy (ms).
    pub const LOOP_CORRECTION_DELAY_MS: u64 = 200;
    /// Grace period after a tap settles before auto-advance may resume (ms).
    pub const INTERACTION_GRACE_MS: u64 = 1000;
    /// If the viewport has not reported arrival at a requested slide after
    /// this long, the controller settles there itself (ms).
    pub const SETTLE_FALLBACK_MS: u64 = 600;
}

/// Settle pulse scale factors.
pub mod pulse {
    /// Scale applied while the pulse is expanded.
    pub const EXPANDED_SCALE: f32 = 1.05;
    /// Resting scale.
    pub const REST_SCALE: f32 = 1.0;
}

/// Layout of the tripled sequence.
pub mod layout {
    /// Head copy, middle copy, tail copy.
    pub const COPIES: usize = 3;
}

/// Environment variables read by `CarouselOverrides::from_environment`.
pub mod env {
    /// Overrides `timing::AUTO_SCROLL_INTERVAL_MS`.
    pub const AUTO_SCROLL_INTERVAL_MS: &str =
        "URBANBOOK_CAROUSEL_INTERVAL_MS";
    /// Overrides `timing::PULSE_DURATION_MS`.
    pub const PULSE_DURATION_MS: &str = "URBANBOOK_CAROUSEL_PULSE_MS";
    /// Overrides `pulse::EXPANDED_SCALE`.
    pub const PULSE_SCALE: &str = "URBANBOOK_CAROUSEL_PULSE_SCALE";
    /// Overrides `timing::LOOP_CORRECTION_DELAY_MS`.
    pub const LOOP_CORRECTION_DELAY_MS: &str =
        "URBANBOOK_CAROUSEL_CORRECTION_MS";
    /// Overrides `timing::INTERACTION_GRACE_MS`.
    pub const INTERACTION_GRACE_MS: &str = "URBANBOOK_CAROUSEL_GRACE_MS";
    /// Overrides `timing::SETTLE_FALLBACK_MS`.
    pub const SETTLE_FALLBACK_MS: &str = "URBANBOOK_CAROUSEL_SETTLE_MS";
}
