// libwlc-rs/libwlc/src/config.rs
//! Timing knobs of the charging loop.
//!
//! Defaults reproduce the values used by the poller firmware. Everything
//! the listener negotiates (T_CAP_WT, T_WPT, ...) comes from the WLC
//! records instead and is not configured here.

use std::time::Duration;

/// Loop configuration shared by the state machine and the watchdog.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WlcConfig {
    /// Delay before the first capability read after a session starts
    pub initial_delay_ms: u64,
    /// Delay after entering negotiation (capability read -> setup -> info)
    pub setup_delay_ms: u64,
    /// Delay between back-to-back states
    pub step_delay_ms: u64,
    /// Backoff before re-reading a WLCCTL with a repeated counter
    pub duplicate_retry_backoff_ms: u64,
    /// Repeated counters tolerated before the session is dropped
    pub max_duplicate_retries: u8,
    /// T_WPT above which the tag link switches to its own presence check
    pub extended_presence_threshold_ms: u64,
    /// Presence-check period used in that case
    pub extended_presence_period_ms: u64,
    /// Power-adjust calibration used when nothing is persisted (100 = 1.00)
    pub default_calibration_percent: u8,
}

impl Default for WlcConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 50,
            setup_delay_ms: 5,
            step_delay_ms: 1,
            duplicate_retry_backoff_ms: 30,
            max_duplicate_retries: 3,
            extended_presence_threshold_ms: 4000,
            extended_presence_period_ms: 200,
            default_calibration_percent: 100,
        }
    }
}

impl WlcConfig {
    /// Set the delay before the first capability read.
    pub fn with_initial_delay_ms(mut self, ms: u64) -> Self {
        self.initial_delay_ms = ms;
        self
    }

    /// Set the repeated-counter budget and its backoff.
    pub fn with_duplicate_retries(mut self, retries: u8, backoff_ms: u64) -> Self {
        self.max_duplicate_retries = retries;
        self.duplicate_retry_backoff_ms = backoff_ms;
        self
    }

    /// Set when and how often the tag link checks presence itself.
    pub fn with_extended_presence(mut self, threshold_ms: u64, period_ms: u64) -> Self {
        self.extended_presence_threshold_ms = threshold_ms;
        self.extended_presence_period_ms = period_ms;
        self
    }

    /// Set the calibration used when none is persisted.
    pub fn with_default_calibration_percent(mut self, percent: u8) -> Self {
        self.default_calibration_percent = percent;
        self
    }

    /// `initial_delay_ms` as a `Duration`
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }
}
