//! Stage configuration
//!
//! Every timing constant of the page is configurable; the defaults are the
//! values the page has always used.

use crate::engine::{OverlapPolicy, DEFAULT_DURATION_MS};
use crate::error::{ShowcaseError, ShowcaseResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Timing constants, all in virtual milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Interval between rainbow color steps
    pub rainbow_tick_ms: u64,
    /// Lifetime of a class effect before its class is removed
    pub class_effect_ms: u64,
    /// Delay between a completed request and its single repeat
    pub repeat_delay_ms: u64,
    /// Delay before a color/counter pulse scales back
    pub pulse_reset_ms: u64,
    /// Delay before the result toast fades in
    pub toast_fade_ms: u64,
    /// How long the loading spinner shows while the modal opens
    pub modal_loading_ms: u64,
    /// Duration of the effect applied when the animated box is clicked
    pub box_click_duration_ms: u64,
    /// Duration used when a request does not name one
    pub default_duration_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            rainbow_tick_ms: 200,
            class_effect_ms: 1000,
            repeat_delay_ms: 500,
            pulse_reset_ms: 200,
            toast_fade_ms: 50,
            modal_loading_ms: 1000,
            box_click_duration_ms: 1500,
            default_duration_ms: DEFAULT_DURATION_MS,
        }
    }
}

/// Entries kept per session log (messages, dispatches, completions, DOM events)
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// Configuration for a [`crate::stage::Stage`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    /// Seed for palette draws and random effect picks
    pub seed: u64,
    /// Handling of overlapping requests on one target
    pub overlap_policy: OverlapPolicy,
    /// Timing constants
    pub timing: TimingConfig,
    /// Newest entries kept in each session log; older ones are dropped
    pub history_limit: usize,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            overlap_policy: OverlapPolicy::default(),
            timing: TimingConfig::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl ShowcaseConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set overlap policy
    #[must_use]
    pub const fn with_overlap_policy(mut self, policy: OverlapPolicy) -> Self {
        self.overlap_policy = policy;
        self
    }

    /// Set timing constants
    #[must_use]
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Set log retention
    #[must_use]
    pub const fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Loads a configuration file; `.json` is read as JSON, `.yaml`/`.yml`
    /// as YAML.
    pub fn load(path: &Path) -> ShowcaseResult<Self> {
        let text = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&text),
            Some("yaml" | "yml") => Self::from_yaml(&text),
            other => Err(ShowcaseError::config(format!(
                "unsupported config extension {:?} for {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }

    /// Parses JSON
    pub fn from_json(text: &str) -> ShowcaseResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parses YAML
    pub fn from_yaml(text: &str) -> ShowcaseResult<Self> {
        Ok(serde_yaml_ng::from_str(text)?)
    }

    /// Renders as YAML
    pub fn to_yaml(&self) -> ShowcaseResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}
