//! Engine configuration: rules, strategy settings, thresholds, limits.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::types::{Budget, CorrelationRule};

pub const DEFAULT_CORRELATE_MIN: f32 = 0.55;
pub const DEFAULT_BLOCK_MIN: f32 = 0.80;
pub const DEFAULT_TOP_K_PER_SOURCE: i64 = 3;
pub const DEFAULT_MAX_PAIRS_HIGH_COST: i64 = 100;

/// Per-strategy setting. YAML accepts either a bare number (weight
/// shorthand) or a full table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StrategySetting {
    Weight(f32),
    Detailed {
        #[serde(default = "default_weight")]
        weight: f32,
        #[serde(default = "default_enabled")]
        enabled: bool,
        #[serde(default)]
        budget: Option<Budget>,
    },
}

fn default_weight() -> f32 {
    1.0
}

fn default_enabled() -> bool {
    true
}

impl StrategySetting {
    pub fn weight(&self) -> f32 {
        match self {
            Self::Weight(w) => *w,
            Self::Detailed { weight, .. } => *weight,
        }
    }

    pub fn enabled(&self) -> bool {
        match self {
            Self::Weight(_) => true,
            Self::Detailed { enabled, .. } => *enabled,
        }
    }

    pub fn budget(&self) -> Option<Budget> {
        match self {
            Self::Weight(_) => None,
            Self::Detailed { budget, .. } => *budget,
        }
    }

    fn set_weight(&mut self, value: f32) {
        match self {
            Self::Weight(w) => *w = value,
            Self::Detailed { weight, .. } => *weight = value,
        }
    }
}

/// Score thresholds. `correlate_min` gates which edges the escalator
/// considers at all; `block_min` separates hard from soft links.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub correlate_min: f32,
    pub block_min: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { correlate_min: DEFAULT_CORRELATE_MIN, block_min: DEFAULT_BLOCK_MIN }
    }
}

/// Structural cost bounds for the strategy pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub top_k_per_source: i64,
    pub max_pairs_high_cost: i64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            top_k_per_source: DEFAULT_TOP_K_PER_SOURCE,
            max_pairs_high_cost: DEFAULT_MAX_PAIRS_HIGH_COST,
        }
    }
}

impl Limits {
    pub fn top_k(&self) -> usize {
        self.top_k_per_source.max(1) as usize
    }

    pub fn max_pairs(&self) -> usize {
        self.max_pairs_high_cost.max(1) as usize
    }
}

/// Top-level correlation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    pub correlation_rules: Vec<CorrelationRule>,
    pub strategy_weights: BTreeMap<String, StrategySetting>,
    pub thresholds: Thresholds,
    pub limits: Limits,
}

impl CorrelationConfig {
    /// Parse a YAML document and normalize it.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yaml::from_str(text)
            .map_err(|e| ConfigError::ParseError { message: e.to_string() })?;
        config.normalize();
        Ok(config)
    }

    /// Clamp out-of-range values to safe defaults. Never fails; every fix
    /// is logged at warn level.
    pub fn normalize(&mut self) {
        for (name, setting) in &mut self.strategy_weights {
            let w = setting.weight();
            if !w.is_finite() {
                tracing::warn!(strategy = %name, "non-finite strategy weight, using 1.0");
                setting.set_weight(1.0);
            } else if !(0.0..=1.0).contains(&w) {
                let clamped = w.clamp(0.0, 1.0);
                tracing::warn!(strategy = %name, weight = w, "strategy weight out of range, clamping");
                setting.set_weight(clamped);
            }
        }

        let t = &mut self.thresholds;
        if !t.correlate_min.is_finite() || !(0.0..=1.0).contains(&t.correlate_min) {
            tracing::warn!(correlate_min = t.correlate_min, "correlate_min out of range, using default");
            t.correlate_min = DEFAULT_CORRELATE_MIN;
        }
        if !t.block_min.is_finite() || !(0.0..=1.0).contains(&t.block_min) {
            tracing::warn!(block_min = t.block_min, "block_min out of range, using default");
            t.block_min = DEFAULT_BLOCK_MIN;
        }
        if t.correlate_min > t.block_min {
            tracing::warn!(
                correlate_min = t.correlate_min,
                block_min = t.block_min,
                "correlate_min exceeds block_min, restoring defaults"
            );
            t.correlate_min = DEFAULT_CORRELATE_MIN;
            t.block_min = DEFAULT_BLOCK_MIN;
        }

        if self.limits.top_k_per_source < 1 {
            tracing::warn!(top_k = self.limits.top_k_per_source, "top_k_per_source must be >= 1, using default");
            self.limits.top_k_per_source = DEFAULT_TOP_K_PER_SOURCE;
        }
        if self.limits.max_pairs_high_cost < 1 {
            tracing::warn!(
                max_pairs = self.limits.max_pairs_high_cost,
                "max_pairs_high_cost must be >= 1, using default"
            );
            self.limits.max_pairs_high_cost = DEFAULT_MAX_PAIRS_HIGH_COST;
        }
    }

    /// Effective weight for a strategy, 1.0 when unconfigured.
    pub fn strategy_weight(&self, name: &str) -> f32 {
        self.strategy_weights.get(name).map(StrategySetting::weight).unwrap_or(1.0)
    }

    /// Whether a strategy is enabled, with a per-strategy default for
    /// opt-in strategies like `temporal`.
    pub fn strategy_enabled(&self, name: &str, default: bool) -> bool {
        self.strategy_weights.get(name).map(StrategySetting::enabled).unwrap_or(default)
    }

    /// Budget override for a strategy, if configured.
    pub fn strategy_budget(&self, name: &str) -> Option<Budget> {
        self.strategy_weights.get(name).and_then(StrategySetting::budget)
    }
}
