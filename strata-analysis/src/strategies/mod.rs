//! Correlation strategy pipeline.
//!
//! Each strategy is an independent heuristic emitting weighted signals for
//! artifact pairs. Cheap (low-budget) strategies run over the full
//! type-filtered cross product; medium and high budgets run only on the
//! candidate set pruned from low-budget results, which bounds the cost of
//! expensive heuristics structurally.

pub mod candidates;
pub mod dependency;
pub mod entity;
pub mod infrastructure;
pub mod operation;
pub mod temporal;

use strata_core::config::CorrelationConfig;
use strata_core::types::collections::FxHashSet;
use strata_core::types::{pair_key, Budget, DriftArtifact, Signal};

pub use dependency::DependencyStrategy;
pub use entity::EntityStrategy;
pub use infrastructure::InfrastructureStrategy;
pub use operation::OperationStrategy;
pub use temporal::TemporalStrategy;

/// Read-only inputs shared by every strategy in one pipeline phase.
pub struct StrategyContext<'a> {
    pub artifacts: &'a [DriftArtifact],
    pub config: &'a CorrelationConfig,
    /// Pairs claimed by explicit or ignore rules; never reconsidered.
    pub processed: &'a FxHashSet<String>,
    /// Pruned candidate set; `None` during the low-budget phase.
    pub candidates: Option<&'a FxHashSet<String>>,
}

impl StrategyContext<'_> {
    /// Whether a strategy may emit a signal for this pair.
    pub fn pair_allowed(&self, a: &str, b: &str) -> bool {
        let key = pair_key(a, b);
        if self.processed.contains(&key) {
            return false;
        }
        match self.candidates {
            Some(candidates) => candidates.contains(&key),
            None => true,
        }
    }
}

/// One correlation heuristic.
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn budget(&self) -> Budget {
        Budget::Low
    }

    /// Opt-in strategies return false and only run when enabled in config.
    fn enabled_by_default(&self) -> bool {
        true
    }

    fn run(&self, ctx: &StrategyContext) -> Vec<Signal>;
}

/// Signals produced by one strategy, tagged with its effective weight.
pub struct StrategyRun {
    pub strategy: &'static str,
    pub weight: f32,
    pub signals: Vec<Signal>,
}

/// The fixed strategy set in execution order.
pub struct StrategyPipeline {
    strategies: Vec<Box<dyn Strategy>>,
}

impl Default for StrategyPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl StrategyPipeline {
    pub fn new() -> Self {
        Self {
            strategies: vec![
                Box::new(EntityStrategy),
                Box::new(OperationStrategy),
                Box::new(InfrastructureStrategy),
                Box::new(DependencyStrategy),
                Box::new(TemporalStrategy),
            ],
        }
    }

    /// Run both phases and return every strategy's signals.
    ///
    /// `rule_pairs` (non-ignore rule references) are always part of the
    /// candidate set handed to expensive strategies.
    pub fn run(
        &self,
        artifacts: &[DriftArtifact],
        config: &CorrelationConfig,
        processed: &FxHashSet<String>,
        rule_pairs: &FxHashSet<String>,
    ) -> Vec<StrategyRun> {
        let mut runs = Vec::new();

        let low_ctx = StrategyContext { artifacts, config, processed, candidates: None };
        for strategy in self.enabled(config, Budget::Low) {
            let signals = strategy.run(&low_ctx);
            tracing::debug!(strategy = strategy.name(), signals = signals.len(), "low-budget strategy done");
            runs.push(StrategyRun {
                strategy: strategy.name(),
                weight: config.strategy_weight(strategy.name()),
                signals,
            });
        }

        let candidate_pairs = candidates::select(&runs, rule_pairs, config);
        tracing::debug!(candidates = candidate_pairs.len(), "candidate set selected");

        let pruned_ctx =
            StrategyContext { artifacts, config, processed, candidates: Some(&candidate_pairs) };
        for budget in [Budget::Medium, Budget::High] {
            for strategy in self.enabled(config, budget) {
                let signals = strategy.run(&pruned_ctx);
                tracing::debug!(
                    strategy = strategy.name(),
                    budget = budget.name(),
                    signals = signals.len(),
                    "pruned strategy done"
                );
                runs.push(StrategyRun {
                    strategy: strategy.name(),
                    weight: config.strategy_weight(strategy.name()),
                    signals,
                });
            }
        }

        runs
    }

    /// Enabled strategies whose effective budget (config override wins)
    /// matches `budget`.
    fn enabled<'a>(
        &'a self,
        config: &'a CorrelationConfig,
        budget: Budget,
    ) -> impl Iterator<Item = &'a dyn Strategy> {
        self.strategies
            .iter()
            .map(|s| s.as_ref())
            .filter(move |s| config.strategy_enabled(s.name(), s.enabled_by_default()))
            .filter(move |s| config.strategy_budget(s.name()).unwrap_or(s.budget()) == budget)
    }
}
