use serde::Deserialize;
use serde::Serialize;

/// knobs for real-time subgame resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// streets explored past the current one before leaves are valued
    pub depth_limit: usize,
    /// iterations run even after the budget has elapsed
    pub min_iterations: usize,
    /// iterations after which the solve counts as converged
    pub max_iterations: usize,
    pub budget_ms: u64,
    /// answer with the blueprint instead of failing
    pub fallback_to_blueprint: bool,
    /// subgames larger than this fail to build
    pub max_nodes: usize,
    pub seed: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            depth_limit: crate::SUBGAME_DEPTH_LIMIT,
            min_iterations: crate::SUBGAME_MIN_ITERATIONS,
            max_iterations: crate::SUBGAME_MAX_ITERATIONS,
            budget_ms: crate::SUBGAME_TIME_BUDGET_MS,
            fallback_to_blueprint: true,
            max_nodes: 1 << 16,
            seed: 0,
        }
    }
}

impl ResolverConfig {
    pub fn validate(&self) -> crate::Result<()> {
        if self.max_iterations == 0 || self.min_iterations > self.max_iterations {
            return Err(crate::Error::Configuration(format!(
                "iterations must satisfy 0 <= {} <= {} and be positive",
                self.min_iterations, self.max_iterations
            )));
        }
        if self.max_nodes == 0 {
            return Err(crate::Error::Configuration("subgame node cap must be positive".into()));
        }
        Ok(())
    }
}
