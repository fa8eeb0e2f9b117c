use crate::mccfr::discount::Discount;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Sequential,
    Parallel,
}

/// how long and how wide to train
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// total traversals, resumed checkpoints included
    pub iterations: usize,
    pub mode: Mode,
    /// threads in parallel mode
    pub workers: usize,
    /// iterations per worker per cycle
    pub batch_size: usize,
    /// iterations between checkpoints, taken at merge boundaries
    pub checkpoint_every: usize,
    pub discount: Discount,
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            iterations: crate::CFR_TREE_COUNT,
            mode: Mode::Parallel,
            workers: num_cpus::get(),
            batch_size: crate::CFR_BATCH_SIZE,
            checkpoint_every: crate::CFR_CHECKPOINT_INTERVAL,
            discount: Discount::default(),
            seed: 0,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> crate::Result<()> {
        let fail = |msg: &str| Err(crate::Error::Configuration(msg.to_string()));
        if self.mode == Mode::Parallel && self.workers == 0 {
            return fail("parallel training needs at least one worker");
        }
        if self.batch_size == 0 {
            return fail("batch size must be positive");
        }
        if self.checkpoint_every == 0 {
            return fail("checkpoint interval must be positive");
        }
        self.discount.validate()
    }
}
