//! MCCFR blueprint training and real-time subgame resolution
//! for heads-up No-Limit Hold-Em.
//!
//! # Module Structure
//!
//! - `cards`: Card primitives and hand evaluation
//! - `clustering`: Equity-feature k-means hand abstraction
//! - `gameplay`: Betting state, abstract actions, settlement
//! - `mccfr`: Information sets, regret tracking, external sampling
//! - `workers`: Persistent worker pool and its message protocol
//! - `training`: Sequential, parallel and multi-instance orchestration
//! - `blueprint`: Immutable average strategy snapshots
//! - `search`: Depth-limited real-time subgame resolution
//! - `evaluation`: Leaf value estimation for depth-limited search
//! - `save`: Binary persistence and atomic file writes
pub mod blueprint;
pub mod cards;
pub mod clustering;
pub mod error;
pub mod evaluation;
pub mod gameplay;
pub mod mccfr;
pub mod save;
pub mod search;
pub mod training;
pub mod workers;

pub use error::Error;
pub use error::Result;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Stack sizes and bet amounts in chips.
pub type Chips = i16;
/// Distance metrics and k-means loss.
pub type Energy = f32;
/// Expected values, regrets, and payoffs.
pub type Utility = f32;
/// Strategy weights, sampling distributions, and reach probabilities.
pub type Probability = f32;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and Monte Carlo sampling.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// GAME TREE PARAMETERS
// ============================================================================
/// Number of players at the table.
pub const N: usize = 2;
/// Starting stack size in chips.
pub const STACK: Chips = 200;
/// Big blind amount.
pub const B_BLIND: Chips = 2;
/// Small blind amount.
pub const S_BLIND: Chips = 1;
/// Maximum aggressive actions per betting round (limits tree width).
pub const MAX_RAISE_REPEATS: usize = 2;

// ============================================================================
// HAND ABSTRACTION
// Equity features per street, clustered with k-means.
// ============================================================================
/// Default bucket counts for preflop, flop, turn, river.
pub const KMEANS_CLUSTER_COUNTS: [usize; 4] = [16, 32, 32, 32];
/// Sampled observations per street when fitting centroids.
pub const KMEANS_SAMPLE_COUNT: usize = 2048;
/// Lloyd's algorithm iterations per street.
pub const KMEANS_TRAINING_ITERATIONS: usize = 16;
/// Board runouts sampled per equity feature.
pub const EQUITY_ROLLOUTS: usize = 16;
/// Opponent hands sampled per runout.
pub const EQUITY_OPPONENTS: usize = 4;

// ============================================================================
// MCCFR SOLVER CONFIGURATIONS
// ============================================================================
/// Iterations dispatched to each worker per cycle.
pub const CFR_BATCH_SIZE: usize = 64;
/// Default total training budget.
pub const CFR_TREE_COUNT: usize = 0x100000;
/// Iterations between checkpoints.
pub const CFR_CHECKPOINT_INTERVAL: usize = 0x10000;
/// Iterations between regret discounts.
pub const CFR_DISCOUNT_INTERVAL: usize = 0x1000;

// ============================================================================
// REGRET MATCHING
// ============================================================================
/// Tolerance when checking that a distribution sums to one.
pub const POLICY_TOLERANCE: Probability = 1e-6;

// ============================================================================
// SUBGAME SOLVING
// Real-time refinement of blueprint strategy at decision points.
// ============================================================================
/// Future streets included below the current one.
pub const SUBGAME_DEPTH_LIMIT: usize = 1;
/// Iteration floor regardless of time budget.
pub const SUBGAME_MIN_ITERATIONS: usize = 32;
/// Iteration ceiling, treated as convergence.
pub const SUBGAME_MAX_ITERATIONS: usize = 4096;
/// Wall-clock budget for a single resolve.
pub const SUBGAME_TIME_BUDGET_MS: u64 = 100;

// ============================================================================
// TRAINING INFRASTRUCTURE
// ============================================================================
/// Interval between progress log messages during training.
pub const TRAINING_LOG_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
pub fn log() -> Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])
        .map_err(|e| Error::Configuration(format!("logger already set: {}", e)))
}

/// Stable 64-bit seed derivation. Workers, iterations and feature
/// sampling all draw their randomness from seeds produced here.
pub fn seed<H>(parts: H) -> u64
where
    H: std::hash::Hash,
{
    use std::hash::Hasher;
    let ref mut hasher = save::Fnv::default();
    parts.hash(hasher);
    hasher.finish()
}
