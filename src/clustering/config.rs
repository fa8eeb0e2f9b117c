use crate::cards::street::Street;
use serde::Deserialize;
use serde::Serialize;

/// how the hand abstraction is fitted
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BucketConfig {
    /// buckets per street: preflop, flop, turn, river
    pub k: [usize; 4],
    /// observations sampled per street
    pub samples: usize,
    pub seed: u64,
    /// Lloyd iterations per street
    pub iterations: usize,
    /// runouts per equity estimate
    pub rollouts: usize,
    /// opponent hands per runout
    pub opponents: usize,
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            k: crate::KMEANS_CLUSTER_COUNTS,
            samples: crate::KMEANS_SAMPLE_COUNT,
            seed: 0,
            iterations: crate::KMEANS_TRAINING_ITERATIONS,
            rollouts: crate::EQUITY_ROLLOUTS,
            opponents: crate::EQUITY_OPPONENTS,
        }
    }
}

impl BucketConfig {
    pub fn k(&self, street: Street) -> usize {
        self.k[street as usize]
    }
    pub fn validate(&self) -> crate::Result<()> {
        if let Some(street) = Street::all().iter().find(|s| self.k(**s) == 0) {
            return Err(crate::Error::Configuration(format!("zero buckets on {}", street)));
        }
        if self.k.iter().any(|k| *k > u16::MAX as usize) {
            return Err(crate::Error::Configuration("bucket ids must fit in u16".into()));
        }
        if self.samples == 0 || self.rollouts == 0 || self.opponents == 0 {
            return Err(crate::Error::Configuration(
                "samples, rollouts and opponents must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_buckets_rejected() {
        let config = BucketConfig {
            k: [8, 0, 8, 8],
            ..BucketConfig::default()
        };
        assert!(matches!(config.validate(), Err(crate::Error::Configuration(_))));
    }
}
