use super::leaf::Leaf;
use crate::Chips;
use crate::N;
use crate::Utility;
use crate::blueprint::blueprint::Blueprint;
use crate::clustering::abstraction::Abstraction;
use crate::gameplay::config::GameConfig;
use crate::gameplay::deal::Deal;
use crate::gameplay::turn::Turn;
use crate::mccfr::encoder::Encoder;
use crate::mccfr::spot::Spot;
use crate::save::atomic::atomic;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;

/// inputs to the leaf value model
pub const FEATURES: usize = 5;

/// Learned leaf values: a linear model over a handful of public and
/// private features, fit by gradient descent on squared error.
///
/// Features, for the player being valued at a street boundary:
/// bias, own bucket and opponent bucket (each scaled by the street's
/// bucket count), pot odds (pot over pot plus effective stack) and
/// stack-to-pot ratio clipped to [0, 32] and scaled into [0, 1]. Targets are blueprint rollout payoffs scaled by
/// the starting stack; predictions are scaled back to chips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    weights: [f32; FEATURES],
    scale: f32,
}

/// one training example
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: [f32; FEATURES],
    pub y: Utility,
}

impl Regression {
    const SPR_CAP: f32 = 32.;

    pub fn features(spot: &Spot, encoder: &mut Encoder, abstraction: &Abstraction, player: usize) -> [f32; FEATURES] {
        let game = spot.game();
        let street = game.street();
        let k = abstraction.k(street).max(1) as f32;
        let mine = encoder.bucket(player, street) as f32 / k;
        let theirs = encoder.bucket((player + 1) % N, street) as f32 / k;
        let pot = game.pot().max(1) as f32;
        let stack = (0..N).map(|i| game.seat(i).stack()).min().unwrap_or(0) as f32;
        [1., mine, theirs, pot / (pot + stack), (stack / pot).min(Self::SPR_CAP) / Self::SPR_CAP]
    }

    /// least squares by full batch gradient descent
    pub fn fit(samples: &[Sample], scale: Chips, epochs: usize, rate: f32) -> crate::Result<Self> {
        if samples.is_empty() {
            return Err(crate::Error::Evaluator("no samples to fit".into()));
        }
        let scale = scale.max(1) as f32;
        let n = samples.len() as f32;
        let mut weights = [0.; FEATURES];
        for _ in 0..epochs {
            let mut gradient = [0.; FEATURES];
            for sample in samples {
                let error = Self::dot(&weights, &sample.x) - sample.y / scale;
                for (g, x) in gradient.iter_mut().zip(sample.x.iter()) {
                    *g += error * x / n;
                }
            }
            for (w, g) in weights.iter_mut().zip(gradient.iter()) {
                *w -= rate * g;
            }
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(crate::Error::Evaluator("regression diverged".into()));
        }
        Ok(Self { weights, scale })
    }

    /// simulate blueprint play from the root, recording every street
    /// boundary each hand crosses together with its final payoff
    pub fn collect(
        game: &GameConfig,
        abstraction: &Abstraction,
        blueprint: &Blueprint,
        hands: usize,
        seed: u64,
    ) -> Vec<Sample> {
        let ref mut rng = SmallRng::seed_from_u64(seed);
        let mut samples = Vec::new();
        for _ in 0..hands {
            let deal = Deal::random(rng);
            let ref mut encoder = Encoder::new(abstraction, deal);
            let player = rng.random_range(0..N);
            let mut spot = Spot::root(game);
            let mut boundaries = Vec::new();
            let payoff = loop {
                match spot.turn() {
                    Turn::Terminal => break spot.game().payoff(&deal, player),
                    Turn::Chance => {
                        boundaries.push(Self::features(&spot, encoder, abstraction, player));
                        spot = spot.reveal();
                    }
                    Turn::Choice(p) => {
                        let ref info = encoder.info(&spot, p);
                        let ref actions = spot.legal();
                        spot = spot.apply(blueprint.policy_or_uniform(info, actions).sample(rng));
                    }
                }
            };
            samples.extend(boundaries.into_iter().map(|x| Sample { x, y: payoff }));
        }
        samples
    }

    pub fn predict(&self, x: &[f32; FEATURES]) -> Utility {
        Self::dot(&self.weights, x) * self.scale
    }
    pub fn mse(&self, samples: &[Sample]) -> f32 {
        samples
            .iter()
            .map(|s| (self.predict(&s.x) - s.y).powi(2))
            .sum::<f32>()
            / samples.len().max(1) as f32
    }

    pub fn save(&self, path: &Path) -> crate::Result<()> {
        atomic(path, |writer| Ok(serde_json::to_writer(&mut *writer, self)?))
    }
    pub fn load(path: &Path) -> crate::Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }

    fn dot(w: &[f32; FEATURES], x: &[f32; FEATURES]) -> f32 {
        w.iter().zip(x.iter()).map(|(w, x)| w * x).sum()
    }
}

/// a fitted model bound to the abstraction its buckets come from
pub struct Learned<'a> {
    model: Regression,
    abstraction: &'a Abstraction,
}

impl<'a> Learned<'a> {
    pub fn new(model: Regression, abstraction: &'a Abstraction) -> Self {
        Self { model, abstraction }
    }
}

impl Leaf for Learned<'_> {
    fn value(&self, spot: &Spot, encoder: &mut Encoder, player: usize, _: &mut SmallRng) -> crate::Result<Utility> {
        let ref x = Regression::features(spot, encoder, self.abstraction, player);
        match self.model.predict(x) {
            v if v.is_finite() => Ok(v),
            v => Err(crate::Error::Evaluator(format!("non-finite leaf value {}", v))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(n: usize) -> Vec<Sample> {
        let ref mut rng = SmallRng::seed_from_u64(0);
        (0..n)
            .map(|_| {
                let x = [1., rng.random::<f32>(), rng.random::<f32>(), rng.random::<f32>(), 0.];
                let y = 100. * (0.5 + 2. * x[1] - 1. * x[2] + 0.25 * x[3]);
                Sample { x, y }
            })
            .collect()
    }

    #[test]
    fn recovers_a_linear_target() {
        let ref samples = linear(256);
        let model = Regression::fit(samples, 100, 4000, 0.5).unwrap();
        assert!(model.mse(samples) < 1.0, "mse {}", model.mse(samples));
        assert!((model.predict(&[1., 0.5, 0.5, 0.5, 0.]) - 112.5).abs() < 2.);
    }

    #[test]
    fn empty_fit_fails() {
        assert!(matches!(Regression::fit(&[], 100, 10, 0.1), Err(crate::Error::Evaluator(_))));
    }

    #[test]
    fn json_round_trip() {
        let model = Regression::fit(&linear(32), 100, 10, 0.1).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let ref path = dir.path().join("regression.json");
        model.save(path).unwrap();
        assert_eq!(Regression::load(path).unwrap(), model);
    }
}
