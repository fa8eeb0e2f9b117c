use super::leaf::Leaf;
use crate::Utility;
use crate::blueprint::blueprint::Blueprint;
use crate::gameplay::turn::Turn;
use crate::mccfr::encoder::Encoder;
use crate::mccfr::spot::Spot;
use rand::rngs::SmallRng;
use std::sync::Arc;

/// plays the blueprint from the leaf to a terminal, averaging the
/// realized payoff over a few samples
pub struct Rollout {
    blueprint: Arc<Blueprint>,
    samples: usize,
}

impl Rollout {
    pub fn new(blueprint: Arc<Blueprint>, samples: usize) -> Self {
        Self {
            blueprint,
            samples: samples.max(1),
        }
    }

    fn play(&self, spot: &Spot, encoder: &mut Encoder, player: usize, rng: &mut SmallRng) -> Utility {
        let mut spot = *spot;
        loop {
            match spot.turn() {
                Turn::Terminal => return spot.game().payoff(encoder.deal(), player),
                Turn::Chance => spot = spot.reveal(),
                Turn::Choice(p) => {
                    let ref info = encoder.info(&spot, p);
                    let ref actions = spot.legal();
                    let action = self.blueprint.policy_or_uniform(info, actions).sample(rng);
                    spot = spot.apply(action);
                }
            }
        }
    }
}

impl Leaf for Rollout {
    fn value(&self, spot: &Spot, encoder: &mut Encoder, player: usize, rng: &mut SmallRng) -> crate::Result<Utility> {
        let total = (0..self.samples)
            .map(|_| self.play(spot, encoder, player, rng))
            .sum::<Utility>();
        Ok(total / self.samples as Utility)
    }
}
