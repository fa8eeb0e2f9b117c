use super::encoder::Encoder;
use super::memory::Ledger;
use super::memory::Memory;
use super::spot::Spot;
use crate::N;
use crate::Utility;
use crate::clustering::abstraction::Abstraction;
use crate::gameplay::config::GameConfig;
use crate::gameplay::deal::Deal;
use crate::gameplay::turn::Turn;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// External-sampling MCCFR over the abstracted game.
///
/// One iteration samples a whole deal up front, so every chance node
/// draws exactly one outcome. The walker alternates with the iteration
/// index; at the walker's decisions every legal action is explored and
/// regrets are updated, at the opponent's decisions a single action is
/// sampled from the current strategy and that strategy is accumulated
/// into the average. Only the walker's regrets change.
///
/// Randomness is a pure function of (seed, iteration), so a run is
/// reproducible regardless of which thread executes which iteration.
#[derive(Debug, Clone, Copy)]
pub struct Traversal<'a> {
    config: &'a GameConfig,
    abstraction: &'a Abstraction,
}

impl<'a> Traversal<'a> {
    pub fn new(config: &'a GameConfig, abstraction: &'a Abstraction) -> Self {
        Self {
            config,
            abstraction,
        }
    }

    /// walker for a given iteration
    pub fn walker(iteration: usize) -> usize {
        iteration % N
    }

    /// run one traversal, returning the walker's sampled value at the root
    pub fn iterate<M>(&self, memory: &mut M, seed: u64, iteration: usize) -> Utility
    where
        M: Memory + Ledger,
    {
        let ref mut rng = SmallRng::seed_from_u64(crate::seed((seed, iteration)));
        let deal = Deal::random(rng);
        let ref mut encoder = Encoder::new(self.abstraction, deal);
        let walker = Self::walker(iteration);
        self.walk(memory, encoder, rng, Spot::root(self.config), walker)
    }

    fn walk<M, R>(&self, memory: &mut M, encoder: &mut Encoder, rng: &mut R, spot: Spot, walker: usize) -> Utility
    where
        M: Memory + Ledger,
        R: Rng,
    {
        match spot.turn() {
            Turn::Terminal => spot.game().payoff(encoder.deal(), walker),
            Turn::Chance => self.walk(memory, encoder, rng, spot.reveal(), walker),
            Turn::Choice(player) if player == walker => {
                let ref info = encoder.info(&spot, player);
                let ref actions = spot.legal();
                let strategy = memory.strategy(info, actions);
                let values = actions
                    .iter()
                    .map(|a| self.walk(memory, encoder, rng, spot.apply(*a), walker))
                    .collect::<Vec<Utility>>();
                let node = strategy
                    .iter()
                    .zip(values.iter())
                    .map(|((_, p), v)| p * v)
                    .sum::<Utility>();
                for (action, value) in actions.iter().zip(values) {
                    memory.update_regret(info, action, value - node);
                }
                node
            }
            Turn::Choice(player) => {
                let ref info = encoder.info(&spot, player);
                let ref actions = spot.legal();
                let strategy = memory.strategy(info, actions);
                memory.add_strategy(info, &strategy, 1.);
                let action = strategy.sample(rng);
                self.walk(memory, encoder, rng, spot.apply(action), walker)
            }
        }
    }
}
