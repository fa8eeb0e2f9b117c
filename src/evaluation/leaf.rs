use crate::Utility;
use crate::mccfr::encoder::Encoder;
use crate::mccfr::spot::Spot;
use rand::rngs::SmallRng;

/// values a depth-limit leaf of a subgame.
///
/// the result is expected chips won or lost by `player` from the start
/// of the hand, the same units as a terminal payoff, so the resolver can
/// treat leaves and terminals alike. the encoder carries the sampled deal.
pub trait Leaf: Send + Sync {
    fn value(&self, spot: &Spot, encoder: &mut Encoder, player: usize, rng: &mut SmallRng) -> crate::Result<Utility>;
}
