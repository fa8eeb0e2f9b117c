use crate::Energy;
use crate::Probability;
use crate::cards::deck::Deck;
use crate::cards::hand::Hand;
use crate::cards::observation::Observation;
use crate::cards::strength::Strength;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::cmp::Ordering;

/// equity summary of one observation, the space k-means clusters in.
///
/// [ E[eq], E[eq^2], P(eq > 1/2), immediate strength ]
///
/// eq is showdown equity against one random opponent on one sampled
/// runout to the river. the first three moments describe how that
/// equity is distributed over runouts, which separates draws from
/// made hands of the same mean. immediate strength is the share of
/// opponent holdings beaten on the board as it stands.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Features([Probability; 4]);

impl Features {
    pub const DIMENSIONS: usize = 4;

    /// pure function of the observation and the sampling parameters
    pub fn compute(obs: &Observation, seed: u64, rollouts: usize, opponents: usize) -> Self {
        let ref mut rng = SmallRng::seed_from_u64(crate::seed((seed, u64::from(obs.hand()), obs.street())));
        let equities = (0..rollouts)
            .map(|_| Self::rollout(obs, opponents, rng))
            .collect::<Vec<Probability>>();
        let n = equities.len() as Probability;
        let mean = equities.iter().sum::<Probability>() / n;
        let square = equities.iter().map(|e| e * e).sum::<Probability>() / n;
        let ahead = equities.iter().filter(|e| **e > 0.5).count() as Probability / n;
        let immediate = Self::immediate(obs, rollouts * opponents, rng);
        Self([mean, square, ahead, immediate])
    }

    /// squared euclidean distance
    pub fn distance(&self, other: &Self) -> Energy {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }
    pub fn values(&self) -> &[Probability; 4] {
        &self.0
    }
    /// exact bit pattern, for counting distinct points
    pub fn bits(&self) -> [u32; 4] {
        self.0.map(f32::to_bits)
    }
    /// componentwise mean of a non-empty set of points
    pub fn mean<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let (sum, n) = points
            .into_iter()
            .fold(([0.; 4], 0usize), |(mut sum, n), p| {
                sum.iter_mut().zip(p.0.iter()).for_each(|(s, x)| *s += x);
                (sum, n + 1)
            });
        (n > 0).then(|| Self(sum.map(|s| s / n as Probability)))
    }

    /// equity against random opponents on one random completion of the board
    fn rollout<R: Rng>(obs: &Observation, opponents: usize, rng: &mut R) -> Probability {
        let mut deck = Deck::without(obs.hand());
        let missing = 5 - obs.street().n_observed();
        let board = Hand::add(Hand::from(obs.public()), deck.deal(rng, missing));
        let hero = Strength::from(Hand::add(Hand::from(obs.pocket()), board));
        (0..opponents)
            .map(|_| {
                let mut deck = deck;
                let villain = Strength::from(Hand::add(Hand::from(deck.hole(rng)), board));
                Self::score(hero.cmp(&villain))
            })
            .sum::<Probability>()
            / opponents as Probability
    }
    /// share of opponent holdings beaten on the current board
    fn immediate<R: Rng>(obs: &Observation, samples: usize, rng: &mut R) -> Probability {
        let hero = Strength::from(obs.hand());
        (0..samples)
            .map(|_| {
                let mut deck = Deck::without(obs.hand());
                let villain = Hand::add(Hand::from(deck.hole(rng)), Hand::from(obs.public()));
                Self::score(hero.cmp(&Strength::from(villain)))
            })
            .sum::<Probability>()
            / samples as Probability
    }
    fn score(ordering: Ordering) -> Probability {
        match ordering {
            Ordering::Greater => 1.0,
            Ordering::Equal => 0.5,
            Ordering::Less => 0.0,
        }
    }
}

impl From<[Probability; 4]> for Features {
    fn from(values: [Probability; 4]) -> Self {
        Self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::board::Board;
    use crate::cards::hole::Hole;

    fn obs(hole: &str, board: &str) -> Observation {
        Observation::try_from((Hole::try_from(hole).unwrap(), Board::try_from(board).unwrap())).unwrap()
    }

    #[test]
    fn deterministic_per_seed() {
        let ref o = obs("AsKs", "2c7d9h");
        assert_eq!(Features::compute(o, 1, 8, 2), Features::compute(o, 1, 8, 2));
    }

    #[test]
    fn features_are_probabilities() {
        let ref o = obs("7h2c", "");
        let f = Features::compute(o, 3, 8, 4);
        assert!(f.values().iter().all(|x| (0.0..=1.0).contains(x)));
        assert!(f.values()[1] <= f.values()[0] + 1e-6);
    }

    #[test]
    fn nuts_on_river() {
        let ref o = obs("AsKs", "QsJsTs2c3d");
        let f = Features::compute(o, 0, 4, 4);
        assert_eq!(f.values()[0], 1.0);
        assert_eq!(f.values()[3], 1.0);
    }

    #[test]
    fn aces_beat_trash() {
        let aces = Features::compute(&obs("AsAd", ""), 0, 32, 4);
        let trash = Features::compute(&obs("7h2c", ""), 0, 32, 4);
        assert!(aces.values()[0] > trash.values()[0]);
    }

    #[test]
    fn mean_of_points() {
        let points = [Features::from([0., 0., 0., 0.]), Features::from([1., 1., 1., 1.])];
        assert_eq!(Features::mean(points.iter()), Some(Features::from([0.5; 4])));
        assert_eq!(Features::mean(std::iter::empty()), None);
    }
}
