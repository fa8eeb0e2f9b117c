use crate::N;
use crate::cards::board::Board;
use crate::cards::card::Card;
use crate::cards::deck::Deck;
use crate::cards::hand::Hand;
use crate::cards::hole::Hole;
use crate::cards::observation::Observation;
use crate::cards::street::Street;
use crate::cards::strength::Strength;
use rand::Rng;

/// every card of one hand: both holes and the full five card runout.
/// the board on a street is a prefix of the runout, so sampling the
/// runout up front samples every chance node of the hand at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Deal {
    holes: [Hole; N],
    runout: [Card; 5],
}

impl Deal {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut deck = Deck::new();
        let holes = std::array::from_fn(|_| deck.hole(rng));
        let runout = std::array::from_fn(|_| deck.draw(rng));
        Self { holes, runout }
    }
    /// fix one player's hole and the visible board, sample everything else
    pub fn conditioned<R: Rng>(position: usize, hole: Hole, board: Board, rng: &mut R) -> Self {
        let known = Hand::add(Hand::from(hole), Hand::from(board));
        let mut deck = Deck::without(known);
        let holes = std::array::from_fn(|i| match i == position {
            true => hole,
            false => deck.hole(rng),
        });
        let mut shown = Hand::from(board);
        let runout = std::array::from_fn(|_| match shown.next() {
            Some(card) => card,
            None => deck.draw(rng),
        });
        Self { holes, runout }
    }
    pub fn hole(&self, position: usize) -> Hole {
        self.holes[position]
    }
    pub fn board(&self, street: Street) -> Board {
        let cards = Hand::from(&self.runout[..street.n_observed()]);
        Board::try_from(cards).expect("street prefixes are valid boards")
    }
    pub fn observation(&self, position: usize, street: Street) -> Observation {
        Observation::try_from((self.hole(position), self.board(street)))
            .expect("deal cards are disjoint")
    }
    pub fn strength(&self, position: usize) -> Strength {
        Strength::from(self.observation(position, Street::Rive).hand())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn cards_are_disjoint() {
        let ref mut rng = SmallRng::seed_from_u64(1);
        let deal = Deal::random(rng);
        let all = (0..N)
            .map(|p| Hand::from(deal.hole(p)))
            .fold(Hand::from(deal.board(Street::Rive)), Hand::add);
        assert_eq!(all.size(), 2 * N + 5);
    }

    #[test]
    fn conditioning_keeps_known_cards() {
        let ref mut rng = SmallRng::seed_from_u64(2);
        let hole = Hole::try_from("AsKs").unwrap();
        let board = Board::try_from("2c7d9h").unwrap();
        let deal = Deal::conditioned(1, hole, board, rng);
        assert_eq!(deal.hole(1), hole);
        assert_eq!(deal.board(Street::Flop), board);
        assert!(!Hand::from(deal.hole(0)).overlaps(&Hand::from(deal.board(Street::Rive))));
    }
}
