use super::card::Card;
use super::hand::Hand;
use super::hole::Hole;
use rand::Rng;

/// Deck extends Hand with the ability to remove cards from itself.
/// all randomness comes from the caller's rng so that deals are reproducible.
#[derive(Debug, Clone, Copy)]
pub struct Deck(Hand);

impl From<Deck> for Hand {
    fn from(deck: Deck) -> Self {
        deck.0
    }
}
impl From<Hand> for Deck {
    fn from(hand: Hand) -> Self {
        Self(hand)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    pub fn new() -> Self {
        Self(Hand::full())
    }
    /// every card not already in `dead`
    pub fn without(dead: Hand) -> Self {
        Self(dead.complement())
    }
    pub fn size(&self) -> usize {
        self.0.size()
    }
    pub fn remove(&mut self, card: Card) {
        self.0.remove(card);
    }
    /// remove a uniformly random card from the deck
    pub fn draw<R: Rng>(&mut self, rng: &mut R) -> Card {
        assert!(self.0.size() > 0, "drawing from empty deck");
        let i = rng.random_range(0..self.0.size());
        let card = self.0.pick(i).expect("index within deck size");
        self.remove(card);
        card
    }
    /// remove two random cards to deal as a Hole
    pub fn hole<R: Rng>(&mut self, rng: &mut R) -> Hole {
        let a = self.draw(rng);
        let b = self.draw(rng);
        Hole::from((a, b))
    }
    /// remove n random cards as a Hand
    pub fn deal<R: Rng>(&mut self, rng: &mut R, n: usize) -> Hand {
        (0..n).fold(Hand::empty(), |hand, _| Hand::add(hand, Hand::from(self.draw(rng))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn draws_are_distinct() {
        let ref mut rng = SmallRng::seed_from_u64(7);
        let mut deck = Deck::new();
        let drawn = (0..52).map(|_| deck.draw(rng)).collect::<Vec<_>>();
        assert_eq!(deck.size(), 0);
        assert_eq!(Hand::from(drawn).size(), 52);
    }

    #[test]
    fn seeded_deals_repeat() {
        let deal = |seed| Deck::new().deal(&mut SmallRng::seed_from_u64(seed), 5);
        assert_eq!(deal(11), deal(11));
    }

    #[test]
    fn respects_dead_cards() {
        let dead = Hand::try_from("AsKs").unwrap();
        let ref mut rng = SmallRng::seed_from_u64(3);
        let hand = Deck::without(dead).deal(rng, 50);
        assert!(!hand.overlaps(&dead));
    }
}
