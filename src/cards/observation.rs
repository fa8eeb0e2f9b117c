use super::board::Board;
use super::deck::Deck;
use super::hand::Hand;
use super::hole::Hole;
use super::street::Street;
use rand::Rng;

/// what one player can see: their pocket and the public board.
/// the unit the abstraction buckets.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Observation {
    pocket: Hole,
    public: Board,
}

impl Observation {
    pub fn random<R: Rng>(street: Street, rng: &mut R) -> Self {
        let mut deck = Deck::new();
        let pocket = deck.hole(rng);
        let public = deck.deal(rng, street.n_observed());
        let public = Board::try_from(public).expect("street sizes are valid boards");
        Self { pocket, public }
    }
    pub fn pocket(&self) -> Hole {
        self.pocket
    }
    pub fn public(&self) -> Board {
        self.public
    }
    pub fn street(&self) -> Street {
        self.public.street()
    }
    /// every card this player can see
    pub fn hand(&self) -> Hand {
        Hand::add(Hand::from(self.pocket), Hand::from(self.public))
    }
}

impl TryFrom<(Hole, Board)> for Observation {
    type Error = anyhow::Error;
    fn try_from((pocket, public): (Hole, Board)) -> Result<Self, Self::Error> {
        if Hand::from(pocket).overlaps(&Hand::from(public)) {
            Err(anyhow::anyhow!("pocket {} overlaps board {}", pocket, public))
        } else {
            Ok(Self { pocket, public })
        }
    }
}

impl std::fmt::Display for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} + {}", self.pocket, self.public)
    }
}
