use super::card::Card;
use super::hand::Hand;

/// a player's two private cards
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Hole(Hand);

impl Hole {
    pub fn cards(&self) -> [Card; 2] {
        let mut iter = self.0;
        let lo = iter.next();
        let hi = iter.next();
        match (lo, hi) {
            (Some(lo), Some(hi)) => [lo, hi],
            _ => unreachable!("hole always holds two cards"),
        }
    }
}

impl From<(Card, Card)> for Hole {
    fn from((a, b): (Card, Card)) -> Self {
        assert!(a != b, "hole cards must differ");
        Self(Hand::add(Hand::from(a), Hand::from(b)))
    }
}

impl From<Hole> for Hand {
    fn from(hole: Hole) -> Self {
        hole.0
    }
}

impl TryFrom<Hand> for Hole {
    type Error = anyhow::Error;
    fn try_from(hand: Hand) -> Result<Self, Self::Error> {
        match hand.size() {
            2 => Ok(Self(hand)),
            n => Err(anyhow::anyhow!("hole needs 2 cards, got {}", n)),
        }
    }
}

impl TryFrom<&str> for Hole {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::try_from(Hand::try_from(s)?)
    }
}

impl std::fmt::Display for Hole {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_two() {
        assert!(Hole::try_from("AsKs").is_ok());
        assert!(Hole::try_from("As").is_err());
        assert!(Hole::try_from("AsKsQs").is_err());
    }
}
