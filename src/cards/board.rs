use super::card::Card;
use super::hand::Hand;
use super::street::Street;

/// public community cards. 0, 3, 4 or 5 of them
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Board(Hand);

impl Board {
    pub fn empty() -> Self {
        Self(Hand::empty())
    }
    pub fn street(&self) -> Street {
        Street::from(self.0.size())
    }
    pub fn add(&mut self, card: Card) {
        assert!(!self.0.contains(&card), "card already on board");
        assert!(self.0.size() < 5, "board is full");
        self.0.insert(card);
    }
    pub fn size(&self) -> usize {
        self.0.size()
    }
}

impl From<Board> for Hand {
    fn from(board: Board) -> Self {
        board.0
    }
}

impl TryFrom<Hand> for Board {
    type Error = anyhow::Error;
    fn try_from(hand: Hand) -> Result<Self, Self::Error> {
        match hand.size() {
            0 | 3 | 4 | 5 => Ok(Self(hand)),
            n => Err(anyhow::anyhow!("board cannot hold {} cards", n)),
        }
    }
}

impl TryFrom<&str> for Board {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::try_from(Hand::try_from(s)?)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn street_from_size() {
        assert_eq!(Board::empty().street(), Street::Pref);
        assert_eq!(Board::try_from("2c3c4c").unwrap().street(), Street::Flop);
        assert_eq!(Board::try_from("2c3c4c5c").unwrap().street(), Street::Turn);
        assert_eq!(Board::try_from("2c3c4c5c6c").unwrap().street(), Street::Rive);
        assert!(Board::try_from("2c3c").is_err());
    }
}
