use super::odds::Odds;
use crate::Arbitrary;

/// abstract actions. bet sizes are pot fractions from Odds::GRID,
/// so the whole set fits in 4-bit codes with room for a street separator.
#[derive(Debug, Clone, Copy, Hash, Ord, PartialOrd, PartialEq, Eq)]
pub enum Action {
    Fold,
    Check,
    Call,
    Bet(Odds),
    Shove,
}

impl Action {
    pub fn is_aggro(&self) -> bool {
        matches!(self, Action::Bet(_) | Action::Shove)
    }
}

/// u8 bijection. zero is never a valid action
impl From<Action> for u8 {
    fn from(action: Action) -> Self {
        match action {
            Action::Fold => 1,
            Action::Check => 2,
            Action::Call => 3,
            Action::Shove => 4,
            Action::Bet(odds) => 5 + odds.index().expect("bet sizes come from the grid") as u8,
        }
    }
}
impl From<u8> for Action {
    fn from(value: u8) -> Self {
        match value {
            1 => Action::Fold,
            2 => Action::Check,
            3 => Action::Call,
            4 => Action::Shove,
            i @ 5..=14 => Action::Bet(Odds::GRID[i as usize - 5]),
            _ => unreachable!("invalid action encoding {}", value),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Fold => write!(f, "F"),
            Action::Check => write!(f, "X"),
            Action::Call => write!(f, "C"),
            Action::Shove => write!(f, "A"),
            Action::Bet(odds) => write!(f, "B{}", odds),
        }
    }
}

impl Arbitrary for Action {
    fn random() -> Self {
        use rand::Rng;
        match rand::rng().random_range(0..5) {
            0 => Self::Fold,
            1 => Self::Check,
            2 => Self::Call,
            3 => Self::Shove,
            _ => Self::Bet(Odds::random()),
        }
    }
}
