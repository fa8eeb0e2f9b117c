use super::seat::State;
use crate::Chips;
use crate::cards::strength::Strength;

/// one seat's share of a finished hand.
/// strength is only known when the hand reaches showdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub reward: Chips,
    pub risked: Chips,
    pub status: State,
    pub strength: Option<Strength>,
}

impl Settlement {
    pub fn pnl(&self) -> Chips {
        self.reward - self.risked
    }
}

impl From<(Chips, State, Option<Strength>)> for Settlement {
    fn from((risked, status, strength): (Chips, State, Option<Strength>)) -> Self {
        Self {
            reward: 0,
            risked,
            status,
            strength,
        }
    }
}

impl std::fmt::Display for Settlement {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.strength {
            Some(strength) => write!(f, "{:>+5} {}", self.pnl(), strength),
            None => write!(f, "{:>+5}", self.pnl()),
        }
    }
}
