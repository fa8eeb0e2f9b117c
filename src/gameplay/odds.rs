use crate::Arbitrary;
use crate::Chips;
use crate::Probability;
use serde::Deserialize;
use serde::Serialize;

/// pot-normalized odds for a given bet size
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Odds(pub Chips, pub Chips);

impl From<Odds> for Probability {
    fn from(odds: Odds) -> Self {
        odds.0 as Probability / odds.1 as Probability
    }
}

impl Odds {
    /// every bet size an abstraction may offer, sorted
    pub const GRID: [Self; 10] = [
        Self(1, 4), // 0.25
        Self(1, 3), // 0.33
        Self(1, 2), // 0.50
        Self(2, 3), // 0.66
        Self(3, 4), // 0.75
        Self(1, 1), // 1.00
        Self(3, 2), // 1.50
        Self(2, 1), // 2.00
        Self(3, 1), // 3.00
        Self(4, 1), // 4.00
    ];
    /// index into the GRID
    pub fn index(&self) -> Option<usize> {
        Self::GRID.iter().position(|o| o == self)
    }
    /// this fraction of a pot, rounded down. saturates at Chips::MAX
    pub fn of(&self, pot: Chips) -> Chips {
        Chips::try_from(i32::from(pot) * i32::from(self.0) / i32::from(self.1)).unwrap_or(Chips::MAX)
    }
}

impl std::fmt::Display for Odds {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.0, self.1)
    }
}

impl Arbitrary for Odds {
    fn random() -> Self {
        use rand::prelude::IndexedRandom;
        let ref mut rng = rand::rng();
        Self::GRID.choose(rng).copied().expect("GRID is empty")
    }
}
