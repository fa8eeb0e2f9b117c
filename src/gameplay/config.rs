use super::odds::Odds;
use crate::Chips;
use serde::Deserialize;
use serde::Serialize;

/// table stakes and the abstract bet grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub stack: Chips,
    pub s_blind: Chips,
    pub b_blind: Chips,
    /// pot fractions offered as bets, each from Odds::GRID
    pub bets: Vec<Odds>,
    /// aggressive actions allowed per street
    pub max_raises: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            stack: crate::STACK,
            s_blind: crate::S_BLIND,
            b_blind: crate::B_BLIND,
            bets: vec![Odds(1, 2), Odds(1, 1)],
            max_raises: crate::MAX_RAISE_REPEATS,
        }
    }
}

impl GameConfig {
    /// longest street that still packs into a betting history
    pub const MAX_RAISES: usize = 4;
    /// largest stack whose pots and pot-sized bets fit in Chips
    pub const MAX_STACK: Chips = Chips::MAX / 8;

    pub fn validate(&self) -> crate::Result<()> {
        let fail = |msg: String| Err(crate::Error::Configuration(msg));
        if self.s_blind <= 0 || self.b_blind < self.s_blind {
            return fail(format!("blinds {}/{} are invalid", self.s_blind, self.b_blind));
        }
        if self.stack <= self.b_blind {
            return fail(format!("stack {} must exceed big blind", self.stack));
        }
        if self.stack > Self::MAX_STACK {
            return fail(format!("stack {} exceeds {}", self.stack, Self::MAX_STACK));
        }
        if self.max_raises > Self::MAX_RAISES {
            return fail(format!("at most {} raises per street", Self::MAX_RAISES));
        }
        if let Some(odds) = self.bets.iter().find(|o| o.index().is_none()) {
            return fail(format!("bet size {} is not on the grid", odds));
        }
        if self.grid().count_ones() as usize != self.bets.len() {
            return fail("duplicate bet sizes".to_string());
        }
        Ok(())
    }

    /// bet sizes as a bitmask over Odds::GRID
    pub fn grid(&self) -> u16 {
        self.bets
            .iter()
            .filter_map(|o| o.index())
            .fold(0u16, |mask, i| mask | 1 << i)
    }
}
