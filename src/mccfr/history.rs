use crate::gameplay::action::Action;

/// abstract betting history since the blinds.
///
/// actions are 4-bit codes shifted in from the right; 0xF marks the start
/// of a new street. 32 nibbles cover four capped streets. since the game
/// starts from a fixed root, the history alone fixes the betting state
/// and therefore the legal action set.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct History(u128);

impl History {
    const STREET: u128 = 0xF;
    const CAPACITY: usize = 32;

    pub fn push(&self, action: Action) -> Self {
        self.shift(u8::from(action) as u128)
    }
    /// mark that the next street's cards were dealt
    pub fn deal(&self) -> Self {
        self.shift(Self::STREET)
    }
    /// codes stored, separators included
    pub fn len(&self) -> usize {
        (128 - self.0.leading_zeros() as usize).div_ceil(4)
    }
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
    /// actions oldest first, separators dropped
    pub fn actions(&self) -> Vec<Action> {
        self.codes()
            .into_iter()
            .filter(|c| *c as u128 != Self::STREET)
            .map(Action::from)
            .collect()
    }
    /// actions taken on the current street, oldest first
    pub fn street(&self) -> Vec<Action> {
        let codes = self.codes();
        let start = codes
            .iter()
            .rposition(|c| *c as u128 == Self::STREET)
            .map(|i| i + 1)
            .unwrap_or(0);
        codes[start..].iter().copied().map(Action::from).collect()
    }

    fn shift(&self, code: u128) -> Self {
        assert!(self.len() < Self::CAPACITY, "history overflow");
        Self(self.0 << 4 | code)
    }
    fn codes(&self) -> Vec<u8> {
        (0..self.len())
            .rev()
            .map(|i| (self.0 >> (i * 4) & 0xF) as u8)
            .collect()
    }
}

/// u128 isomorphism
impl From<u128> for History {
    fn from(n: u128) -> Self {
        Self(n)
    }
}
impl From<History> for u128 {
    fn from(h: History) -> Self {
        h.0
    }
}

impl std::fmt::Display for History {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for code in self.codes() {
            match code as u128 {
                Self::STREET => write!(f, "|")?,
                _ => write!(f, "{}", Action::from(code))?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::odds::Odds;

    #[test]
    fn records_in_order() {
        let history = History::default()
            .push(Action::Call)
            .push(Action::Check)
            .deal()
            .push(Action::Bet(Odds(1, 2)))
            .push(Action::Fold);
        assert_eq!(history.len(), 5);
        assert_eq!(
            history.actions(),
            vec![Action::Call, Action::Check, Action::Bet(Odds(1, 2)), Action::Fold]
        );
        assert_eq!(history.street(), vec![Action::Bet(Odds(1, 2)), Action::Fold]);
        assert_eq!(history.to_string(), "CX|B1/2F");
    }

    #[test]
    fn distinct_paths_distinct_keys() {
        let a = History::default().push(Action::Call).deal();
        let b = History::default().deal().push(Action::Call);
        assert_ne!(a, b);
        assert!(History::default().is_empty());
    }
}
