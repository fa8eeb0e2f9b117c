use super::evaluator::Evaluator;
use super::hand::Hand;
use super::kicks::Kickers;
use super::ranking::Ranking;

/// A hand's showdown strength: category first, kickers break ties.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Strength {
    value: Ranking,
    kicks: Kickers,
}

impl Strength {
    pub fn ranking(&self) -> Ranking {
        self.value
    }
}

impl From<Hand> for Strength {
    fn from(hand: Hand) -> Self {
        let eval = Evaluator::from(hand);
        let value = eval.find_ranking();
        let kicks = eval.find_kickers(value);
        Self { value, kicks }
    }
}

impl From<(Ranking, Kickers)> for Strength {
    fn from((value, kicks): (Ranking, Kickers)) -> Self {
        Self { value, kicks }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<18}{}", self.value, self.kicks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strength(s: &str) -> Strength {
        Strength::from(Hand::try_from(s).unwrap())
    }

    #[test]
    fn kickers_break_ties() {
        assert!(strength("As Ad Kc Qh 9s 4d 2c") > strength("Ah Ac Kd Qs 8c 4h 2d"));
    }

    #[test]
    fn board_plays_splits() {
        assert_eq!(strength("2c 3d Ts Js Qs Ks As"), strength("4h 5h Ts Js Qs Ks As"));
    }

    #[test]
    fn category_dominates() {
        assert!(strength("2c 2d 3h 3s 4c") > strength("Ac Kd Qh Js 9c"));
    }
}
