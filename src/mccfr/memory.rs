use super::info::Info;
use super::policy::Policy;
use crate::Probability;
use crate::Utility;
use crate::gameplay::action::Action;

/// read side of regret storage, as seen by a traversal
pub trait Memory {
    /// cumulative regret, zero if never touched
    fn regret(&self, info: &Info, action: &Action) -> Utility;
    /// cumulative strategy weight, zero if never touched
    fn weight(&self, info: &Info, action: &Action) -> Probability;

    /// current strategy by regret matching
    fn strategy(&self, info: &Info, actions: &[Action]) -> Policy {
        let regrets = actions
            .iter()
            .map(|a| self.regret(info, a))
            .collect::<Vec<Utility>>();
        Policy::matching(actions, &regrets)
    }
    /// long-run average strategy, uniform if never accumulated
    fn average(&self, info: &Info, actions: &[Action]) -> Policy {
        Policy::normalized(actions.iter().map(|a| (*a, self.weight(info, a))).collect())
    }
}

/// write side of regret storage, as seen by a traversal
pub trait Ledger {
    /// add to cumulative regret, unclamped
    fn update_regret(&mut self, info: &Info, action: &Action, value: Utility);
    /// add weight * p(a) to each action's cumulative strategy
    fn add_strategy(&mut self, info: &Info, strategy: &Policy, weight: Probability);
}
