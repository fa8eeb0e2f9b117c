use super::info::Info;
use super::memory::Ledger;
use super::memory::Memory;
use super::policy::Policy;
use super::regrets::Regrets;
use super::row::Row;
use crate::Probability;
use crate::Utility;
use crate::gameplay::action::Action;
use std::collections::HashMap;

/// a worker's private increments since the last merge.
/// merging is a plain sum, so deltas commute.
#[derive(Debug, Default, Clone)]
pub struct Delta(HashMap<Info, Row>);

impl Delta {
    pub fn num_infosets(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    fn get(&self, info: &Info, action: &Action) -> (Utility, Probability) {
        self.0
            .get(info)
            .and_then(|row| row.get(action))
            .map(|e| (e.regret, e.weight))
            .unwrap_or_default()
    }
}

impl IntoIterator for Delta {
    type Item = (Info, Row);
    type IntoIter = std::collections::hash_map::IntoIter<Info, Row>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Ledger for Delta {
    fn update_regret(&mut self, info: &Info, action: &Action, value: Utility) {
        self.0.entry(*info).or_default().entry(*action).regret += value;
    }
    fn add_strategy(&mut self, info: &Info, strategy: &Policy, weight: Probability) {
        let row = self.0.entry(*info).or_default();
        for (action, p) in strategy.iter() {
            row.entry(*action).weight += weight * p;
        }
    }
}

/// the shared tracker as a worker sees it: frozen base plus its own delta.
/// reads see both, writes land only in the delta.
pub struct Scratch<'a> {
    base: &'a Regrets,
    delta: Delta,
}

impl<'a> From<&'a Regrets> for Scratch<'a> {
    fn from(base: &'a Regrets) -> Self {
        Self {
            base,
            delta: Delta::default(),
        }
    }
}

impl Scratch<'_> {
    pub fn into_delta(self) -> Delta {
        self.delta
    }
}

impl Memory for Scratch<'_> {
    fn regret(&self, info: &Info, action: &Action) -> Utility {
        self.base.regret(info, action) + self.delta.get(info, action).0
    }
    fn weight(&self, info: &Info, action: &Action) -> Probability {
        self.base.weight(info, action) + self.delta.get(info, action).1
    }
}

impl Ledger for Scratch<'_> {
    fn update_regret(&mut self, info: &Info, action: &Action, value: Utility) {
        self.delta.update_regret(info, action, value);
    }
    fn add_strategy(&mut self, info: &Info, strategy: &Policy, weight: Probability) {
        self.delta.add_strategy(info, strategy, weight);
    }
}
