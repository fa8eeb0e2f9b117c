use super::info::Info;
use super::memory::Ledger;
use super::memory::Memory;
use super::policy::Policy;
use super::row::Entry;
use super::row::Row;
use crate::Probability;
use crate::Utility;
use crate::gameplay::action::Action;
use std::collections::HashMap;

/// The regret tracker.
///
/// Information sets are interned to dense ids on first touch; rows live
/// in an arena indexed by id and are never deleted. All mutation goes
/// through `&mut self`, so when shared behind a `RwLock` a discount or
/// merge is never observed half applied.
#[derive(Debug, Default, Clone)]
pub struct Regrets {
    index: HashMap<Info, usize>,
    rows: Vec<Row>,
}

impl Regrets {
    /// regret-matching strategy over the given actions
    pub fn get_strategy(&self, info: &Info, actions: &[Action]) -> Policy {
        self.strategy(info, actions)
    }
    pub fn num_infosets(&self) -> usize {
        self.rows.len()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&Info, &Row)> {
        self.index.iter().map(|(info, id)| (info, &self.rows[*id]))
    }
    pub fn row(&self, info: &Info) -> Option<&Row> {
        self.index.get(info).map(|id| &self.rows[*id])
    }
    /// multiply every accumulator by factor
    pub fn discount(&mut self, factor: f32) {
        debug_assert!((0. ..=1.).contains(&factor));
        self.rows.iter_mut().for_each(|row| row.scale(factor));
    }
    /// sum increments into the tracker, usually a worker's Delta
    pub fn merge<I>(&mut self, rows: I)
    where
        I: IntoIterator<Item = (Info, Row)>,
    {
        for (info, row) in rows {
            self.intern(info).absorb(&row);
        }
    }
    /// total absolute cumulative regret
    pub fn magnitude(&self) -> Utility {
        self.rows.iter().map(Row::magnitude).sum()
    }
    /// insert a whole row, used when restoring from disk
    pub fn restore(&mut self, info: Info, row: Row) {
        *self.intern(info) = row;
    }

    fn intern(&mut self, info: Info) -> &mut Row {
        let id = match self.index.get(&info) {
            Some(id) => *id,
            None => {
                let id = self.rows.len();
                self.index.insert(info, id);
                self.rows.push(Row::default());
                id
            }
        };
        &mut self.rows[id]
    }
    fn entry(&self, info: &Info, action: &Action) -> Entry {
        self.row(info)
            .and_then(|row| row.get(action))
            .copied()
            .unwrap_or_default()
    }
}

impl Memory for Regrets {
    fn regret(&self, info: &Info, action: &Action) -> Utility {
        self.entry(info, action).regret
    }
    fn weight(&self, info: &Info, action: &Action) -> Probability {
        self.entry(info, action).weight
    }
}

impl Ledger for Regrets {
    fn update_regret(&mut self, info: &Info, action: &Action, value: Utility) {
        self.intern(*info).entry(*action).regret += value;
    }
    fn add_strategy(&mut self, info: &Info, strategy: &Policy, weight: Probability) {
        let row = self.intern(*info);
        for (action, p) in strategy.iter() {
            row.entry(*action).weight += weight * p;
        }
    }
}
