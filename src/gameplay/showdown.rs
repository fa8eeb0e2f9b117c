use super::seat::State;
use super::settlement::Settlement;
use crate::Chips;

/// ephemeral structure that splits the pot into side pots.
///
/// the pot is sliced at every distinct contribution level. each slice
/// goes to the strongest unfolded hands that covered it; odd chips go
/// to the first winners in seat order. a slice nobody unfolded covered
/// is returned to whoever paid into it.
pub struct Showdown {
    settlements: Vec<Settlement>,
}

impl From<Vec<Settlement>> for Showdown {
    fn from(settlements: Vec<Settlement>) -> Self {
        Self { settlements }
    }
}

impl Showdown {
    pub fn settle(mut self) -> Vec<Settlement> {
        let mut levels = self
            .settlements
            .iter()
            .map(|s| s.risked)
            .filter(|r| *r > 0)
            .collect::<Vec<_>>();
        levels.sort_unstable();
        levels.dedup();
        let mut prev = 0;
        for next in levels {
            self.distribute(prev, next);
            prev = next;
        }
        self.settlements
    }

    fn distribute(&mut self, prev: Chips, next: Chips) {
        let slice = |s: &Settlement| s.risked.min(next) - s.risked.min(prev);
        let chips = self.settlements.iter().map(slice).sum::<Chips>();
        let eligible = self
            .settlements
            .iter()
            .enumerate()
            .filter(|(_, s)| s.status != State::Folding)
            .filter(|(_, s)| s.risked >= next)
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        if eligible.is_empty() {
            for s in self.settlements.iter_mut() {
                s.reward += slice(s);
            }
            return;
        }
        let best = eligible
            .iter()
            .map(|i| self.settlements[*i].strength)
            .max()
            .flatten();
        let winners = eligible
            .into_iter()
            .filter(|i| self.settlements[*i].strength == best)
            .collect::<Vec<_>>();
        let share = chips / winners.len() as Chips;
        let remainder = chips as usize % winners.len();
        for (n, i) in winners.into_iter().enumerate() {
            self.settlements[i].reward += share + if n < remainder { 1 } else { 0 };
        }
    }
}
