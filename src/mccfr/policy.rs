use crate::POLICY_TOLERANCE;
use crate::Probability;
use crate::Utility;
use crate::gameplay::action::Action;
use rand::Rng;

/// a distribution over abstract actions
#[derive(Debug, Clone, PartialEq)]
pub struct Policy(Vec<(Action, Probability)>);

impl Policy {
    pub fn uniform(actions: &[Action]) -> Self {
        let p = 1. / actions.len() as Probability;
        Self(actions.iter().map(|a| (*a, p)).collect())
    }
    /// regret matching: proportional to positive regret,
    /// uniform when no action has any
    pub fn matching(actions: &[Action], regrets: &[Utility]) -> Self {
        Self::normalized(
            actions
                .iter()
                .copied()
                .zip(regrets.iter().map(|r| r.max(0.)))
                .collect(),
        )
    }
    /// scale non-negative weights to sum to one, uniform if they sum to zero
    pub fn normalized(weights: Vec<(Action, Probability)>) -> Self {
        let sum = weights.iter().map(|(_, w)| w.max(0.)).sum::<Probability>();
        if sum > 0. {
            Self(weights.into_iter().map(|(a, w)| (a, w.max(0.) / sum)).collect())
        } else {
            let actions = weights.into_iter().map(|(a, _)| a).collect::<Vec<_>>();
            Self::uniform(&actions)
        }
    }

    pub fn get(&self, action: &Action) -> Probability {
        self.0
            .iter()
            .find(|(a, _)| a == action)
            .map(|(_, p)| *p)
            .unwrap_or(0.)
    }
    pub fn actions(&self) -> Vec<Action> {
        self.0.iter().map(|(a, _)| *a).collect()
    }
    pub fn probabilities(&self) -> Vec<Probability> {
        self.0.iter().map(|(_, p)| *p).collect()
    }
    pub fn iter(&self) -> impl Iterator<Item = &(Action, Probability)> {
        self.0.iter()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// most likely action, earliest on ties
    pub fn argmax(&self) -> Option<Action> {
        self.0
            .iter()
            .fold(None, |best: Option<(Action, Probability)>, (a, p)| match best {
                Some((_, q)) if q >= *p => best,
                _ => Some((*a, *p)),
            })
            .map(|(a, _)| a)
    }
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Action {
        let ref mut u = rng.random::<Probability>();
        self.0
            .iter()
            .find(|(_, p)| {
                *u -= p;
                *u < 0.
            })
            .or(self.0.last())
            .map(|(a, _)| *a)
            .expect("non-empty policy")
    }
    /// non-negative and sums to one
    pub fn is_distribution(&self) -> bool {
        let sum = self.0.iter().map(|(_, p)| p).sum::<Probability>();
        !self.0.is_empty()
            && self.0.iter().all(|(_, p)| *p >= 0.)
            && (sum - 1.).abs() <= POLICY_TOLERANCE
    }
}

impl From<Vec<(Action, Probability)>> for Policy {
    fn from(pairs: Vec<(Action, Probability)>) -> Self {
        Self(pairs)
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (a, p) in self.0.iter() {
            write!(f, "{}:{:.3} ", a, p)?;
        }
        Ok(())
    }
}
