use super::phase::Phase;
use crate::gameplay::action::Action;
use crate::mccfr::policy::Policy;
use std::time::Duration;

/// what the resolver hands back to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub policy: Policy,
    /// Timeout or Converged when solved, Fallback otherwise
    pub phase: Phase,
    pub iterations: usize,
    pub elapsed: Duration,
}

impl Resolution {
    /// the single most likely action
    pub fn action(&self) -> Option<Action> {
        self.policy.argmax()
    }
    pub fn is_fallback(&self) -> bool {
        self.phase == Phase::Fallback
    }
}
