/// where a resolve is in its lifecycle.
/// Build, then Solve, which ends in Timeout or Converged, then Return.
/// any failure on the way diverts to Fallback when allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Build,
    Solve,
    Timeout,
    Converged,
    Return,
    Fallback,
}

impl Phase {
    /// did the solver produce the returned distribution
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Timeout | Self::Converged)
    }
    pub fn enter(self) -> Self {
        log::debug!("{:<32}{}", "resolver    phase", self);
        self
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Build => write!(f, "build"),
            Self::Solve => write!(f, "solve"),
            Self::Timeout => write!(f, "timeout"),
            Self::Converged => write!(f, "converged"),
            Self::Return => write!(f, "return"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}
