use serde::Deserialize;
use serde::Serialize;

/// when and how hard accumulated regrets and weights are shrunk.
///
/// linear discounting multiplies by t/(t+1) at the t-th interval, so
/// older iterations weigh proportionally less, as in Pluribus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Discount {
    Never,
    Constant { every: usize, factor: f32 },
    Linear { every: usize, until: usize },
}

impl Default for Discount {
    fn default() -> Self {
        Self::Linear {
            every: crate::CFR_DISCOUNT_INTERVAL,
            until: 0x40,
        }
    }
}

impl Discount {
    pub fn validate(&self) -> crate::Result<()> {
        match self {
            Self::Never => Ok(()),
            Self::Constant { every: 0, .. } | Self::Linear { every: 0, .. } => Err(
                crate::Error::Configuration("discount interval must be positive".into()),
            ),
            Self::Constant { factor, .. } if !(*factor > 0. && *factor < 1.) => Err(
                crate::Error::Configuration(format!("discount factor {} not in (0, 1)", factor)),
            ),
            _ => Ok(()),
        }
    }

    /// factor due once `iteration` iterations have completed, if any
    pub fn factor(&self, iteration: usize) -> Option<f32> {
        match *self {
            Self::Never => None,
            Self::Constant { every, factor } => (iteration > 0 && iteration % every == 0).then_some(factor),
            Self::Linear { every, until } => {
                let t = iteration / every;
                (iteration > 0 && iteration % every == 0 && t <= until)
                    .then(|| t as f32 / (t as f32 + 1.))
            }
        }
    }

    /// every factor due while the iteration count moved from `from` to `to`
    pub fn between(&self, from: usize, to: usize) -> Vec<f32> {
        match self {
            Self::Never => vec![],
            Self::Constant { every, .. } | Self::Linear { every, .. } => {
                let every = (*every).max(1);
                let first = (from / every + 1) * every;
                (first..=to)
                    .step_by(every)
                    .filter_map(|i| self.factor(i))
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_is_silent() {
        assert!(Discount::Never.between(0, 1_000_000).is_empty());
    }

    #[test]
    fn linear_factors() {
        let discount = Discount::Linear { every: 10, until: 3 };
        assert_eq!(discount.factor(5), None);
        assert_eq!(discount.factor(10), Some(0.5));
        assert_eq!(discount.factor(20), Some(2. / 3.));
        assert_eq!(discount.factor(40), None);
    }

    #[test]
    fn crossing_several_intervals() {
        let discount = Discount::Constant { every: 4, factor: 0.5 };
        assert_eq!(discount.between(3, 12), vec![0.5, 0.5, 0.5]);
        assert_eq!(discount.between(4, 7), Vec::<f32>::new());
    }

    #[test]
    fn invalid_schedules() {
        assert!(Discount::Constant { every: 0, factor: 0.5 }.validate().is_err());
        assert!(Discount::Constant { every: 4, factor: 1.0 }.validate().is_err());
        assert!(Discount::default().validate().is_ok());
    }
}
