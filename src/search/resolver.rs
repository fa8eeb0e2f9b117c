use super::config::ResolverConfig;
use super::phase::Phase;
use super::resolution::Resolution;
use super::subgame::Edge;
use super::subgame::Kind;
use super::subgame::Subgame;
use crate::N;
use crate::Utility;
use crate::blueprint::blueprint::Blueprint;
use crate::cards::hole::Hole;
use crate::clustering::abstraction::Abstraction;
use crate::evaluation::leaf::Leaf;
use crate::gameplay::action::Action;
use crate::gameplay::config::GameConfig;
use crate::gameplay::deal::Deal;
use crate::gameplay::table::Table;
use crate::gameplay::turn::Turn;
use crate::mccfr::encoder::Encoder;
use crate::mccfr::info::Info;
use crate::mccfr::memory::Ledger;
use crate::mccfr::memory::Memory;
use crate::mccfr::policy::Policy;
use crate::mccfr::regrets::Regrets;
use crate::mccfr::spot::Spot;
use petgraph::graph::NodeIndex;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::time::Duration;
use std::time::Instant;

/// Real-time refinement of the blueprint at a live decision.
///
/// A resolve builds the public subgame below the decision, then runs
/// external-sampling CFR on it with a fresh regret table: each iteration
/// samples the opponent's hole and the unseen board conditioned on what
/// the hero sees, and walks once for each player. Leaves at the depth
/// limit are valued by the leaf evaluator. The clock is only read between
/// iterations, so an iteration in flight always completes.
pub struct Resolver<'a> {
    config: ResolverConfig,
    game: GameConfig,
    abstraction: &'a Abstraction,
    blueprint: &'a Blueprint,
    leaf: &'a dyn Leaf,
}

impl<'a> Resolver<'a> {
    pub fn new(
        config: ResolverConfig,
        game: GameConfig,
        abstraction: &'a Abstraction,
        blueprint: &'a Blueprint,
        leaf: &'a dyn Leaf,
    ) -> crate::Result<Self> {
        config.validate()?;
        game.validate()?;
        blueprint.check(abstraction.hash())?;
        Ok(Self {
            config,
            game,
            abstraction,
            blueprint,
            leaf,
        })
    }

    /// solve the decision described by the table, falling back to the
    /// blueprint when anything goes wrong and fallback is enabled
    pub fn resolve(&self, table: &Table, hole: Hole, history: &[Action]) -> crate::Result<Resolution> {
        let started = Instant::now();
        let attempt = self.build_subgame(table, hole, history).and_then(|ref subgame| {
            let ref info = self.root_info(subgame)?;
            self.solve(subgame, info, self.config.budget_ms)
        });
        match attempt {
            Ok(resolution) => {
                Phase::Return.enter();
                Ok(resolution)
            }
            Err(e) if self.config.fallback_to_blueprint => {
                log::warn!("{:<32}{}", "resolver    fallback", e);
                let resolution = self.fallback(table, hole, history, started).map_err(|_| e)?;
                Phase::Return.enter();
                Ok(resolution)
            }
            Err(e) => Err(e),
        }
    }

    pub fn build_subgame(&self, table: &Table, hole: Hole, history: &[Action]) -> crate::Result<Subgame> {
        Phase::Build.enter();
        let root = Spot::replay(&self.game, table, history)?;
        Subgame::grow(root, hole, table.board, self.config.depth_limit, self.config.max_nodes)
    }

    /// the hero's information set at the subgame root
    pub fn root_info(&self, subgame: &Subgame) -> crate::Result<Info> {
        let root = subgame.node(subgame.root()).spot();
        let street = root.game().street();
        let bucket = self.abstraction.get_bucket(subgame.hole(), subgame.board(), street)?;
        Ok(Info::new(subgame.hero(), street, bucket, root.history()))
    }

    pub fn solve(&self, subgame: &Subgame, info: &Info, budget_ms: u64) -> crate::Result<Resolution> {
        Phase::Solve.enter();
        let started = Instant::now();
        let budget = Duration::from_millis(budget_ms);
        let root = subgame.node(subgame.root()).spot();
        if info.player() != subgame.hero() || info.history() != root.history() {
            return Err(crate::Error::Build(format!("{} is not the subgame root", info)));
        }
        let ref actions = root.legal();
        let mut regrets = Regrets::default();
        let mut iterations = 0;
        let phase = loop {
            if iterations >= self.config.max_iterations {
                break Phase::Converged;
            }
            if iterations >= self.config.min_iterations && started.elapsed() >= budget {
                break Phase::Timeout;
            }
            self.iterate(subgame, &mut regrets, iterations)?;
            iterations += 1;
        }
        .enter();
        let average = regrets.average(info, actions);
        let policy = match average.is_distribution() {
            true => average,
            false => self.blueprint.policy_or_uniform(info, actions),
        };
        log::debug!("{:<32}{} in {:?}", "resolver    iterations", iterations, started.elapsed());
        Ok(Resolution {
            policy,
            phase,
            iterations,
            elapsed: started.elapsed(),
        })
    }

    /// blueprint policy at the decision the history leads to.
    /// the table is only consulted for the board
    fn fallback(&self, table: &Table, hole: Hole, history: &[Action], started: Instant) -> crate::Result<Resolution> {
        Phase::Fallback.enter();
        let root = Spot::follow(&self.game, history)?;
        let actor = match root.turn() {
            Turn::Choice(p) => p,
            turn => return Err(crate::Error::Build(format!("history ends at {}, not a decision", turn))),
        };
        let street = root.game().street();
        let bucket = self.abstraction.get_bucket(hole, table.board, street)?;
        let info = Info::new(actor, street, bucket, root.history());
        Ok(Resolution {
            policy: self.blueprint.policy_or_uniform(&info, &root.legal()),
            phase: Phase::Fallback,
            iterations: 0,
            elapsed: started.elapsed(),
        })
    }

    fn iterate(&self, subgame: &Subgame, regrets: &mut Regrets, iteration: usize) -> crate::Result<()> {
        let ref mut rng = SmallRng::seed_from_u64(crate::seed((self.config.seed, iteration)));
        let deal = Deal::conditioned(subgame.hero(), subgame.hole(), subgame.board(), rng);
        let ref mut encoder = Encoder::new(self.abstraction, deal);
        for walker in 0..N {
            self.walk(subgame, regrets, encoder, rng, subgame.root(), walker)?;
        }
        Ok(())
    }

    fn walk(
        &self,
        subgame: &Subgame,
        regrets: &mut Regrets,
        encoder: &mut Encoder,
        rng: &mut SmallRng,
        index: NodeIndex,
        walker: usize,
    ) -> crate::Result<Utility> {
        let node = subgame.node(index);
        match node.kind() {
            Kind::Terminal => Ok(node.spot().game().payoff(encoder.deal(), walker)),
            Kind::Leaf => self.leaf.value(node.spot(), encoder, walker, rng),
            Kind::Chance => match subgame.children(index).first() {
                Some((_, child)) => self.walk(subgame, regrets, encoder, rng, *child, walker),
                None => Err(crate::Error::Build("chance node without a deal".into())),
            },
            Kind::Choice(player) => {
                let ref info = encoder.info(node.spot(), player);
                let children = subgame.children(index);
                let actions = children
                    .iter()
                    .filter_map(|(edge, _)| match edge {
                        Edge::Act(action) => Some(*action),
                        Edge::Deal => None,
                    })
                    .collect::<Vec<Action>>();
                let strategy = self.strategy(regrets, info, &actions);
                if player == walker {
                    let mut values = Vec::with_capacity(children.len());
                    for (_, child) in children.iter() {
                        values.push(self.walk(subgame, regrets, encoder, rng, *child, walker)?);
                    }
                    let value = strategy
                        .iter()
                        .zip(values.iter())
                        .map(|((_, p), v)| p * v)
                        .sum::<Utility>();
                    for (action, v) in actions.iter().zip(values) {
                        regrets.update_regret(info, action, v - value);
                    }
                    Ok(value)
                } else {
                    regrets.add_strategy(info, &strategy, 1.);
                    let action = strategy.sample(rng);
                    let child = children
                        .iter()
                        .find(|(edge, _)| *edge == Edge::Act(action))
                        .map(|(_, child)| *child)
                        .ok_or_else(|| crate::Error::Build(format!("{} missing below {}", action, info)))?;
                    self.walk(subgame, regrets, encoder, rng, child, walker)
                }
            }
        }
    }

    /// regret matching, or the blueprint where no action has positive regret
    fn strategy(&self, regrets: &Regrets, info: &Info, actions: &[Action]) -> Policy {
        match actions.iter().any(|a| regrets.regret(info, a) > 0.) {
            true => regrets.strategy(info, actions),
            false => self.blueprint.policy_or_uniform(info, actions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::board::Board;
    use crate::clustering::config::BucketConfig;
    use crate::evaluation::rollout::Rollout;
    use crate::mccfr::spot::Spot;
    use rand::rngs::SmallRng;
    use std::sync::Arc;

    struct Broken;
    impl Leaf for Broken {
        fn value(&self, _: &Spot, _: &mut Encoder, _: usize, _: &mut SmallRng) -> crate::Result<Utility> {
            Err(crate::Error::Evaluator("offline".into()))
        }
    }

    fn abstraction() -> Abstraction {
        Abstraction::build(&BucketConfig {
            k: [3, 3, 3, 3],
            samples: 24,
            seed: 21,
            iterations: 2,
            rollouts: 2,
            opponents: 1,
        })
        .unwrap()
    }

    fn table() -> (Table, Vec<Action>) {
        let ref game = GameConfig::default();
        let history = vec![Action::Call, Action::Check];
        let spot = Spot::root(game).apply(Action::Call).apply(Action::Check).reveal();
        let board = Board::try_from("Qs7d2c").unwrap();
        (Table::observe(spot.game(), board), history)
    }

    #[test]
    fn solves_to_a_distribution() {
        let ref abstraction = abstraction();
        let blueprint = Arc::new(Blueprint::snapshot(&Regrets::default(), abstraction.hash(), 0));
        let ref leaf = Rollout::new(blueprint.clone(), 1);
        let config = ResolverConfig {
            min_iterations: 8,
            max_iterations: 8,
            ..ResolverConfig::default()
        };
        let resolver = Resolver::new(config, GameConfig::default(), abstraction, &blueprint, leaf).unwrap();
        let (ref table, ref history) = table();
        let hole = Hole::try_from("AsKs").unwrap();
        let resolution = resolver.resolve(table, hole, history).unwrap();
        assert_eq!(resolution.phase, Phase::Converged);
        assert_eq!(resolution.iterations, 8);
        assert!(resolution.policy.is_distribution());
        assert!(resolution.action().is_some());
    }

    #[test]
    fn broken_leaf_falls_back() {
        let ref abstraction = abstraction();
        let ref blueprint = Blueprint::snapshot(&Regrets::default(), abstraction.hash(), 0);
        let (ref table, ref history) = table();
        let hole = Hole::try_from("AsKs").unwrap();
        let config = ResolverConfig {
            depth_limit: 0,
            ..ResolverConfig::default()
        };
        let resolver = Resolver::new(config.clone(), GameConfig::default(), abstraction, blueprint, &Broken).unwrap();
        let resolution = resolver.resolve(table, hole, history).unwrap();
        assert!(resolution.is_fallback());
        assert!(resolution.policy.is_distribution());

        let strict = ResolverConfig {
            fallback_to_blueprint: false,
            ..config
        };
        let resolver = Resolver::new(strict, GameConfig::default(), abstraction, blueprint, &Broken).unwrap();
        assert!(matches!(
            resolver.resolve(table, hole, history),
            Err(crate::Error::Evaluator(_))
        ));
    }

    #[test]
    fn degenerate_nodes_follow_the_blueprint() {
        let ref abstraction = abstraction();
        let (_, ref history) = table();
        let spot = Spot::follow(&GameConfig::default(), history).unwrap();
        let ref actions = spot.legal();
        let ref info = Info::new(1, spot.game().street(), 0, spot.history());
        let mut trained = Regrets::default();
        let pure = Policy::normalized(
            actions
                .iter()
                .enumerate()
                .map(|(i, a)| (*a, if i == 0 { 1. } else { 0. }))
                .collect(),
        );
        trained.add_strategy(info, &pure, 1.);
        let ref blueprint = Blueprint::snapshot(&trained, abstraction.hash(), 0);
        let resolver = Resolver::new(ResolverConfig::default(), GameConfig::default(), abstraction, blueprint, &Broken).unwrap();

        let mut local = Regrets::default();
        let strategy = resolver.strategy(&local, info, actions);
        assert_eq!(strategy.get(&actions[0]), 1.);

        local.update_regret(info, &actions[1], 3.);
        let strategy = resolver.strategy(&local, info, actions);
        assert_eq!(strategy.get(&actions[1]), 1.);
        assert_eq!(strategy.get(&actions[0]), 0.);
    }

    #[test]
    fn foreign_blueprint_rejected() {
        let ref abstraction = abstraction();
        let ref blueprint = Blueprint::snapshot(&Regrets::default(), abstraction.hash() ^ 1, 0);
        let result = Resolver::new(ResolverConfig::default(), GameConfig::default(), abstraction, blueprint, &Broken);
        assert!(matches!(result, Err(crate::Error::AbstractionMismatch { .. })));
    }
}
