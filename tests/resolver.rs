use blueprint_solver::blueprint::blueprint::Blueprint;
use blueprint_solver::cards::board::Board;
use blueprint_solver::cards::hole::Hole;
use blueprint_solver::clustering::abstraction::Abstraction;
use blueprint_solver::clustering::config::BucketConfig;
use blueprint_solver::evaluation::regression::Regression;
use blueprint_solver::evaluation::regression::Learned;
use blueprint_solver::evaluation::rollout::Rollout;
use blueprint_solver::gameplay::action::Action;
use blueprint_solver::gameplay::config::GameConfig;
use blueprint_solver::gameplay::table::Table;
use blueprint_solver::mccfr::regrets::Regrets;
use blueprint_solver::mccfr::spot::Spot;
use blueprint_solver::search::config::ResolverConfig;
use blueprint_solver::search::phase::Phase;
use blueprint_solver::search::resolver::Resolver;
use std::sync::Arc;

fn abstraction() -> Abstraction {
    Abstraction::build(&BucketConfig {
        k: [3, 3, 3, 3],
        samples: 24,
        seed: 5,
        iterations: 2,
        rollouts: 2,
        opponents: 1,
    })
    .unwrap()
}

fn flop() -> (Table, Vec<Action>, Hole) {
    let spot = Spot::root(&GameConfig::default())
        .apply(Action::Call)
        .apply(Action::Check)
        .reveal();
    let board = Board::try_from("Th9h2c").unwrap();
    let table = Table::observe(spot.game(), board);
    (table, vec![Action::Call, Action::Check], Hole::try_from("JhQh").unwrap())
}

#[test]
fn iteration_floor_beats_the_budget() {
    let ref abstraction = abstraction();
    let blueprint = Arc::new(Blueprint::snapshot(&Regrets::default(), abstraction.hash(), 0));
    let ref leaf = Rollout::new(blueprint.clone(), 1);
    let config = ResolverConfig {
        budget_ms: 1,
        min_iterations: 50,
        ..ResolverConfig::default()
    };
    let resolver = Resolver::new(config, GameConfig::default(), abstraction, &blueprint, leaf).unwrap();
    let (ref table, ref history, hole) = flop();
    let ref subgame = resolver.build_subgame(table, hole, history).unwrap();
    let ref info = resolver.root_info(subgame).unwrap();
    let resolution = resolver.solve(subgame, info, 1).unwrap();
    assert!(resolution.iterations >= 50);
    assert!(resolution.phase == Phase::Timeout || resolution.phase == Phase::Converged);
    assert!(resolution.policy.is_distribution());
    assert!(resolution.elapsed > std::time::Duration::ZERO);
}

#[test]
fn inconsistent_history_falls_back() {
    let ref abstraction = abstraction();
    let blueprint = Arc::new(Blueprint::snapshot(&Regrets::default(), abstraction.hash(), 0));
    let ref leaf = Rollout::new(blueprint.clone(), 1);
    let resolver = Resolver::new(ResolverConfig::default(), GameConfig::default(), abstraction, &blueprint, leaf).unwrap();
    let (mut table, history, hole) = flop();
    table.pot += 2;
    assert!(resolver.build_subgame(&table, hole, &history).is_err());
    let resolution = resolver.resolve(&table, hole, &history).unwrap();
    assert!(resolution.is_fallback());
    assert_eq!(resolution.iterations, 0);
    assert!(resolution.policy.is_distribution());
}

#[test]
fn illegal_history_is_an_error_even_with_fallback() {
    let ref abstraction = abstraction();
    let blueprint = Arc::new(Blueprint::snapshot(&Regrets::default(), abstraction.hash(), 0));
    let ref leaf = Rollout::new(blueprint.clone(), 1);
    let resolver = Resolver::new(ResolverConfig::default(), GameConfig::default(), abstraction, &blueprint, leaf).unwrap();
    let (table, _, hole) = flop();
    let history = vec![Action::Check];
    assert!(resolver.resolve(&table, hole, &history).is_err());
}

#[test]
fn learned_leaves_resolve() {
    let ref abstraction = abstraction();
    let ref game = GameConfig::default();
    let ref blueprint = Blueprint::snapshot(&Regrets::default(), abstraction.hash(), 0);
    let samples = Regression::collect(game, abstraction, blueprint, 64, 3);
    assert!(!samples.is_empty());
    let model = Regression::fit(&samples, game.stack, 200, 0.1).unwrap();
    let ref leaf = Learned::new(model, abstraction);
    let config = ResolverConfig {
        min_iterations: 20,
        max_iterations: 20,
        ..ResolverConfig::default()
    };
    let resolver = Resolver::new(config, game.clone(), abstraction, blueprint, leaf).unwrap();
    let (ref table, ref history, hole) = flop();
    let resolution = resolver.resolve(table, hole, history).unwrap();
    assert_eq!(resolution.phase, Phase::Converged);
    assert_eq!(resolution.iterations, 20);
    assert!(resolution.policy.is_distribution());
}
