criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        sampling_river_evaluation,
        sampling_river_features,
        enumerating_legal_actions,
        matching_regrets,
        traversing_mccfr_iteration,
        resolving_flop_subgame,
}

fn tiny() -> Abstraction {
    Abstraction::build(&BucketConfig {
        k: [4, 4, 4, 4],
        samples: 32,
        seed: 0,
        iterations: 4,
        rollouts: 4,
        opponents: 2,
    })
    .expect("valid bucket config")
}

fn sampling_river_evaluation(c: &mut criterion::Criterion) {
    let ref mut rng = SmallRng::seed_from_u64(0);
    let hand = Observation::random(Street::Rive, rng).hand();
    c.bench_function("evaluate a 7-card Hand", |b| b.iter(|| Strength::from(hand)));
}

fn sampling_river_features(c: &mut criterion::Criterion) {
    let ref mut rng = SmallRng::seed_from_u64(1);
    let ref observation = Observation::random(Street::Turn, rng);
    c.bench_function("compute Turn equity features", |b| {
        b.iter(|| Features::compute(observation, 0, 16, 4))
    });
}

fn enumerating_legal_actions(c: &mut criterion::Criterion) {
    let game = Game::root(&GameConfig::default());
    c.bench_function("enumerate preflop legal actions", |b| b.iter(|| game.legal()));
}

fn matching_regrets(c: &mut criterion::Criterion) {
    let actions = [Action::Fold, Action::Call, Action::Bet(Odds(1, 2)), Action::Shove];
    let regrets = [-3., 1., 4., 0.5];
    c.bench_function("regret match four actions", |b| {
        b.iter(|| Policy::matching(&actions, &regrets))
    });
}

fn traversing_mccfr_iteration(c: &mut criterion::Criterion) {
    let ref abstraction = tiny();
    let ref config = GameConfig::default();
    let traversal = Traversal::new(config, abstraction);
    let mut regrets = Regrets::default();
    let mut iteration = 0;
    c.bench_function("run one external sampling iteration", |b| {
        b.iter(|| {
            iteration += 1;
            traversal.iterate(&mut regrets, 0, iteration)
        })
    });
}

fn resolving_flop_subgame(c: &mut criterion::Criterion) {
    let ref abstraction = tiny();
    let blueprint = Arc::new(Blueprint::snapshot(&Regrets::default(), abstraction.hash(), 0));
    let ref leaf = Rollout::new(blueprint.clone(), 1);
    let config = ResolverConfig {
        min_iterations: 16,
        max_iterations: 16,
        ..ResolverConfig::default()
    };
    let resolver = Resolver::new(config, GameConfig::default(), abstraction, &blueprint, leaf)
        .expect("matching blueprint");
    let ref history = [Action::Call, Action::Check];
    let spot = Spot::root(&GameConfig::default())
        .apply(Action::Call)
        .apply(Action::Check)
        .reveal();
    let board = Board::try_from("Qs7d2c").expect("valid board");
    let ref table = Table::observe(spot.game(), board);
    let hole = Hole::try_from("AsKs").expect("valid hole");
    c.bench_function("resolve a flop subgame for 16 iterations", |b| {
        b.iter(|| resolver.resolve(table, hole, history))
    });
}

use blueprint_solver::blueprint::blueprint::Blueprint;
use blueprint_solver::cards::board::Board;
use blueprint_solver::cards::hole::Hole;
use blueprint_solver::cards::observation::Observation;
use blueprint_solver::cards::street::Street;
use blueprint_solver::cards::strength::Strength;
use blueprint_solver::clustering::abstraction::Abstraction;
use blueprint_solver::clustering::config::BucketConfig;
use blueprint_solver::clustering::features::Features;
use blueprint_solver::evaluation::rollout::Rollout;
use blueprint_solver::gameplay::action::Action;
use blueprint_solver::gameplay::config::GameConfig;
use blueprint_solver::gameplay::game::Game;
use blueprint_solver::gameplay::odds::Odds;
use blueprint_solver::gameplay::table::Table;
use blueprint_solver::mccfr::policy::Policy;
use blueprint_solver::mccfr::regrets::Regrets;
use blueprint_solver::mccfr::spot::Spot;
use blueprint_solver::mccfr::traversal::Traversal;
use blueprint_solver::search::config::ResolverConfig;
use blueprint_solver::search::resolver::Resolver;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::sync::Arc;
