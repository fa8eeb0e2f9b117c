use blueprint_solver::cards::board::Board;
use blueprint_solver::cards::hole::Hole;
use blueprint_solver::cards::street::Street;
use blueprint_solver::clustering::abstraction::Abstraction;
use blueprint_solver::clustering::config::BucketConfig;
use blueprint_solver::save::disk::Disk;

fn config() -> BucketConfig {
    BucketConfig {
        k: [8, 8, 8, 8],
        samples: 50,
        seed: 42,
        iterations: 4,
        rollouts: 4,
        opponents: 2,
    }
}

#[test]
fn preflop_bucket_is_stable() {
    let abstraction = Abstraction::build(&config()).unwrap();
    let hole = Hole::try_from("AsKs").unwrap();
    let first = abstraction.get_bucket(hole, Board::empty(), Street::Pref).unwrap();
    let again = abstraction.get_bucket(hole, Board::empty(), Street::Pref).unwrap();
    assert_eq!(first, again);
    assert!(first < 8);
}

#[test]
fn equal_seeds_fit_equal_models() {
    let a = Abstraction::build(&config()).unwrap();
    let b = Abstraction::build(&config()).unwrap();
    assert_eq!(a.hash(), b.hash());
    let hole = Hole::try_from("7c2d").unwrap();
    let board = Board::try_from("AhKhQh").unwrap();
    assert_eq!(
        a.get_bucket(hole, board, Street::Flop).unwrap(),
        b.get_bucket(hole, board, Street::Flop).unwrap()
    );
}

#[test]
fn persisted_model_answers_the_same() {
    let abstraction = Abstraction::build(&config()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let ref path = dir.path().join("abstraction.bin");
    abstraction.save(path).unwrap();
    let loaded = Abstraction::load(path).unwrap();
    assert_eq!(loaded.hash(), abstraction.hash());
    let hole = Hole::try_from("JdTd").unwrap();
    let board = Board::try_from("9d8c2s3h").unwrap();
    assert_eq!(
        loaded.get_bucket(hole, board, Street::Turn).unwrap(),
        abstraction.get_bucket(hole, board, Street::Turn).unwrap()
    );
}
