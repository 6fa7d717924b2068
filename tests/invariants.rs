use std::collections::HashSet;

use grid_snake::autopilot::Autopilot;
use grid_snake::config::{BoundaryMode, EngineConfig};
use grid_snake::game::{GameEngine, TickOutcome};
use grid_snake::input::Direction;
use grid_snake::snapshot::Snapshot;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MAX_TICKS: usize = 400;

fn check_tick(before: &Snapshot, outcome: TickOutcome, after: &Snapshot) {
    match outcome {
        TickOutcome::Moved => {
            assert_eq!(after.snake.len(), before.snake.len());
            assert_eq!(after.score, before.score);
        }
        TickOutcome::Ate | TickOutcome::Won => {
            assert_eq!(after.snake.len(), before.snake.len() + 1);
            assert_eq!(after.score, before.score + 1);
        }
        TickOutcome::Died(_) => {
            assert!(!after.is_playing);
            assert_eq!(after.snake, before.snake);
            assert_eq!(after.score, before.score);
            assert_eq!(after.high_score, before.high_score.max(before.score));
        }
        TickOutcome::Idle => assert_eq!(after, before),
    }

    if after.is_playing {
        let unique: HashSet<_> = after.snake.iter().collect();
        assert_eq!(unique.len(), after.snake.len(), "snake overlaps itself");
        assert!(after.snake.iter().all(|cell| cell.is_within_bounds(after.grid_size)));

        let food = after.food.expect("food exists while playing");
        assert!(!after.occupies(food), "food placed on the snake");
        assert!(food.is_within_bounds(after.grid_size));
    }

    assert!(after.high_score >= before.high_score);
}

fn play_random_games(mode: BoundaryMode, seed: u64) {
    let config = EngineConfig {
        boundary_mode: mode,
        ..EngineConfig::with_grid_size(8)
    };
    let mut engine = GameEngine::with_seed(config, seed).expect("config should be valid");
    let mut inputs = StdRng::seed_from_u64(seed ^ 0x5eed);
    let mut best_score = 0;

    for _ in 0..5 {
        let initial_length = engine.restart().expect("restart should succeed").snake.len();

        for _ in 0..MAX_TICKS {
            let before = engine.snapshot();
            let applied = engine.snake().direction();
            let requested = Direction::ALL[inputs.gen_range(0..Direction::ALL.len())];
            engine.set_direction(requested);
            if requested == applied.opposite() {
                assert_eq!(engine.snake().pending_direction(), applied);
            }

            let outcome = engine.tick();
            let after = engine.snapshot();
            check_tick(&before, outcome, &after);
            assert_eq!(
                after.snake.len(),
                initial_length + usize::try_from(after.score).expect("score fits usize")
            );

            if !after.is_playing {
                best_score = best_score.max(after.score);
                break;
            }
        }

        assert_eq!(engine.high_score(), best_score);
    }
}

#[test]
fn random_play_in_wrap_mode_keeps_invariants() {
    for seed in 0..16 {
        play_random_games(BoundaryMode::Wrap, seed);
    }
}

#[test]
fn random_play_in_wall_mode_keeps_invariants() {
    for seed in 0..16 {
        play_random_games(BoundaryMode::Wall, seed);
    }
}

#[test]
fn autopilot_play_keeps_invariants() {
    for mode in [BoundaryMode::Wrap, BoundaryMode::Wall] {
        let config = EngineConfig {
            boundary_mode: mode,
            ..EngineConfig::with_grid_size(6)
        };
        let mut engine = GameEngine::with_seed(config, 99).expect("config should be valid");
        engine.restart().expect("restart should succeed");

        for _ in 0..2_000 {
            let before = engine.snapshot();
            if let Some(direction) = Autopilot.next_direction(&before, engine.snake().direction()) {
                engine.set_direction(direction);
            }
            let outcome = engine.tick();
            check_tick(&before, outcome, &engine.snapshot());
            if !engine.is_playing() {
                break;
            }
        }

        assert!(engine.score() > 0, "autopilot should eat at least once");
    }
}
