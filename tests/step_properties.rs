use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use grid_snake::board::{Board, Collision, EatOutcome};
use grid_snake::config::GridSize;
use grid_snake::food::FoodKind;
use grid_snake::game::{GameSession, GameStatus};
use grid_snake::score::MemoryStore;
use grid_snake::snake::Position;
use grid_snake::steering::{Direction, DirectionController};

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

const GRID: GridSize = GridSize {
    width: 12,
    height: 12,
};

fn cells(board: &Board) -> Vec<Position> {
    board.snake.segments().copied().collect()
}

#[test]
fn random_play_keeps_step_invariants() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut board = Board::new(GRID, &mut rng);
    let mut steering = DirectionController::new(Direction::Right);
    let mut activations = 0;

    for tick in 0..20_000u64 {
        let now = Duration::from_millis(tick * 100);
        if rng.gen_bool(0.3) {
            let _ = steering.request_turn(DIRECTIONS[rng.gen_range(0..4)]);
        }
        let direction = steering.committed();

        let before = cells(&board);
        let score_before = board.score;
        let eaten_before = board.foods_eaten;
        let report = board.step(direction, &mut rng, now);
        steering.end_tick();
        let after = cells(&board);

        match report.eat {
            EatOutcome::Nothing => {
                assert_eq!(after.len(), before.len());
                assert_eq!(after[0], before[0].step(direction));
                assert_eq!(&after[1..], &before[..before.len() - 1]);
                assert_eq!(board.score, score_before);
            }
            EatOutcome::Ate(FoodKind::Regular) => {
                assert_eq!(board.score, score_before + 10);
                assert_eq!(after.len(), before.len() + 1);
                assert_eq!(board.foods_eaten, eaten_before + 1);
                assert_eq!(report.bonus_activated, board.foods_eaten % 5 == 0);
                if let Some(food) = board.food {
                    assert!(!board.snake.occupies(food));
                    assert_ne!(Some(food), board.bonus.map(|bonus| bonus.position));
                }
            }
            EatOutcome::Ate(FoodKind::Bonus) => {
                assert_eq!(board.score, score_before + 50);
                assert_eq!(after.len(), before.len() + 1);
                assert!(board.bonus.is_none());
            }
        }
        if report.bonus_activated {
            activations += 1;
        }

        if after.len() <= 4 {
            assert_ne!(report.collision, Some(Collision::SelfBody));
        }

        if report.collision.is_some() || report.board_filled {
            board = Board::new(GRID, &mut rng);
            steering = DirectionController::new(Direction::Right);
        } else {
            assert!(board.snake.is_contiguous());
            assert!(board.snake.segments().all(|cell| GRID.contains(*cell)));
        }
    }

    assert!(activations > 0, "long random play should reach a bonus");
}

#[test]
fn high_score_never_decreases_across_sessions() {
    let mut session = GameSession::with_seed(GRID, MemoryStore::new(), 77);
    let mut rng = StdRng::seed_from_u64(78);
    let mut best = 0;
    let mut now = Duration::ZERO;

    for _ in 0..20 {
        session.start("Ada", now);
        for _ in 0..10_000 {
            if session.status() != GameStatus::Running {
                break;
            }
            now += Duration::from_millis(100);
            let _ = session.request_turn(DIRECTIONS[rng.gen_range(0..4)]);
            session.advance(now);

            let high = session.high_score().score;
            assert!(high >= best);
            let score = session.board().map_or(0, |board| board.score);
            assert!(high >= score);
            best = high;
        }
    }

    assert_eq!(
        session.store().high_score.as_ref().map(|record| record.score),
        (best > 0).then_some(best)
    );
}
