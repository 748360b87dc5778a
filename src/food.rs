use std::time::Duration;

use rand::Rng;

use crate::config::{
    BONUS_FOOD_LIFETIME, BONUS_FOOD_POINTS, GridSize, MAX_SPAWN_ATTEMPTS, REGULAR_FOOD_POINTS,
};
use crate::snake::{Position, Snake};

/// Food type and associated metadata.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FoodKind {
    Regular,
    Bonus,
}

impl FoodKind {
    /// Returns the score value granted when eaten.
    #[must_use]
    pub fn points(self) -> u32 {
        match self {
            Self::Regular => REGULAR_FOOD_POINTS,
            Self::Bonus => BONUS_FOOD_POINTS,
        }
    }
}

/// Time-limited bonus food.
///
/// Expiry is driven by the session's bonus timer; `activated_at` is kept so
/// snapshots can report the remaining lifetime.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BonusFood {
    pub position: Position,
    pub activated_at: Duration,
}

impl BonusFood {
    /// Returns the lifetime left at `now`, saturating at zero.
    #[must_use]
    pub fn remaining(self, now: Duration) -> Duration {
        BONUS_FOOD_LIFETIME.saturating_sub(now.saturating_sub(self.activated_at))
    }
}

/// Picks a uniformly random cell that is neither on the snake nor in
/// `excluded`.
///
/// Random draws are tried first; once they keep hitting occupied cells the
/// remaining free cells are enumerated instead. Returns `None` only when the
/// board has no free cell left.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    grid: GridSize,
    snake: &Snake,
    excluded: &[Position],
) -> Option<Position> {
    let is_free = |position: Position| !snake.occupies(position) && !excluded.contains(&position);

    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let position = Position {
            x: rng.gen_range(0..i32::from(grid.width)),
            y: rng.gen_range(0..i32::from(grid.height)),
        };
        if is_free(position) {
            return Some(position);
        }
    }

    let candidates: Vec<Position> = grid.cells().filter(|cell| is_free(*cell)).collect();
    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GridSize;
    use crate::snake::{Position, Snake};
    use crate::steering::Direction;

    use super::{BonusFood, FoodKind, spawn_position};

    #[test]
    fn food_spawn_never_overlaps_snake_or_exclusions() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = GridSize {
            width: 8,
            height: 6,
        };
        let snake = Snake::straight(Position { x: 2, y: 0 }, Direction::Right, 3);
        let excluded = [Position { x: 4, y: 4 }];

        for _ in 0..200 {
            let food = spawn_position(&mut rng, grid, &snake, &excluded).expect("free cell");
            assert!(grid.contains(food));
            assert!(!snake.occupies(food));
            assert_ne!(food, excluded[0]);
        }
    }

    #[test]
    fn saturated_board_falls_back_to_the_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        let grid = GridSize {
            width: 3,
            height: 3,
        };
        // Serpentine over every cell except (2, 2).
        let snake = Snake::from_segments(vec![
            Position { x: 0, y: 0 },
            Position { x: 1, y: 0 },
            Position { x: 2, y: 0 },
            Position { x: 2, y: 1 },
            Position { x: 1, y: 1 },
            Position { x: 0, y: 1 },
            Position { x: 0, y: 2 },
            Position { x: 1, y: 2 },
        ])
        .expect("non-empty body");

        let food = spawn_position(&mut rng, grid, &snake, &[]);
        assert_eq!(food, Some(Position { x: 2, y: 2 }));

        let none = spawn_position(&mut rng, grid, &snake, &[Position { x: 2, y: 2 }]);
        assert_eq!(none, None);
    }

    #[test]
    fn bonus_food_has_higher_points() {
        assert_eq!(FoodKind::Regular.points(), 10);
        assert_eq!(FoodKind::Bonus.points(), 50);
    }

    #[test]
    fn bonus_remaining_lifetime_counts_down() {
        let bonus = BonusFood {
            position: Position { x: 1, y: 1 },
            activated_at: Duration::from_secs(10),
        };

        assert_eq!(bonus.remaining(Duration::from_secs(10)), Duration::from_secs(5));
        assert_eq!(bonus.remaining(Duration::from_secs(13)), Duration::from_secs(2));
        assert_eq!(bonus.remaining(Duration::from_secs(30)), Duration::ZERO);
    }
}
