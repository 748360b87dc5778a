use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::config::{BONUS_FOOD_EVERY, GridSize, INITIAL_SNAKE_LENGTH, SELF_COLLISION_SKIP};
use crate::food::{BonusFood, FoodKind, spawn_position};
use crate::snake::{Position, Snake};
use crate::steering::Direction;

/// What the head landed on during a step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EatOutcome {
    Nothing,
    Ate(FoodKind),
}

/// Why a step ended the run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collision {
    Wall,
    SelfBody,
}

/// Everything a single step changed, for the session to act on.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct StepReport {
    pub eat: EatOutcome,
    pub collision: Option<Collision>,
    /// Bonus food was (re)activated by this step.
    pub bonus_activated: bool,
    /// Regular food could not be relocated because no free cell is left.
    pub board_filled: bool,
}

/// Entity state owned by one session.
#[derive(Debug, Clone)]
pub struct Board {
    pub grid: GridSize,
    pub snake: Snake,
    /// Always present while running, unless the snake covers every free cell.
    pub food: Option<Position>,
    pub bonus: Option<BonusFood>,
    pub score: u32,
    pub foods_eaten: u32,
}

impl Board {
    /// Lays out a fresh board: a straight snake centred on the grid facing
    /// right, and one regular food.
    ///
    /// Narrow grids get a shorter snake so every segment stays on the board.
    #[must_use]
    pub fn new<R: Rng + ?Sized>(grid: GridSize, rng: &mut R) -> Self {
        let head = grid.center();
        let fits = usize::try_from(head.x).unwrap_or(0) + 1;
        let snake = Snake::straight(head, Direction::Right, INITIAL_SNAKE_LENGTH.min(fits));
        let food = spawn_position(rng, grid, &snake, &[]);

        Self {
            grid,
            snake,
            food,
            bonus: None,
            score: 0,
            foods_eaten: 0,
        }
    }

    /// Builds a board from explicit parts, for scenarios and tests.
    #[must_use]
    pub fn from_parts(grid: GridSize, snake: Snake, food: Option<Position>) -> Self {
        Self {
            grid,
            snake,
            food,
            bonus: None,
            score: 0,
            foods_eaten: 0,
        }
    }

    /// Advances the board by one tick in `direction`.
    ///
    /// The move is applied even when it collides, so the head ends up on the
    /// colliding cell.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        direction: Direction,
        rng: &mut R,
        now: Duration,
    ) -> StepReport {
        let new_head = self.snake.head().step(direction);
        self.snake.push_head(new_head);

        let mut report = StepReport {
            eat: self.eat_outcome(new_head),
            collision: None,
            bonus_activated: false,
            board_filled: false,
        };

        match report.eat {
            EatOutcome::Ate(FoodKind::Regular) => {
                self.score += FoodKind::Regular.points();
                self.foods_eaten += 1;
                debug!(score = self.score, eaten = self.foods_eaten, "regular food eaten");

                if self.foods_eaten % BONUS_FOOD_EVERY == 0 {
                    report.bonus_activated = self.activate_bonus(rng, now, new_head);
                }

                let exclusions: Vec<Position> = self.bonus.iter().map(|bonus| bonus.position).collect();
                self.food = spawn_position(rng, self.grid, &self.snake, &exclusions);
                report.board_filled = self.food.is_none();
            }
            EatOutcome::Ate(FoodKind::Bonus) => {
                self.score += FoodKind::Bonus.points();
                self.bonus = None;
                debug!(score = self.score, "bonus food eaten");
            }
            EatOutcome::Nothing => self.snake.drop_tail(),
        }

        report.collision = self.collision();
        report
    }

    /// Clears bonus food; called when its lifetime runs out.
    pub fn expire_bonus(&mut self) -> bool {
        self.bonus.take().is_some()
    }

    /// Returns the cells currently holding food of either kind.
    #[must_use]
    pub fn food_positions(&self) -> Vec<Position> {
        self.food
            .into_iter()
            .chain(self.bonus.map(|bonus| bonus.position))
            .collect()
    }

    fn eat_outcome(&self, head: Position) -> EatOutcome {
        if self.food == Some(head) {
            return EatOutcome::Ate(FoodKind::Regular);
        }
        match self.bonus {
            Some(bonus) if bonus.position == head => EatOutcome::Ate(FoodKind::Bonus),
            _ => EatOutcome::Nothing,
        }
    }

    fn activate_bonus<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now: Duration,
        eaten_food: Position,
    ) -> bool {
        let Some(position) = spawn_position(rng, self.grid, &self.snake, &[eaten_food]) else {
            debug!("no free cell for bonus food");
            return false;
        };

        self.bonus = Some(BonusFood {
            position,
            activated_at: now,
        });
        debug!(x = position.x, y = position.y, "bonus food activated");
        true
    }

    fn collision(&self) -> Option<Collision> {
        if !self.grid.contains(self.snake.head()) {
            return Some(Collision::Wall);
        }
        if self.snake.head_hits_body(SELF_COLLISION_SKIP) {
            return Some(Collision::SelfBody);
        }
        None
    }
}
