use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::board::{Board, Collision, EatOutcome};
use crate::config::{
    BONUS_FOOD_LIFETIME, GridSize, clamp_tick_interval_ms, normalize_player_name,
};
use crate::food::FoodKind;
use crate::score::{HighScoreRecord, Preferences, ProfileStore};
use crate::snake::Position;
use crate::steering::{Direction, DirectionController};
use crate::timer::{TimerHandle, TimerQueue};

/// Current high-level session state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Why the last session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameOverReason {
    Collision(Collision),
    /// The snake covers every cell that could hold food.
    BoardFilled,
}

/// Input events accepted by the session. Invalid ones are silent no-ops.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum GameInput {
    Turn(Direction),
    Start { name: String },
    Pause,
    Resume,
    TogglePause,
    /// Abandons the current run and returns to `Idle`.
    Stop,
    Resize { width: u16, height: u16 },
}

/// Full renderable state handed to the presentation layer.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snapshot {
    pub status: GameStatus,
    pub grid: GridSize,
    /// Head first; empty while idle.
    pub snake: Vec<Position>,
    pub direction: Direction,
    pub food: Option<Position>,
    pub bonus_food: Option<Position>,
    pub bonus_remaining: Option<Duration>,
    pub score: u32,
    pub foods_eaten: u32,
    pub tick_count: u64,
    pub high_score: HighScoreRecord,
    pub player_name: String,
    pub tick_interval_ms: u64,
    pub game_over_reason: Option<GameOverReason>,
}

/// Output events for the presentation layer.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum GameEvent {
    /// Emitted after every tick and every session-state transition.
    StateChanged(Snapshot),
}

/// Single controller owning all session and profile state.
///
/// Time is injected: callers pass a monotonic `now` into every time-aware
/// operation, and [`GameSession::advance`] fires whatever timers are due.
#[derive(Debug)]
pub struct GameSession<S: ProfileStore> {
    status: GameStatus,
    grid: GridSize,
    board: Option<Board>,
    steering: DirectionController,
    timers: TimerQueue,
    tick_timer: Option<TimerHandle>,
    bonus_timer: Option<TimerHandle>,
    tick_count: u64,
    game_over_reason: Option<GameOverReason>,
    high_score: HighScoreRecord,
    preferences: Preferences,
    rng: StdRng,
    store: S,
    events: Vec<GameEvent>,
    /// Latest time observed from the driver.
    clock: Duration,
}

impl<S: ProfileStore> GameSession<S> {
    /// Creates an idle session seeded from OS entropy.
    #[must_use]
    pub fn new(grid: GridSize, store: S) -> Self {
        Self::with_rng(grid, store, StdRng::from_entropy())
    }

    /// Creates a deterministic idle session for tests and reproducible runs.
    #[must_use]
    pub fn with_seed(grid: GridSize, store: S, seed: u64) -> Self {
        Self::with_rng(grid, store, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: GridSize, store: S, rng: StdRng) -> Self {
        let high_score = match store.load_high_score() {
            Ok(record) => record.unwrap_or_default(),
            Err(error) => {
                warn!(%error, "failed to load high score, starting from defaults");
                HighScoreRecord::default()
            }
        };
        let mut preferences = match store.load_preferences() {
            Ok(preferences) => preferences.unwrap_or_default(),
            Err(error) => {
                warn!(%error, "failed to load preferences, starting from defaults");
                Preferences::default()
            }
        };
        preferences.tick_interval_ms = clamp_tick_interval_ms(preferences.tick_interval_ms);
        preferences.player_name = normalize_player_name(&preferences.player_name);

        Self {
            status: GameStatus::Idle,
            grid,
            board: None,
            steering: DirectionController::new(Direction::Right),
            timers: TimerQueue::new(),
            tick_timer: None,
            bonus_timer: None,
            tick_count: 0,
            game_over_reason: None,
            high_score,
            preferences,
            rng,
            store,
            events: Vec::new(),
            clock: Duration::ZERO,
        }
    }

    /// Applies one external input event.
    pub fn handle(&mut self, input: GameInput, now: Duration) {
        self.observe(now);
        match input {
            GameInput::Turn(direction) => {
                let _ = self.request_turn(direction);
            }
            GameInput::Start { name } => self.start(&name, now),
            GameInput::Pause => self.pause(),
            GameInput::Resume => self.resume(now),
            GameInput::TogglePause => match self.status {
                GameStatus::Running => self.pause(),
                GameStatus::Paused => self.resume(now),
                GameStatus::Idle | GameStatus::GameOver => {}
            },
            GameInput::Stop => self.stop(),
            GameInput::Resize { width, height } => self.resize(width, height),
        }
    }

    /// Starts a new run from `Idle` or `GameOver`.
    ///
    /// The player name becomes the active name and is persisted.
    pub fn start(&mut self, name: &str, now: Duration) {
        if !matches!(self.status, GameStatus::Idle | GameStatus::GameOver) {
            return;
        }

        self.observe(now);
        self.cancel_timers();
        self.preferences.player_name = normalize_player_name(name);
        self.persist_preferences();

        let board = Board::new(self.grid, &mut self.rng);
        let board_filled = board.food.is_none();
        self.board = Some(board);
        self.steering = DirectionController::new(Direction::Right);
        self.tick_count = 0;
        self.game_over_reason = None;
        self.status = GameStatus::Running;
        info!(
            player = %self.preferences.player_name,
            width = self.grid.width,
            height = self.grid.height,
            "session started"
        );

        if board_filled {
            self.end(GameOverReason::BoardFilled);
            return;
        }

        let interval = self.tick_interval();
        self.tick_timer = Some(self.timers.schedule_repeating(now, interval));
        self.emit_state();
    }

    /// Stops the clock. Bonus food stays on the board but its timer is dropped.
    pub fn pause(&mut self) {
        if self.status != GameStatus::Running {
            return;
        }

        self.cancel_timers();
        self.status = GameStatus::Paused;
        info!(tick = self.tick_count, "session paused");
        self.emit_state();
    }

    /// Restarts the clock, and gives active bonus food a fresh full lifetime.
    pub fn resume(&mut self, now: Duration) {
        if self.status != GameStatus::Paused {
            return;
        }

        self.observe(now);
        self.status = GameStatus::Running;
        let interval = self.tick_interval();
        self.tick_timer = Some(self.timers.schedule_repeating(now, interval));
        if let Some(bonus) = self.board.as_mut().and_then(|board| board.bonus.as_mut()) {
            bonus.activated_at = now;
            self.bonus_timer = Some(self.timers.schedule_once(now, BONUS_FOOD_LIFETIME));
        }
        info!(tick = self.tick_count, "session resumed");
        self.emit_state();
    }

    /// Ends the current run without a game-over and resets to `Idle`.
    /// Outstanding timers are cancelled; the high score is already saved.
    pub fn stop(&mut self) {
        if self.status == GameStatus::Idle {
            return;
        }

        self.cancel_timers();
        info!(
            tick = self.tick_count,
            score = self.board.as_ref().map_or(0, |board| board.score),
            "session stopped"
        );
        self.board = None;
        self.steering = DirectionController::new(Direction::Right);
        self.tick_count = 0;
        self.game_over_reason = None;
        self.status = GameStatus::Idle;
        self.emit_state();
    }

    /// Requests a turn for the next tick. Returns whether it was accepted.
    pub fn request_turn(&mut self, direction: Direction) -> bool {
        self.status == GameStatus::Running && self.steering.request_turn(direction)
    }

    /// Replaces the grid and resets to `Idle`. Ignored while a run is in
    /// progress or when a dimension is zero.
    pub fn resize(&mut self, width: u16, height: u16) {
        if !matches!(self.status, GameStatus::Idle | GameStatus::GameOver) {
            return;
        }
        let Some(grid) = GridSize::new(width, height) else {
            return;
        };

        self.cancel_timers();
        self.grid = grid;
        self.board = None;
        self.game_over_reason = None;
        self.tick_count = 0;
        self.status = GameStatus::Idle;
        debug!(width, height, "grid resized");
        self.emit_state();
    }

    /// Fires every timer due at or before `now`.
    pub fn advance(&mut self, now: Duration) {
        self.observe(now);
        while let Some(handle) = self.timers.pop_due(now) {
            if self.tick_timer == Some(handle) {
                self.tick(now);
            } else if self.bonus_timer == Some(handle) {
                self.expire_bonus();
            }
        }
    }

    /// Sets the preferred tick interval; ignored while running.
    ///
    /// The value is clamped into the supported range and persisted. A paused
    /// run picks it up on resume.
    pub fn set_tick_interval(&mut self, tick_interval_ms: u64) -> bool {
        if self.status == GameStatus::Running {
            return false;
        }

        self.preferences.tick_interval_ms = clamp_tick_interval_ms(tick_interval_ms);
        self.persist_preferences();
        true
    }

    /// Sets the preferred player name; ignored while running.
    pub fn set_player_name(&mut self, name: &str) -> bool {
        if self.status == GameStatus::Running {
            return false;
        }

        self.preferences.player_name = normalize_player_name(name);
        self.persist_preferences();
        true
    }

    /// Takes all events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Builds the renderable state at `now`.
    #[must_use]
    pub fn snapshot(&self, now: Duration) -> Snapshot {
        let board = self.board.as_ref();
        let bonus = board.and_then(|board| board.bonus);
        // The countdown only runs while the bonus timer is armed.
        let bonus_remaining = bonus
            .filter(|_| self.status == GameStatus::Running)
            .map(|bonus| bonus.remaining(now));

        Snapshot {
            status: self.status,
            grid: self.grid,
            snake: board
                .map(|board| board.snake.segments().copied().collect())
                .unwrap_or_default(),
            direction: self.steering.committed(),
            food: board.and_then(|board| board.food),
            bonus_food: bonus.map(|bonus| bonus.position),
            bonus_remaining,
            score: board.map_or(0, |board| board.score),
            foods_eaten: board.map_or(0, |board| board.foods_eaten),
            tick_count: self.tick_count,
            high_score: self.high_score.clone(),
            player_name: self.preferences.player_name.clone(),
            tick_interval_ms: self.preferences.tick_interval_ms,
            game_over_reason: self.game_over_reason,
        }
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    #[must_use]
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Mutable board access, for scripted scenarios.
    pub fn board_mut(&mut self) -> Option<&mut Board> {
        self.board.as_mut()
    }

    #[must_use]
    pub fn high_score(&self) -> &HighScoreRecord {
        &self.high_score
    }

    #[must_use]
    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    #[must_use]
    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    #[must_use]
    pub fn committed_direction(&self) -> Direction {
        self.steering.committed()
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns when the next timer is due, so a driver can sleep until then.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.preferences.tick_interval_ms)
    }

    fn tick(&mut self, now: Duration) {
        if self.status != GameStatus::Running {
            return;
        }
        let Some(board) = self.board.as_mut() else {
            return;
        };

        let report = board.step(self.steering.committed(), &mut self.rng, now);
        let score = board.score;
        self.steering.end_tick();
        self.tick_count += 1;

        if report.bonus_activated {
            self.cancel_bonus_timer();
            self.bonus_timer = Some(self.timers.schedule_once(now, BONUS_FOOD_LIFETIME));
        }
        if report.eat == EatOutcome::Ate(FoodKind::Bonus) {
            self.cancel_bonus_timer();
        }
        if report.eat != EatOutcome::Nothing {
            self.record_score(score);
        }

        if let Some(collision) = report.collision {
            self.end(GameOverReason::Collision(collision));
        } else if report.board_filled {
            self.end(GameOverReason::BoardFilled);
        } else {
            self.emit_state();
        }
    }

    fn expire_bonus(&mut self) {
        self.bonus_timer = None;
        if let Some(board) = self.board.as_mut()
            && board.expire_bonus()
        {
            debug!("bonus food expired");
            self.emit_state();
        }
    }

    fn record_score(&mut self, score: u32) {
        if score <= self.high_score.score {
            return;
        }

        self.high_score = HighScoreRecord {
            name: self.preferences.player_name.clone(),
            score,
        };
        if let Err(error) = self.store.save_high_score(&self.high_score) {
            warn!(%error, "failed to save high score");
        }
    }

    fn end(&mut self, reason: GameOverReason) {
        self.cancel_timers();
        self.status = GameStatus::GameOver;
        self.game_over_reason = Some(reason);
        info!(
            ?reason,
            score = self.board.as_ref().map_or(0, |board| board.score),
            "session over"
        );
        self.emit_state();
    }

    fn cancel_timers(&mut self) {
        if let Some(handle) = self.tick_timer.take() {
            let _ = self.timers.cancel(handle);
        }
        self.cancel_bonus_timer();
    }

    fn cancel_bonus_timer(&mut self) {
        if let Some(handle) = self.bonus_timer.take() {
            let _ = self.timers.cancel(handle);
        }
    }

    fn persist_preferences(&mut self) {
        if let Err(error) = self.store.save_preferences(&self.preferences) {
            warn!(%error, "failed to save preferences");
        }
    }

    fn observe(&mut self, now: Duration) {
        self.clock = self.clock.max(now);
    }

    fn emit_state(&mut self) {
        let snapshot = self.snapshot(self.clock);
        self.events.push(GameEvent::StateChanged(snapshot));
    }
}
