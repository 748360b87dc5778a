/// Canonical movement directions.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the unit vector `(dx, dy)`; `y` grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Filters turn requests into the direction applied by the next tick.
///
/// At most one turn is accepted between two ticks, and a turn straight back
/// into the neck is ignored.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DirectionController {
    committed: Direction,
    turn_consumed: bool,
}

impl DirectionController {
    #[must_use]
    pub fn new(initial: Direction) -> Self {
        Self {
            committed: initial,
            turn_consumed: false,
        }
    }

    /// Applies a turn request. Returns whether it was accepted.
    ///
    /// Rejected requests are silent no-ops.
    pub fn request_turn(&mut self, direction: Direction) -> bool {
        if self.turn_consumed || direction == self.committed.opposite() {
            return false;
        }

        self.committed = direction;
        self.turn_consumed = true;
        true
    }

    /// Opens the turn window for the next tick.
    pub fn end_tick(&mut self) {
        self.turn_consumed = false;
    }

    /// Returns the direction the next tick will move in.
    #[must_use]
    pub fn committed(self) -> Direction {
        self.committed
    }

    /// Returns true when a turn was already accepted this tick.
    #[must_use]
    pub fn turn_consumed(self) -> bool {
        self.turn_consumed
    }
}
