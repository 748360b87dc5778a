use std::time::Duration;

use crate::snake::Position;

/// Logical grid dimensions in cells.
///
/// Fixed for the lifetime of a session; a resize replaces the whole grid
/// while no session is running.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Creates a grid, rejecting zero-sized dimensions.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Option<Self> {
        (width >= 1 && height >= 1).then_some(Self { width, height })
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns true iff `0 <= x < width` and `0 <= y < height`.
    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < i32::from(self.width)
            && position.y < i32::from(self.height)
    }

    /// Returns the cell the snake head starts on.
    #[must_use]
    pub fn center(self) -> Position {
        Position {
            x: i32::from(self.width / 2),
            y: i32::from(self.height / 2),
        }
    }

    /// Iterates every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        let width = i32::from(self.width);
        (0..i32::from(self.height)).flat_map(move |y| (0..width).map(move |x| Position { x, y }))
    }
}

/// Grid used before the presentation layer reports a viewport.
pub const DEFAULT_GRID: GridSize = GridSize {
    width: 20,
    height: 20,
};

/// Points granted for regular food.
pub const REGULAR_FOOD_POINTS: u32 = 10;

/// Points granted for bonus food.
pub const BONUS_FOOD_POINTS: u32 = 50;

/// Every n-th regular food eaten activates bonus food.
pub const BONUS_FOOD_EVERY: u32 = 5;

/// How long bonus food stays on the board.
pub const BONUS_FOOD_LIFETIME: Duration = Duration::from_secs(5);

/// Segments in a freshly started snake.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Leading body segments ignored by the self-collision check.
pub const SELF_COLLISION_SKIP: usize = 4;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 40;

/// Maximum tick interval in milliseconds.
pub const MAX_TICK_INTERVAL_MS: u64 = 1000;

/// Name used when none has been stored yet.
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Longest accepted player name, in characters.
pub const MAX_PLAYER_NAME_CHARS: usize = 24;

/// Random draws attempted before food placement scans for free cells.
pub const MAX_SPAWN_ATTEMPTS: usize = 64;

/// Clamps a requested tick interval into the supported range.
#[must_use]
pub fn clamp_tick_interval_ms(requested: u64) -> u64 {
    requested.clamp(MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS)
}

/// Trims and truncates a player name, falling back to the default.
#[must_use]
pub fn normalize_player_name(raw: &str) -> String {
    let trimmed: String = raw.trim().chars().take(MAX_PLAYER_NAME_CHARS).collect();
    let trimmed = trimmed.trim_end();
    if trimmed.is_empty() {
        DEFAULT_PLAYER_NAME.to_owned()
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        GridSize, MAX_PLAYER_NAME_CHARS, MAX_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS,
        clamp_tick_interval_ms, normalize_player_name,
    };
    use crate::snake::Position;

    #[test]
    fn contains_respects_half_open_bounds() {
        let grid = GridSize {
            width: 10,
            height: 8,
        };

        assert!(grid.contains(Position { x: 0, y: 0 }));
        assert!(grid.contains(Position { x: 9, y: 7 }));
        assert!(!grid.contains(Position { x: 10, y: 0 }));
        assert!(!grid.contains(Position { x: 0, y: 8 }));
        assert!(!grid.contains(Position { x: -1, y: 3 }));
    }

    #[test]
    fn zero_sized_grid_is_rejected() {
        assert!(GridSize::new(0, 5).is_none());
        assert!(GridSize::new(5, 0).is_none());
        assert_eq!(GridSize::new(1, 1).map(GridSize::total_cells), Some(1));
    }

    #[test]
    fn cells_cover_the_grid_once() {
        let grid = GridSize {
            width: 3,
            height: 2,
        };

        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), 6);
        assert!(cells.iter().all(|cell| grid.contains(*cell)));
    }

    #[test]
    fn tick_interval_is_clamped() {
        assert_eq!(clamp_tick_interval_ms(0), MIN_TICK_INTERVAL_MS);
        assert_eq!(clamp_tick_interval_ms(150), 150);
        assert_eq!(clamp_tick_interval_ms(60_000), MAX_TICK_INTERVAL_MS);
    }

    #[test]
    fn player_names_are_normalized() {
        assert_eq!(normalize_player_name("  Ada  "), "Ada");
        assert_eq!(normalize_player_name("   "), "Player");

        let long = "x".repeat(MAX_PLAYER_NAME_CHARS + 10);
        assert_eq!(
            normalize_player_name(&long).chars().count(),
            MAX_PLAYER_NAME_CHARS
        );
    }
}
