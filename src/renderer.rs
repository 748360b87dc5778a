use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use grid_snake::config::GridSize;
use grid_snake::game::{GameStatus, Snapshot};
use grid_snake::snake::Position;

use crate::ui::hud::{HUD_HEIGHT, render_hud};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Terminal columns drawn per grid cell, so cells look roughly square.
const COLUMNS_PER_CELL: u16 = 2;

const GLYPH_CELL: &str = "██";
const GLYPH_FOOD: &str = "●●";
const GLYPH_BONUS: &str = "★★";

/// Returns the largest grid that fits a terminal of `cols` x `rows`, leaving
/// room for the border and the HUD. `None` when the terminal is too small.
#[must_use]
pub fn grid_for_viewport(cols: u16, rows: u16) -> Option<GridSize> {
    let width = cols.saturating_sub(2) / COLUMNS_PER_CELL;
    let height = rows.saturating_sub(2 + HUD_HEIGHT);
    GridSize::new(width, height)
}

/// Renders the full frame from one snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot) {
    let area = frame.area();
    let board_area = board_rect(area, snapshot.grid);
    let hud_area = Rect {
        x: area.x,
        y: board_area.bottom().min(area.bottom()),
        width: area.width,
        height: HUD_HEIGHT.min(area.bottom().saturating_sub(board_area.bottom())),
    };

    let block = Block::bordered().border_style(Style::new().fg(Color::White));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    if let Some(food) = snapshot.food {
        draw_cell(frame, inner, food, GLYPH_FOOD, Style::new().fg(Color::Red));
    }
    if let Some(bonus) = snapshot.bonus_food {
        draw_cell(
            frame,
            inner,
            bonus,
            GLYPH_BONUS,
            Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        );
    }
    render_snake(frame, inner, snapshot);
    render_hud(frame, hud_area, snapshot);

    match snapshot.status {
        GameStatus::Idle => render_start_menu(frame, board_area, snapshot),
        GameStatus::Paused => render_pause_menu(frame, board_area),
        GameStatus::GameOver => render_game_over_menu(frame, board_area, snapshot),
        GameStatus::Running => {}
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot) {
    // Tail first so the head is drawn last and stays visible on a collision.
    for (index, segment) in snapshot.snake.iter().enumerate().rev() {
        let style = if index == 0 {
            Style::new().fg(Color::LightGreen).add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(Color::Green)
        };
        draw_cell(frame, inner, *segment, GLYPH_CELL, style);
    }
}

fn draw_cell(frame: &mut Frame<'_>, inner: Rect, position: Position, glyph: &str, style: Style) {
    let Some((x, y)) = logical_to_terminal(inner, position) else {
        return;
    };
    frame.buffer_mut().set_string(x, y, glyph, style);
}

fn board_rect(area: Rect, grid: GridSize) -> Rect {
    let width = grid
        .width
        .saturating_mul(COLUMNS_PER_CELL)
        .saturating_add(2)
        .min(area.width);
    let height = grid.height.saturating_add(2).min(area.height);
    Rect {
        x: area.x,
        y: area.y,
        width,
        height,
    }
}

/// Maps a grid cell to terminal coordinates, or `None` when it falls outside
/// the drawable area (the head after a wall hit, or a shrunken terminal).
fn logical_to_terminal(inner: Rect, position: Position) -> Option<(u16, u16)> {
    let x_offset = u16::try_from(position.x).ok()?.checked_mul(COLUMNS_PER_CELL)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.checked_add(x_offset)?;
    let y = inner.y.checked_add(y_offset)?;
    if x.saturating_add(COLUMNS_PER_CELL) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use grid_snake::config::GridSize;
    use grid_snake::snake::Position;

    use super::{grid_for_viewport, logical_to_terminal};

    #[test]
    fn viewport_leaves_room_for_border_and_hud() {
        assert_eq!(
            grid_for_viewport(82, 26),
            Some(GridSize {
                width: 40,
                height: 22,
            })
        );
        assert_eq!(grid_for_viewport(3, 3), None);
    }

    #[test]
    fn cells_outside_the_board_are_not_drawn() {
        let inner = Rect::new(1, 1, 20, 10);

        assert_eq!(logical_to_terminal(inner, Position { x: 0, y: 0 }), Some((1, 1)));
        assert_eq!(logical_to_terminal(inner, Position { x: 9, y: 9 }), Some((19, 10)));
        assert_eq!(logical_to_terminal(inner, Position { x: 10, y: 0 }), None);
        assert_eq!(logical_to_terminal(inner, Position { x: -1, y: 0 }), None);
    }
}
