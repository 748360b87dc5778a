use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use grid_snake::steering::Direction;

/// Terminal-level actions decoded from keyboard and window events.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum UiAction {
    Turn(Direction),
    TogglePause,
    /// Abandon the current run and go back to the title screen.
    Stop,
    /// Start from the title screen, or play again after game over.
    Confirm,
    Faster,
    Slower,
    Resize { cols: u16, rows: u16 },
    Quit,
}

/// Waits up to `timeout` for the next relevant terminal event.
pub fn poll_action(timeout: Duration) -> io::Result<Option<UiAction>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    Ok(match event::read()? {
        Event::Key(key) => map_key(key),
        Event::Resize(cols, rows) => Some(UiAction::Resize { cols, rows }),
        _ => None,
    })
}

/// Maps one key press to an action. Releases and repeats are ignored.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<UiAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiAction::Quit);
    }

    let action = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => UiAction::Turn(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => UiAction::Turn(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h') => UiAction::Turn(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => UiAction::Turn(Direction::Right),
        KeyCode::Char('p' | 'P' | ' ') => UiAction::TogglePause,
        KeyCode::Char('r' | 'R') => UiAction::Stop,
        KeyCode::Enter => UiAction::Confirm,
        KeyCode::Char('+' | '=') => UiAction::Faster,
        KeyCode::Char('-' | '_') => UiAction::Slower,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => UiAction::Quit,
        _ => return None,
    };
    Some(action)
}
