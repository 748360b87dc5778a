use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use grid_snake::game::Snapshot;

/// Rows reserved below the board.
pub const HUD_HEIGHT: u16 = 2;

/// Renders the score row and the profile row under the board.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot) {
    let [score_row, profile_row] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    frame.render_widget(Paragraph::new(score_line(snapshot)), score_row);
    frame.render_widget(
        Paragraph::new(profile_line(snapshot)).style(Style::new().fg(Color::DarkGray)),
        profile_row,
    );
}

fn score_line(snapshot: &Snapshot) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!(" Score {}", snapshot.score),
            Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("   Length {}", snapshot.snake.len())),
        Span::raw(format!("   Eaten {}", snapshot.foods_eaten)),
    ];

    if let Some(remaining) = snapshot.bonus_remaining {
        spans.push(Span::styled(
            format!("   Bonus {:.1}s", remaining.as_secs_f32()),
            Style::new().fg(Color::Yellow),
        ));
    }

    Line::from(spans)
}

fn profile_line(snapshot: &Snapshot) -> Line<'static> {
    Line::from(format!(
        " Best {} ({})   Player {}   Tick {}ms",
        snapshot.high_score.score,
        snapshot.high_score.name,
        snapshot.player_name,
        snapshot.tick_interval_ms,
    ))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use grid_snake::config::GridSize;
    use grid_snake::game::{GameStatus, Snapshot};
    use grid_snake::score::HighScoreRecord;
    use grid_snake::steering::Direction;

    use super::{profile_line, score_line};

    fn snapshot() -> Snapshot {
        Snapshot {
            status: GameStatus::Running,
            grid: GridSize {
                width: 10,
                height: 10,
            },
            snake: Vec::new(),
            direction: Direction::Right,
            food: None,
            bonus_food: None,
            bonus_remaining: Some(Duration::from_millis(2_500)),
            score: 70,
            foods_eaten: 2,
            tick_count: 12,
            high_score: HighScoreRecord {
                name: "Ada".to_owned(),
                score: 120,
            },
            player_name: "Grace".to_owned(),
            tick_interval_ms: 100,
            game_over_reason: None,
        }
    }

    #[test]
    fn score_row_shows_bonus_countdown() {
        let line = score_line(&snapshot()).to_string();
        assert!(line.contains("Score 70"));
        assert!(line.contains("Bonus 2.5s"));
    }

    #[test]
    fn profile_row_names_the_record_holder() {
        let line = profile_line(&snapshot()).to_string();
        assert!(line.contains("Best 120 (Ada)"));
        assert!(line.contains("Player Grace"));
    }
}
