use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Board, GameEngine, Tile};
use crate::metrics::GameMetrics;

const BACKGROUND: Color = Color::Rgb(0x33, 0x33, 0x33);
const SNAKE: Color = Color::Rgb(0xbb, 0xbb, 0xbb);
const FOOD: Color = Color::Rgb(0x90, 0xee, 0x90);

/// Color a tile code is drawn with
pub fn tile_color(tile: Tile) -> Color {
    match tile {
        Tile::Empty => BACKGROUND,
        Tile::Snake => SNAKE,
        Tile::Food => FOOD,
    }
}

/// Draws the engine's board; never mutates game state
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, engine: &GameEngine, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(engine, metrics), chunks[0]);

        if engine.is_done() {
            frame.render_widget(self.render_game_over(engine, metrics), chunks[1]);
        } else {
            frame.render_widget(self.render_grid(engine.board()), chunks[1]);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, board: &Board) -> Paragraph<'static> {
        let background = Style::default().bg(BACKGROUND);
        let lines: Vec<Line> = board
            .rows()
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|&tile| match tile {
                        // Empty tiles are just the background
                        Tile::Empty => Span::styled("  ", background),
                        _ => Span::styled("██", background.fg(tile_color(tile))),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, engine: &GameEngine, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);
        let text = vec![Line::from(vec![
            Span::styled("Length: ", label),
            Span::styled(
                engine.snake_len().to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Steps: ", label),
            Span::styled(metrics.steps.to_string(), value),
            Span::raw("    "),
            Span::styled("Reward: ", label),
            Span::styled(metrics.total_reward.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, engine: &GameEngine, metrics: &GameMetrics) -> Paragraph<'static> {
        let cause = match engine.collision() {
            Some(collision) => format!("{collision:?}"),
            None => "Board full".to_string(),
        };
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Cause: ", Style::default().fg(Color::Yellow)),
                Span::styled(cause, Style::default().fg(Color::White)),
            ]),
            Line::from(vec![
                Span::styled("Total reward: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.total_reward.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" to play again, any other key to quit"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("←↓→↑", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("hjkl", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Action;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_tile_palette() {
        assert_eq!(tile_color(Tile::Empty), Color::Rgb(0x33, 0x33, 0x33));
        assert_eq!(tile_color(Tile::Snake), Color::Rgb(0xbb, 0xbb, 0xbb));
        assert_eq!(tile_color(Tile::Food), Color::Rgb(0x90, 0xee, 0x90));
    }

    #[test]
    fn test_render_does_not_touch_engine() {
        let engine = GameEngine::with_dimensions(10, 12, Some(3)).unwrap();
        let board = engine.board().clone();
        let metrics = GameMetrics::new();
        let renderer = Renderer::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();

        terminal
            .draw(|frame| renderer.render(frame, &engine, &metrics))
            .unwrap();

        assert_eq!(engine.board(), &board);
    }

    #[test]
    fn test_grid_draws_snake_and_food() {
        let engine = GameEngine::with_dimensions(11, 10, Some(3)).unwrap();
        let renderer = Renderer::new();
        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();

        let grid = renderer.render_grid(engine.board());

        terminal
            .draw(|frame| frame.render_widget(grid, frame.area()))
            .unwrap();

        // One snake cell and one food cell, each two columns wide
        let filled = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .filter(|cell| cell.symbol() == "█")
            .count();
        assert_eq!(filled, 4);
    }

    #[test]
    fn test_finished_game_shows_game_over_panel() {
        let mut engine = GameEngine::with_dimensions(10, 10, Some(3)).unwrap();
        let mut metrics = GameMetrics::new();
        while !engine.is_done() {
            metrics.on_step(&engine.step(Action::Up).unwrap());
        }
        metrics.on_game_over();
        let renderer = Renderer::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();

        terminal
            .draw(|frame| renderer.render(frame, &engine, &metrics))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Cause: Wall"));
        // The grid is replaced by the panel
        assert!(!text.contains("█"));
    }
}
