use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use tracing::{info, warn};

use crate::game::{Action, GameConfig, GameEngine};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// What the event loop should do after handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Redraw,
    Idle,
    Exit,
}

/// Keyboard-driven play in the terminal
///
/// There is no game clock: each movement key steps the engine exactly once
/// and the frame is redrawn after the step completes. When the game ends the
/// game-over panel is drawn; the next key either restarts or ends the loop.
pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let engine = GameEngine::new(config).context("Failed to create game engine")?;

        Ok(Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            games_played = self.metrics.games_played,
            length = self.engine.snake_len(),
            "human session ended"
        );
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        self.draw(terminal)?;

        loop {
            let flow = tokio::select! {
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event)?,
                    Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                    None => Flow::Exit,
                },

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => Flow::Exit,
            };

            match flow {
                Flow::Redraw => self.draw(terminal)?,
                Flow::Idle => {}
                Flow::Exit => break,
            }
        }

        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        self.metrics.update();
        terminal
            .draw(|frame| {
                self.renderer.render(frame, &self.engine, &self.metrics);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<Flow> {
        let key = match event {
            Event::Key(key) => key,
            Event::Resize(..) => return Ok(Flow::Redraw),
            _ => return Ok(Flow::Idle),
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return Ok(Flow::Idle);
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Restart => {
                self.reset_game()?;
                Ok(Flow::Redraw)
            }
            // The game-over frame stays up until the next key press
            _ if self.engine.is_done() => Ok(Flow::Exit),
            KeyAction::Step(action) => self.step(action),
            KeyAction::Quit => Ok(Flow::Exit),
            KeyAction::None => Ok(Flow::Idle),
        }
    }

    /// Step once and redraw; a terminal step leaves the game-over panel on screen
    fn step(&mut self, action: Action) -> Result<Flow> {
        match self.engine.step(action) {
            Ok(result) => {
                self.metrics.on_step(&result);
                if result.done {
                    self.metrics.on_game_over();
                }
            }
            Err(err) => {
                warn!(%err, "game ended without a collision");
                self.metrics.on_game_over();
            }
        }
        Ok(Flow::Redraw)
    }

    fn reset_game(&mut self) -> Result<()> {
        self.engine.reset().context("Failed to restart game")?;
        self.metrics.on_game_start();
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
