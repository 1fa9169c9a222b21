use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, info};

use crate::game::{Action, GameConfig, GameEngine};

/// Letters checked in order; the first one present in a line picks the action
const COMMANDS: [(char, Action); 4] = [
    ('l', Action::Left),
    ('d', Action::Down),
    ('r', Action::Right),
    ('u', Action::Up),
];

/// Pick the action for a line of input, falling back to the previous one
pub fn parse_command(line: &str, previous: Action) -> Action {
    COMMANDS
        .iter()
        .find(|(letter, _)| line.contains(*letter))
        .map_or(previous, |&(_, action)| action)
}

/// Line-driven play: one line of input per step, board dumped after each
pub struct ConsoleMode {
    engine: GameEngine,
    action: Action,
}

impl ConsoleMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let engine = GameEngine::new(config).context("Failed to create game engine")?;
        Ok(Self {
            engine,
            action: Action::Left,
        })
    }

    /// Play until the game ends or the input runs out
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<()> {
        write!(output, "{}", self.engine.board()).context("Failed to print board")?;

        let mut line = String::new();
        let mut steps = 0u32;
        loop {
            write!(output, ": ").context("Failed to print prompt")?;
            output.flush().context("Failed to flush output")?;

            line.clear();
            let read = input.read_line(&mut line).context("Failed to read input")?;
            if read == 0 {
                debug!("input closed");
                break;
            }

            self.action = parse_command(&line, self.action);
            let result = self.engine.step(self.action).context("Game step failed")?;
            steps += 1;
            write!(output, "{}", self.engine.board()).context("Failed to print board")?;

            if result.done {
                break;
            }
        }

        info!(
            steps,
            length = self.engine.snake_len(),
            "console game ended"
        );
        Ok(())
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }
}
