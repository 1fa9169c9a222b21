use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

use super::{
    action::{Action, N_ACTIONS},
    config::{GameConfig, JITTER, MIN_EDGE},
    encoding::{TERMINAL_STATE, encode_state},
    error::GameError,
    state::{Board, Position, Tile},
};

/// Kind of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the board
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Encoded post-step state, `TERMINAL_STATE` on a terminal step
    pub state_id: i64,
    /// 1 if food was eaten this step, else 0
    pub reward: i32,
    /// Whether the game has terminated
    pub done: bool,
}

impl StepResult {
    fn terminal() -> Self {
        Self {
            state_id: TERMINAL_STATE,
            reward: 0,
            done: true,
        }
    }

    /// The `(state_id, reward, done)` triple
    pub fn as_tuple(&self) -> (i64, i32, bool) {
        (self.state_id, self.reward, self.done)
    }
}

/// The game engine that owns the board and handles all game logic
///
/// Mutation happens only through [`GameEngine::step`], [`GameEngine::step_code`]
/// and [`GameEngine::reset`]; everything else hands out shared references.
#[derive(Debug)]
pub struct GameEngine {
    config: GameConfig,
    board: Board,
    /// Body segments, tail at the front, head at the back
    snake: VecDeque<Position>,
    food: Position,
    n_states: u64,
    rng: StdRng,
    collision: Option<CollisionType>,
    done: bool,
}

impl GameEngine {
    /// Create a new game with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let n_states = config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut engine = Self {
            board: Board::new(config.height, config.width),
            snake: VecDeque::new(),
            food: Position::new(0, 0),
            n_states,
            rng,
            collision: None,
            done: false,
            config,
        };
        engine.start_game()?;
        Ok(engine)
    }

    /// Shorthand for a default configuration with the given size and seed
    pub fn with_dimensions(
        height: usize,
        width: usize,
        seed: Option<u64>,
    ) -> Result<Self, GameError> {
        Self::new(GameConfig {
            seed,
            ..GameConfig::new(height, width)
        })
    }

    /// Start a fresh game on the same board size, continuing the RNG stream
    pub fn reset(&mut self) -> Result<(), GameError> {
        self.start_game()
    }

    fn start_game(&mut self) -> Result<(), GameError> {
        self.board.clear();
        self.snake.clear();
        self.collision = None;
        self.done = false;

        let row = self.jittered_center(self.config.height);
        let col = self.jittered_center(self.config.width);
        let start = Position::new(row, col);

        self.snake.push_back(start);
        self.board.set(start, Tile::Snake);
        self.spawn_food()?;

        info!(
            height = self.config.height,
            width = self.config.width,
            head = ?start,
            food = ?self.food,
            "game started"
        );
        Ok(())
    }

    fn jittered_center(&mut self, dimension: usize) -> usize {
        let offset = self.rng.gen_range(-JITTER..=JITTER);
        // MIN_SIZE keeps dimension / 2 well above JITTER
        (dimension / 2).saturating_add_signed(offset)
    }

    /// Apply one action and advance the game by a step
    ///
    /// Wall and self collisions are not errors: they return the terminal
    /// result `(-1, 0, true)`. Once terminated, the engine is frozen and
    /// every further step returns the terminal result unchanged.
    pub fn step(&mut self, action: Action) -> Result<StepResult, GameError> {
        if self.done {
            return Ok(StepResult::terminal());
        }

        let head = self.head();
        let candidate = head
            .moved_by_action(action)
            .filter(|pos| self.board.contains(*pos));
        let Some(new_head) = candidate else {
            return Ok(self.terminate(CollisionType::Wall, action));
        };

        // Checked against the pre-move board, so the vacating tail still collides
        let reward = match self.board.get(new_head) {
            Some(Tile::Snake) => {
                return Ok(self.terminate(CollisionType::SelfCollision, action));
            }
            Some(Tile::Food) => 1,
            _ => 0,
        };

        self.snake.push_back(new_head);
        self.board.set(new_head, Tile::Snake);

        if reward == 0 {
            if let Some(tail) = self.snake.pop_front() {
                self.board.set(tail, Tile::Empty);
            }
        } else if let Err(err) = self.spawn_food() {
            self.done = true;
            warn!(length = self.snake.len(), "board full, ending game");
            return Err(err);
        }

        let state_id = encode_state(&self.board, new_head, self.n_states);
        debug!(?action, head = ?new_head, reward, state_id, "step");

        Ok(StepResult {
            state_id,
            reward,
            done: false,
        })
    }

    /// Step with a raw integer action code
    ///
    /// Codes outside `0..=3` fail with [`GameError::InvalidAction`] and leave
    /// the engine untouched.
    pub fn step_code(&mut self, code: i64) -> Result<StepResult, GameError> {
        let action = Action::try_from(code)?;
        self.step(action)
    }

    fn terminate(&mut self, collision: CollisionType, action: Action) -> StepResult {
        self.done = true;
        self.collision = Some(collision);
        info!(?collision, ?action, length = self.snake.len(), "game over");
        StepResult::terminal()
    }

    /// Place food on a random empty cell away from the edges
    ///
    /// Rejection sampling is capped at `max_spawn_attempts`; past that the
    /// food region is scanned row-major for any empty cell.
    fn spawn_food(&mut self) -> Result<(), GameError> {
        let rows = MIN_EDGE..self.config.height - MIN_EDGE;
        let cols = MIN_EDGE..self.config.width - MIN_EDGE;

        for _ in 0..self.config.max_spawn_attempts {
            let pos = Position::new(
                self.rng.gen_range(rows.clone()),
                self.rng.gen_range(cols.clone()),
            );
            if self.board.get(pos) == Some(Tile::Empty) {
                self.place_food(pos);
                return Ok(());
            }
        }

        warn!(
            attempts = self.config.max_spawn_attempts,
            "food sampling exhausted, scanning for an empty cell"
        );
        let free = rows
            .flat_map(|row| cols.clone().map(move |col| Position::new(row, col)))
            .find(|pos| self.board.get(*pos) == Some(Tile::Empty));

        match free {
            Some(pos) => {
                self.place_food(pos);
                Ok(())
            }
            None => Err(GameError::BoardFull),
        }
    }

    fn place_food(&mut self, pos: Position) {
        self.board.set(pos, Tile::Food);
        self.food = pos;
        debug!(food = ?pos, "food spawned");
    }

    /// Read-only view of the board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn height(&self) -> usize {
        self.config.height
    }

    pub fn width(&self) -> usize {
        self.config.width
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Body segments ordered tail first, head last
    pub fn snake(&self) -> &VecDeque<Position> {
        &self.snake
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        *self.snake.back().expect("snake body is never empty")
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn n_states(&self) -> u64 {
        self.n_states
    }

    pub fn n_actions(&self) -> usize {
        N_ACTIONS
    }

    /// Whether a terminal step has been observed
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Collision that ended the game, if any
    pub fn collision(&self) -> Option<CollisionType> {
        self.collision
    }

    #[cfg(test)]
    pub(crate) fn set_layout(&mut self, body: &[Position], food: Position) {
        self.board.clear();
        self.snake = body.iter().copied().collect();
        for &pos in body {
            self.board.set(pos, Tile::Snake);
        }
        self.place_food(food);
    }
}
