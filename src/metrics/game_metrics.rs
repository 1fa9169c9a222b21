use std::time::{Duration, Instant};

use crate::game::StepResult;

/// Counters for the current episode, shown in the TUI header
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub steps: u32,
    pub total_reward: i64,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            steps: 0,
            total_reward: 0,
            games_played: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_step(&mut self, result: &StepResult) {
        if !result.done {
            self.steps += 1;
            self.total_reward += i64::from(result.reward);
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.steps = 0;
        self.total_reward = 0;
    }

    pub fn on_game_over(&mut self) {
        self.games_played += 1;
        self.update();
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
