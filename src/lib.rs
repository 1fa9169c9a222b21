//! Snake Env - a grid Snake game exposed as a step-based environment
//!
//! This library provides:
//! - Core game logic and state encoding (game module)
//! - TUI rendering (render module)
//! - Keyboard mapping (input module)
//! - Per-episode counters (metrics module)
//! - Human and console drivers (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
