pub mod console;
pub mod human;

pub use console::ConsoleMode;
pub use human::HumanMode;
