use super::error::GameError;

/// Discrete action accepted by the engine
///
/// The integer codes are part of the external interface: agents address
/// actions as `0..N_ACTIONS` in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left = 0,
    Down = 1,
    Right = 2,
    Up = 3,
}

/// Number of distinct actions
pub const N_ACTIONS: usize = 4;

impl Action {
    /// All actions in code order
    pub const ALL: [Action; N_ACTIONS] = [Action::Left, Action::Down, Action::Right, Action::Up];

    /// Returns the (row, col) delta for moving in this direction
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Action::Left => (0, -1),
            Action::Down => (1, 0),
            Action::Right => (0, 1),
            Action::Up => (-1, 0),
        }
    }

    /// Integer code of this action
    pub fn code(&self) -> i64 {
        *self as i64
    }
}

impl TryFrom<i64> for Action {
    type Error = GameError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Action::Left),
            1 => Ok(Action::Down),
            2 => Ok(Action::Right),
            3 => Ok(Action::Up),
            other => Err(GameError::InvalidAction(other)),
        }
    }
}
