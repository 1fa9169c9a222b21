//! State-id encoding
//!
//! Maps a board configuration plus head position into `[0, n_states)` so an
//! external agent can use it as a table key. The mapping is stable across
//! runs but not injective.

use md5::{Digest, Md5};

use super::state::{Board, Position};

/// Sentinel state id returned on terminal collision steps
pub const TERMINAL_STATE: i64 = -1;

/// Encode a board and head position as a state id in `[0, n_states)`
///
/// The board bytes are hashed with MD5, read as a little-endian integer,
/// multiplied by the head's linear index and reduced modulo `n_states`.
pub fn encode_state(board: &Board, head: Position, n_states: u64) -> i64 {
    debug_assert!(n_states > 0 && n_states <= i64::MAX as u64);

    let digest = Md5::digest(board.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest);
    let board_hash = u128::from_le_bytes(bytes);

    let n = u128::from(n_states);
    let head_index = (head.row * board.width() + head.col) as u128;
    // (a * b) mod n == ((a mod n) * b) mod n, and the right side cannot overflow
    let state = ((board_hash % n) * head_index) % n;
    state as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::Tile;

    const N: u64 = 3 * 100 * 100;

    #[test]
    fn test_encoding_is_pure() {
        let mut board = Board::new(10, 10);
        board.set(Position::new(4, 4), Tile::Snake);
        board.set(Position::new(6, 2), Tile::Food);

        let a = encode_state(&board, Position::new(4, 4), N);
        let b = encode_state(&board.clone(), Position::new(4, 4), N);
        assert_eq!(a, b);
    }

    #[test]
    fn test_encoding_in_range() {
        let mut board = Board::new(10, 10);
        for col in 0..10 {
            board.set(Position::new(3, col), Tile::Snake);
            let state = encode_state(&board, Position::new(3, col), N);
            assert!((0..N as i64).contains(&state));
        }
    }

    #[test]
    fn test_head_at_origin_encodes_to_zero() {
        let mut board = Board::new(10, 10);
        board.set(Position::new(0, 0), Tile::Snake);
        assert_eq!(encode_state(&board, Position::new(0, 0), N), 0);
    }

    #[test]
    fn test_board_content_changes_encoding() {
        let mut board = Board::new(10, 10);
        board.set(Position::new(5, 5), Tile::Snake);
        board.set(Position::new(2, 2), Tile::Food);
        let before = encode_state(&board, Position::new(5, 5), N);

        board.set(Position::new(2, 2), Tile::Empty);
        board.set(Position::new(7, 7), Tile::Food);
        let after = encode_state(&board, Position::new(5, 5), N);

        assert_ne!(before, after);
    }
}
