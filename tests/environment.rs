//! Invariants of the public engine API over generated games.
use proptest::prelude::*;
use snake_env::game::{
    Action, Board, GameConfig, GameEngine, GameError, MIN_EDGE, Position, StepResult, Tile,
};

fn snake_cells(board: &Board) -> Vec<Position> {
    board.positions_of(Tile::Snake).collect()
}

/// Play `codes` to the end of the game, collecting every result
fn rollout(config: GameConfig, codes: &[i64]) -> (Vec<StepResult>, Board) {
    let mut engine = GameEngine::new(config).unwrap();
    let mut results = Vec::new();
    for &code in codes {
        let Ok(result) = engine.step_code(code) else {
            break;
        };
        results.push(result);
        if result.done {
            break;
        }
    }
    (results, engine.board().clone())
}

proptest! {
    #[test]
    fn generated_play_preserves_board_invariants(
        height in 10usize..20,
        width in 10usize..20,
        seed in any::<u64>(),
        codes in proptest::collection::vec(0..4i64, 0..300),
    ) {
        let mut engine = GameEngine::with_dimensions(height, width, Some(seed)).unwrap();

        for code in codes {
            let before = engine.board().clone();
            let len_before = engine.snake_len();
            let food_before = engine.food();

            // Only a full food region can fail a valid action code
            let Ok(result) = engine.step_code(code) else {
                prop_assert!(engine.is_done());
                break;
            };

            if result.done {
                prop_assert_eq!(result.as_tuple(), (-1, 0, true));
                prop_assert_eq!(engine.board(), &before);
                prop_assert_eq!(engine.snake_len(), len_before);

                // Frozen from here on
                let again = engine.step_code(code).unwrap();
                prop_assert_eq!(again.as_tuple(), (-1, 0, true));
                prop_assert_eq!(engine.board(), &before);
                break;
            }

            prop_assert!((0..engine.n_states() as i64).contains(&result.state_id));
            let board = engine.board();
            match result.reward {
                0 => {
                    prop_assert_eq!(engine.snake_len(), len_before);
                    let appeared = snake_cells(board)
                        .into_iter()
                        .filter(|p| before.get(*p) != Some(Tile::Snake))
                        .count();
                    let cleared = snake_cells(&before)
                        .into_iter()
                        .filter(|p| board.get(*p) != Some(Tile::Snake))
                        .count();
                    prop_assert_eq!((appeared, cleared), (1, 1));
                    prop_assert_eq!(engine.food(), food_before);
                }
                1 => {
                    prop_assert_eq!(engine.snake_len(), len_before + 1);
                    prop_assert_eq!(board.get(food_before), Some(Tile::Snake));
                    prop_assert_ne!(engine.food(), food_before);
                }
                other => prop_assert!(false, "unexpected reward {}", other),
            }

            prop_assert_eq!(board.count(Tile::Food), 1);
            let food = engine.food();
            prop_assert!((MIN_EDGE..height - MIN_EDGE).contains(&food.row));
            prop_assert!((MIN_EDGE..width - MIN_EDGE).contains(&food.col));
            prop_assert_eq!(board.count(Tile::Snake), engine.snake_len());
            prop_assert_eq!(board.get(engine.head()), Some(Tile::Snake));
            prop_assert_eq!(engine.head(), *engine.snake().back().unwrap());
        }
    }

    #[test]
    fn same_seed_and_actions_replay_identically(
        height in 10usize..20,
        width in 10usize..20,
        seed in any::<u64>(),
        codes in proptest::collection::vec(0..4i64, 0..300),
    ) {
        let config = GameConfig::new(height, width).with_seed(seed);

        prop_assert_eq!(rollout(config.clone(), &codes), rollout(config, &codes));
    }
}

#[test]
fn invalid_action_codes_are_recoverable() {
    let mut engine = GameEngine::with_dimensions(10, 10, Some(6)).unwrap();
    let board = engine.board().clone();

    for code in [-3, 4, 100] {
        assert_eq!(engine.step_code(code), Err(GameError::InvalidAction(code)));
    }
    assert_eq!(engine.board(), &board);

    let result = engine.step_code(1).unwrap();
    assert!(!result.done);
}

#[test]
fn walking_into_the_wall_ends_the_game() {
    let mut engine = GameEngine::with_dimensions(10, 10, Some(17)).unwrap();
    let start = engine.head();

    // Leftmost column is `start.col` moves away; the next one crosses the edge
    for _ in 0..start.col {
        let result = engine.step(Action::Left).unwrap();
        assert!(!result.done);
    }
    assert_eq!(engine.head().col, 0);

    let result = engine.step(Action::Left).unwrap();
    assert_eq!(result.as_tuple(), (-1, 0, true));
    assert!(engine.is_done());
}

#[test]
fn rejects_boards_below_minimum() {
    assert!(matches!(
        GameEngine::with_dimensions(10, 3, None),
        Err(GameError::InvalidDimensions {
            height: 10,
            width: 3
        })
    ));
}
