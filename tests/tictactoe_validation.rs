//! Test suite for the Tic-tac-toe model
//! Validates state-space invariants and terminal-check rules

use std::collections::HashSet;

use tdzero::{
    td::value_table::{DRAW_VALUE, LOSS_VALUE, UNDECIDED_VALUE, ValueTable, WIN_VALUE},
    tictactoe::{BoardState, Cell, Environment, GameOutcome, Player, STATE_COUNT, StateSpace},
};

/// Every board reachable by legal alternating play, from either opener
fn reachable_states() -> HashSet<BoardState> {
    let mut seen = HashSet::new();
    let mut stack = vec![
        (BoardState::new(), Player::X),
        (BoardState::new(), Player::O),
    ];

    while let Some((state, to_move)) = stack.pop() {
        if !seen.insert((state, to_move)) {
            continue;
        }
        for cell in state.legal_moves() {
            let next = state.apply_move(cell, to_move).unwrap();
            stack.push((next, to_move.opponent()));
        }
    }
    seen.into_iter().map(|(state, _)| state).collect()
}

mod state_space {
    use super::*;

    #[test]
    fn test_enumeration_covers_every_assignment() {
        let states: Vec<BoardState> = StateSpace::enumerate_all().collect();
        assert_eq!(states.len(), STATE_COUNT);
        assert_eq!(STATE_COUNT, 3usize.pow(9));

        let distinct: HashSet<BoardState> = states.iter().copied().collect();
        assert_eq!(distinct.len(), STATE_COUNT);
    }

    #[test]
    fn test_index_follows_base_three_encoding() {
        assert_eq!(BoardState::new().index(), 0);
        // Cell 0 is the most significant digit, X = 1, O = 2
        assert_eq!(BoardState::from_string("X--------").unwrap().index(), 6_561);
        assert_eq!(BoardState::from_string("--------O").unwrap().index(), 2);
        assert_eq!(
            BoardState::from_string("OOOOOOOOO").unwrap().index(),
            STATE_COUNT - 1
        );
    }

    #[test]
    fn test_every_index_round_trips() {
        for state in StateSpace::enumerate_all() {
            assert_eq!(BoardState::from_index(state.index()).unwrap(), state);
        }
        assert!(BoardState::from_index(STATE_COUNT).is_err());
    }
}

mod terminal_checks {
    use super::*;

    #[test]
    fn test_single_mark_is_not_terminal() {
        let state = BoardState::from_string("X--------").unwrap();
        assert!(!state.is_win(Player::X));
        assert!(!state.is_full());
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_top_row_wins_for_x_only() {
        let state = BoardState::from_string("XXX------").unwrap();
        assert!(state.is_win(Player::X));
        assert!(!state.is_win(Player::O));
        assert!(!state.is_draw());
        assert!(state.is_loss(Player::O));
        assert_eq!(GameOutcome::from_state(&state), Some(GameOutcome::Win(Player::X)));
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let state = BoardState::from_string("XOXOXOOXO").unwrap();
        assert!(state.is_full());
        assert!(!state.is_win(Player::X));
        assert!(!state.is_win(Player::O));
        assert!(state.is_draw());
        assert_eq!(GameOutcome::from_state(&state), Some(GameOutcome::Draw));
    }

    #[test]
    fn test_win_on_last_cell_is_not_a_draw() {
        let state = BoardState::from_string("XOXOXOOXX").unwrap();
        assert!(state.is_full());
        assert!(state.is_win(Player::X));
        assert!(!state.is_draw());
    }

    #[test]
    fn test_draw_matches_full_without_winner_everywhere() {
        for state in StateSpace::enumerate_all() {
            let expected =
                state.is_full() && !state.is_win(Player::X) && !state.is_win(Player::O);
            assert_eq!(state.is_draw(), expected, "board {}", state.encode());
        }
    }

    #[test]
    fn test_reachable_boards_never_have_two_winners() {
        let reachable = reachable_states();
        // 5,478 positions when X opens; the O-opening mirror adds the rest
        assert!(reachable.len() > 5_000);
        for state in &reachable {
            assert!(
                !(state.is_win(Player::X) && state.is_win(Player::O)),
                "board {} has two winners",
                state.encode()
            );
        }
    }

    #[test]
    fn test_apply_move_changes_exactly_one_cell() {
        for state in reachable_states() {
            for cell in 0..9 {
                match state.apply_move(cell, Player::O) {
                    Ok(next) => {
                        let changed = (0..9).filter(|&i| next.get(i) != state.get(i)).count();
                        assert_eq!(changed, 1);
                        assert_eq!(next.get(cell), Cell::O);
                    }
                    Err(_) => assert!(state.is_occupied(cell)),
                }
            }
        }
    }

    #[test]
    fn test_terminal_boards_have_no_legal_moves() {
        for state in reachable_states() {
            assert_eq!(state.is_game_over(), state.legal_moves().is_empty());
        }
    }
}

mod initial_values {
    use super::*;

    #[test]
    fn test_seed_values_cover_every_state() {
        for owner in [Player::X, Player::O] {
            let table = ValueTable::new(owner);
            assert_eq!(table.size(), STATE_COUNT);

            for state in StateSpace::enumerate_all() {
                let expected = if state.is_win(owner) {
                    WIN_VALUE
                } else if state.is_win(owner.opponent()) {
                    LOSS_VALUE
                } else if state.is_draw() {
                    DRAW_VALUE
                } else {
                    UNDECIDED_VALUE
                };
                assert_eq!(table.get(&state).unwrap(), expected);
            }
        }
    }

    #[test]
    fn test_win_takes_precedence_over_loss() {
        // Unreachable, but part of the enumerated space
        let both = BoardState::from_string("XXXOOO---").unwrap();
        assert_eq!(ValueTable::initial_value(&both, Player::X), WIN_VALUE);
        assert_eq!(ValueTable::initial_value(&both, Player::O), WIN_VALUE);
    }
}

mod environment {
    use super::*;

    #[test]
    fn test_single_writer_history() {
        let mut env = Environment::new();
        env.apply_move(Player::X, 4).unwrap();
        env.apply_move(Player::O, 0).unwrap();

        assert_eq!(env.state().get(4), Cell::X);
        assert_eq!(env.state().get(0), Cell::O);
        assert_eq!(env.history().len(), 2);
        assert!(env.apply_move(Player::X, 4).is_err());
        assert!(env.apply_move(Player::X, 9).is_err());
        assert_eq!(env.history().len(), 2);

        env.reset();
        assert_eq!(*env.state(), BoardState::new());
        assert!(env.history().is_empty());
    }

    #[test]
    fn test_no_moves_after_game_over() {
        let mut env = Environment::new();
        for (player, cell) in [
            (Player::X, 0),
            (Player::O, 3),
            (Player::X, 1),
            (Player::O, 4),
            (Player::X, 2),
        ] {
            env.apply_move(player, cell).unwrap();
        }
        assert_eq!(env.outcome(), Some(GameOutcome::Win(Player::X)));
        assert!(env.apply_move(Player::O, 5).is_err());
    }
}
