//! Moves and game outcomes

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Player};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub player: Player,
}

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Outcome of a terminal board, `None` while the game is still running
    pub fn from_state(state: &BoardState) -> Option<Self> {
        if let Some(winner) = state.winner() {
            Some(GameOutcome::Win(winner))
        } else if state.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }

    /// Reward from `player`'s point of view: +1 win, -1 loss, 0 draw
    pub fn reward_for(self, player: Player) -> f64 {
        match self {
            GameOutcome::Win(winner) if winner == player => 1.0,
            GameOutcome::Win(_) => -1.0,
            GameOutcome::Draw => 0.0,
        }
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::Win(player) => write!(f, "{player} wins"),
            GameOutcome::Draw => write!(f, "draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_state() {
        let running = BoardState::from_string("X--------").unwrap();
        assert_eq!(GameOutcome::from_state(&running), None);

        let won = BoardState::from_string("OOOXX-X--").unwrap();
        assert_eq!(GameOutcome::from_state(&won), Some(GameOutcome::Win(Player::O)));

        let drawn = BoardState::from_string("XOXOXOOXO").unwrap();
        assert_eq!(GameOutcome::from_state(&drawn), Some(GameOutcome::Draw));
    }

    #[test]
    fn test_reward_perspective() {
        let outcome = GameOutcome::Win(Player::X);
        assert_eq!(outcome.reward_for(Player::X), 1.0);
        assert_eq!(outcome.reward_for(Player::O), -1.0);
        assert_eq!(GameOutcome::Draw.reward_for(Player::O), 0.0);
    }
}
