//! Board state representation and terminal-condition checks

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '-' | '.' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }

    /// The player owning this cell, if any
    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// One of the two game symbols. X always opens an episode unless the driver
/// hands the first move to O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    pub fn to_char(self) -> char {
        self.to_cell().to_char()
    }
}

impl TryFrom<char> for Player {
    type Error = crate::Error;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'X' | 'x' | '1' => Ok(Player::X),
            'O' | 'o' | '2' => Ok(Player::O),
            other => Err(crate::Error::InvalidSymbol {
                symbol: other.to_string(),
            }),
        }
    }
}

impl FromStr for Player {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Player::try_from(c),
            _ => Err(crate::Error::InvalidSymbol {
                symbol: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A 3x3 grid of marks in row-major order (positions 0-8).
///
/// The type is `Copy`; moves produce a new state and leave the original intact.
/// No turn information is stored, so any combination of marks is
/// representable, including boards that alternating play can never reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    pub cells: [Cell; 9],
}

impl BoardState {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Parse a board from its 9-character encoding, e.g. `"XO-------"`.
    ///
    /// Whitespace between characters is ignored, so rendered boards can be
    /// pasted back in.
    ///
    /// # Errors
    ///
    /// Returns error unless exactly 9 cells are present, or if any character is
    /// not a valid cell representation.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();

        if chars.len() != 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Ok(BoardState { cells })
    }

    /// Get cell at position (0-8)
    ///
    /// # Panics
    ///
    /// Panics if `pos > 8`.
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position holds a mark
    ///
    /// # Panics
    ///
    /// Panics if `pos > 8`; use [`BoardState::apply_move`] for unchecked input.
    pub fn is_occupied(&self, pos: usize) -> bool {
        self.cells[pos] != Cell::Empty
    }

    /// Get all empty positions
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of cells holding `player`'s mark
    pub fn count(&self, player: Player) -> usize {
        let target = player.to_cell();
        self.cells.iter().filter(|&&c| c == target).count()
    }

    /// Place `player`'s mark at `pos` and return the resulting state
    #[must_use = "apply_move returns a new board state; the original is unchanged"]
    pub fn apply_move(&self, pos: usize, player: Player) -> Result<BoardState, crate::Error> {
        if pos >= 9 {
            return Err(crate::Error::InvalidPosition { position: pos });
        }

        if self.is_occupied(pos) {
            return Err(crate::Error::IllegalMove { position: pos });
        }

        let mut new_state = *self;
        new_state.cells[pos] = player.to_cell();
        Ok(new_state)
    }

    /// Every cell holds a mark
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// `player` owns a complete row, column or diagonal
    pub fn is_win(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, player)
    }

    /// The opponent of `player` owns a complete line
    pub fn is_loss(&self, player: Player) -> bool {
        self.is_win(player.opponent())
    }

    /// Board is full and neither player has a line
    pub fn is_draw(&self) -> bool {
        self.is_full() && !self.is_win(Player::X) && !self.is_win(Player::O)
    }

    /// Check if the game is over (win or full board)
    pub fn is_game_over(&self) -> bool {
        self.is_win(Player::X) || self.is_win(Player::O) || self.is_full()
    }

    /// Get the winner if there is one. X is reported first on boards where
    /// both players own a line.
    pub fn winner(&self) -> Option<Player> {
        if self.is_win(Player::X) {
            Some(Player::X)
        } else if self.is_win(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Legal moves in this position (empty cells while the game is running)
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.is_game_over() {
            return Vec::new();
        }
        self.empty_positions()
    }

    /// The 9-character encoding used as a stable key
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for BoardState {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
