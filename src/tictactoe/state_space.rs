//! Full combinatorial enumeration of board configurations
//!
//! Every assignment of `{Empty, X, O}` to the nine cells is produced, in the
//! natural order of its base-3 index. Most of these boards are unreachable
//! under alternating play; the enumeration is only used to seed value tables
//! so that every successor state has an entry.

use std::{iter::FusedIterator, ops::Range};

use super::{BoardState, Cell};

/// Number of cell assignments on a 3x3 board (3^9)
pub const STATE_COUNT: usize = 19_683;

fn digit(cell: Cell) -> usize {
    match cell {
        Cell::Empty => 0,
        Cell::X => 1,
        Cell::O => 2,
    }
}

fn cell_for_digit(d: usize) -> Cell {
    match d {
        0 => Cell::Empty,
        1 => Cell::X,
        _ => Cell::O,
    }
}

impl BoardState {
    /// Base-3 index of this board; cell 0 is the most significant digit.
    pub fn index(&self) -> usize {
        self.cells.iter().fold(0, |acc, &cell| acc * 3 + digit(cell))
    }

    /// Decode a base-3 index produced by [`BoardState::index`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidStateIndex`] if `index >= 3^9`.
    pub fn from_index(index: usize) -> Result<Self, crate::Error> {
        if index >= STATE_COUNT {
            return Err(crate::Error::InvalidStateIndex {
                index,
                limit: STATE_COUNT,
            });
        }

        let mut cells = [Cell::Empty; 9];
        let mut rest = index;
        for cell in cells.iter_mut().rev() {
            *cell = cell_for_digit(rest % 3);
            rest /= 3;
        }
        Ok(BoardState { cells })
    }
}

/// Iterator over every board configuration, in index order.
#[derive(Debug, Clone)]
pub struct StateSpace {
    indices: Range<usize>,
}

impl StateSpace {
    /// Start a fresh pass over the whole space. Each call yields the same
    /// sequence.
    pub fn enumerate_all() -> Self {
        Self {
            indices: 0..STATE_COUNT,
        }
    }
}

impl Iterator for StateSpace {
    type Item = BoardState;

    fn next(&mut self) -> Option<Self::Item> {
        self.indices
            .next()
            .and_then(|i| BoardState::from_index(i).ok())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl ExactSizeIterator for StateSpace {}

impl FusedIterator for StateSpace {}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::tictactoe::Player;

    #[test]
    fn test_enumeration_is_complete_and_distinct() {
        let states: Vec<BoardState> = StateSpace::enumerate_all().collect();
        assert_eq!(states.len(), STATE_COUNT);

        let distinct: HashSet<BoardState> = states.iter().copied().collect();
        assert_eq!(distinct.len(), STATE_COUNT);
    }

    #[test]
    fn test_enumeration_order() {
        let mut space = StateSpace::enumerate_all();
        assert_eq!(space.len(), STATE_COUNT);
        assert_eq!(space.next().unwrap().encode(), "---------");
        assert_eq!(space.next().unwrap().encode(), "--------X");
        assert_eq!(space.next().unwrap().encode(), "--------O");
        assert_eq!(space.next().unwrap().encode(), "-------X-");
        assert_eq!(StateSpace::enumerate_all().last().unwrap().encode(), "OOOOOOOOO");
    }

    #[test]
    fn test_enumeration_is_restartable() {
        let first: Vec<BoardState> = StateSpace::enumerate_all().take(50).collect();
        let second: Vec<BoardState> = StateSpace::enumerate_all().take(50).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_index_roundtrip() {
        for index in 0..STATE_COUNT {
            let state = BoardState::from_index(index).unwrap();
            assert_eq!(state.index(), index);
        }
    }

    #[test]
    fn test_most_significant_digit_is_cell_zero() {
        let state = BoardState::new().apply_move(0, Player::X).unwrap();
        assert_eq!(state.index(), 6_561);
        let state = BoardState::new().apply_move(8, Player::O).unwrap();
        assert_eq!(state.index(), 2);
    }

    #[test]
    fn test_from_index_rejects_out_of_range() {
        assert!(matches!(
            BoardState::from_index(STATE_COUNT),
            Err(crate::Error::InvalidStateIndex { .. })
        ));
    }
}
