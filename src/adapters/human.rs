//! Human participant reading moves from a line-based input channel

use std::io::{BufRead, Write};

use rand::rngs::StdRng;

use crate::{
    Error, Result,
    ports::Learner,
    tictactoe::{BoardState, Player},
};

/// Prompts for a cell index until a valid, empty one is entered.
///
/// The board is rendered before every prompt. Input that is not a number,
/// out of range, or points at an occupied cell is rejected and asked for
/// again; end of input is reported as [`Error::InputClosed`].
pub struct HumanPlayer<R, W> {
    symbol: Player,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(symbol: Player, input: R, output: W) -> Self {
        Self {
            symbol,
            input,
            output,
        }
    }

    /// Hand back the output sink, e.g. to inspect what was written
    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, state: &BoardState) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", render_with_indices(state))?;
        write!(self.output, "{} to move, choose a cell [0-8]: ", self.symbol)?;
        self.output.flush()?;
        Ok(())
    }
}

/// Board rendering where empty cells show their index
pub fn render_with_indices(state: &BoardState) -> String {
    state
        .cells
        .chunks(3)
        .enumerate()
        .map(|(r, row)| {
            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(c, cell)| match cell.to_player() {
                    Some(player) => player.to_string(),
                    None => (r * 3 + c).to_string(),
                })
                .collect();
            format!(" {}", cells.join(" | "))
        })
        .collect::<Vec<_>>()
        .join("\n---+---+---\n")
}

impl<R: BufRead, W: Write> Learner for HumanPlayer<R, W> {
    fn symbol(&self) -> Player {
        self.symbol
    }

    fn select_move(&mut self, state: &BoardState, _rng: &mut StdRng) -> Result<usize> {
        if state.legal_moves().is_empty() {
            return Err(Error::NoValidMoves);
        }

        loop {
            self.prompt(state)?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::InputClosed);
            }

            match line.trim().parse::<usize>() {
                Ok(cell) if cell < 9 && !state.is_occupied(cell) => return Ok(cell),
                Ok(cell) if cell < 9 => {
                    log::warn!("rejected move to occupied cell {cell}");
                    writeln!(self.output, "Cell {cell} is already taken.")?;
                }
                _ => {
                    log::warn!("rejected move input {:?}", line.trim());
                    writeln!(self.output, "Please enter a number between 0 and 8.")?;
                }
            }
        }
    }

    fn name(&self) -> &str {
        "human"
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rand::SeedableRng;

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0)
    }

    #[test]
    fn test_valid_input() {
        let mut human = HumanPlayer::new(Player::O, Cursor::new("4\n"), Vec::new());
        let cell = human.select_move(&BoardState::new(), &mut rng()).unwrap();
        assert_eq!(cell, 4);
    }

    #[test]
    fn test_reprompts_until_valid() {
        let state = BoardState::from_string("X--------").unwrap();
        let input = Cursor::new("abc\n12\n0\n7\n");
        let mut human = HumanPlayer::new(Player::O, input, Vec::new());

        let cell = human.select_move(&state, &mut rng()).unwrap();
        assert_eq!(cell, 7);

        let output = String::from_utf8(human.into_output()).unwrap();
        assert_eq!(output.matches("Please enter a number").count(), 2);
        assert!(output.contains("Cell 0 is already taken."));
    }

    #[test]
    fn test_closed_input() {
        let mut human = HumanPlayer::new(Player::X, Cursor::new("9\n"), Vec::new());
        assert!(matches!(
            human.select_move(&BoardState::new(), &mut rng()),
            Err(Error::InputClosed)
        ));
    }

    #[test]
    fn test_render_with_indices() {
        let state = BoardState::from_string("X---O----").unwrap();
        assert_eq!(
            render_with_indices(&state),
            " X | 1 | 2\n---+---+---\n 3 | O | 5\n---+---+---\n 6 | 7 | 8"
        );
    }
}
