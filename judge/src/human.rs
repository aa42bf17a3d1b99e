use std::io::{BufRead, Cursor, Stdin, Stdout, Write};

use anyhow::Context;
use quarto::{visualize_state, Piece, Square, SquareFromStrErr, State, NUM_PIECES};

use crate::game::GameResult;
use crate::player::{MoveSource, Turn};

/// A line-based input for [`HumanPlayer`].
///
/// Unlike [`BufRead`], reading from [`Stdin`] only holds the stdin lock for
/// one line, so two console players can share the terminal.
pub trait ReadLine {
    /// Appends one line to `buf`, returning the number of bytes read
    /// (0 at end of input).
    fn read_line(&mut self, buf: &mut String) -> std::io::Result<usize>;
}

impl ReadLine for Stdin {
    fn read_line(&mut self, buf: &mut String) -> std::io::Result<usize> {
        Stdin::read_line(self, buf)
    }
}

impl<T: AsRef<[u8]>> ReadLine for Cursor<T> {
    fn read_line(&mut self, buf: &mut String) -> std::io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// A contestant typing on a console.
///
/// Pieces are entered as numbers 1 to 16, squares as e.g. `2C`.
/// Typing `forfeit` gives up the current game, `quit` (or closing the
/// input) stops playing.
pub struct HumanPlayer<I, O> {
    name: String,
    input: I,
    output: O,
    // Should always be empty before and after ask().
    buf: String,
}

impl HumanPlayer<Stdin, Stdout> {
    pub fn console(name: &str) -> Self {
        Self::new(name, std::io::stdin(), std::io::stdout())
    }
}

impl<I: ReadLine, O: Write> HumanPlayer<I, O> {
    pub fn new(name: &str, input: I, output: O) -> Self {
        Self {
            name: String::from(name),
            input,
            output,
            buf: String::new(),
        }
    }

    pub fn into_output(self) -> O {
        self.output
    }

    /// Shows `prompt` and keeps reading answers until `parse` accepts one.
    ///
    /// A rejected answer is followed by the rejection message and a new prompt.
    fn ask<T>(
        &mut self,
        state: &State,
        prompt: &str,
        mut parse: impl FnMut(&str) -> Result<T, String>,
    ) -> anyhow::Result<Turn<T>> {
        writeln!(self.output, "{}", visualize_state(state))?;
        write!(self.output, "{}, {}: ", self.name, prompt)?;
        loop {
            self.output.flush()?;
            self.buf.clear();
            let num_bytes = self
                .input
                .read_line(&mut self.buf)
                .context("Could not read answer")?;
            if num_bytes == 0 {
                writeln!(self.output)?;
                return Ok(Turn::HardQuit);
            }
            let answer = self.buf.trim();
            let result = match answer.to_ascii_lowercase().as_str() {
                "quit" => Ok(Turn::HardQuit),
                "forfeit" => Ok(Turn::Forfeit),
                _ => parse(answer).map(Turn::Continue),
            };
            self.buf.clear();
            match result {
                Ok(turn) => return Ok(turn),
                Err(msg) => write!(self.output, "{}, try again: ", msg)?,
            }
        }
    }
}

fn parse_piece(state: &State, answer: &str) -> Result<Piece, String> {
    if answer.is_empty() || !answer.bytes().all(|b| b.is_ascii_digit()) {
        return Err(String::from("Must be an integer"));
    }
    let out_of_range = || format!("Must be in interval [1,{}]", NUM_PIECES);
    // Too many digits for a u8 is out of range as well
    let number: u8 = answer.parse().map_err(|_| out_of_range())?;
    let piece = number
        .checked_sub(1)
        .and_then(|id| Piece::new(id).ok())
        .ok_or_else(out_of_range)?;
    if state.pieces().contains(piece) {
        Ok(piece)
    } else {
        Err(String::from("Piece is already played"))
    }
}

fn parse_square(state: &State, answer: &str) -> Result<Square, String> {
    let square: Square = answer
        .parse()
        .map_err(|err: SquareFromStrErr| err.to_string())?;
    if state.free_squares().contains(square) {
        Ok(square)
    } else {
        Err(String::from("Square is occupied"))
    }
}

impl<I: ReadLine, O: Write> MoveSource for HumanPlayer<I, O> {
    fn choose_piece(&mut self, state: &State) -> anyhow::Result<Turn<Piece>> {
        self.ask(
            state,
            "choose a piece for your opponent to place",
            |answer| parse_piece(state, answer),
        )
    }

    fn choose_square(&mut self, state: &State) -> anyhow::Result<Turn<Square>> {
        self.ask(
            state,
            "choose a square for the held piece",
            |answer| parse_square(state, answer),
        )
    }

    fn piece_placed(
        &mut self,
        _state: &State,
        player_name: &str,
        piece: Piece,
        square: Square,
    ) -> anyhow::Result<()> {
        if player_name != self.name {
            writeln!(
                self.output,
                "{} placed piece {} {} on {}",
                player_name,
                piece.id() + 1,
                piece,
                square
            )?;
        }
        Ok(())
    }

    fn game_over(
        &mut self,
        state: &State,
        result: &GameResult,
        player_names: &[String; 2],
    ) -> anyhow::Result<()> {
        writeln!(self.output, "{}", visualize_state(state))?;
        writeln!(self.output, "{}", result.announcement(player_names))?;
        self.output.flush()?;
        Ok(())
    }
}
