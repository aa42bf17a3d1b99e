use std::iter::FusedIterator;
use std::str::FromStr;

use crate::bitset::bitset_traits;
use crate::IllegalMove;

/// Number of rows and of columns of the board.
pub const BOARD_SIZE: u8 = 4;

/// A cell of the 4x4 board.
///
/// Row and column are both in `0..4`. Its text form is the row as a digit
/// from 1 to 4 followed by the column as a letter from A to D, so `(1, 2)`
/// is `2C`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Result<Self, IllegalMove> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Ok(Square { row, col })
        } else {
            Err(IllegalMove::InvalidCoordinate { row, col })
        }
    }

    pub const fn row(self) -> u8 {
        self.row
    }

    pub const fn col(self) -> u8 {
        self.col
    }

    /// Row-major position of the square, in `0..16`.
    pub(crate) const fn index(self) -> u8 {
        self.row * BOARD_SIZE + self.col
    }

    pub(crate) const fn from_index(idx: u8) -> Self {
        debug_assert!(idx < BOARD_SIZE * BOARD_SIZE);
        Square {
            row: idx / BOARD_SIZE,
            col: idx % BOARD_SIZE,
        }
    }

    fn col_letter(self) -> char {
        char::from(b'A' + self.col)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.row + 1, self.col_letter())
    }
}

/// The error type for the [`FromStr`] instance of [`Square`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SquareFromStrErr {
    NotTwoChars,
    InvalidRow,
    InvalidColumn,
}

impl std::error::Error for SquareFromStrErr {}

impl std::fmt::Display for SquareFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SquareFromStrErr::NotTwoChars => write!(f, "Provide two coordinates"),
            SquareFromStrErr::InvalidRow => write!(f, "Invalid row coordinate"),
            SquareFromStrErr::InvalidColumn => write!(f, "Invalid column coordinate"),
        }
    }
}

impl FromStr for Square {
    type Err = SquareFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let row_char = chars.next().ok_or(SquareFromStrErr::NotTwoChars)?;
        let col_char = chars.next().ok_or(SquareFromStrErr::NotTwoChars)?;
        if chars.next().is_some() {
            return Err(SquareFromStrErr::NotTwoChars);
        }
        let row = match row_char {
            '1'..='4' => row_char as u8 - b'1',
            _ => return Err(SquareFromStrErr::InvalidRow),
        };
        let col = match col_char.to_ascii_uppercase() {
            c @ 'A'..='D' => c as u8 - b'A',
            _ => return Err(SquareFromStrErr::InvalidColumn),
        };
        Ok(Square { row, col })
    }
}

/// A compact set of [`Square`]s, iterated in row-major order.
///
/// Like [`PiecesSet`](crate::PiecesSet), this is an immutable [`Copy`] type,
/// so iterating over it can be restarted at any time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SquaresSet {
    // Bit i is set iff the square with row-major index i is in the set.
    pub(crate) bits: u16,
}

bitset_traits!(SquaresSet, Square);

impl SquaresSet {
    /// The square at position `n` in iteration order, if the set is big enough.
    pub fn nth(self, n: usize) -> Option<Square> {
        self.into_iter().nth(n)
    }
}

impl IntoIterator for SquaresSet {
    type Item = Square;

    type IntoIter = SquaresSetIter;

    fn into_iter(self) -> Self::IntoIter {
        SquaresSetIter { bits: self.bits }
    }
}

/// Iterator produced by [`SquaresSet::into_iter()`].
#[derive(Clone, Copy, Debug)]
pub struct SquaresSetIter {
    bits: u16,
}

impl Iterator for SquaresSetIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            let idx = self.bits.trailing_zeros() as u8;
            self.bits ^= 1u16 << idx;
            Some(Square::from_index(idx))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bits.count_ones() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for SquaresSetIter {
    fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }
}

impl FusedIterator for SquaresSetIter {}
