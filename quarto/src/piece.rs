use serde::{Deserialize, Serialize};

use crate::IllegalMove;

/// One of the 16 game pieces.
///
/// The id is in `0..16`, and each of its four low bits encodes one
/// [`Attribute`]. Every combination of attributes exists exactly once.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Piece(u8);

/// A physical property of a [`Piece`], identified by its bit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Attribute {
    Hollow = 0b0001,
    Round = 0b0010,
    Short = 0b0100,
    Dark = 0b1000,
}

/// Mask of the bits that carry attributes.
pub const ATTRIBUTE_BITS: u8 = 0b1111;

pub const NUM_PIECES: usize = 16;

impl Piece {
    pub const fn new(id: u8) -> Result<Self, IllegalMove> {
        if id <= ATTRIBUTE_BITS {
            Ok(Piece(id))
        } else {
            Err(IllegalMove::InvalidPiece { id })
        }
    }

    /// The id of the piece, in `0..16`.
    pub const fn id(self) -> u8 {
        self.0
    }

    pub(crate) const fn index(self) -> u8 {
        self.0
    }

    pub(crate) const fn from_index(idx: u8) -> Self {
        debug_assert!(idx <= ATTRIBUTE_BITS);
        Piece(idx)
    }

    pub fn has(self, attribute: Attribute) -> bool {
        self.0 & attribute as u8 != 0
    }

    /// Render this piece as a five-character figure, e.g. `(-O*)`.
    ///
    /// Brackets show the color (`(` dark, `<` light), the sign shows the
    /// height (`-` short, `+` tall), the letter the shape (`O` round, `X`
    /// square) and the star whether it is hollow.
    pub fn figure(self) -> String {
        let (open, close) = if self.has(Attribute::Dark) {
            ('(', ')')
        } else {
            ('<', '>')
        };
        let height = if self.has(Attribute::Short) { '-' } else { '+' };
        let shape = if self.has(Attribute::Round) { 'O' } else { 'X' };
        let hollow = if self.has(Attribute::Hollow) { '*' } else { ' ' };
        [open, height, shape, hollow, close].iter().collect()
    }
}

impl TryFrom<u8> for Piece {
    type Error = IllegalMove;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Piece::new(id)
    }
}

impl From<Piece> for u8 {
    fn from(piece: Piece) -> u8 {
        piece.0
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.figure())
    }
}

/// The attribute bits that have the same value across all given pieces.
///
/// A bit is set in the result if it is set in every piece, or clear in
/// every piece. For an empty input all bits count as shared.
pub fn shared_attributes<I: IntoIterator<Item = Piece>>(pieces: I) -> u8 {
    let mut all_set = ATTRIBUTE_BITS;
    let mut all_clear = ATTRIBUTE_BITS;
    for piece in pieces {
        all_set &= piece.0;
        all_clear &= ATTRIBUTE_BITS - piece.0;
    }
    all_set | all_clear
}

/// All pieces, by ascending id.
pub static ALL_PIECES: [Piece; NUM_PIECES] = {
    let mut pieces = [Piece(0); NUM_PIECES];
    let mut id = 0;
    while id < NUM_PIECES {
        pieces[id] = Piece(id as u8);
        id += 1;
    }
    pieces
};

/// Shorthand for creating a piece from its id.
///
/// ```
/// # use quarto::{piece, Attribute};
/// let p = piece!(0b1010);
/// assert!(p.has(Attribute::Dark) && p.has(Attribute::Round));
/// ```
#[macro_export]
macro_rules! piece {
    ($id:expr) => {
        $crate::Piece::new($id).expect("Invalid piece id given to piece! macro")
    };
}
// The import is for using the macro in other modules, see https://stackoverflow.com/a/31749071/1726797
#[allow(unused_imports)]
pub(crate) use piece;
