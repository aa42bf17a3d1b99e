use crate::Piece;

/// The error type for the mutators of [`State`](crate::State).
///
/// Every variant is a violated precondition. The state is left untouched
/// when one of these is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    AlreadyHolding { held: Piece },
    PieceUnavailable { piece: Piece },
    NothingHeld,
    SquareOccupied { row: u8, col: u8, occupant: Piece },
    InvalidCoordinate { row: u8, col: u8 },
    InvalidPiece { id: u8 },
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::AlreadyHolding { held } => write!(
                f,
                "Tried to pick a piece while already holding piece {}",
                held.id()
            ),
            IllegalMove::PieceUnavailable { piece } => write!(
                f,
                "Tried to pick piece {}, which is no longer in the pool",
                piece.id()
            ),
            IllegalMove::NothingHeld => write!(f, "Tried to place a piece without holding one"),
            IllegalMove::SquareOccupied { row, col, occupant } => write!(
                f,
                "Tried to place a piece on square ({}, {}), which is occupied by piece {}",
                row,
                col,
                occupant.id()
            ),
            IllegalMove::InvalidCoordinate { row, col } => write!(
                f,
                "The coordinate ({}, {}) is outside of the 4x4 board",
                row, col
            ),
            IllegalMove::InvalidPiece { id } => {
                write!(f, "There is no piece with id {}, ids go from 0 to 15", id)
            }
        }
    }
}

/// The error type for [`SearchEngine`](crate::SearchEngine) requests made in
/// the wrong phase of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchError {
    /// A piece was requested while one is still waiting to be placed.
    HoldingPiece,
    /// A piece was requested, but the pool is empty.
    NoPiecesLeft,
    /// A square was requested, but there is no piece to place.
    NothingHeld,
    /// A square was requested, but the board is full.
    NoFreeSquares,
}

impl std::error::Error for SearchError {}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::HoldingPiece => {
                write!(f, "Asked to choose a piece while a piece is held")
            }
            SearchError::NoPiecesLeft => {
                write!(f, "Asked to choose a piece, but no pieces are left")
            }
            SearchError::NothingHeld => {
                write!(f, "Asked to choose a square, but no piece is held")
            }
            SearchError::NoFreeSquares => {
                write!(f, "Asked to choose a square, but the board is full")
            }
        }
    }
}
