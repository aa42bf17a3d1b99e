use crate::{shared_attributes, IllegalMove, Piece, PiecesSet, Square, SquaresSet, ALL_PIECES_SET};

/// One line of the board: a row, a column or a diagonal.
pub type Vector = [Option<Piece>; 4];

pub const NUM_VECTORS: usize = 10;

/// Row-major cell indices of the 10 lines, in the order returned by
/// [`State::get_vectors()`]: rows, columns, main diagonal, anti-diagonal.
const LINES: [[usize; 4]; NUM_VECTORS] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [8, 9, 10, 11],
    [12, 13, 14, 15],
    [0, 4, 8, 12],
    [1, 5, 9, 13],
    [2, 6, 10, 14],
    [3, 7, 11, 15],
    [0, 5, 10, 15],
    [3, 6, 9, 12],
];

/// A game position: the board, the pool of pieces nobody has picked yet,
/// and the piece that was picked but not placed yet.
///
/// Every piece is in exactly one of these three places. The mutators check
/// their preconditions and leave the state untouched when they fail.
///
/// This is a small [`Copy`] type, so copies never share storage with the
/// original.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct State {
    /// Row-major.
    cells: [Option<Piece>; 16],
    pool: PiecesSet,
    held: Option<Piece>,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    /// An empty board, all pieces in the pool, nothing held.
    pub fn new() -> Self {
        Self {
            cells: [None; 16],
            pool: ALL_PIECES_SET,
            held: None,
        }
    }

    /// Creates a state from a board given as rows, and an optional held piece.
    ///
    /// The pool consists of all remaining pieces. Fails if a piece occurs
    /// more than once.
    pub fn from_rows(
        rows: [[Option<Piece>; 4]; 4],
        held: Option<Piece>,
    ) -> Result<Self, IllegalMove> {
        let mut state = State::new();
        let placed = rows.iter().flatten().copied().flatten();
        for piece in placed.chain(held) {
            if !state.pool.contains(piece) {
                return Err(IllegalMove::PieceUnavailable { piece });
            }
            state.pool = state.pool.remove(piece);
        }
        for (idx, cell) in rows.iter().flatten().enumerate() {
            state.cells[idx] = *cell;
        }
        state.held = held;
        Ok(state)
    }

    /// The pieces that have not been picked yet.
    pub fn pieces(&self) -> PiecesSet {
        self.pool
    }

    pub fn held_piece(&self) -> Option<Piece> {
        self.held
    }

    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }

    /// Takes `piece` out of the pool and holds it.
    pub fn pick_piece(&mut self, piece: Piece) -> Result<(), IllegalMove> {
        if let Some(held) = self.held {
            return Err(IllegalMove::AlreadyHolding { held });
        }
        if !self.pool.contains(piece) {
            return Err(IllegalMove::PieceUnavailable { piece });
        }
        self.pool = self.pool.remove(piece);
        self.held = Some(piece);
        Ok(())
    }

    /// Places the held piece on the square at `(row, col)`.
    pub fn place_piece(&mut self, row: u8, col: u8) -> Result<(), IllegalMove> {
        self.place_at(Square::new(row, col)?)
    }

    /// Like [`Self::place_piece()`], for an already validated coordinate.
    pub fn place_at(&mut self, square: Square) -> Result<(), IllegalMove> {
        let held = self.held.ok_or(IllegalMove::NothingHeld)?;
        if let Some(occupant) = self.at(square) {
            return Err(IllegalMove::SquareOccupied {
                row: square.row(),
                col: square.col(),
                occupant,
            });
        }
        self.cells[square.index() as usize] = Some(held);
        self.held = None;
        Ok(())
    }

    /// The content of the square at `(row, col)`.
    pub fn square(&self, row: u8, col: u8) -> Result<Option<Piece>, IllegalMove> {
        Ok(self.at(Square::new(row, col)?))
    }

    /// The content of a square.
    pub fn at(&self, square: Square) -> Option<Piece> {
        self.cells[square.index() as usize]
    }

    /// The board as rows of cells.
    pub fn rows(&self) -> [[Option<Piece>; 4]; 4] {
        let mut rows = [[None; 4]; 4];
        for (idx, cell) in self.cells.iter().enumerate() {
            rows[idx / 4][idx % 4] = *cell;
        }
        rows
    }

    /// All empty squares. Iterating over the set yields them in row-major order.
    pub fn free_squares(&self) -> SquaresSet {
        let occupied: SquaresSet = (0..16u8)
            .filter(|&idx| self.cells[idx as usize].is_some())
            .map(Square::from_index)
            .collect();
        !occupied
    }

    /// Whether any row, column or diagonal is full and its four pieces share
    /// at least one attribute.
    pub fn has_winner(&self) -> bool {
        LINES.iter().any(|line| self.line_wins(line))
    }

    /// Whether the game ended without a winner: every piece is on the board.
    pub fn is_draw(&self) -> bool {
        self.pool.is_empty() && self.held.is_none() && !self.has_winner()
    }

    /// Returns an independent copy of the state.
    pub fn copy(&self) -> State {
        *self
    }

    /// All rows, then all columns, then the main diagonal (top left to bottom
    /// right) and the anti-diagonal (top right to bottom left).
    pub fn get_vectors(&self) -> [Vector; NUM_VECTORS] {
        LINES.map(|line| line.map(|idx| self.cells[idx]))
    }

    fn line_wins(&self, line: &[usize; 4]) -> bool {
        let mut pieces = [None; 4];
        for (slot, &idx) in pieces.iter_mut().zip(line) {
            match self.cells[idx] {
                Some(piece) => *slot = Some(piece),
                None => return false,
            }
        }
        shared_attributes(pieces.into_iter().flatten()) != 0
    }
}
