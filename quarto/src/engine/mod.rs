//! Choosing moves for an automated contestant.
//!
//! The search is a depth-limited minimax over [`State`] copies, see
//! [`maximize()`] and [`minimize()`]. Its depth adapts to the number of
//! pieces left, see [`search_depth()`].

mod difficulty;
mod eval;
mod search;

pub use difficulty::*;
pub use eval::*;
pub use search::*;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Piece, SearchError, Square, State};

/// Tuning knobs for the search, on top of the [`Difficulty`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    #[serde(default)]
    pub leaf_evaluation: LeafEvaluation,
    /// Search this many plies regardless of the pool size. Values below 1
    /// are treated as 1.
    #[serde(default)]
    pub depth_override: Option<u8>,
}

/// Picks pieces and squares for one contestant.
///
/// All randomness (the smartness draw, the order in which moves are
/// searched, and random moves) comes from the `rng` given at construction,
/// so seeding it makes the engine reproducible.
pub struct SearchEngine<R> {
    difficulty: Difficulty,
    options: SearchOptions,
    rng: R,
}

impl<R: Rng> SearchEngine<R> {
    pub fn new(difficulty: Difficulty, rng: R) -> Self {
        Self::with_options(difficulty, SearchOptions::default(), rng)
    }

    pub fn with_options(difficulty: Difficulty, options: SearchOptions, rng: R) -> Self {
        Self {
            difficulty,
            options,
            rng,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Chooses the piece to hand over to the opponent.
    ///
    /// Depending on the difficulty, this is either the searched piece or a
    /// random one from the pool.
    pub fn choose_piece(&mut self, state: &State) -> Result<Piece, SearchError> {
        check_can_choose_piece(state)?;
        if self.plays_searched_move() {
            self.choose_best_piece(state)
        } else {
            self.random_piece(state)
        }
    }

    /// Chooses where to place the held piece.
    ///
    /// Depending on the difficulty, this is either the searched square or a
    /// random free one.
    pub fn choose_square(&mut self, state: &State) -> Result<Square, SearchError> {
        check_can_choose_square(state)?;
        if self.plays_searched_move() {
            self.choose_best_square(state)
        } else {
            self.random_square(state)
        }
    }

    /// The piece found by the search, regardless of the difficulty.
    pub fn choose_best_piece(&mut self, state: &State) -> Result<Piece, SearchError> {
        check_can_choose_piece(state)?;
        let best = maximize(
            state,
            self.depth_for(state),
            self.options.leaf_evaluation,
            &mut self.rng,
        );
        match best.mv.and_then(Move::piece) {
            Some(piece) => Ok(piece),
            // The game is already over, any piece will do
            None => self.random_piece(state),
        }
    }

    /// The square found by the search, regardless of the difficulty.
    pub fn choose_best_square(&mut self, state: &State) -> Result<Square, SearchError> {
        check_can_choose_square(state)?;
        let best = maximize(
            state,
            self.depth_for(state),
            self.options.leaf_evaluation,
            &mut self.rng,
        );
        match best.mv.and_then(Move::square) {
            Some(square) => Ok(square),
            None => self.random_square(state),
        }
    }

    fn depth_for(&self, state: &State) -> u8 {
        match self.options.depth_override {
            Some(depth) => depth.max(1),
            None => search_depth(state.pieces().len()),
        }
    }

    fn plays_searched_move(&mut self) -> bool {
        let smartness = self.difficulty.smartness();
        if smartness >= 1.0 {
            true
        } else if smartness <= 0.0 {
            false
        } else {
            self.rng.gen_bool(smartness)
        }
    }

    fn random_piece(&mut self, state: &State) -> Result<Piece, SearchError> {
        let pieces = state.pieces();
        if pieces.is_empty() {
            return Err(SearchError::NoPiecesLeft);
        }
        let idx = self.rng.gen_range(0..pieces.len() as usize);
        pieces.nth(idx).ok_or(SearchError::NoPiecesLeft)
    }

    fn random_square(&mut self, state: &State) -> Result<Square, SearchError> {
        let free = state.free_squares();
        if free.is_empty() {
            return Err(SearchError::NoFreeSquares);
        }
        let idx = self.rng.gen_range(0..free.len() as usize);
        free.nth(idx).ok_or(SearchError::NoFreeSquares)
    }
}

fn check_can_choose_piece(state: &State) -> Result<(), SearchError> {
    if state.is_holding() {
        Err(SearchError::HoldingPiece)
    } else if state.pieces().is_empty() {
        Err(SearchError::NoPiecesLeft)
    } else {
        Ok(())
    }
}

fn check_can_choose_square(state: &State) -> Result<(), SearchError> {
    if !state.is_holding() {
        Err(SearchError::NothingHeld)
    } else if state.free_squares().is_empty() {
        Err(SearchError::NoFreeSquares)
    } else {
        Ok(())
    }
}
