//! Game state and move search for Quarto.
//!
//! Two players take turns. In each turn, a player places the piece they were
//! handed on the 4x4 board, then picks one of the remaining pieces for the
//! opponent. Whoever completes a row, column or diagonal of four pieces that
//! share an [`Attribute`] wins.
//!
//! [`State`] is the position, [`SearchEngine`] chooses moves for a computer
//! player.

pub use engine::*;
pub use errors::*;
pub use piece::*;
pub use pieces_set::*;
pub use square::*;
pub use state::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod bitset;
mod engine;
mod errors;
mod piece;
mod pieces_set;
mod square;
mod state;
mod visualization;
