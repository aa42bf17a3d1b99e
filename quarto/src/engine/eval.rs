use crate::{shared_attributes, State};

use super::Score;

/// Heuristic value of a position that is neither won nor drawn.
///
/// Each line contributes the number of attributes shared by its pieces,
/// weighted by the square of how many pieces it holds. Lines that are close
/// to full and still share many attributes dominate the sum.
pub fn evaluate(state: &State) -> Score {
    state
        .get_vectors()
        .iter()
        .map(|vector| {
            let filled = vector.iter().flatten().count() as Score;
            if filled == 0 {
                return 0;
            }
            let common = shared_attributes(vector.iter().copied().flatten()).count_ones() as Score;
            common * filled * filled
        })
        .sum()
}
