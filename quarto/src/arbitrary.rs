use quickcheck::{Arbitrary, Gen};

use crate::{Difficulty, Piece, Square, State};

impl Arbitrary for Piece {
    fn arbitrary(g: &mut Gen) -> Self {
        Piece::from_index(u8::arbitrary(g) % 16)
    }
}

impl Arbitrary for Square {
    fn arbitrary(g: &mut Gen) -> Self {
        Square::from_index(u8::arbitrary(g) % 16)
    }
}

impl Arbitrary for Difficulty {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Difficulty::ALL).unwrap()
    }
}

/// A state reached by playing random legal picks and placements from the
/// start, stopping early once somebody has won.
impl Arbitrary for State {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut state = State::new();
        // 32 actions fill the whole board
        let num_actions = usize::arbitrary(g) % 33;
        for _ in 0..num_actions {
            if state.has_winner() {
                break;
            }
            if state.is_holding() {
                let free = Vec::from_iter(state.free_squares());
                let &square = g.choose(&free).unwrap();
                state.place_at(square).unwrap();
            } else {
                let pieces = Vec::from_iter(state.pieces());
                match g.choose(&pieces) {
                    Some(&piece) => state.pick_piece(piece).unwrap(),
                    None => break,
                }
            }
        }
        state
    }
}
