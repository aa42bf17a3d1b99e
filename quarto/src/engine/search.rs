use std::cmp::Ordering;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{IllegalMove, Piece, Square, State};

use super::eval::evaluate;

pub type Score = i32;

/// The mover at the root can force a win.
pub const WIN: Score = Score::MAX;
/// The opponent of the mover at the root can force a win.
pub const LOSS: Score = -WIN;

/// One edge of the search tree.
///
/// A placement followed by a handoff is a single move, made by the player
/// who places.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Pick(Piece),
    Place(Square),
    PlaceAndPick(Square, Piece),
}

impl Move {
    /// The piece handed over, if any.
    pub fn piece(self) -> Option<Piece> {
        match self {
            Move::Pick(piece) | Move::PlaceAndPick(_, piece) => Some(piece),
            Move::Place(_) => None,
        }
    }

    /// The square placed on, if any.
    pub fn square(self) -> Option<Square> {
        match self {
            Move::Place(square) | Move::PlaceAndPick(square, _) => Some(square),
            Move::Pick(_) => None,
        }
    }

    fn apply(self, state: &State) -> Result<State, IllegalMove> {
        let mut next = state.copy();
        if let Some(square) = self.square() {
            next.place_at(square)?;
        }
        if let Some(piece) = self.piece() {
            next.pick_piece(piece)?;
        }
        Ok(next)
    }
}

/// What the heuristic returns at the leaves of the minimizing player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafEvaluation {
    /// Both players' leaves use the heuristic as is.
    #[default]
    Shared,
    /// The minimizing player's leaves use the negated heuristic.
    MoverRelative,
}

/// The result of searching a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub value: Score,
    /// The remaining search depth at which `value` was determined. A win
    /// found early in the search has a higher depth than one found late.
    pub depth: u8,
    /// The move leading to the best child, `None` for leaves.
    pub mv: Option<Move>,
}

impl Evaluation {
    fn leaf(value: Score, depth: u8) -> Self {
        Self {
            value,
            depth,
            mv: None,
        }
    }
}

/// Whether the held piece can be placed so that the board has a winner.
pub fn can_win(state: &State) -> bool {
    state.is_holding()
        && state.free_squares().into_iter().any(|square| {
            let mut next = state.copy();
            next.place_at(square).is_ok() && next.has_winner()
        })
}

/// All legal moves from `node` with their resulting states, in random order.
pub fn children<R: Rng + ?Sized>(node: &State, rng: &mut R) -> Vec<(Move, State)> {
    let pieces = node.pieces();
    let mut moves: Vec<Move> = match node.held_piece() {
        None => pieces.into_iter().map(Move::Pick).collect(),
        Some(_) if pieces.is_empty() => node.free_squares().into_iter().map(Move::Place).collect(),
        Some(_) => node
            .free_squares()
            .into_iter()
            .flat_map(|square| {
                pieces
                    .into_iter()
                    .map(move |piece| Move::PlaceAndPick(square, piece))
            })
            .collect(),
    };
    moves.shuffle(rng);
    moves
        .into_iter()
        .filter_map(|mv| mv.apply(node).ok().map(|child| (mv, child)))
        .collect()
}

/// Searches `node` from the point of view of the player to move there.
pub fn maximize<R: Rng + ?Sized>(
    node: &State,
    depth: u8,
    leaf_evaluation: LeafEvaluation,
    rng: &mut R,
) -> Evaluation {
    // The opponent's last placement won
    if node.has_winner() {
        return Evaluation::leaf(LOSS, depth);
    }
    if node.is_draw() {
        return Evaluation::leaf(0, depth);
    }
    if depth == 0 {
        let value = if can_win(node) { WIN } else { evaluate(node) };
        return Evaluation::leaf(value, 0);
    }

    let mut best: Option<Evaluation> = None;
    for (mv, child) in children(node, rng) {
        let reply = minimize(&child, depth - 1, leaf_evaluation, rng);
        let candidate = Evaluation {
            mv: Some(mv),
            ..reply
        };
        best = Some(match best {
            Some(best) => pick_max(best, candidate),
            None => candidate,
        });
    }
    best.unwrap_or_else(|| Evaluation::leaf(evaluate(node), depth))
}

/// Searches `node` from the point of view of the opponent of the player at
/// the root.
pub fn minimize<R: Rng + ?Sized>(
    node: &State,
    depth: u8,
    leaf_evaluation: LeafEvaluation,
    rng: &mut R,
) -> Evaluation {
    if node.has_winner() {
        return Evaluation::leaf(WIN, depth);
    }
    if node.is_draw() {
        return Evaluation::leaf(0, depth);
    }
    if depth == 0 {
        let value = if can_win(node) {
            LOSS
        } else {
            match leaf_evaluation {
                LeafEvaluation::Shared => evaluate(node),
                LeafEvaluation::MoverRelative => -evaluate(node),
            }
        };
        return Evaluation::leaf(value, 0);
    }

    let mut best: Option<Evaluation> = None;
    for (mv, child) in children(node, rng) {
        let reply = maximize(&child, depth - 1, leaf_evaluation, rng);
        let candidate = Evaluation {
            mv: Some(mv),
            ..reply
        };
        best = Some(match best {
            Some(best) => pick_min(best, candidate),
            None => candidate,
        });
    }
    best.unwrap_or_else(|| Evaluation::leaf(evaluate(node), depth))
}

/// The better of two evaluations for the maximizing player.
///
/// On equal values, wins are preferred early (higher remaining depth) and
/// losses or draws late (lower remaining depth). Otherwise `best` is kept.
pub fn pick_max(best: Evaluation, candidate: Evaluation) -> Evaluation {
    let replace = match candidate.value.cmp(&best.value) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal if candidate.value > 0 => candidate.depth > best.depth,
        Ordering::Equal => candidate.depth < best.depth,
    };
    if replace {
        candidate
    } else {
        best
    }
}

/// The better of two evaluations for the minimizing player, with the same
/// tie-breaking as [`pick_max()`] from the minimizer's side.
pub fn pick_min(best: Evaluation, candidate: Evaluation) -> Evaluation {
    let replace = match candidate.value.cmp(&best.value) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal if candidate.value < 0 => candidate.depth > best.depth,
        Ordering::Equal => candidate.depth < best.depth,
    };
    if replace {
        candidate
    } else {
        best
    }
}
