use std::iter::FusedIterator;

use crate::bitset::bitset_traits;
use crate::Piece;

/// A compact set of [`Piece`]s.
///
/// The complement of a set is available via `!`.
/// Also implements [`IntoIterator`], so it can be converted into e.g.
/// a vector with `Vec::from_iter(pieces_set)`.
///
/// ```
/// use quarto::{piece, PiecesSet};
/// let mut set = PiecesSet::new();
/// // This is an immutable data type, so functions like `insert` return a new `PiecesSet`.
/// set = set.insert(piece!(7));
/// set = set.insert(piece!(7));  // Inserting a second time has no effect
/// set = set.insert(piece!(2));
/// assert_eq!(Vec::from_iter(set), vec![piece!(2), piece!(7)]);
/// ```
///
/// # Note on immutability
///
/// This is an immutable type, so its "mutating" methods return a
/// new value instead of really mutating in-place.
/// It is also [`Copy`], so a value is not consumed by methods with `self` receiver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PiecesSet {
    // Bit i is set iff the piece with id i is in the set.
    pub(crate) bits: u16,
}

bitset_traits!(PiecesSet, Piece);

/// Equal to `PiecesSet::from_iter(ALL_PIECES)`.
pub const ALL_PIECES_SET: PiecesSet = PiecesSet { bits: 0xffff };

impl PiecesSet {
    /// The piece at position `n` in iteration order, if the set is big enough.
    pub fn nth(self, n: usize) -> Option<Piece> {
        self.into_iter().nth(n)
    }
}

impl IntoIterator for PiecesSet {
    type Item = Piece;

    type IntoIter = PiecesSetIter;

    fn into_iter(self) -> Self::IntoIter {
        PiecesSetIter { bits: self.bits }
    }
}

/// Iterator for a [`PiecesSet`] that returns pieces by ascending id.
#[derive(Clone, Copy, Debug)]
pub struct PiecesSetIter {
    bits: u16,
}

impl Iterator for PiecesSetIter {
    type Item = Piece;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            // The number of trailing zeros is the piece id
            let idx = self.bits.trailing_zeros() as u8;
            // Clear the flag corresponding to this piece
            self.bits ^= 1u16 << idx;

            Some(Piece::from_index(idx))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bits.count_ones() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for PiecesSetIter {
    fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }
}

impl FusedIterator for PiecesSetIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{piece, ALL_PIECES};

    #[test]
    fn set_constants() {
        assert_eq!(PiecesSet::from_iter(ALL_PIECES), ALL_PIECES_SET);
        assert_eq!(!ALL_PIECES_SET, PiecesSet::new());
        assert_eq!(ALL_PIECES_SET.len(), 16);
    }

    #[test]
    fn insert_remove_contains() {
        let set = PiecesSet::new().insert(piece!(3)).insert(piece!(15));
        assert!(set.contains(piece!(15)));
        assert!(!set.contains(piece!(4)));
        let set = set.remove(piece!(15)).remove(piece!(4));
        assert_eq!(Vec::from_iter(set), vec![piece!(3)]);
        assert_eq!(set.into_iter().len(), 1);
    }

    #[test]
    fn nth_follows_iteration_order() {
        let set = PiecesSet::from_iter([piece!(9), piece!(1), piece!(12)]);
        assert_eq!(set.nth(0), Some(piece!(1)));
        assert_eq!(set.nth(2), Some(piece!(12)));
        assert_eq!(set.nth(3), None);
    }
}
