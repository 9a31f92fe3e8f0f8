use crate::bitboard::{BitBoard, EMPTY};
use crate::square::{Square, NUM_SQUARES};

/// The move index: one destination `BitBoard` per source square, recording
/// which destinations the piece on that source can currently reach under
/// pure chess rules.  This is storage only; the bits are maintained by the
/// incremental updater and read by the board engine.  En-passant captures
/// and castling never appear here.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct MoveIndex {
    rows: [BitBoard; NUM_SQUARES],
}

impl MoveIndex {
    /// An index with no moves at all (an empty board).
    #[inline]
    pub fn empty() -> MoveIndex {
        MoveIndex {
            rows: [EMPTY; NUM_SQUARES],
        }
    }

    /// Is the bit for `source` -> `dest` set?
    #[inline]
    pub fn get(&self, source: Square, dest: Square) -> bool {
        self.rows[source.to_index()] & BitBoard::from_square(dest) != EMPTY
    }

    /// Set or clear the bit for `source` -> `dest`.
    #[inline]
    pub fn set(&mut self, source: Square, dest: Square, value: bool) {
        if value {
            self.rows[source.to_index()] |= BitBoard::from_square(dest);
        } else {
            self.rows[source.to_index()] &= !BitBoard::from_square(dest);
        }
    }

    /// Clear every destination recorded for `source`.
    #[inline]
    pub fn clear_row(&mut self, source: Square) {
        self.rows[source.to_index()] = EMPTY;
    }

    /// All destinations currently recorded for `source`.
    #[inline]
    pub fn row(&self, source: Square) -> BitBoard {
        self.rows[source.to_index()]
    }

    /// Total number of (source, dest) bits set.
    pub fn count(&self) -> u32 {
        self.rows.iter().map(|row| row.popcnt()).sum()
    }

    /// Iterate over every (source, dest) pair whose bit is set, in source
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Square)> + '_ {
        self.rows.iter().enumerate().flat_map(|(source, row)| {
            let source = Square::new(source as u8);
            row.map(move |dest| (source, dest))
        })
    }
}
