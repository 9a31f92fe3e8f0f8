use crate::color::Color;
use crate::square::Square;
use std::fmt;

/// Represent a timed move in memory.  The timestamp is caller-defined
/// milliseconds; the core never reads a clock of its own, so replaying the
/// same moves always produces the same game.
#[derive(Clone, Copy, Eq, PartialOrd, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Move {
    color: Color,
    time: i64,
    source: Square,
    dest: Square,
}

impl Move {
    /// Create a new move, given the moving player, a timestamp, a source
    /// `Square` and a destination `Square`.
    #[inline]
    pub fn new(color: Color, time: i64, source: Square, dest: Square) -> Move {
        Move {
            color,
            time,
            source,
            dest,
        }
    }

    /// Get the player making the move.
    #[inline]
    pub fn get_color(&self) -> Color {
        self.color
    }

    /// Get the timestamp of the move, in milliseconds.
    #[inline]
    pub fn get_time(&self) -> i64 {
        self.time
    }

    /// Get the source square (square the piece is currently on).
    #[inline]
    pub fn get_source(&self) -> Square {
        self.source
    }

    /// Get the destination square (square the piece is going to).
    #[inline]
    pub fn get_dest(&self) -> Square {
        self.dest
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {}{} @{}",
            match self.color {
                Color::White => "w",
                Color::Black => "b",
            },
            self.source,
            self.dest,
            self.time
        )
    }
}

/// What kind of move is this?  Derived from a board by classification, never
/// stored.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MoveClass {
    /// A plain move or capture.
    Ordinary,
    /// A pawn double-step off its home rank, opening an en-passant window
    /// for the opponent.
    PawnThrust,
    /// An en-passant capture.
    EnPassant,
    /// A king-and-rook castle, either side.
    Castle,
    /// A pawn reaching the far rank.  Promotion is always to a queen.
    Promotion,
    /// Not a move at all.
    Invalid,
}
