use crate::color::Color;
use crate::error::Error;
use crate::file::File;
use crate::rank::Rank;
use std::fmt;
use std::str::FromStr;

/// Represent a square on the chess board
#[derive(PartialEq, Ord, Eq, PartialOrd, Copy, Clone, Debug, Default, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Square(u8);

/// How many squares are there?
pub const NUM_SQUARES: usize = 64;

impl Square {
    /// Create a new square, given an index.
    /// Note: It is invalid, but allowed, to pass in a number >= 64.  Doing so will crash stuff.
    #[inline]
    pub fn new(sq: u8) -> Square {
        Square(sq)
    }

    /// Make a square given a rank and a file
    #[inline]
    pub fn make_square(rank: Rank, file: File) -> Square {
        Square((rank.to_index() as u8) << 3 | (file.to_index() as u8))
    }

    /// Return the rank given this square.
    #[inline]
    pub fn get_rank(&self) -> Rank {
        Rank::from_index((self.0 >> 3) as usize)
    }

    /// Return the file given this square.
    #[inline]
    pub fn get_file(&self) -> File {
        File::from_index((self.0 & 7) as usize)
    }

    /// If there is a square "forward", given my `Color`, return that.  Otherwise, None.
    #[inline]
    pub fn forward(&self, color: Color) -> Option<Square> {
        if self.get_rank() == color.to_their_backrank() {
            None
        } else {
            Some(match color {
                Color::White => Square(self.0 + 8),
                Color::Black => Square(self.0 - 8),
            })
        }
    }

    /// Convert this square to an integer.
    #[inline]
    pub fn to_int(&self) -> u8 {
        self.0
    }

    /// Convert this `Square` to a `usize` for table lookup purposes
    #[inline]
    pub fn to_index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + (self.0 & 7)) as char,
            (b'1' + (self.0 >> 3)) as char
        )
    }
}

impl FromStr for Square {
    type Err = Error;

    /// Parse a square from its text form, e.g. "e4".
    ///
    /// ```
    /// use royale::{Square, Rank, File};
    /// use std::str::FromStr;
    ///
    /// let sq = Square::from_str("e4").expect("Valid square");
    /// assert_eq!(sq.get_rank(), Rank::Fourth);
    /// assert_eq!(sq.get_file(), File::E);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 2 {
            return Err(Error::InvalidSquare);
        }
        let file = File::from_str(&s[0..1]).map_err(|_| Error::InvalidSquare)?;
        let rank = Rank::from_str(&s[1..2]).map_err(|_| Error::InvalidSquare)?;
        Ok(Square::make_square(rank, file))
    }
}

lazy_static! {
    /// A list of every square on the chessboard.
    pub static ref ALL_SQUARES: Vec<Square> =
        (0..NUM_SQUARES).map(|i| Square::new(i as u8)).collect();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_squares() {
        assert_eq!(Square::from_str("a1").unwrap(), Square::new(0));
        assert_eq!(Square::from_str("h8").unwrap(), Square::new(63));
        assert_eq!(Square::from_str("e2").unwrap().to_index(), 12);
        assert!(Square::from_str("i1").is_err());
        assert!(Square::from_str("a9").is_err());
        assert!(Square::from_str("e").is_err());
        assert!(Square::from_str("").is_err());
    }

    #[test]
    fn display_roundtrip() {
        for sq in ALL_SQUARES.iter() {
            assert_eq!(Square::from_str(&format!("{}", sq)).unwrap(), *sq);
        }
    }
}
