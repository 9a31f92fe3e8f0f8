use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::file::{File, ALL_FILES};
use crate::move_index::MoveIndex;
use crate::movegen::{place_piece, Placement};
use crate::piece::Piece;
use crate::rank::{Rank, ALL_RANKS};
use crate::square::{Square, ALL_SQUARES, NUM_SQUARES};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Represents a position that has *not* been fed through the move engine
/// yet.
///
/// This structure is useful in the following cases:
/// * You are trying to set up a position manually in code, for a test or a
///   puzzle.
/// * You want to start a game somewhere other than the standard position.
///
/// Unlike a `Board`, nothing here is checked: you may build a position with
/// ten queens, or with a king missing (which converts into an
/// already-finished game).
///
/// ```
/// use royale::{BoardBuilder, Board, Square, Color, Piece};
/// use std::str::FromStr;
///
/// let board = Board::from(
///     BoardBuilder::new()
///         .piece(Square::from_str("e1").unwrap(), Piece::King, Color::White)
///         .piece(Square::from_str("e8").unwrap(), Piece::King, Color::Black),
/// );
/// assert_eq!(board.piece_on(Square::from_str("e1").unwrap()), Some(Piece::King));
/// ```
#[derive(Copy, Clone)]
pub struct BoardBuilder {
    pieces: [Option<(Piece, Color)>; NUM_SQUARES],
    castle_rights: [CastleRights; 2],
    en_passant: [u8; 2],
}

impl BoardBuilder {
    /// Construct a new, empty, BoardBuilder.
    ///
    /// * No pieces are on the board
    /// * `CastleRights` are empty for both sides
    /// * No en-passant windows are open
    pub fn new() -> BoardBuilder {
        BoardBuilder {
            pieces: [None; NUM_SQUARES],
            castle_rights: [CastleRights::NoRights, CastleRights::NoRights],
            en_passant: [0, 0],
        }
    }

    /// Get the castle rights for a player.
    pub fn get_castle_rights(&self, color: Color) -> CastleRights {
        self.castle_rights[color.to_index()]
    }

    /// Set a piece on a square.
    ///
    /// Note that this can and will overwrite another piece on the square if
    /// needed, and that it will not update your castle rights.
    ///
    /// This function can be used on self directly or in a builder pattern.
    pub fn piece(&mut self, square: Square, piece: Piece, color: Color) -> &mut Self {
        self[square] = Some((piece, color));
        self
    }

    /// Clear a square on the board.
    ///
    /// This function can be used on self directly or in a builder pattern.
    pub fn clear_square(&mut self, square: Square) -> &mut Self {
        self[square] = None;
        self
    }

    /// Set the castle rights for a particular color on the position.
    ///
    /// This function can be used on self directly or in a builder pattern.
    pub fn castle_rights(&mut self, color: Color, castle_rights: CastleRights) -> &mut Self {
        self.castle_rights[color.to_index()] = castle_rights;
        self
    }

    /// Open the en-passant window on `file` for the capturing player
    /// `color`, as if the opponent had just double-stepped a pawn there.
    ///
    /// This function can be used on self directly or in a builder pattern.
    pub fn en_passant(&mut self, color: Color, file: File) -> &mut Self {
        self.en_passant[color.to_index()] |= 1 << file.to_index();
        self
    }
}

impl Index<Square> for BoardBuilder {
    type Output = Option<(Piece, Color)>;

    fn index(&self, index: Square) -> &Self::Output {
        &self.pieces[index.to_index()]
    }
}

impl IndexMut<Square> for BoardBuilder {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.pieces[index.to_index()]
    }
}

impl Default for BoardBuilder {
    /// The standard opening arrangement, with full castle rights and no
    /// en-passant windows.
    fn default() -> BoardBuilder {
        let mut result = BoardBuilder::new();
        let back = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, &piece) in back.iter().enumerate() {
            let file = File::from_index(file);
            result.piece(Square::make_square(Rank::First, file), piece, Color::White);
            result.piece(Square::make_square(Rank::Second, file), Piece::Pawn, Color::White);
            result.piece(Square::make_square(Rank::Seventh, file), Piece::Pawn, Color::Black);
            result.piece(Square::make_square(Rank::Eighth, file), piece, Color::Black);
        }
        result.castle_rights[Color::White.to_index()] = CastleRights::Both;
        result.castle_rights[Color::Black.to_index()] = CastleRights::Both;
        result
    }
}

impl fmt::Display for BoardBuilder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in ALL_RANKS.iter().rev() {
            for file in ALL_FILES.iter() {
                match self.pieces[Square::make_square(*rank, *file).to_index()] {
                    Some((piece, color)) => write!(f, "{} ", piece.to_string(color))?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl From<&BoardBuilder> for Board {
    /// Drop every piece onto an empty board one at a time, letting the
    /// incremental updater grow the move index as it goes.
    fn from(builder: &BoardBuilder) -> Board {
        let mut placement: Placement = [None; NUM_SQUARES];
        let mut index = MoveIndex::empty();
        for square in ALL_SQUARES.iter() {
            if let Some(occupant) = builder[*square] {
                place_piece(&mut placement, &mut index, *square, Some(occupant));
            }
        }
        Board::assemble(placement, index, builder.castle_rights, builder.en_passant)
    }
}

impl From<&mut BoardBuilder> for Board {
    fn from(builder: &mut BoardBuilder) -> Board {
        Board::from(&*builder)
    }
}

impl From<BoardBuilder> for Board {
    fn from(builder: BoardBuilder) -> Board {
        Board::from(&builder)
    }
}
