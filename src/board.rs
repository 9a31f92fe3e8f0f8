use crate::bitboard::{BitBoard, EMPTY};
use crate::board_builder::BoardBuilder;
use crate::castle_rights::CastleRights;
use crate::chess_move::MoveClass;
use crate::color::{Color, ALL_COLORS, NUM_COLORS};
use crate::file::{File, ALL_FILES};
use crate::move_index::MoveIndex;
use crate::movegen::{place_piece, Placement};
use crate::piece::Piece;
use crate::rank::{Rank, ALL_RANKS};
use crate::square::{Square, ALL_SQUARES};
use arrayvec::ArrayVec;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Has somebody won yet?  There is no concept of checkmate here: the game
/// ends when a king is actually captured.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BoardStatus {
    Ongoing,
    Won(Color),
}

/// A representation of the board.  That's why you're here, right?
///
/// A `Board` is an immutable snapshot: `make_move` hands back a new value
/// and never touches the old one, so old values can be kept around as
/// history.  Alongside the piece layout it carries the move index, castle
/// rights, the per-color en-passant windows and the king-presence flags.
///
/// ```
/// use royale::Board;
///
/// let board = Board::default();
/// // both players move from the start; 16 pawn moves and 4 knight moves each
/// assert_eq!(board.legal_moves(None).len(), 40);
/// ```
pub struct Board {
    placement: Placement,
    move_index: MoveIndex,
    castle_rights: [CastleRights; NUM_COLORS],
    en_passant: [u8; NUM_COLORS],
    kings: [bool; NUM_COLORS],
    cache: BoardCache,
}

/// Lazily filled per-value caches.  A `Board` is immutable once built, so
/// anything derived from it can be computed once and kept; the locks make
/// that safe to do behind a `&self` without ever being a correctness
/// concern.
#[derive(Default)]
struct BoardCache {
    // white moves, black moves, everyone's moves
    moves: Mutex<[Option<Arc<[(Square, Square)]>>; 3]>,
    attacks: Mutex<[AttackCache; NUM_COLORS]>,
}

#[derive(Copy, Clone, Default)]
struct AttackCache {
    seen: BitBoard,
    hit: BitBoard,
}

lazy_static! {
    static ref STARTING_BOARD: Board = Board::from(&BoardBuilder::default());
}

impl Board {
    pub(crate) fn assemble(
        placement: Placement,
        move_index: MoveIndex,
        castle_rights: [CastleRights; NUM_COLORS],
        en_passant: [u8; NUM_COLORS],
    ) -> Board {
        let mut kings = [false; NUM_COLORS];
        for slot in placement.iter() {
            if let Some((Piece::King, color)) = slot {
                kings[color.to_index()] = true;
            }
        }
        Board {
            placement,
            move_index,
            castle_rights,
            en_passant,
            kings,
            cache: BoardCache::default(),
        }
    }

    /// What piece is on a particular `Square`?  Is there even one?
    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        self.placement[square.to_index()].map(|(piece, _)| piece)
    }

    /// What color piece is on a particular square?
    #[inline]
    pub fn color_on(&self, square: Square) -> Option<Color> {
        self.placement[square.to_index()].map(|(_, color)| color)
    }

    /// What are the castle rights for a particular side?
    #[inline]
    pub fn castle_rights(&self, color: Color) -> CastleRights {
        self.castle_rights[color.to_index()]
    }

    /// May `color` still capture en passant on `file`?  The window opens
    /// when the opponent double-steps a pawn onto that file and closes as
    /// soon as `color` plays anything other than the capture itself.
    #[inline]
    pub fn en_passant_open(&self, color: Color, file: File) -> bool {
        self.en_passant[color.to_index()] & (1 << file.to_index()) != 0
    }

    /// Is the game still going, or has a king been taken?
    #[inline]
    pub fn status(&self) -> BoardStatus {
        if !self.kings[Color::White.to_index()] {
            BoardStatus::Won(Color::Black)
        } else if !self.kings[Color::Black.to_index()] {
            BoardStatus::Won(Color::White)
        } else {
            BoardStatus::Ongoing
        }
    }

    /// Classify the move from `source` to `dest` under pure chess rules.
    /// Timing and ownership are the game layer's problem; this only answers
    /// what kind of move the board geometry makes it.  Anything on a board
    /// that has already lost a king is `Invalid`.
    pub fn classify(&self, source: Square, dest: Square) -> MoveClass {
        if self.status() != BoardStatus::Ongoing {
            return MoveClass::Invalid;
        }
        if self.move_index.get(source, dest) {
            if let Some((Piece::Pawn, color)) = self.placement[source.to_index()] {
                if dest.get_rank() == color.to_their_backrank() {
                    return MoveClass::Promotion;
                }
                if source.get_rank() == color.to_second_rank()
                    && dest.get_rank() == color.to_fourth_rank()
                {
                    return MoveClass::PawnThrust;
                }
            }
            return MoveClass::Ordinary;
        }
        // en passant is checked before castling, as the only pawn move that
        // never appears in the index
        let source_file = source.get_file().to_index() as i8;
        let dest_file = dest.get_file().to_index() as i8;
        if (source_file - dest_file).abs() == 1 {
            if source.get_rank() == Rank::Fifth
                && dest.get_rank() == Rank::Sixth
                && self.en_passant_open(Color::White, dest.get_file())
                && self.placement[source.to_index()] == Some((Piece::Pawn, Color::White))
                && self.placement[Square::make_square(Rank::Fifth, dest.get_file()).to_index()]
                    == Some((Piece::Pawn, Color::Black))
                && self.placement[dest.to_index()].is_none()
            {
                return MoveClass::EnPassant;
            }
            if source.get_rank() == Rank::Fourth
                && dest.get_rank() == Rank::Third
                && self.en_passant_open(Color::Black, dest.get_file())
                && self.placement[source.to_index()] == Some((Piece::Pawn, Color::Black))
                && self.placement[Square::make_square(Rank::Fourth, dest.get_file()).to_index()]
                    == Some((Piece::Pawn, Color::White))
                && self.placement[dest.to_index()].is_none()
            {
                return MoveClass::EnPassant;
            }
        }
        if source.get_rank() != dest.get_rank() || source.get_file() != File::E {
            return MoveClass::Invalid;
        }
        let dest_file = dest.get_file().to_index();
        if source.get_rank() == Rank::First && dest_file >= 6 && self.can_castle_kingside(Color::White)
        {
            return MoveClass::Castle;
        }
        if source.get_rank() == Rank::First
            && dest_file <= 2
            && self.can_castle_queenside(Color::White)
        {
            return MoveClass::Castle;
        }
        if source.get_rank() == Rank::Eighth
            && dest_file >= 6
            && self.can_castle_kingside(Color::Black)
        {
            return MoveClass::Castle;
        }
        if source.get_rank() == Rank::Eighth
            && dest_file <= 2
            && self.can_castle_queenside(Color::Black)
        {
            return MoveClass::Castle;
        }
        MoveClass::Invalid
    }

    /// Make the move from `source` to `dest`, returning the resulting board
    /// as a new value.  An invalid move returns an equal copy: the board
    /// layer absorbs bad input rather than raising, since moves arrive from
    /// the network and may describe a position that no longer exists.
    pub fn make_move(&self, source: Square, dest: Square) -> Board {
        let class = self.classify(source, dest);
        if class == MoveClass::Invalid {
            return self.clone();
        }
        let mut placement = self.placement;
        let mut index = self.move_index;
        let mut rights = self.castle_rights;
        let mut en_passant = self.en_passant;
        let mut kings = self.kings;

        let (piece, mover) = self.placement[source.to_index()]
            .expect("a classified move starts from an occupied square");

        rights[mover.to_index()] = rights[mover.to_index()]
            .remove(CastleRights::square_to_castle_rights(mover, source));
        rights[(!mover).to_index()] = rights[(!mover).to_index()]
            .remove(CastleRights::square_to_castle_rights(!mover, dest));

        if class != MoveClass::EnPassant {
            en_passant[mover.to_index()] = 0;
        }
        if let Some((Piece::King, victim)) = self.placement[dest.to_index()] {
            kings[victim.to_index()] = false;
        }

        match class {
            MoveClass::Promotion => {
                place_piece(&mut placement, &mut index, source, None);
                place_piece(&mut placement, &mut index, dest, Some((Piece::Queen, mover)));
            }
            MoveClass::EnPassant => {
                place_piece(&mut placement, &mut index, dest, Some((piece, mover)));
                place_piece(&mut placement, &mut index, source, None);
                let victim = Square::make_square(source.get_rank(), dest.get_file());
                place_piece(&mut placement, &mut index, victim, None);
            }
            MoveClass::Castle => {
                let back = mover.to_my_backrank();
                if dest.get_file() > source.get_file() {
                    let rook_home = Square::make_square(back, File::H);
                    let rook = self.placement[rook_home.to_index()];
                    place_piece(
                        &mut placement,
                        &mut index,
                        Square::make_square(back, File::G),
                        Some((piece, mover)),
                    );
                    place_piece(&mut placement, &mut index, Square::make_square(back, File::F), rook);
                    place_piece(&mut placement, &mut index, source, None);
                    place_piece(&mut placement, &mut index, rook_home, None);
                } else {
                    let rook_home = Square::make_square(back, File::A);
                    let rook = self.placement[rook_home.to_index()];
                    place_piece(
                        &mut placement,
                        &mut index,
                        Square::make_square(back, File::C),
                        Some((piece, mover)),
                    );
                    place_piece(&mut placement, &mut index, Square::make_square(back, File::D), rook);
                    place_piece(&mut placement, &mut index, source, None);
                    place_piece(&mut placement, &mut index, rook_home, None);
                }
            }
            MoveClass::PawnThrust => {
                place_piece(&mut placement, &mut index, dest, Some((piece, mover)));
                place_piece(&mut placement, &mut index, source, None);
                en_passant[(!mover).to_index()] |= 1 << source.get_file().to_index();
            }
            MoveClass::Ordinary => {
                place_piece(&mut placement, &mut index, dest, Some((piece, mover)));
                place_piece(&mut placement, &mut index, source, None);
            }
            MoveClass::Invalid => unreachable!("invalid moves return early"),
        }

        Board {
            placement,
            move_index: index,
            castle_rights: rights,
            en_passant,
            kings,
            cache: BoardCache::default(),
        }
    }

    /// List every legal move for one player, or for both with `None`.  The
    /// answer is computed once per board value and cached, which is safe
    /// because the value never changes afterwards.  The slice is shared;
    /// clone it if you need to reorder.
    pub fn legal_moves(&self, color: Option<Color>) -> Arc<[(Square, Square)]> {
        let slot = match color {
            Some(Color::White) => 0,
            Some(Color::Black) => 1,
            None => 2,
        };
        let mut cache = self.cache.moves.lock().unwrap();
        if let Some(cached) = &cache[slot] {
            return Arc::clone(cached);
        }
        let listed: Vec<(Square, Square)> = if self.status() != BoardStatus::Ongoing {
            Vec::new()
        } else {
            self.move_index
                .iter()
                .chain(self.unindexed_moves())
                .filter(|&(source, _)| match color {
                    None => true,
                    some => self.color_on(source) == some,
                })
                .collect()
        };
        let shared: Arc<[(Square, Square)]> = listed.into();
        cache[slot] = Some(Arc::clone(&shared));
        shared
    }

    /// Is `square` reachable in one ply by any piece of `color`?  This is
    /// index membership, so pawn pushes count and pawn diagonals only count
    /// onto occupied squares.  Used for castle safety; cached per square and
    /// color.
    pub fn is_attacked(&self, square: Square, color: Color) -> bool {
        let bit = BitBoard::from_square(square);
        let mut cache = self.cache.attacks.lock().unwrap();
        let entry = &mut cache[color.to_index()];
        if entry.seen & bit != EMPTY {
            return entry.hit & bit != EMPTY;
        }
        let reached = ALL_SQUARES.iter().any(|source| {
            self.color_on(*source) == Some(color) && self.move_index.get(*source, square)
        });
        entry.seen |= bit;
        if reached {
            entry.hit |= bit;
        }
        reached
    }

    fn can_castle_kingside(&self, color: Color) -> bool {
        let back = color.to_my_backrank();
        self.castle_rights(color).has_kingside()
            && self.placement[Square::make_square(back, File::F).to_index()].is_none()
            && self.placement[Square::make_square(back, File::G).to_index()].is_none()
            && !self.is_attacked(Square::make_square(back, File::E), !color)
            && !self.is_attacked(Square::make_square(back, File::F), !color)
    }

    fn can_castle_queenside(&self, color: Color) -> bool {
        let back = color.to_my_backrank();
        self.castle_rights(color).has_queenside()
            && self.placement[Square::make_square(back, File::B).to_index()].is_none()
            && self.placement[Square::make_square(back, File::C).to_index()].is_none()
            && self.placement[Square::make_square(back, File::D).to_index()].is_none()
            && !self.is_attacked(Square::make_square(back, File::E), !color)
            && !self.is_attacked(Square::make_square(back, File::D), !color)
    }

    /// The legal moves that never live in the index: en-passant captures
    /// and castles.
    fn unindexed_moves(&self) -> ArrayVec<(Square, Square), 40> {
        let mut out = ArrayVec::new();
        for file in ALL_FILES.iter() {
            if self.en_passant_open(Color::White, *file) {
                let victim = Square::make_square(Rank::Fifth, *file);
                let landing = Square::make_square(Rank::Sixth, *file);
                if self.placement[victim.to_index()] == Some((Piece::Pawn, Color::Black))
                    && self.placement[landing.to_index()].is_none()
                {
                    let f = file.to_index();
                    if f > 0 {
                        let capturer = Square::make_square(Rank::Fifth, File::from_index(f - 1));
                        if self.placement[capturer.to_index()] == Some((Piece::Pawn, Color::White)) {
                            out.push((capturer, landing));
                        }
                    }
                    if f < 7 {
                        let capturer = Square::make_square(Rank::Fifth, File::from_index(f + 1));
                        if self.placement[capturer.to_index()] == Some((Piece::Pawn, Color::White)) {
                            out.push((capturer, landing));
                        }
                    }
                }
            }
            if self.en_passant_open(Color::Black, *file) {
                let victim = Square::make_square(Rank::Fourth, *file);
                let landing = Square::make_square(Rank::Third, *file);
                if self.placement[victim.to_index()] == Some((Piece::Pawn, Color::White))
                    && self.placement[landing.to_index()].is_none()
                {
                    let f = file.to_index();
                    if f > 0 {
                        let capturer = Square::make_square(Rank::Fourth, File::from_index(f - 1));
                        if self.placement[capturer.to_index()] == Some((Piece::Pawn, Color::Black)) {
                            out.push((capturer, landing));
                        }
                    }
                    if f < 7 {
                        let capturer = Square::make_square(Rank::Fourth, File::from_index(f + 1));
                        if self.placement[capturer.to_index()] == Some((Piece::Pawn, Color::Black)) {
                            out.push((capturer, landing));
                        }
                    }
                }
            }
        }
        for color in ALL_COLORS.iter() {
            let back = color.to_my_backrank();
            let king = Square::make_square(back, File::E);
            if self.can_castle_kingside(*color) {
                out.push((king, Square::make_square(back, File::G)));
            }
            if self.can_castle_queenside(*color) {
                out.push((king, Square::make_square(back, File::C)));
            }
        }
        out
    }
}

impl Default for Board {
    /// The standard opening position.  Built once, lazily, then cloned.
    fn default() -> Board {
        STARTING_BOARD.clone()
    }
}

impl Clone for Board {
    /// Clones share no cache state; the copy recomputes on demand.
    fn clone(&self) -> Board {
        Board {
            placement: self.placement,
            move_index: self.move_index,
            castle_rights: self.castle_rights,
            en_passant: self.en_passant,
            kings: self.kings,
            cache: BoardCache::default(),
        }
    }
}

impl PartialEq for Board {
    /// Structural equality; caches are invisible.
    fn eq(&self, other: &Board) -> bool {
        self.placement[..] == other.placement[..]
            && self.move_index == other.move_index
            && self.castle_rights == other.castle_rights
            && self.en_passant == other.en_passant
            && self.kings == other.kings
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in ALL_RANKS.iter().rev() {
            for file in ALL_FILES.iter() {
                match self.placement[Square::make_square(*rank, *file).to_index()] {
                    Some((piece, color)) => write!(f, "{} ", piece.to_string(color))?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self)?;
        write!(
            f,
            "castle rights {:?}, en passant {:?}, kings {:?}",
            self.castle_rights, self.en_passant, self.kings
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::str::FromStr;

    fn sq(name: &str) -> Square {
        Square::from_str(name).unwrap()
    }

    fn assert_partitioned(board: &Board) {
        let white: HashSet<_> = board.legal_moves(Some(Color::White)).iter().cloned().collect();
        let black: HashSet<_> = board.legal_moves(Some(Color::Black)).iter().cloned().collect();
        let all: HashSet<_> = board.legal_moves(None).iter().cloned().collect();
        assert!(white.is_disjoint(&black));
        assert_eq!(white.union(&black).cloned().collect::<HashSet<_>>(), all);
    }

    #[test]
    fn starting_position_moves() {
        let board = Board::default();
        assert_eq!(board.legal_moves(None).len(), 40);
        assert_eq!(board.legal_moves(Some(Color::White)).len(), 20);
        assert_eq!(board.legal_moves(Some(Color::Black)).len(), 20);
        assert_partitioned(&board);
    }

    #[test]
    fn moves_partition_as_the_game_runs() {
        let mut board = Board::default();
        for &(from, to) in &[("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6")] {
            board = board.make_move(sq(from), sq(to));
            assert_partitioned(&board);
        }
    }

    #[test]
    fn invalid_moves_are_no_ops() {
        let board = Board::default();
        assert_eq!(board.classify(sq("e2"), sq("e5")), MoveClass::Invalid);
        assert_eq!(board.classify(sq("e1"), sq("e2")), MoveClass::Invalid);
        let after = board.make_move(sq("e2"), sq("e5"));
        assert_eq!(board, after);
    }

    #[test]
    fn classification() {
        let board = Board::default();
        assert_eq!(board.classify(sq("e2"), sq("e4")), MoveClass::PawnThrust);
        assert_eq!(board.classify(sq("e2"), sq("e3")), MoveClass::Ordinary);
        assert_eq!(board.classify(sq("g1"), sq("f3")), MoveClass::Ordinary);
        assert_eq!(board.classify(sq("e7"), sq("e5")), MoveClass::PawnThrust);
    }

    #[test]
    fn double_step_opens_the_opponents_window_only() {
        let board = Board::default().make_move(sq("e2"), sq("e4"));
        assert!(board.en_passant_open(Color::Black, File::E));
        assert!(!board.en_passant_open(Color::White, File::E));
    }

    #[test]
    fn en_passant_capture() {
        let board = Board::from(
            BoardBuilder::new()
                .piece(sq("e1"), Piece::King, Color::White)
                .piece(sq("e8"), Piece::King, Color::Black)
                .piece(sq("e2"), Piece::Pawn, Color::White)
                .piece(sq("d4"), Piece::Pawn, Color::Black),
        );
        let board = board.make_move(sq("e2"), sq("e4"));
        assert!(board.en_passant_open(Color::Black, File::E));
        assert_eq!(board.classify(sq("d4"), sq("e3")), MoveClass::EnPassant);

        let after = board.make_move(sq("d4"), sq("e3"));
        assert_eq!(after.piece_on(sq("e3")), Some(Piece::Pawn));
        assert_eq!(after.color_on(sq("e3")), Some(Color::Black));
        assert_eq!(after.piece_on(sq("e4")), None);
        assert_eq!(after.piece_on(sq("d4")), None);
    }

    #[test]
    fn any_other_move_by_the_capturer_closes_the_window() {
        let board = Board::from(
            BoardBuilder::new()
                .piece(sq("e1"), Piece::King, Color::White)
                .piece(sq("e8"), Piece::King, Color::Black)
                .piece(sq("e2"), Piece::Pawn, Color::White)
                .piece(sq("d4"), Piece::Pawn, Color::Black)
                .piece(sq("h7"), Piece::Pawn, Color::Black),
        );
        let board = board.make_move(sq("e2"), sq("e4"));
        // black plays something unrelated before capturing
        let board = board.make_move(sq("h7"), sq("h6"));
        assert!(!board.en_passant_open(Color::Black, File::E));
        assert_eq!(board.classify(sq("d4"), sq("e3")), MoveClass::Invalid);
    }

    #[test]
    fn en_passant_needs_an_empty_landing_square() {
        let board = Board::from(
            BoardBuilder::new()
                .piece(sq("e1"), Piece::King, Color::White)
                .piece(sq("e8"), Piece::King, Color::Black)
                .piece(sq("d4"), Piece::Pawn, Color::Black)
                .piece(sq("e4"), Piece::Pawn, Color::White)
                .piece(sq("e3"), Piece::Knight, Color::Black)
                .en_passant(Color::Black, File::E),
        );
        assert_eq!(board.classify(sq("d4"), sq("e3")), MoveClass::Invalid);
    }

    #[test]
    fn castling_through_an_attacked_transit_square() {
        // a rook aiming at f1 forbids the castle...
        let board = Board::from(
            BoardBuilder::new()
                .piece(sq("e1"), Piece::King, Color::White)
                .piece(sq("h1"), Piece::Rook, Color::White)
                .piece(sq("a8"), Piece::King, Color::Black)
                .piece(sq("f8"), Piece::Rook, Color::Black)
                .castle_rights(Color::White, CastleRights::KingSide),
        );
        assert!(board.is_attacked(sq("f1"), Color::Black));
        assert_eq!(board.classify(sq("e1"), sq("g1")), MoveClass::Invalid);

        // ...but one aiming only at the landing square does not
        let board = Board::from(
            BoardBuilder::new()
                .piece(sq("e1"), Piece::King, Color::White)
                .piece(sq("h1"), Piece::Rook, Color::White)
                .piece(sq("a8"), Piece::King, Color::Black)
                .piece(sq("g8"), Piece::Rook, Color::Black)
                .castle_rights(Color::White, CastleRights::KingSide),
        );
        assert!(board.is_attacked(sq("g1"), Color::Black));
        assert!(!board.is_attacked(sq("f1"), Color::Black));
        assert_eq!(board.classify(sq("e1"), sq("g1")), MoveClass::Castle);
    }

    #[test]
    fn castling_moves_both_pieces() {
        let board = Board::from(
            BoardBuilder::new()
                .piece(sq("e1"), Piece::King, Color::White)
                .piece(sq("h1"), Piece::Rook, Color::White)
                .piece(sq("a1"), Piece::Rook, Color::White)
                .piece(sq("e8"), Piece::King, Color::Black)
                .castle_rights(Color::White, CastleRights::Both),
        );
        let kingside = board.make_move(sq("e1"), sq("g1"));
        assert_eq!(kingside.piece_on(sq("g1")), Some(Piece::King));
        assert_eq!(kingside.piece_on(sq("f1")), Some(Piece::Rook));
        assert_eq!(kingside.piece_on(sq("e1")), None);
        assert_eq!(kingside.piece_on(sq("h1")), None);
        assert_eq!(kingside.castle_rights(Color::White), CastleRights::NoRights);

        let queenside = board.make_move(sq("e1"), sq("c1"));
        assert_eq!(queenside.piece_on(sq("c1")), Some(Piece::King));
        assert_eq!(queenside.piece_on(sq("d1")), Some(Piece::Rook));
        assert_eq!(queenside.piece_on(sq("a1")), None);
    }

    #[test]
    fn rights_shrink_when_rooks_move_or_die() {
        let board = Board::default();
        assert_eq!(board.castle_rights(Color::White), CastleRights::Both);

        let board = board.make_move(sq("h2"), sq("h4")).make_move(sq("h1"), sq("h3"));
        assert_eq!(board.castle_rights(Color::White), CastleRights::QueenSide);
    }

    #[test]
    fn promotion_always_makes_a_queen() {
        let board = Board::from(
            BoardBuilder::new()
                .piece(sq("e1"), Piece::King, Color::White)
                .piece(sq("e8"), Piece::King, Color::Black)
                .piece(sq("a7"), Piece::Pawn, Color::White),
        );
        assert_eq!(board.classify(sq("a7"), sq("a8")), MoveClass::Promotion);
        let after = board.make_move(sq("a7"), sq("a8"));
        assert_eq!(after.piece_on(sq("a8")), Some(Piece::Queen));
        assert_eq!(after.color_on(sq("a8")), Some(Color::White));
    }

    #[test]
    fn capturing_a_king_ends_the_game() {
        let board = Board::from(
            BoardBuilder::new()
                .piece(sq("d1"), Piece::Queen, Color::White)
                .piece(sq("e1"), Piece::King, Color::White)
                .piece(sq("d8"), Piece::King, Color::Black),
        );
        assert_eq!(board.status(), BoardStatus::Ongoing);
        let after = board.make_move(sq("d1"), sq("d8"));
        assert_eq!(after.status(), BoardStatus::Won(Color::White));
        // terminal boards accept nothing
        assert_eq!(after.classify(sq("d8"), sq("d7")), MoveClass::Invalid);
        assert!(after.legal_moves(None).is_empty());
    }

    #[test]
    fn one_e4_e5_matches_a_rebuilt_position() {
        let board = Board::default()
            .make_move(sq("e2"), sq("e4"))
            .make_move(sq("e7"), sq("e5"));
        assert_eq!(board.piece_on(sq("e4")), Some(Piece::Pawn));
        assert_eq!(board.color_on(sq("e4")), Some(Color::White));
        assert_eq!(board.piece_on(sq("e5")), Some(Piece::Pawn));
        assert_eq!(board.color_on(sq("e5")), Some(Color::Black));
        assert_eq!(board.piece_on(sq("e2")), None);
        assert_eq!(board.piece_on(sq("e7")), None);
    }
}
