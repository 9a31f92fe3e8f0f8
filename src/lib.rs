//! The rules and timing core for a real-time chess variant.
//!
//! There are no turns here.  Each player banks one move per resource
//! interval, a piece that lands on a square must rest through a cooldown
//! before it moves again, and the game ends when a king is captured.  The
//! [`Board`] keeps a per-square move index that is updated incrementally as
//! pieces change, the [`GameState`] layers the timing rules on top, and the
//! [`GameTimeline`] turns timestamped moves -- possibly arriving out of
//! order -- into one canonical, replayable history.
//!
//! All timestamps are supplied by the caller; the core never reads a clock,
//! so a recorded game replays bit-for-bit.

#[cfg(feature = "serialize")]
#[macro_use]
extern crate serde;

#[macro_use]
extern crate lazy_static;

pub mod bitboard;
pub mod board;
pub mod board_builder;
pub mod castle_rights;
pub mod chess_move;
pub mod color;
pub mod encode;
pub mod error;
pub mod file;
pub mod game;
pub mod move_index;
mod movegen;
pub mod piece;
pub mod rank;
pub mod square;
pub mod timeline;

pub use crate::bitboard::{BitBoard, EMPTY};
pub use crate::board::{Board, BoardStatus};
pub use crate::board_builder::BoardBuilder;
pub use crate::castle_rights::{CastleRights, ALL_CASTLE_RIGHTS, NUM_CASTLE_RIGHTS};
pub use crate::chess_move::{Move, MoveClass};
pub use crate::color::{Color, ALL_COLORS, NUM_COLORS};
pub use crate::encode::{decode_game, encode_game};
pub use crate::error::Error;
pub use crate::file::{File, ALL_FILES, NUM_FILES};
pub use crate::game::{GameState, TimingRules};
pub use crate::move_index::MoveIndex;
pub use crate::piece::{Piece, ALL_PIECES, NUM_PIECES};
pub use crate::rank::{Rank, ALL_RANKS, NUM_RANKS};
pub use crate::square::{Square, ALL_SQUARES, NUM_SQUARES};
pub use crate::timeline::{GameTimeline, Listener};
