//! The compact string form of a game.
//!
//! Each ply is written as its timestamp offset from game start, in 5-bit
//! big-endian digits with a continuation flag in bit 5 of every digit but
//! the last, followed by one character for the source square and one for
//! the destination (`rank << 3 | file`).  Characters come from a 64-symbol
//! alphabet: `a`-`z`, `A`-`Z`, `0`-`9`, `(`, `)`.
//!
//! Decoding replays the moves through the full legality layer, inferring
//! each mover from the board, so a decoded game is a real game: feeding an
//! encoded history back in reproduces the generation sequence exactly.

use crate::chess_move::Move;
use crate::error::Error;
use crate::game::TimingRules;
use crate::square::Square;
use crate::timeline::GameTimeline;

/// Continuation flag inside one 6-bit digit.
const CONTINUE: u8 = 32;

/// Longest accepted timestamp run: 10 digits carry 50 bits, far beyond any
/// real game clock, and staying under it keeps the accumulator in range.
const MAX_TIME_DIGITS: usize = 10;

fn int_to_char(value: u8) -> char {
    match value {
        0..=25 => (b'a' + value) as char,
        26..=51 => (b'A' + value - 26) as char,
        52..=61 => (b'0' + value - 52) as char,
        62 => '(',
        63 => ')',
        _ => unreachable!("only 6-bit values are ever encoded"),
    }
}

fn char_to_int(ch: char) -> Result<u8, Error> {
    match ch {
        'a'..='z' => Ok(ch as u8 - b'a'),
        'A'..='Z' => Ok(ch as u8 - b'A' + 26),
        '0'..='9' => Ok(ch as u8 - b'0' + 52),
        '(' => Ok(62),
        ')' => Ok(63),
        _ => Err(Error::InvalidGameString),
    }
}

fn push_time(out: &mut String, offset: i64) {
    assert!(offset >= 0, "moves cannot predate the game they are part of");
    if offset == 0 {
        out.push(int_to_char(0));
        return;
    }
    let mut digits = Vec::new();
    let mut rest = offset;
    while rest > 0 {
        digits.push((rest & 31) as u8);
        rest >>= 5;
    }
    for digit in digits.iter_mut().skip(1) {
        *digit |= CONTINUE;
    }
    for digit in digits.iter().rev() {
        out.push(int_to_char(*digit));
    }
}

/// Write a whole game as a compact string.
///
/// ```
/// use royale::{GameTimeline, Move, Color, Square, TimingRules};
/// use royale::{encode_game, decode_game};
/// use std::str::FromStr;
///
/// let mut game = GameTimeline::new(0, TimingRules::default());
/// game.make_move(Move::new(
///     Color::White,
///     4001,
///     Square::from_str("e2").unwrap(),
///     Square::from_str("e4").unwrap(),
/// ));
///
/// let encoded = encode_game(&game);
/// let decoded = decode_game(&encoded, TimingRules::default()).unwrap();
/// assert_eq!(decoded.moves_since(0), game.moves_since(0));
/// ```
pub fn encode_game(game: &GameTimeline) -> String {
    let start = game.start_time();
    let mut out = String::new();
    for mv in game.moves_since(0) {
        push_time(&mut out, mv.get_time() - start);
        out.push(int_to_char(mv.get_source().to_int()));
        out.push(int_to_char(mv.get_dest().to_int()));
    }
    out
}

/// Rebuild a game from its compact string form.  The game starts at time
/// zero under the given rules.  Fails on characters outside the alphabet,
/// on a truncated string, and on any embedded move the rules reject.
pub fn decode_game(encoded: &str, rules: TimingRules) -> Result<GameTimeline, Error> {
    let mut chars = encoded.chars();
    let mut game = GameTimeline::new(0, rules);
    while let Some(first) = chars.next() {
        let mut time: i64 = 0;
        let mut digit = char_to_int(first)?;
        let mut digits = 1;
        loop {
            time = (time << 5) | i64::from(digit & 31);
            if digit & CONTINUE == 0 {
                break;
            }
            digit = char_to_int(chars.next().ok_or(Error::InvalidGameString)?)?;
            digits += 1;
            if digits > MAX_TIME_DIGITS {
                return Err(Error::InvalidGameString);
            }
        }
        let source = Square::new(char_to_int(
            chars.next().ok_or(Error::InvalidGameString)?,
        )?);
        let dest = Square::new(char_to_int(chars.next().ok_or(Error::InvalidGameString)?)?);
        let color = game
            .board()
            .color_on(source)
            .ok_or(Error::IllegalEncodedMove)?;
        let mv = Move::new(color, time, source, dest);
        if !game.is_legal_move(mv) {
            return Err(Error::IllegalEncodedMove);
        }
        game.make_move(mv);
    }
    Ok(game)
}
