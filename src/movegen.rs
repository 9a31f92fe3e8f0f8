//! Incremental maintenance of the move index.
//!
//! When one square changes, the only rows that can change are those of the
//! changed square itself, of the nearest occupant along each of the 8 rays
//! out of it, of the knights and kings a fixed offset away, and of the pawns
//! diagonally or vertically adjacent.  `place_piece` touches exactly those
//! rows, so the cost of keeping the index consistent is bounded by board
//! geometry rather than by how long the game has run.

use crate::color::Color;
use crate::move_index::MoveIndex;
use crate::piece::Piece;
use crate::square::{Square, NUM_SQUARES};

/// The flat piece layout the index is maintained against.
pub(crate) type Placement = [Option<(Piece, Color)>; NUM_SQUARES];

/// (rank, file) offsets for knights and kings.
const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

#[inline]
fn in_bounds(rank: i8, file: i8) -> bool {
    rank & !7 == 0 && file & !7 == 0
}

#[inline]
fn square_at(rank: i8, file: i8) -> Square {
    Square::new(((rank << 3) | file) as u8)
}

#[inline]
fn slot(placement: &Placement, rank: i8, file: i8) -> Option<(Piece, Color)> {
    placement[((rank << 3) | file) as usize]
}

#[inline]
fn color_at(placement: &Placement, rank: i8, file: i8) -> Option<Color> {
    slot(placement, rank, file).map(|(_, color)| color)
}

/// Does this piece slide along the given axis kind?
#[inline]
fn slides(piece: Piece, diagonal: bool) -> bool {
    match piece {
        Piece::Queen => true,
        Piece::Bishop => diagonal,
        Piece::Rook => !diagonal,
        _ => false,
    }
}

/// Distance to the nearest occupied square along (dr, dc), or 0 if every
/// square out to `max_range` is empty.  Requires the whole ray out to
/// `max_range` to stay on the board.
fn next_piece(placement: &Placement, rank: i8, file: i8, dr: i8, dc: i8, max_range: i8) -> i8 {
    let mut r = rank;
    let mut c = file;
    for i in 1..=max_range {
        r += dr;
        c += dc;
        if slot(placement, r, c).is_some() {
            return i;
        }
    }
    0
}

/// Reconcile the row of the nearest slider beyond the changed square in
/// direction (dr, dc).  `plus` is its distance (0 for none); `minus_range`
/// is how far the opposite ray runs before its own blocker or the edge.
/// Occupying the square cuts the slider's run short; vacating it extends
/// the run out to the next blocker.
#[allow(clippy::too_many_arguments)]
fn update_direction(
    placement: &Placement,
    index: &mut MoveIndex,
    new_color: Option<Color>,
    rank: i8,
    file: i8,
    dr: i8,
    dc: i8,
    plus: i8,
    minus_range: i8,
    diagonal: bool,
) {
    if plus == 0 {
        return;
    }
    let slider_rank = rank + dr * plus;
    let slider_file = file + dc * plus;
    let (piece, slider_color) = match slot(placement, slider_rank, slider_file) {
        Some(found) => found,
        None => return,
    };
    if !slides(piece, diagonal) {
        return;
    }
    let old_color = color_at(placement, rank, file);
    if old_color == new_color {
        return;
    }
    let slider = square_at(slider_rank, slider_file);
    let changed = square_at(rank, file);
    index.set(slider, changed, new_color != Some(slider_color));
    if old_color.is_none() {
        // the square filled up, so everything past it goes dark
        for i in 1..=minus_range {
            index.set(slider, square_at(rank - i * dr, file - i * dc), false);
        }
    }
    if new_color.is_none() && minus_range > 0 {
        // the square opened up, so the run extends to the next blocker
        for i in 1..minus_range {
            index.set(slider, square_at(rank - i * dr, file - i * dc), true);
        }
        let end_rank = rank - minus_range * dr;
        let end_file = file - minus_range * dc;
        index.set(
            slider,
            square_at(end_rank, end_file),
            color_at(placement, end_rank, end_file) != Some(slider_color),
        );
    }
}

/// Rebuild one sliding ray of the changed square's own row.  `range` runs to
/// the nearest blocker, or to the edge when the ray is open.
fn fill_ray(
    placement: &Placement,
    index: &mut MoveIndex,
    color: Color,
    rank: i8,
    file: i8,
    dr: i8,
    dc: i8,
    range: i8,
) {
    if range == 0 {
        return;
    }
    let source = square_at(rank, file);
    for i in 1..range {
        index.set(source, square_at(rank + i * dr, file + i * dc), true);
    }
    let end_rank = rank + range * dr;
    let end_file = file + range * dc;
    index.set(
        source,
        square_at(end_rank, end_file),
        color_at(placement, end_rank, end_file) != Some(color),
    );
}

/// Change the piece on `square` to `piece` (or clear it with `None`),
/// updating both the placement and the move index to match.  This is the
/// only way placements are ever edited.
pub(crate) fn place_piece(
    placement: &mut Placement,
    index: &mut MoveIndex,
    square: Square,
    piece: Option<(Piece, Color)>,
) {
    if placement[square.to_index()] == piece {
        return;
    }
    let r = square.get_rank().to_index() as i8;
    let c = square.get_file().to_index() as i8;
    let new_color = piece.map(|(_, color)| color);

    // nearest occupant and open-ray length along each diagonal
    let urd_max = (7 - r).min(7 - c);
    let uld_max = (7 - r).min(c);
    let lrd_max = r.min(7 - c);
    let lld_max = r.min(c);
    let urd = next_piece(placement, r, c, 1, 1, urd_max);
    let uld = next_piece(placement, r, c, 1, -1, uld_max);
    let lrd = next_piece(placement, r, c, -1, 1, lrd_max);
    let lld = next_piece(placement, r, c, -1, -1, lld_max);
    let urd_range = if urd != 0 { urd } else { urd_max };
    let uld_range = if uld != 0 { uld } else { uld_max };
    let lrd_range = if lrd != 0 { lrd } else { lrd_max };
    let lld_range = if lld != 0 { lld } else { lld_max };

    update_direction(placement, index, new_color, r, c, 1, 1, urd, lld_range, true);
    update_direction(placement, index, new_color, r, c, -1, -1, lld, urd_range, true);
    update_direction(placement, index, new_color, r, c, 1, -1, uld, lrd_range, true);
    update_direction(placement, index, new_color, r, c, -1, 1, lrd, uld_range, true);

    // pawns capture diagonally onto the changed square
    if urd == 1 && slot(placement, r + 1, c + 1) == Some((Piece::Pawn, Color::Black)) {
        index.set(square_at(r + 1, c + 1), square, new_color == Some(Color::White));
    }
    if uld == 1 && slot(placement, r + 1, c - 1) == Some((Piece::Pawn, Color::Black)) {
        index.set(square_at(r + 1, c - 1), square, new_color == Some(Color::White));
    }
    if lrd == 1 && slot(placement, r - 1, c + 1) == Some((Piece::Pawn, Color::White)) {
        index.set(square_at(r - 1, c + 1), square, new_color == Some(Color::Black));
    }
    if lld == 1 && slot(placement, r - 1, c - 1) == Some((Piece::Pawn, Color::White)) {
        index.set(square_at(r - 1, c - 1), square, new_color == Some(Color::Black));
    }

    // nearest occupant and open-ray length along rank and file
    let up_max = 7 - r;
    let down_max = r;
    let right_max = 7 - c;
    let left_max = c;
    let up = next_piece(placement, r, c, 1, 0, up_max);
    let down = next_piece(placement, r, c, -1, 0, down_max);
    let right = next_piece(placement, r, c, 0, 1, right_max);
    let left = next_piece(placement, r, c, 0, -1, left_max);
    let up_range = if up != 0 { up } else { up_max };
    let down_range = if down != 0 { down } else { down_max };
    let right_range = if right != 0 { right } else { right_max };
    let left_range = if left != 0 { left } else { left_max };

    update_direction(placement, index, new_color, r, c, 1, 0, up, down_range, false);
    update_direction(placement, index, new_color, r, c, -1, 0, down, up_range, false);
    update_direction(placement, index, new_color, r, c, 0, 1, right, left_range, false);
    update_direction(placement, index, new_color, r, c, 0, -1, left, right_range, false);

    // pawn pushes blocked or unblocked by the change
    if up == 1 && slot(placement, r + 1, c) == Some((Piece::Pawn, Color::Black)) {
        index.set(square_at(r + 1, c), square, new_color.is_none());
        if r >= 1 {
            index.set(
                square_at(r + 1, c),
                square_at(r - 1, c),
                r == 5 && new_color.is_none() && down_range > 1,
            );
        }
    }
    if down == 1 && slot(placement, r - 1, c) == Some((Piece::Pawn, Color::White)) {
        index.set(square_at(r - 1, c), square, new_color.is_none());
        if r <= 6 {
            index.set(
                square_at(r - 1, c),
                square_at(r + 1, c),
                r == 2 && new_color.is_none() && up_range > 1,
            );
        }
    }
    // a double-step lands two squares out, so a pawn two away matters too
    if r == 4 && up == 2 && slot(placement, r + 2, c) == Some((Piece::Pawn, Color::Black)) {
        index.set(square_at(r + 2, c), square, new_color.is_none());
    }
    if r == 3 && down == 2 && slot(placement, r - 2, c) == Some((Piece::Pawn, Color::White)) {
        index.set(square_at(r - 2, c), square, new_color.is_none());
    }

    // knights and kings within reach of the changed square
    for &(dr, dc) in KNIGHT_DELTAS.iter() {
        let (rr, cc) = (r + dr, c + dc);
        if in_bounds(rr, cc) {
            if let Some((Piece::Knight, color)) = slot(placement, rr, cc) {
                index.set(square_at(rr, cc), square, Some(color) != new_color);
            }
        }
    }
    for &(dr, dc) in KING_DELTAS.iter() {
        let (rr, cc) = (r + dr, c + dc);
        if in_bounds(rr, cc) {
            if let Some((Piece::King, color)) = slot(placement, rr, cc) {
                index.set(square_at(rr, cc), square, Some(color) != new_color);
            }
        }
    }

    // finally, rebuild the changed square's own row from scratch
    index.clear_row(square);
    if let Some((p, color)) = piece {
        if slides(p, true) {
            fill_ray(placement, index, color, r, c, 1, 1, urd_range);
            fill_ray(placement, index, color, r, c, 1, -1, uld_range);
            fill_ray(placement, index, color, r, c, -1, 1, lrd_range);
            fill_ray(placement, index, color, r, c, -1, -1, lld_range);
        }
        if slides(p, false) {
            fill_ray(placement, index, color, r, c, 1, 0, up_range);
            fill_ray(placement, index, color, r, c, -1, 0, down_range);
            fill_ray(placement, index, color, r, c, 0, 1, right_range);
            fill_ray(placement, index, color, r, c, 0, -1, left_range);
        }
        match p {
            Piece::Knight => {
                for &(dr, dc) in KNIGHT_DELTAS.iter() {
                    let (rr, cc) = (r + dr, c + dc);
                    if in_bounds(rr, cc) {
                        index.set(square, square_at(rr, cc), color_at(placement, rr, cc) != Some(color));
                    }
                }
            }
            Piece::King => {
                for &(dr, dc) in KING_DELTAS.iter() {
                    let (rr, cc) = (r + dr, c + dc);
                    if in_bounds(rr, cc) {
                        index.set(square, square_at(rr, cc), color_at(placement, rr, cc) != Some(color));
                    }
                }
            }
            Piece::Pawn => match color {
                Color::White => {
                    if r < 7 && up != 1 {
                        index.set(square, square_at(r + 1, c), true);
                    }
                    if urd == 1 && color_at(placement, r + 1, c + 1) == Some(Color::Black) {
                        index.set(square, square_at(r + 1, c + 1), true);
                    }
                    if uld == 1 && color_at(placement, r + 1, c - 1) == Some(Color::Black) {
                        index.set(square, square_at(r + 1, c - 1), true);
                    }
                    if r == 1 && up_range > 2 {
                        index.set(square, square_at(3, c), true);
                    }
                }
                Color::Black => {
                    if r > 0 && down != 1 {
                        index.set(square, square_at(r - 1, c), true);
                    }
                    if lrd == 1 && color_at(placement, r - 1, c + 1) == Some(Color::White) {
                        index.set(square, square_at(r - 1, c + 1), true);
                    }
                    if lld == 1 && color_at(placement, r - 1, c - 1) == Some(Color::White) {
                        index.set(square, square_at(r - 1, c - 1), true);
                    }
                    if r == 6 && down_range > 2 {
                        index.set(square, square_at(4, c), true);
                    }
                }
            },
            _ => {}
        }
    }
    placement[square.to_index()] = piece;
}
