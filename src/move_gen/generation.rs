use crate::{
    coordinates::{File, Rank, Square},
    piece::{Color, Piece, PieceType},
    position::Position,
    r#move::{CastlingRights, CastlingSide, Move},
};

use super::{
    attacks::{BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS},
    move_list::MoveList,
};

/// Returns true if `square` is empty or holds a piece of the other color.
fn is_empty_or_enemy(position: &Position, square: Square, color: Color) -> bool {
    !matches!(position[square], Some(piece) if piece.color() == color)
}

/// Adds a pawn move, turning it into a queen promotion when it reaches the last rank.
fn push_pawn_move(from: Square, to: Square, color: Color, list: &mut MoveList) {
    if to.rank() == Rank::R8.relative_to_color(color) {
        list.push(Move::new_promotion(from, to, PieceType::Queen));
    } else {
        list.push(Move::new(from, to));
    }
}

fn generate_pawn_moves(position: &Position, from: Square, color: Color, list: &mut MoveList) {
    let forward = color.forward();

    // Pushes
    if let Ok(to) = from.shift(0, forward) {
        if position[to].is_none() {
            push_pawn_move(from, to, color, list);

            if from.rank() == Rank::R2.relative_to_color(color) {
                if let Ok(to) = to.shift(0, forward) {
                    if position[to].is_none() {
                        list.push(Move::new(from, to));
                    }
                }
            }
        }
    }

    // Captures, including en passant
    for file_delta in [-1, 1] {
        let Ok(to) = from.shift(file_delta, forward) else {
            continue;
        };

        match position[to] {
            Some(piece) if piece.color() != color => push_pawn_move(from, to, color, list),
            Some(_) => {}
            None => {
                let is_en_passant = from.rank() == Rank::R5.relative_to_color(color)
                    && position.en_passant_square() == Some(to)
                    && position[Square::new(to.file(), from.rank())] == Some(Piece::new(!color, PieceType::Pawn));
                if is_en_passant {
                    list.push(Move::new(from, to));
                }
            }
        }
    }
}

fn generate_leaper_moves(position: &Position, from: Square, color: Color, offsets: &[(i8, i8)], list: &mut MoveList) {
    for &(file_delta, rank_delta) in offsets {
        if let Ok(to) = from.shift(file_delta, rank_delta) {
            if is_empty_or_enemy(position, to, color) {
                list.push(Move::new(from, to));
            }
        }
    }
}

fn generate_sliding_moves(
    position: &Position,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    list: &mut MoveList,
) {
    for &(file_delta, rank_delta) in directions {
        for to in from.ray(file_delta, rank_delta) {
            match position[to] {
                None => list.push(Move::new(from, to)),
                Some(piece) => {
                    if piece.color() != color {
                        list.push(Move::new(from, to));
                    }
                    break;
                }
            }
        }
    }
}

/// Adds the castling moves available to the king of `color` standing on `from`.
///
/// Castling requires the right to be held, the king and rook on their home squares with nothing between them, and the
/// king to be neither in check nor to cross or land on an attacked square.
fn generate_castling_moves(position: &Position, from: Square, color: Color, list: &mut MoveList) {
    let rank = Rank::R1.relative_to_color(color);
    if from != Square::new(File::E, rank) {
        return;
    }

    let availability = position.castling_availability();
    if (availability & if color == Color::White { CastlingRights::WHITE } else { CastlingRights::BLACK }).is_empty() {
        return;
    }

    let them = !color;
    if position.is_attacked(from, them) {
        return;
    }

    for side in CastlingSide::ALL_SIDES {
        if !availability.contains(CastlingRights::new(color, side)) {
            continue;
        }

        let (transit, landing) = match side {
            CastlingSide::Kingside => (File::F, File::G),
            CastlingSide::Queenside => (File::D, File::C),
        };
        let transit = Square::new(transit, rank);
        let landing = Square::new(landing, rank);

        if !position.is_attacked(transit, them) && !position.is_attacked(landing, them) {
            list.push(Move::new(from, landing));
        }
    }
}

/// Generates the pseudo-legal moves of the piece standing on `from` and adds them to `list`.
///
/// Pseudo-legal moves follow the movement and occupancy rules of each piece but may leave the mover's own king in
/// check. Nothing is generated for an empty square.
///
/// # Parameters
/// * `position` - The position to generate moves for
/// * `from` - The origin square
/// * `list` - The list receiving the moves
pub fn generate_moves_from(position: &Position, from: Square, list: &mut MoveList) {
    let Some(piece) = position[from] else {
        return;
    };
    let color = piece.color();

    match piece.piece_type() {
        PieceType::Pawn => generate_pawn_moves(position, from, color, list),
        PieceType::Knight => generate_leaper_moves(position, from, color, &KNIGHT_OFFSETS, list),
        PieceType::Bishop => generate_sliding_moves(position, from, color, &BISHOP_DIRECTIONS, list),
        PieceType::Rook => generate_sliding_moves(position, from, color, &ROOK_DIRECTIONS, list),
        PieceType::Queen => generate_sliding_moves(position, from, color, &QUEEN_DIRECTIONS, list),
        PieceType::King => {
            generate_leaper_moves(position, from, color, &KING_OFFSETS, list);
            generate_castling_moves(position, from, color, list);
        }
    }
}

/// Generates the pseudo-legal moves of every piece of `color`, whether or not it is that side's turn.
pub fn generate_moves_for(position: &Position, color: Color, list: &mut MoveList) {
    for (square, _) in position.pieces(color) {
        generate_moves_from(position, square, list);
    }
}

/// Generates the pseudo-legal moves of the side to move.
pub fn generate_all_moves(position: &Position, list: &mut MoveList) {
    generate_moves_for(position, position.side_to_move(), list);
}
