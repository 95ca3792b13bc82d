use crate::{
    coordinates::Square,
    piece::{Color, Piece, PieceType},
    position::Position,
};

/// File and rank deltas of the eight knight jumps.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)];

/// File and rank deltas of the eight king steps.
pub const KING_OFFSETS: [(i8, i8); 8] = [(0, 1), (1, 1), (1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (-1, 1)];

/// Diagonal directions, used by bishops and queens.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Orthogonal directions, used by rooks and queens.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// All eight directions, used by queens.
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [(0, 1), (1, 1), (1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (-1, 1)];

/// Returns the first piece met when walking from `square` in the given direction, along with its square.
fn first_piece_on_ray(position: &Position, square: Square, direction: (i8, i8)) -> Option<(Square, Piece)> {
    square.ray(direction.0, direction.1).find_map(|sq| position[sq].map(|piece| (sq, piece)))
}

/// Returns true if `attacker` stands on one of the squares reached from `square` by `offsets`.
fn is_attacked_by_leaper(position: &Position, square: Square, offsets: &[(i8, i8)], attacker: Piece) -> bool {
    offsets
        .iter()
        .filter_map(|&(file_delta, rank_delta)| square.shift(file_delta, rank_delta).ok())
        .any(|sq| position[sq] == Some(attacker))
}

/// Returns true if a slider of `color` whose type is one of `piece_types` sees `square` along one of `directions`.
fn is_attacked_by_slider(
    position: &Position,
    square: Square,
    directions: &[(i8, i8)],
    color: Color,
    piece_types: [PieceType; 2],
) -> bool {
    directions.iter().any(|&direction| {
        first_piece_on_ray(position, square, direction)
            .is_some_and(|(_, piece)| piece.color() == color && piece_types.contains(&piece.piece_type()))
    })
}

/// Determines whether a square is attacked by any piece of the given color.
///
/// The test works backwards from the target square: it looks for pawns, knights and kings on the squares they would
/// attack from, then casts rays in all eight directions to find sliders.
///
/// # Parameters
/// * `position` - The position to inspect
/// * `square` - The target square, which may be empty or occupied by a piece of either color
/// * `color` - The color of the attacking pieces
///
/// # Returns
/// `true` if at least one piece of `color` attacks `square`.
pub fn is_square_attacked(position: &Position, square: Square, color: Color) -> bool {
    // A pawn of `color` attacks diagonally forward, so it stands one rank behind the target.
    let pawn = Piece::new(color, PieceType::Pawn);
    let pawn_attacks = [(-1, -color.forward()), (1, -color.forward())];

    is_attacked_by_leaper(position, square, &pawn_attacks, pawn)
        || is_attacked_by_leaper(position, square, &KNIGHT_OFFSETS, Piece::new(color, PieceType::Knight))
        || is_attacked_by_leaper(position, square, &KING_OFFSETS, Piece::new(color, PieceType::King))
        || is_attacked_by_slider(position, square, &ROOK_DIRECTIONS, color, [PieceType::Rook, PieceType::Queen])
        || is_attacked_by_slider(position, square, &BISHOP_DIRECTIONS, color, [PieceType::Bishop, PieceType::Queen])
}
