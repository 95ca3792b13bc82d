//! Check, checkmate and stalemate detection on top of pseudo-legal move lists.
//!
//! The predicates take the move lists of both sides as arguments so that a caller who already generated them (the
//! search does at every node) does not pay for a second generation.

use crate::{
    move_gen::{generation::generate_all_moves, move_list::MoveList},
    piece::Color,
    position::Position,
    r#move::Move,
};

/// Returns true if one of `opponent_moves` lands on the king of `defender`.
///
/// A side without a king on the board is never in check. The moves are not regenerated.
///
/// # Parameters
/// * `position` - The position the moves were generated from
/// * `opponent_moves` - Pseudo-legal moves of the side attacking `defender`
/// * `defender` - The color whose king is tested
pub fn is_check(position: &Position, opponent_moves: &MoveList, defender: Color) -> bool {
    position.king_square(defender).is_some_and(|king| opponent_moves.iter().any(|mv| mv.to_square() == king))
}

/// Plays `mv` and returns true if the mover's king can then be captured by one of the replies.
///
/// The position is restored before returning.
pub fn leaves_king_in_check(position: &mut Position, mv: Move) -> bool {
    let mover = position.side_to_move();

    position.make(mv);
    let mut replies = MoveList::default();
    generate_all_moves(position, &mut replies);
    let in_check = is_check(position, &replies, mover);
    position.unmake(mv);

    in_check
}

/// Returns true if at least one of `own_moves` does not leave the side to move in check.
fn has_legal_move(position: &mut Position, own_moves: &MoveList) -> bool {
    own_moves.iter().any(|mv| !leaves_king_in_check(position, mv))
}

/// Returns true if the side to move is checkmated.
///
/// The side to move must be in check according to `opponent_moves`, and every one of `own_moves` must leave its king
/// capturable.
///
/// # Parameters
/// * `position` - The position, restored before returning
/// * `own_moves` - Pseudo-legal moves of the side to move
/// * `opponent_moves` - Pseudo-legal moves of the other side in the same position
pub fn is_checkmate(position: &mut Position, own_moves: &MoveList, opponent_moves: &MoveList) -> bool {
    is_check(position, opponent_moves, position.side_to_move()) && !has_legal_move(position, own_moves)
}

/// Returns true if the side to move is stalemated: it is not in check and has no legal move.
pub fn is_stalemate(position: &mut Position, own_moves: &MoveList, opponent_moves: &MoveList) -> bool {
    !is_check(position, opponent_moves, position.side_to_move()) && !has_legal_move(position, own_moves)
}

/// Returns the legal moves of the side to move.
pub fn legal_moves(position: &mut Position) -> MoveList {
    let mut pseudo_legal = MoveList::default();
    generate_all_moves(position, &mut pseudo_legal);

    pseudo_legal.iter().filter(|mv| !leaves_king_in_check(position, *mv)).collect()
}
