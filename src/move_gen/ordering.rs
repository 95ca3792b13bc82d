use crate::{position::Position, r#move::Move};

use super::move_list::MoveList;

/// Bonus given to a move that puts the opponent's king in check.
pub const CHECK_BONUS: i32 = 1000;

/// Scores larger than this in magnitude are considered corrupt and reset to zero.
const SCORE_LIMIT: i32 = 100_000_000;

/// Scores a move for ordering purposes.
///
/// A capture scores the value of the victim plus the difference between the victim and the attacker, so that taking a
/// queen with a pawn comes before taking a pawn with a queen. A move that gives check adds `CHECK_BONUS`. Detecting the
/// check requires playing the move, which is why the position is borrowed mutably; it is restored before returning.
///
/// # Parameters
/// * `position` - The position the move is played from
/// * `mv` - A pseudo-legal move of the side to move
///
/// # Returns
/// The ordering score of the move, higher is better.
pub fn score_move(position: &mut Position, mv: Move) -> i32 {
    let attacker = position[mv.from_square()].expect("There should be a piece on the origin square of the move.");

    let mut score = match position[mv.to_square()] {
        Some(victim) => victim.value() + (victim.value() - attacker.value()),
        None => 0,
    };

    position.make(mv);
    if position.is_king_attacked(position.side_to_move()) {
        score += CHECK_BONUS;
    }
    position.unmake(mv);

    if score.abs() > SCORE_LIMIT {
        0
    } else {
        score
    }
}

/// Scores every move of the list and sorts it best first.
pub fn order_moves(position: &mut Position, moves: &mut MoveList) {
    for mv in moves.iter_mut() {
        let score = score_move(position, *mv);
        mv.set_score(score);
    }

    moves.sort_by_score();
}
