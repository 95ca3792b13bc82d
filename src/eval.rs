use std::fmt::Display;

use crate::{
    move_gen::move_list::MoveList,
    piece::Color,
    position::Position,
    rules::{is_check, is_checkmate},
};

/// Penalty applied to the side to move when its king is in check.
pub const CHECK_PENALTY: i32 = 1000;

/// A simple wrapper around a 32-bit integer that represents the evaluation of a position from the point of view of the
/// side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Eval(i32);

impl Eval {
    /// The minimum possible evaluation score, also used for a side that is checkmated.
    pub const MIN: Eval = Eval(-i32::MAX); // i32::MIN can't be negated.

    /// The maximum possible evaluation score.
    pub const MAX: Eval = Eval(i32::MAX);

    /// The evaluation score for a draw.
    pub const DRAW: Eval = Eval(0);

    /// Creates a new Eval instance with the given value.
    pub const fn new(value: i32) -> Self {
        Eval(value)
    }

    /// Returns true if the score is one of the two bounds, which only happens when a mate was found.
    pub fn is_mate(self) -> bool {
        self == Eval::MIN || self == Eval::MAX
    }
}

impl std::ops::Neg for Eval {
    type Output = Self;
    fn neg(self) -> Self {
        Eval(-self.0)
    }
}

impl Display for Eval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Eval::MAX => write!(f, "mate"),
            Eval::MIN => write!(f, "-mate"),
            Eval(value) => write!(f, "{value}"),
        }
    }
}

/// Returns the sum of the material values of the pieces of `color`.
pub fn material(position: &Position, color: Color) -> i32 {
    position.pieces(color).map(|(_, piece)| piece.value()).sum()
}

/// Evaluates the position from the point of view of the side to move.
///
/// The score is the material of the side to move minus the material of its opponent. A side to move in check loses
/// `CHECK_PENALTY`, and a checkmated side gets `Eval::MIN`.
///
/// # Parameters
/// * `position` - The position to evaluate, restored before returning
/// * `own_moves` - Pseudo-legal moves of the side to move
/// * `opponent_moves` - Pseudo-legal moves of the other side
pub fn evaluate(position: &mut Position, own_moves: &MoveList, opponent_moves: &MoveList) -> Eval {
    if is_checkmate(position, own_moves, opponent_moves) {
        return Eval::MIN;
    }

    let us = position.side_to_move();
    let mut own_material = material(position, us);
    if is_check(position, opponent_moves, us) {
        own_material -= CHECK_PENALTY;
    }

    Eval(own_material - material(position, !us))
}
