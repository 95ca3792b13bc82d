use std::fmt::Display;

use crate::{
    eval::{evaluate, Eval},
    move_gen::{generation::generate_moves_for, move_list::MoveList},
    position::Position,
    r#move::Move,
    rules::is_stalemate,
};

/// The principal variation: the line of best play found by the search, starting at the root position.
#[derive(Debug, Clone)]
pub struct PrincipalVariation {
    moves: Vec<Move>,
    is_mate: bool,
    root: Position,
}

impl PrincipalVariation {
    /// Creates an empty principal variation for the given root position.
    pub fn new(root: &Position) -> Self {
        Self { moves: Vec::new(), is_mate: false, root: root.clone() }
    }

    /// Inserts a move at the front of the line.
    pub fn enqueue_move(&mut self, mv: Move) {
        self.moves.insert(0, mv);
    }

    /// Replaces the whole line.
    pub fn set_moves(&mut self, moves: Vec<Move>) {
        self.moves = moves;
    }

    /// Returns the moves of the line, from the root outward.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Returns the move to play from the root, if any.
    pub fn best_move(&self) -> Option<Move> {
        self.moves.first().copied()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns true if the search found a forced mate, for either side, or the root is already checkmated.
    pub fn is_mate(&self) -> bool {
        self.is_mate
    }

    pub fn set_mate(&mut self, is_mate: bool) {
        self.is_mate = is_mate;
    }

    /// Returns the static evaluation of the root position, from the point of view of its side to move. A stalemated
    /// root scores a draw.
    pub fn score(&self) -> Eval {
        let mut root = self.root.clone();
        let mut own_moves = MoveList::default();
        let mut opponent_moves = MoveList::default();
        generate_moves_for(&root, root.side_to_move(), &mut own_moves);
        generate_moves_for(&root, !root.side_to_move(), &mut opponent_moves);

        if is_stalemate(&mut root, &own_moves, &opponent_moves) {
            return Eval::DRAW;
        }
        evaluate(&mut root, &own_moves, &opponent_moves)
    }
}

impl Display for PrincipalVariation {
    /// Formats the line as space separated moves in coordinate notation.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let moves: Vec<String> = self.moves.iter().map(|mv| mv.to_uci_string()).collect();
        write!(f, "{}", moves.join(" "))
    }
}
