use std::ops::Index;

use crate::r#move::Move;

/// With at most 16 pieces per side, 15 queens with 27 moves each plus a king with 8 steps and 2 castling moves give
/// 415 pseudo-legal moves.
const MAX_MOVES: usize = 416;

/// Structure to store a list of chess moves efficiently.
///
/// This structure uses a fixed-size array to avoid heap allocations during move generation, which happens at every node
/// of the search tree. No position accepted by `Position::new_from_fen` has more than `MAX_MOVES` pseudo-legal moves.
#[derive(Debug, Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    count: usize,
}

impl Default for MoveList {
    /// Creates a new empty move list.
    fn default() -> Self {
        Self { moves: [Move::NULL; MAX_MOVES], count: 0 }
    }
}

impl MoveList {
    /// Adds a move to the list.
    ///
    /// # Panics
    /// Panics if the list is already full.
    pub fn push(&mut self, mv: Move) {
        debug_assert!(self.count < MAX_MOVES);

        self.moves[self.count] = mv;
        self.count += 1;
    }

    /// Removes every move from the list.
    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Checks if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of moves currently in the list.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the list holds `mv`. The ordering score is not compared.
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }

    /// Returns the valid moves as a slice.
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.count]
    }

    /// Returns the valid moves as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.count]
    }

    /// Returns an iterator over the valid moves in the list.
    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.as_slice().iter().copied()
    }

    /// Returns a mutable iterator over the valid moves in the list.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Move> + '_ {
        self.as_mut_slice().iter_mut()
    }

    /// Sorts the moves by descending score. Moves with equal scores keep their generation order.
    pub fn sort_by_score(&mut self) {
        self.as_mut_slice().sort_by_key(|mv| std::cmp::Reverse(mv.score()));
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl FromIterator<Move> for MoveList {
    /// Creates a MoveList from an iterator of moves.
    ///
    /// # Panics
    /// If the number of moves exceeds MAX_MOVES, this method will panic.
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        let mut list = Self::default();
        for mv in iter {
            list.push(mv);
        }
        list
    }
}
