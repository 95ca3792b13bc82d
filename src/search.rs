use std::time::Instant;

use log::{debug, info};

use crate::{
    config::get_config,
    eval::{evaluate, Eval},
    move_gen::{generation::generate_moves_for, move_list::MoveList, ordering::order_moves},
    position::Position,
    pv::PrincipalVariation,
    r#move::Move,
    rules::{is_check, is_checkmate, is_stalemate, leaves_king_in_check},
    time::TimeManager,
};

/// Result of one root search.
struct RootOutcome {
    value: Eval,
    line: Vec<Move>,
    interrupted: bool,
    mate: bool,
}

pub struct Search<'a> {
    position: &'a mut Position,
    time: TimeManager,
    max_depth: u16,
    completed_depth: u16,
    nodes: u64,
    stopped: bool,
}

impl<'a> Search<'a> {
    /// Creates a new search instance.
    ///
    /// # Parameters
    /// * `position` - A mutable reference to the chess position to be searched. While the position will be mutated
    ///   during search it will be restored to its original state after the search is complete.
    /// * `time` - Decides when to stop deepening
    /// * `max_depth` - The maximum depth (in half-moves) iterative deepening can reach
    ///
    /// # Returns
    /// A new Search instance configured with the specified position and limits
    pub fn new(position: &'a mut Position, time: TimeManager, max_depth: u16) -> Search<'a> {
        Search { position, time, max_depth, completed_depth: 0, nodes: 0, stopped: false }
    }

    /// Returns the depth of the last iteration that was not interrupted.
    pub fn completed_depth(&self) -> u16 {
        self.completed_depth
    }

    /// Returns the number of nodes visited so far.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Searches the position at increasing depths until the time runs out, a mate is found or the maximum depth is
    /// reached.
    ///
    /// Each completed depth replaces the principal variation. An iteration interrupted by the deadline is discarded.
    /// The first iteration is always completed, even if the deadline has already passed or the maximum depth is 0.
    ///
    /// # Parameters
    /// * `alpha` - Lower bound of the root window
    /// * `beta` - Upper bound of the root window
    /// * `pv` - Receives the line of the deepest completed iteration
    ///
    /// # Returns
    /// The value of the deepest completed iteration, from the point of view of the side to move.
    pub fn iterative_deepening(&mut self, alpha: Eval, beta: Eval, pv: &mut PrincipalVariation) -> Eval {
        let mut value = Eval::DRAW;

        for depth in 1..=self.max_depth.max(1) {
            if !self.time.can_start_iteration() {
                debug!("Not enough time to start depth {depth}");
                break;
            }

            self.time.iteration_started();
            let outcome = self.search_root(depth, alpha, beta);

            if outcome.interrupted {
                debug!("Depth {depth} interrupted by the deadline, keeping depth {}", depth - 1);
                break;
            }
            self.time.iteration_finished();
            self.completed_depth = depth;

            value = outcome.value;
            pv.set_moves(outcome.line);
            pv.set_mate(outcome.mate);
            info!("depth {depth} score {value} nodes {} pv {pv}", self.nodes);

            if outcome.mate {
                debug!("Mate found at depth {depth}");
                break;
            }

            if pv.is_empty() {
                debug!("No legal move at the root");
                break;
            }
        }

        value
    }

    /// Generates the pseudo-legal moves of both sides in the current position.
    fn generate_move_lists(&self) -> (MoveList, MoveList) {
        let us = self.position.side_to_move();
        let mut own_moves = MoveList::default();
        let mut opponent_moves = MoveList::default();
        generate_moves_for(self.position, us, &mut own_moves);
        generate_moves_for(self.position, !us, &mut opponent_moves);
        (own_moves, opponent_moves)
    }

    /// Searches every legal move of the root at the given depth.
    ///
    /// The deadline is polled once per candidate. The first iteration never observes it.
    fn search_root(&mut self, depth: u16, alpha: Eval, beta: Eval) -> RootOutcome {
        self.nodes += 1;
        self.stopped = false;
        let mut alpha = alpha;

        let (mut own_moves, opponent_moves) = self.generate_move_lists();
        if is_checkmate(self.position, &own_moves, &opponent_moves) {
            return RootOutcome { value: Eval::MIN, line: Vec::new(), interrupted: false, mate: true };
        }
        if is_stalemate(self.position, &own_moves, &opponent_moves) {
            return RootOutcome { value: Eval::DRAW, line: Vec::new(), interrupted: false, mate: false };
        }

        order_moves(self.position, &mut own_moves);

        let mut best_value = Eval::MIN;
        let mut best_line = Vec::new();
        for mv in own_moves.iter() {
            if !self.time.can_continue() {
                self.stopped = true;
                break;
            }

            if leaves_king_in_check(self.position, mv) {
                continue;
            }

            self.position.make(mv);
            let mut child_line = Vec::new();
            let score = -self.search(depth - 1, -beta, -alpha, &mut child_line);
            self.position.unmake(mv);

            if self.stopped {
                break;
            }

            if best_line.is_empty() || score > best_value {
                best_value = score;
                best_line = child_line;
                best_line.insert(0, mv);
            }

            if score > alpha {
                alpha = score;
            }

            if alpha >= beta {
                break;
            }
        }

        RootOutcome { value: best_value, line: best_line, interrupted: self.stopped, mate: best_value.is_mate() }
    }

    /// Recursively searches the position to the given depth.
    ///
    /// This is a fail-hard alpha-beta search: the returned value is clamped to the `alpha`..`beta` window.
    ///
    /// # Parameters
    /// * `depth` - Current remaining search depth in half-moves
    /// * `alpha` - The current alpha value for alpha-beta pruning
    /// * `beta` - The current beta value for alpha-beta pruning
    /// * `pv` - Receives the best line found from this node
    ///
    /// # Returns
    /// The evaluation score of the position after searching to the specified depth. Higher positive values indicate an
    /// advantage for the side to move. `Eval::MAX` if the side that just moved left its king in check.
    fn search(&mut self, depth: u16, alpha: Eval, beta: Eval, pv: &mut Vec<Move>) -> Eval {
        self.nodes += 1;
        let mut alpha = alpha;

        let (mut own_moves, opponent_moves) = self.generate_move_lists();

        // The previous move was pseudo-legal only, reject it here.
        if is_check(self.position, &own_moves, !self.position.side_to_move()) {
            return Eval::MAX;
        }

        if is_checkmate(self.position, &own_moves, &opponent_moves) {
            return Eval::MIN;
        }
        if is_stalemate(self.position, &own_moves, &opponent_moves) {
            return Eval::DRAW;
        }

        if depth == 0 {
            return evaluate(self.position, &own_moves, &opponent_moves);
        }

        order_moves(self.position, &mut own_moves);

        for mv in own_moves.iter() {
            if !self.time.can_continue() {
                self.stopped = true;
                return alpha;
            }

            self.position.make(mv);
            let mut child_line = Vec::new();
            let score = -self.search(depth - 1, -beta, -alpha, &mut child_line);
            self.position.unmake(mv);

            if score >= beta {
                return beta;
            }

            if score > alpha {
                alpha = score;
                pv.clear();
                pv.push(mv);
                pv.append(&mut child_line);
            }
        }

        alpha
    }
}

/// Searches `position` until `deadline` and returns the principal variation found.
///
/// The maximum depth comes from the engine configuration.
pub fn search_position(position: &Position, deadline: Instant) -> PrincipalVariation {
    search_with_time_manager(position, TimeManager::new(deadline))
}

/// Searches `position` until `time` says to stop and returns the principal variation found.
pub fn search_with_time_manager(position: &Position, time: TimeManager) -> PrincipalVariation {
    let mut root = position.clone();
    let mut pv = PrincipalVariation::new(position);

    let mut search = Search::new(&mut root, time, get_config().max_depth);
    search.iterative_deepening(Eval::MIN, Eval::MAX, &mut pv);

    pv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{coordinates::Square, rules::legal_moves};
    use std::time::Duration;

    #[test]
    fn test_past_deadline_completes_depth_one() {
        let position = Position::new();

        let pv = search_position(&position, Instant::now());

        assert_eq!(pv.len(), 1);
        let best_move = pv.best_move().unwrap();
        let mut root = position.clone();
        assert!(legal_moves(&mut root).contains(best_move));
        assert!(!pv.is_mate());
    }

    #[test]
    fn test_max_depth_zero_still_searches_depth_one() {
        let mut position = Position::new();
        let mut pv = PrincipalVariation::new(&position);

        let mut search = Search::new(&mut position, TimeManager::new(Instant::now()), 0);
        search.iterative_deepening(Eval::MIN, Eval::MAX, &mut pv);

        assert_eq!(search.completed_depth(), 1);
        assert_eq!(pv.len(), 1);
    }

    /// Returns a time manager whose first iteration is done and whose deadline has passed.
    fn expired_time_manager() -> TimeManager {
        let mut time = TimeManager::new(Instant::now());
        time.iteration_started();
        time.iteration_finished();
        time
    }

    #[test]
    fn test_interior_node_returns_alpha_on_deadline() {
        let mut position =
            Position::new_from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
        let fen = position.to_fen();
        let mut line = Vec::new();

        let mut search = Search::new(&mut position, expired_time_manager(), 10);
        let value = search.search(3, Eval::new(-25), Eval::new(25), &mut line);

        assert_eq!(value, Eval::new(-25));
        assert!(search.stopped);
        assert!(line.is_empty());
        assert_eq!(position.to_fen(), fen);
    }

    #[test]
    fn test_root_search_reports_interruption() {
        let mut position =
            Position::new_from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
        let fen = position.to_fen();

        let mut search = Search::new(&mut position, expired_time_manager(), 10);
        let outcome = search.search_root(2, Eval::MIN, Eval::MAX);

        assert!(outcome.interrupted);
        assert_eq!(position.to_fen(), fen);
    }

    #[test]
    fn test_interrupted_iteration_keeps_previous_depth() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let mut position = Position::new_from_fen(fen).unwrap();
        let mut pv = PrincipalVariation::new(&position);

        let mut search = Search::new(&mut position, TimeManager::new(Instant::now() + Duration::from_millis(20)), 50);
        let value = search.iterative_deepening(Eval::MIN, Eval::MAX, &mut pv);
        let depth = search.completed_depth();

        assert!((1..50).contains(&depth));
        assert_eq!(position.to_fen(), fen);
        assert!(legal_moves(&mut position).contains(pv.best_move().unwrap()));

        // Searching to the completed depth alone gives the same line and value.
        let mut expected_pv = PrincipalVariation::new(&position);
        let far_deadline = TimeManager::new(Instant::now() + Duration::from_secs(3600));
        let expected_value =
            Search::new(&mut position, far_deadline, depth).iterative_deepening(Eval::MIN, Eval::MAX, &mut expected_pv);

        assert_eq!(value, expected_value);
        assert_eq!(pv.moves(), expected_pv.moves());
    }

    #[test]
    fn test_search_with_move_time() {
        let position = Position::new();

        let pv = search_with_time_manager(&position, TimeManager::from_move_time(Duration::from_millis(50)));

        assert!(!pv.is_empty());
        assert_eq!(position.to_fen(), Position::new().to_fen());
    }

    #[test]
    fn test_finds_mate_in_one() {
        let position =
            Position::new_from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4").unwrap();

        let pv = search_position(&position, Instant::now() + Duration::from_secs(5));

        assert_eq!(pv.best_move(), Some(Move::new(Square::H5, Square::F7)));
        assert!(pv.is_mate());
    }

    #[test]
    fn test_checkmated_root() {
        let position =
            Position::new_from_fen("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4").unwrap();
        let mut root = position.clone();
        let mut pv = PrincipalVariation::new(&position);

        let value = Search::new(&mut root, TimeManager::new(Instant::now()), 10).iterative_deepening(
            Eval::MIN,
            Eval::MAX,
            &mut pv,
        );

        assert_eq!(value, Eval::MIN);
        assert!(pv.is_mate());
        assert!(pv.is_empty());
    }

    #[test]
    fn test_search_restores_position() {
        let mut position =
            Position::new_from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
        let fen = position.to_fen();
        let mut pv = PrincipalVariation::new(&position);

        let mut search = Search::new(&mut position, TimeManager::new(Instant::now() + Duration::from_secs(5)), 2);
        search.iterative_deepening(Eval::MIN, Eval::MAX, &mut pv);
        assert!(search.nodes() > 0);

        assert_eq!(position.to_fen(), fen);
        assert!(!pv.is_empty());
    }

    #[test]
    fn test_wins_hanging_queen() {
        let position = Position::new_from_fen("k7/8/8/3q4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let mut root = position.clone();
        let mut pv = PrincipalVariation::new(&position);

        let value = Search::new(&mut root, TimeManager::new(Instant::now() + Duration::from_secs(5)), 2)
            .iterative_deepening(Eval::MIN, Eval::MAX, &mut pv);

        assert_eq!(pv.best_move(), Some(Move::new(Square::E4, Square::D5)));
        assert_eq!(pv.len(), 2);
        assert_eq!(value, Eval::new(10));
    }
}
