use std::time::Instant;

use crate::{
    move_gen::{generation::generate_all_moves, move_list::MoveList},
    position::{FenError, Position},
    rules::leaves_king_in_check,
};

use thiserror::Error;

/// Represents errors that can occur during perft (performance test) operations.
///
/// # Variants
/// * `InvalidFen(String, FenError)` - Indicates that the provided FEN string was invalid, including both the original
///   FEN string and the specific parsing error
#[derive(Error, Debug)]
pub enum PerftError {
    #[error("Invalid FEN ({}): {:?}", .0, .1)]
    InvalidFen(String, FenError),
}

/// Runs a perft test on the position described by `fen` and prints the number of leaf nodes below each legal move.
///
/// # Parameters
/// * `fen` - The position to test
/// * `depth` - The depth of the move tree to traverse
///
/// # Returns
/// The total number of leaf nodes, or an error if the FEN is invalid.
pub fn perft(fen: &str, depth: u16) -> Result<u64, PerftError> {
    let mut position = Position::new_from_fen(fen).map_err(|e| PerftError::InvalidFen(fen.to_string(), e))?;

    println!("Perft ({}) for position:\n\n{}\n", depth, position.to_compact_string());

    let start = Instant::now();
    let nodes = divide(&mut position, depth);
    let duration = start.elapsed();

    println!("\nNodes: {}", nodes);
    println!("Time: {:.3}", duration.as_secs_f64());
    println!("Nodes per second: {:.0}", nodes as f64 / duration.as_secs_f64());

    Ok(nodes)
}

/// Generates a detailed "divide" view of the perft results.
///
/// For each legal move, it displays the move in UCI notation and the number of leaf nodes found beneath that move.
fn divide(position: &mut Position, depth: u16) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut total_nodes = 0;

    let mut moves = MoveList::default();
    generate_all_moves(position, &mut moves);

    for mv in moves.iter() {
        if leaves_king_in_check(position, mv) {
            continue;
        }

        position.make(mv);
        let nodes = count_nodes(position, depth - 1);
        position.unmake(mv);

        println!("{}\t{}", mv.to_uci_string(), nodes);
        total_nodes += nodes;
    }

    total_nodes
}

/// Counts the leaf nodes of the legal move tree of the given depth.
///
/// # Parameters
/// * `position` - The position to analyze, restored before returning
/// * `depth` - The remaining depth to traverse in the move tree
///
/// # Returns
/// The total number of legal positions found at the specified depth.
pub fn count_nodes(position: &mut Position, depth: u16) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut moves = MoveList::default();
    generate_all_moves(position, &mut moves);

    let mut nodes = 0;
    for mv in moves.iter() {
        if leaves_king_in_check(position, mv) {
            continue;
        }

        if depth == 1 {
            nodes += 1;
        } else {
            position.make(mv);
            nodes += count_nodes(position, depth - 1);
            position.unmake(mv);
        }
    }
    nodes
}
