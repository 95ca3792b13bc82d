pub mod config;
pub mod coordinates;
pub mod eval;
pub mod r#move;
pub mod move_gen;
pub mod notation;
pub mod perft;
pub mod piece;
pub mod position;
pub mod pv;
pub mod rules;
pub mod search;
pub mod time;
