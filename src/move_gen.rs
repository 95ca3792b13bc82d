pub mod attacks;
pub mod generation;
pub mod move_list;
pub mod ordering;
