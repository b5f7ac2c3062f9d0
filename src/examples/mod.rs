//! Problem frontends used by the tests and benchmarks.

pub mod map_colouring;
pub mod sudoku;
