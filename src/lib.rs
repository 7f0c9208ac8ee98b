//! Backtracking katas: snaking word search on a letter grid, permutations of distinct
//! symbols and brace expansion. Each search runs on caller owned data and keeps its
//! state to itself.

pub mod braces;
pub mod error;
pub mod grid;
pub mod permutations;
pub mod utils;

pub use braces::{expand_braces, BraceExpansion};
pub use error::{KataError, KataResult};
pub use grid::util::{Direction, Position};
pub use grid::{word_exists_on_grid, Grid};
pub use permutations::{factorial, permutations, Permutations};
