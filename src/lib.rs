//! Shortest-path solver for the 3×3 sliding-tile puzzle (the 8-puzzle).
//!
//! The crate provides:
//! - [`Board`] and [`Move`]: the board model, with validation at the ingestion boundary
//! - [`Solver`] / [`solve`]: breadth-first search returning a shortest [`Solution`]
//! - [`history`]: saved puzzles and solve statistics in a JSON file
//! - [`session`] and [`tui`]: an interactive terminal front end
//!
//! ```
//! use eight_puzzle::{solve, Board, Move};
//!
//! let start: Board = "123456708".parse()?;
//! let solution = solve(&start)?;
//! assert_eq!(solution.moves, vec![Move::Right]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod error;
pub mod history;
pub mod puzzle;
pub mod session;
pub mod solver;
pub mod tui;

pub use error::{Error, InvalidBoard, Result};
pub use puzzle::{Board, Move};
pub use solver::{solve, solve_cells, Solution, Solver};
