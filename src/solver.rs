//! Breadth-first search for a shortest move sequence to the goal.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::{
    error::{Error, Result},
    puzzle::{Board, Move},
};

/// A shortest path from a start board to the goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Moves in the order they are applied to the start board.
    pub moves: Vec<Move>,
    /// Configurations taken off the frontier and expanded.
    pub states_explored: usize,
    /// Largest frontier length observed during the search.
    pub max_frontier: usize,
}

impl Solution {
    fn already_solved() -> Self {
        Self {
            moves: Vec::new(),
            states_explored: 0,
            max_frontier: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Every board visited when applying the moves to `start`, `start` included.
    pub fn replay(&self, start: &Board) -> Result<Vec<Board>> {
        let mut boards = Vec::with_capacity(self.moves.len() + 1);
        boards.push(*start);
        let mut current = *start;
        for &mv in &self.moves {
            current = current.apply_move(mv)?;
            boards.push(current);
        }
        Ok(boards)
    }
}

/// Breadth-first solver for a fixed goal board.
///
/// Each call to [`Solver::solve`] owns its own frontier and visited map, so a
/// solver can be reused freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solver {
    goal: Board,
    parity_check: bool,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(Board::goal())
    }
}

impl Solver {
    pub fn new(goal: Board) -> Self {
        Self {
            goal,
            parity_check: true,
        }
    }

    /// Skip the parity pre-check, so unsolvable starts exhaust their reachable component.
    pub fn without_parity_check(mut self) -> Self {
        self.parity_check = false;
        self
    }

    pub fn goal(&self) -> &Board {
        &self.goal
    }

    /// Find a shortest move sequence from `start` to the goal.
    ///
    /// Successors are generated in [`Move::ALL`] order, so among several
    /// shortest paths the result is always the same one.
    pub fn solve(&self, start: &Board) -> Result<Solution> {
        if *start == self.goal {
            debug!("start is already the goal");
            return Ok(Solution::already_solved());
        }

        if self.parity_check && !start.is_solvable_towards(&self.goal) {
            debug!(inversions = start.inversions(), "parity mismatch, not searching");
            return Err(Error::Unsolvable { states_explored: 0 });
        }

        debug!(start = ?start.cells(), "starting breadth-first search");

        // Parent link per discovered board; the start maps to `None`.
        let mut parents: FxHashMap<Board, Option<(Board, Move)>> = FxHashMap::default();
        parents.insert(*start, None);

        let mut frontier = VecDeque::from([*start]);
        let mut states_explored = 0;
        let mut max_frontier = frontier.len();

        while let Some(current) = frontier.pop_front() {
            states_explored += 1;

            let successors = Move::ALL
                .into_iter()
                .filter_map(|mv| current.try_move(mv).map(|next| (mv, next)));

            for (mv, next) in successors {
                if next == self.goal {
                    let mut moves = reconstruct(&parents, current);
                    moves.push(mv);
                    debug!(
                        moves = moves.len(),
                        states_explored,
                        max_frontier,
                        "solution found"
                    );
                    return Ok(Solution {
                        moves,
                        states_explored,
                        max_frontier,
                    });
                }

                if !parents.contains_key(&next) {
                    parents.insert(next, Some((current, mv)));
                    frontier.push_back(next);
                    max_frontier = max_frontier.max(frontier.len());
                }
            }
        }

        trace!(visited = parents.len(), "frontier exhausted");
        debug!(states_explored, "no path to the goal");
        Err(Error::Unsolvable { states_explored })
    }
}

/// Walk parent links back from `board` to the start and return the moves in forward order.
fn reconstruct(parents: &FxHashMap<Board, Option<(Board, Move)>>, mut board: Board) -> Vec<Move> {
    let mut moves = Vec::new();
    while let Some(Some((parent, mv))) = parents.get(&board) {
        moves.push(*mv);
        board = *parent;
    }
    moves.reverse();
    moves
}

/// Solve `start` towards the canonical goal.
pub fn solve(start: &Board) -> Result<Solution> {
    Solver::default().solve(start)
}

/// Validate raw row-major cells (0 = blank) and solve them.
pub fn solve_cells(cells: &[u8]) -> Result<Solution> {
    let start = Board::from_cells(cells)?;
    solve(&start)
}
