//! Interactive puzzle state shared by the terminal front end.
//!
//! A [`Session`] owns the board being played, an optional solution being
//! stepped through, and the status line shown to the player. It performs no
//! I/O.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::{
    error::Error,
    puzzle::{Board, Move},
    solver::{Solution, Solver},
};

/// What a successful solve produced, for the caller to persist or display.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    pub board: Board,
    pub solution: Solution,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
struct Playback {
    moves: Vec<Move>,
    next: usize,
}

#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    solver: Solver,
    playback: Option<Playback>,
    manual_moves: usize,
    status: String,
}

impl Session {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            solver: Solver::default(),
            playback: None,
            manual_moves: 0,
            status: "Arrows move the blank. s: solve  n: step  a: auto-play  r: shuffle  g: goal  q: quit"
                .to_string(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn manual_moves(&self) -> usize {
        self.manual_moves
    }

    /// Moves of the current solution not yet played.
    pub fn remaining(&self) -> &[Move] {
        self.playback
            .as_ref()
            .map(|p| &p.moves[p.next..])
            .unwrap_or(&[])
    }

    pub fn has_solution(&self) -> bool {
        self.playback.is_some()
    }

    /// Move the blank by hand. Any pending solution no longer applies and is dropped.
    pub fn slide(&mut self, mv: Move) {
        match self.board.try_move(mv) {
            Some(next) => {
                self.board = next;
                self.manual_moves += 1;
                self.playback = None;
                self.status = if next.is_goal() {
                    let noun = if self.manual_moves == 1 { "move" } else { "moves" };
                    format!("Solved in {} {noun}!", self.manual_moves)
                } else {
                    format!("Moved {mv}")
                };
            }
            None => self.status = format!("Can't move {mv} from here"),
        }
    }

    pub fn solve(&mut self) -> Option<SolveReport> {
        let started = Instant::now();
        match self.solver.solve(&self.board) {
            Ok(solution) => {
                let elapsed = started.elapsed();
                self.status = if solution.is_empty() {
                    "Already solved".to_string()
                } else {
                    format!(
                        "Solution found! {} moves. Explored {} states in {:.2}s",
                        solution.len(),
                        solution.states_explored,
                        elapsed.as_secs_f64()
                    )
                };
                self.playback = Some(Playback {
                    moves: solution.moves.clone(),
                    next: 0,
                });
                Some(SolveReport {
                    board: self.board,
                    solution,
                    elapsed,
                })
            }
            Err(Error::Unsolvable { .. }) => {
                self.status = "Puzzle is not solvable!".to_string();
                None
            }
            Err(e) => {
                self.status = format!("Error: {e}");
                None
            }
        }
    }

    /// Play the next move of the current solution. Returns whether a move was made.
    pub fn step(&mut self) -> bool {
        let Some(playback) = self.playback.as_mut() else {
            self.status = "No solution available. Press s to solve first.".to_string();
            return false;
        };

        let Some(&mv) = playback.moves.get(playback.next) else {
            self.status = "Solution complete!".to_string();
            return false;
        };

        match self.board.apply_move(mv) {
            Ok(next) => {
                self.board = next;
                playback.next += 1;
                self.status = format!(
                    "Step {}/{}: {mv}",
                    playback.next,
                    playback.moves.len()
                );
                if next.is_goal() {
                    self.status.push_str(" - solved!");
                }
                true
            }
            Err(e) => {
                self.playback = None;
                self.status = format!("Error: {e}");
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.replace_board(Board::goal());
        self.status = "Reset to goal state".to_string();
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.replace_board(Board::random(rng));
        self.status = "Puzzle shuffled!".to_string();
    }

    fn replace_board(&mut self, board: Board) {
        self.board = board;
        self.playback = None;
        self.manual_moves = 0;
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn one_away() -> Board {
        Board::from_rows([[1, 2, 3], [4, 5, 6], [7, 0, 8]]).unwrap()
    }

    #[test]
    fn manual_moves_reach_goal() {
        let mut session = Session::new(one_away());
        session.slide(Move::Right);
        assert!(session.board().is_goal());
        assert_eq!(session.manual_moves(), 1);
        assert_eq!(session.status(), "Solved in 1 move!");
    }

    #[test]
    fn solved_status_pluralises_moves() {
        let mut session = Session::new(Board::goal());
        session.slide(Move::Up);
        session.slide(Move::Down);
        assert!(session.board().is_goal());
        assert_eq!(session.status(), "Solved in 2 moves!");
    }

    #[test]
    fn illegal_manual_move_leaves_board() {
        let mut session = Session::new(one_away());
        session.slide(Move::Down);
        assert_eq!(*session.board(), one_away());
        assert_eq!(session.manual_moves(), 0);
    }

    #[test]
    fn solve_then_step_to_goal() {
        let start = Board::from_rows([[1, 2, 3], [4, 0, 6], [7, 5, 8]]).unwrap();
        let mut session = Session::new(start);

        let report = session.solve().unwrap();
        assert_eq!(report.board, start);
        assert_eq!(session.remaining(), &[Move::Down, Move::Right]);

        assert!(session.step());
        assert!(session.step());
        assert!(session.board().is_goal());
        assert!(!session.step());
        assert_eq!(session.status(), "Solution complete!");
    }

    #[test]
    fn manual_move_clears_solution() {
        let mut session = Session::new(one_away());
        session.solve();
        assert!(session.has_solution());
        session.slide(Move::Up);
        assert!(!session.has_solution());
        assert!(!session.step());
    }

    #[test]
    fn unsolvable_board_reports_status() {
        let start = Board::from_rows([[1, 2, 3], [4, 5, 6], [8, 7, 0]]).unwrap();
        let mut session = Session::new(start);
        assert!(session.solve().is_none());
        assert_eq!(session.status(), "Puzzle is not solvable!");
    }

    #[test]
    fn shuffle_and_reset() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = Session::new(Board::goal());
        session.shuffle(&mut rng);
        assert!(session.board().is_solvable());
        session.reset();
        assert!(session.board().is_goal());
        assert_eq!(session.manual_moves(), 0);
    }
}
