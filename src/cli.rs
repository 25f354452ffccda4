//! Command implementations for the `eight-puzzle` binary.

use std::{path::PathBuf, time::Instant};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use rand::{rngs::StdRng, thread_rng, SeedableRng};
use tracing::info;

use crate::{
    error::Error,
    history::{HistoryStore, BFS},
    puzzle::Board,
    session::Session,
    solver::Solver,
    tui,
};

/// Default location of the history file.
pub const DEFAULT_STORE: &str = "eight_puzzle_history.json";

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find a shortest solution for a board such as 123456780
    Solve(SolveArgs),

    /// Print a random solvable board
    Shuffle(ShuffleArgs),

    /// Play in the terminal
    Play(PlayArgs),

    /// Save a board under a name
    Save(SaveArgs),

    /// Show (and optionally solve) a saved board
    Load(LoadArgs),

    /// List saved boards, newest first
    List,

    /// Show solve statistics
    Stats,
}

#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Board in row-major order, 0 or _ for the blank
    pub board: Board,

    /// Do not add the solve to the history file
    #[arg(long)]
    pub no_record: bool,

    /// Search even when the parity check says the board is unsolvable
    #[arg(long)]
    pub no_parity_check: bool,
}

#[derive(Args, Debug)]
pub struct ShuffleArgs {
    /// Random moves away from the goal; a uniformly random board if omitted
    #[arg(long, short = 'm')]
    pub moves: Option<usize>,

    /// Seed for reproducible boards
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Starting board; a random one if omitted
    pub board: Option<Board>,
}

#[derive(Args, Debug)]
pub struct SaveArgs {
    pub name: String,
    pub board: Board,
}

#[derive(Args, Debug)]
pub struct LoadArgs {
    pub id: u64,

    /// Solve the loaded board
    #[arg(long)]
    pub solve: bool,
}

pub fn execute(command: Command, store_path: PathBuf) -> Result<()> {
    let store = HistoryStore::new(store_path);
    match command {
        Command::Solve(args) => solve(&args, &store),
        Command::Shuffle(args) => shuffle(&args),
        Command::Play(args) => play(args, &store),
        Command::Save(args) => save(args, &store),
        Command::Load(args) => load(&args, &store),
        Command::List => list(&store),
        Command::Stats => stats(&store),
    }
}

fn solve_and_print(board: &Board, solver: Solver, store: Option<&HistoryStore>) -> Result<()> {
    println!("Initial Puzzle:\n{board}");

    let started = Instant::now();
    let solution = match solver.solve(board) {
        Ok(solution) => solution,
        Err(Error::Unsolvable { states_explored }) => {
            bail!("puzzle is not solvable (explored {states_explored} states)")
        }
        Err(e) => return Err(e.into()),
    };
    let elapsed = started.elapsed();

    println!(
        "Found optimal solution with {} moves (explored {} states, peak frontier {}, {:.3}s)",
        solution.len(),
        solution.states_explored,
        solution.max_frontier,
        elapsed.as_secs_f64()
    );

    let boards = solution.replay(board)?;
    for (mv, step) in solution.moves.iter().zip(boards.iter().skip(1)) {
        println!("{mv}\n{step}");
    }

    if let Some(store) = store {
        store
            .update(|h| h.record_solve(*board, solution.len(), elapsed.as_secs_f64(), BFS))
            .context("failed to record solve")?;
        info!(moves = solution.len(), "solve recorded");
    }
    Ok(())
}

fn solve(args: &SolveArgs, store: &HistoryStore) -> Result<()> {
    let solver = if args.no_parity_check {
        Solver::default().without_parity_check()
    } else {
        Solver::default()
    };
    solve_and_print(&args.board, solver, (!args.no_record).then_some(store))
}

fn shuffle(args: &ShuffleArgs) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(thread_rng()).context("failed to seed random generator")?,
    };
    let board = match args.moves {
        Some(moves) => Board::goal().scramble(&mut rng, moves),
        None => Board::random(&mut rng),
    };
    let flat: String = board.cells().iter().map(|c| c.to_string()).collect();
    println!("{flat}\n\n{board}");
    Ok(())
}

fn play(args: PlayArgs, store: &HistoryStore) -> Result<()> {
    let board = args.board.unwrap_or_else(|| Board::random(&mut thread_rng()));
    tui::run(Session::new(board), store).context("terminal session failed")
}

fn save(args: SaveArgs, store: &HistoryStore) -> Result<()> {
    let id = store
        .update(|h| h.save_puzzle(args.name.clone(), args.board))
        .with_context(|| format!("failed to save puzzle to {:?}", store.path()))?;
    println!("Saved '{}' as #{id}", args.name);
    Ok(())
}

fn load(args: &LoadArgs, store: &HistoryStore) -> Result<()> {
    let history = store.load()?;
    let board = history.load_puzzle(args.id)?;
    if args.solve {
        solve_and_print(&board, Solver::default(), Some(store))
    } else {
        println!("{board}");
        Ok(())
    }
}

fn list(store: &HistoryStore) -> Result<()> {
    let history = store.load()?;
    let puzzles = history.puzzles();
    if puzzles.is_empty() {
        println!("No saved puzzles");
        return Ok(());
    }
    for puzzle in puzzles {
        let flat: String = puzzle.board.cells().iter().map(|c| c.to_string()).collect();
        println!("#{:<4} {:<20} {flat}", puzzle.id, puzzle.name);
    }
    Ok(())
}

fn stats(store: &HistoryStore) -> Result<()> {
    let stats = store.load()?.statistics();
    println!("Puzzles solved: {}", stats.total_solved);
    println!("Average moves:  {:.2}", stats.average_moves);
    println!("Average time:   {:.2}s", stats.average_time);
    match stats.best_moves {
        Some(best) => println!("Best solution:  {best} moves"),
        None => println!("Best solution:  -"),
    }
    Ok(())
}
