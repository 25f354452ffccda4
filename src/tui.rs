//! Terminal front end for playing and watching solutions.

use std::{
    io::{self, Write},
    time::Duration,
};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::thread_rng;
use tracing::warn;

use crate::{
    error::Result,
    history::{HistoryStore, BFS},
    puzzle::{Move, BLANK},
    session::{Session, SolveReport},
};

const AUTO_PLAY_DELAY: Duration = Duration::from_millis(400);

/// Restores the terminal when dropped, including on early return.
struct RawTerminal;

impl RawTerminal {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn key_to_move(code: KeyCode) -> Option<Move> {
    match code {
        KeyCode::Up => Some(Move::Up),
        KeyCode::Down => Some(Move::Down),
        KeyCode::Left => Some(Move::Left),
        KeyCode::Right => Some(Move::Right),
        _ => None,
    }
}

fn draw(out: &mut impl Write, session: &Session) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0), Print("8-Puzzle"))?;

    let border = "+----+----+----+";
    let mut y = 2;
    queue!(out, MoveTo(2, y), Print(border))?;
    for row in session.board().rows() {
        y += 1;
        let line: String = row
            .iter()
            .map(|&label| {
                if label == BLANK {
                    "|    ".to_string()
                } else {
                    format!("| {label:>2} ")
                }
            })
            .collect();
        queue!(out, MoveTo(2, y), Print(format!("{line}|")))?;
        y += 1;
        queue!(out, MoveTo(2, y), Print(border))?;
    }

    y += 2;
    queue!(
        out,
        MoveTo(0, y),
        Print(format!("Moves made: {}", session.manual_moves()))
    )?;
    if session.has_solution() {
        let remaining: Vec<String> = session.remaining().iter().map(|m| m.to_string()).collect();
        queue!(
            out,
            MoveTo(0, y + 1),
            Print(format!("Remaining: {}", remaining.join(" ")))
        )?;
    }
    queue!(out, MoveTo(0, y + 3), Print(session.status()))?;
    out.flush()
}

/// Every successful solve is recorded, including one of an already solved board.
fn record(store: &HistoryStore, report: &SolveReport) {
    let result = store.update(|history| {
        history.record_solve(
            report.board,
            report.solution.len(),
            report.elapsed.as_secs_f64(),
            BFS,
        )
    });
    if let Err(e) = result {
        warn!(error = %e, "failed to record solve");
    }
}

/// Run the interactive loop until the player quits. Solves are recorded in `store`.
pub fn run(mut session: Session, store: &HistoryStore) -> Result<()> {
    let _guard = RawTerminal::enter()?;
    let mut out = io::stdout();
    let mut rng = thread_rng();
    let mut auto_play = false;

    loop {
        draw(&mut out, &session)?;

        if auto_play {
            if !event::poll(AUTO_PLAY_DELAY)? {
                auto_play = session.step();
                continue;
            }
            auto_play = false;
        }

        let Event::Key(KeyEvent { code, .. }) = event::read()? else {
            continue;
        };

        if let Some(mv) = key_to_move(code) {
            session.slide(mv);
            continue;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Char('s') => {
                if let Some(report) = session.solve() {
                    record(store, &report);
                }
            }
            KeyCode::Char('n') => {
                session.step();
            }
            KeyCode::Char('a') => {
                if !session.has_solution() {
                    if let Some(report) = session.solve() {
                        record(store, &report);
                    }
                }
                auto_play = session.has_solution();
            }
            KeyCode::Char('r') => session.shuffle(&mut rng),
            KeyCode::Char('g') => session.reset(),
            _ => {}
        }
    }

    Ok(())
}
