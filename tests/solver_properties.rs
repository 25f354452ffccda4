//! Solver behaviour checked against an independent breadth-first layering of
//! the whole 8-puzzle state space.

use std::{
    collections::{HashMap, VecDeque},
    sync::OnceLock,
};

use eight_puzzle::{solve, Board, Error, Move};
use proptest::prelude::*;

type Cells = [u8; 9];

const GOAL: Cells = [1, 2, 3, 4, 5, 6, 7, 8, 0];

/// Grid neighbours of each cell index.
fn neighbours(index: usize) -> Vec<usize> {
    let (row, col) = (index / 3, index % 3);
    let mut out = Vec::new();
    if row > 0 {
        out.push(index - 3);
    }
    if row < 2 {
        out.push(index + 3);
    }
    if col > 0 {
        out.push(index - 1);
    }
    if col < 2 {
        out.push(index + 1);
    }
    out
}

/// Distance from the goal of every configuration reachable from it.
fn distances() -> &'static HashMap<Cells, usize> {
    static DISTANCES: OnceLock<HashMap<Cells, usize>> = OnceLock::new();
    DISTANCES.get_or_init(|| {
        let mut dist = HashMap::from([(GOAL, 0)]);
        let mut queue = VecDeque::from([GOAL]);
        while let Some(cells) = queue.pop_front() {
            let d = dist[&cells];
            let blank = cells.iter().position(|&c| c == 0).unwrap();
            for n in neighbours(blank) {
                let mut next = cells;
                next.swap(blank, n);
                dist.entry(next).or_insert_with(|| {
                    queue.push_back(next);
                    d + 1
                });
            }
        }
        dist
    })
}

fn all_permutations() -> Vec<Cells> {
    fn permute(prefix: &mut Vec<u8>, rest: &mut Vec<u8>, out: &mut Vec<Cells>) {
        if rest.is_empty() {
            let mut cells = [0; 9];
            cells.copy_from_slice(prefix);
            out.push(cells);
            return;
        }
        for i in 0..rest.len() {
            let value = rest.remove(i);
            prefix.push(value);
            permute(prefix, rest, out);
            prefix.pop();
            rest.insert(i, value);
        }
    }

    let mut out = Vec::with_capacity(362_880);
    permute(&mut Vec::new(), &mut (0..9).collect(), &mut out);
    out
}

fn check_shortest(cells: &Cells) {
    let start = Board::from_cells(cells).unwrap();
    let solution = solve(&start).unwrap();
    assert_eq!(solution.len(), distances()[cells], "start {cells:?}");
    let end = solution.replay(&start).unwrap().last().copied().unwrap();
    assert!(end.is_goal(), "start {cells:?} ended at {end:?}");
}

#[test]
fn reachable_space_has_half_of_all_permutations() {
    let dist = distances();
    assert_eq!(dist.len(), 181_440);
    assert_eq!(dist.values().max(), Some(&31));
}

#[test]
fn parity_check_agrees_with_reachability() {
    let dist = distances();
    for cells in all_permutations() {
        let board = Board::from_cells(&cells).unwrap();
        assert_eq!(
            board.is_solvable(),
            dist.contains_key(&cells),
            "parity disagrees with reachability for {cells:?}"
        );
    }
}

#[test]
fn sampled_solutions_are_shortest() {
    let mut states: Vec<&Cells> = distances().keys().collect();
    states.sort();
    for cells in states.into_iter().step_by(9_000) {
        check_shortest(cells);
    }
}

#[test]
fn hardest_configuration_takes_31_moves() {
    let start = Board::from_cells(&[8, 6, 7, 2, 5, 4, 3, 0, 1]).unwrap();
    assert_eq!(solve(&start).unwrap().len(), 31);
}

#[test]
fn every_single_move_neighbour_of_goal_takes_one_move() {
    let goal = Board::goal();
    for mv in goal.legal_moves() {
        let start = goal.apply_move(mv).unwrap();
        let solution = solve(&start).unwrap();
        assert_eq!(solution.moves, vec![mv.opposite()]);
    }
}

#[test]
fn concrete_scenarios() {
    let eight_left = Board::from_rows([[1, 2, 3], [4, 5, 6], [7, 0, 8]]).unwrap();
    assert_eq!(solve(&eight_left).unwrap().moves, vec![Move::Right]);

    let six_up = Board::from_rows([[1, 2, 3], [4, 5, 0], [7, 8, 6]]).unwrap();
    let solution = solve(&six_up).unwrap();
    assert_eq!(solution.len(), distances()[six_up.cells()]);
    assert_eq!(solution.moves, vec![Move::Down]);

    let swapped = Board::from_rows([[1, 2, 3], [4, 5, 6], [8, 7, 0]]).unwrap();
    assert!(matches!(
        solve(&swapped),
        Err(Error::Unsolvable { states_explored: 0 })
    ));
}

#[test]
fn solved_start_is_distinct_from_unsolvable() {
    let solution = solve(&Board::goal()).unwrap();
    assert!(solution.is_empty());
}

fn solvable_cells() -> impl Strategy<Value = Cells> {
    Just((0u8..9).collect::<Vec<_>>())
        .prop_shuffle()
        .prop_map(|v| {
            let mut cells = [0; 9];
            cells.copy_from_slice(&v);
            // Swapping two tiles flips parity, so this lands in the goal's half.
            if !distances().contains_key(&cells) {
                let tiles: Vec<usize> = (0..9).filter(|&i| cells[i] != 0).take(2).collect();
                cells.swap(tiles[0], tiles[1]);
            }
            cells
        })
}

fn any_move() -> impl Strategy<Value = Move> {
    prop_oneof![
        Just(Move::Up),
        Just(Move::Down),
        Just(Move::Left),
        Just(Move::Right)
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn random_solutions_are_shortest_and_deterministic(cells in solvable_cells()) {
        check_shortest(&cells);
        let start = Board::from_cells(&cells).unwrap();
        prop_assert_eq!(solve(&start).unwrap(), solve(&start).unwrap());
    }
}

proptest! {
    #[test]
    fn move_then_opposite_is_identity(
        cells in solvable_cells(),
        moves in prop::collection::vec(any_move(), 0..20),
    ) {
        let mut board = Board::from_cells(&cells).unwrap();
        for mv in moves {
            if let Some(next) = board.try_move(mv) {
                prop_assert_eq!(next.apply_move(mv.opposite()).unwrap(), board);
                board = next;
            } else {
                prop_assert!(board.apply_move(mv).is_err());
            }
        }
    }

    #[test]
    fn parsing_accepts_any_valid_permutation(cells in solvable_cells()) {
        let text: String = cells.iter().map(|c| c.to_string()).collect();
        let board: Board = text.parse().unwrap();
        prop_assert_eq!(board.cells(), &cells);
    }
}
