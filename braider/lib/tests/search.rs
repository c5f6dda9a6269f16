use std::sync::atomic::AtomicBool;

use braider::{Config, Error, Parameters, Score, Search, Solution, SolutionSet, StartState};
use cordframe::{
    Arrangement, Color, KnotType, MethodRow, Parity, Pattern, StrandCount, TargetRow,
};
use itertools::Itertools;
use quickcheck_macros::quickcheck;

fn arr(s: &str) -> Arrangement {
    Arrangement::parse(s).unwrap()
}

fn rows(strs: &[&str]) -> Vec<MethodRow> {
    strs.iter().map(|s| s.parse().unwrap()).collect_vec()
}

fn example_2() -> Pattern {
    Pattern::from_names(&[
        &["R", "W", "R"],
        &["R", "R"],
        &["R", "W", "R"],
        &["W", "W"],
        &["R", "W", "R"],
        &["R", "R"],
    ])
}

fn run(params: Parameters, num_threads: usize) -> braider::Result<SolutionSet> {
    let config = Config {
        num_threads: Some(num_threads),
        ..Config::default()
    };
    Search::new(params, config)?.run(|_| {}, &AtomicBool::new(false))
}

/// Checks every property that all solutions must have, regardless of how they were found
#[track_caller]
fn check_invariants(solutions: &SolutionSet, pattern: &Pattern) {
    for s in solutions {
        assert_eq!(s.check(pattern), Ok(()), "{}", s);
        assert_eq!(s.start(), s.end());
        assert_eq!(s.states().len(), pattern.num_rows() + 1);
        let n = s.start().len();
        assert!(s.states().iter().all(|state| state.len() == n));
        assert_eq!(s.score(), braider::score::score(s.method_rows()));
    }
    if let Some(best) = solutions.best() {
        assert!(solutions.iter().all(|s| s.score() >= best.score()));
    }
}

/* FIXED START */

#[test]
fn example_1() {
    let pattern = Pattern::from_names(&[&["R", "G"], &["B"]]);
    let solutions = braider::solve(arr("R B G Y"), pattern.clone()).unwrap();
    check_invariants(&solutions, &pattern);

    assert_eq!(solutions.len(), 1);
    let best = solutions.best().unwrap();
    assert_eq!(best.method_rows(), rows(&["RL RL", "RL"]).as_slice());
    assert_eq!(best.states(), &[arr("R B G Y"), arr("R B G Y"), arr("R B G Y")]);
    assert_eq!(best.score(), Score::new(2));
}

#[test]
fn example_2_fixed() {
    let pattern = example_2();
    let start = arr("R R W W R R");
    let solutions = braider::solve(start.clone(), pattern.clone()).unwrap();
    check_invariants(&solutions, &pattern);

    assert_eq!(solutions.len(), 331_776);

    // A braid made only of non-swapping knots
    let known = rows(&["RL RL RL", "RL LR", "RL RL RL", "LR RL", "RL RL RL", "RL LR"]);
    assert!(solutions.iter().any(|s| s.method_rows() == known.as_slice()));

    // Several braids score 9; the first one found is the best
    let best = solutions.best().unwrap();
    assert_eq!(best.score(), Score::new(9));
    assert_eq!(
        best.method_rows(),
        rows(&["RR RR RR", "RL LR", "RR RR RR", "LR RL", "RR RR RR", "RL LR"]).as_slice()
    );
    assert_eq!(best.states().first(), Some(&start));
    assert_eq!(best.states().last(), Some(&start));
}

#[test]
fn no_solution_is_not_an_error() {
    // No knot over `R B` can show `Y`
    let pattern = Pattern::from_names(&[&["Y", "G"], &["B"]]);
    let solutions = braider::solve(arr("R B G Y"), pattern).unwrap();
    assert!(solutions.is_empty());
    assert!(solutions.best().is_none());

    // Every row can be tied, but the strands never return to their starting order
    let pattern = Pattern::from_names(&[&["R", "G"], &["Y"]]);
    let solutions = braider::solve(arr("R B G Y"), pattern).unwrap();
    assert!(solutions.is_empty());
}

#[test]
fn structural_errors() {
    let pattern = Pattern::from_names(&[&["R", "G"], &["B"]]);
    assert_eq!(
        braider::solve(arr("R B G"), pattern.clone()).unwrap_err(),
        Error::OddStrandCount { len: 3 }
    );
    assert_eq!(
        braider::solve(arr("R B G Y R B"), pattern).unwrap_err(),
        Error::RowLength {
            row: 0,
            expected: 3,
            actual: 2,
            strand_count: StrandCount::new(6)
        }
    );

    let inconsistent = Pattern::from_names(&[&["R", "G"], &["B", "B"]]);
    let err = braider::solve_inferred(inconsistent).unwrap_err();
    assert!(matches!(err, Error::InconsistentStrandCount { row: 1, .. }));
    assert!(err.is_structural());

    assert_eq!(
        braider::solve_inferred(Pattern::new(vec![])).unwrap_err(),
        Error::EmptyPattern
    );
}

/* INFERRED START */

#[test]
fn example_1_inferred() {
    let pattern = Pattern::from_names(&[&["R", "G"], &["B"]]);
    let solutions = braider::solve_inferred(pattern.clone()).unwrap();
    check_invariants(&solutions, &pattern);

    // Every solution starts from some ordering of `{B, B, G, R}`
    for s in &solutions {
        let mut colors = s.start().to_vec();
        colors.sort();
        assert_eq!(Arrangement::new(colors), arr("B B G R"));
    }
    // Both `B R B G` and `R B G B` have score-2 braids, but `B R B G` is enumerated first
    let best = solutions.best().unwrap();
    assert_eq!(best.start(), &arr("B R B G"));
    assert_eq!(best.method_rows(), rows(&["LR LR", "LR"]).as_slice());
    assert_eq!(best.score(), Score::new(2));
    assert!(solutions
        .iter()
        .any(|s| s.start() == &arr("R B G B") && s.score() == Score::new(2)));
}

#[test]
fn explicit_color_counts() {
    let pattern = Pattern::from_names(&[&["R", "W", "R"], &["R", "R"]]);
    let params = Parameters {
        pattern: pattern.clone(),
        start: StartState::Inferred {
            color_counts: Some(vec![(Color::new("R"), 4), (Color::new("W"), 2)]),
        },
    };
    let solutions = run(params, 2).unwrap();
    check_invariants(&solutions, &pattern);
    assert!(solutions.iter().any(|s| s.start() == &arr("R R W W R R")));
    let best = solutions.best().unwrap();
    assert_eq!(best.start(), &arr("R R W R R W"));
    assert_eq!(best.method_rows(), rows(&["RL RL RL", "RL RL"]).as_slice());
    // Solutions are grouped by start, in lexicographic order
    assert!(solutions
        .iter()
        .tuple_windows()
        .all(|(a, b)| a.start() <= b.start()));
}

#[test]
fn thread_count_does_not_change_results() {
    let pattern = Pattern::from_names(&[&["R", "G"], &["B"]]);
    let single = run(Parameters::inferred(pattern.clone()), 1).unwrap();
    for num_threads in [2, 3, 8] {
        let multi = run(Parameters::inferred(pattern.clone()), num_threads).unwrap();
        assert_eq!(single.iter().collect_vec(), multi.iter().collect_vec());
        assert_eq!(single.best(), multi.best());
    }

    let pattern = Pattern::from_names(&[
        &["R", "W", "R"],
        &["R", "R"],
        &["R", "W", "R"],
        &["W", "W"],
    ]);
    let single = run(Parameters::fixed(arr("R R W W R R"), pattern.clone()), 1).unwrap();
    let multi = run(Parameters::fixed(arr("R R W W R R"), pattern), 4).unwrap();
    assert_eq!(single.len(), 4608);
    assert_eq!(single.iter().collect_vec(), multi.iter().collect_vec());
}

#[test]
fn candidate_limit() {
    let pattern = Pattern::from_names(&[&["R", "G"], &["B"]]);
    let config = Config {
        candidate_limit: Some(5),
        ..Config::default()
    };
    let err = Search::new(Parameters::inferred(pattern), config).unwrap_err();
    assert_eq!(err, Error::TooManyCandidates { count: 12, limit: 5 });
    assert!(!err.is_structural());
}

#[test]
fn step_limit_returns_no_partial_results() {
    let config = Config {
        step_limit: Some(10),
        ..Config::default()
    };
    let search = Search::new(Parameters::fixed(arr("R R W W R R"), example_2()), config).unwrap();
    assert_eq!(search.run_to_completion().unwrap_err(), Error::StepLimit(10));
}

/* PROPERTIES */

/// Ties a braid of non-swapping knots (which always returns to its start) over distinct strands,
/// then checks that solving the pattern it makes finds that braid again.
#[quickcheck]
fn finds_every_non_swapping_braid(half_strands: u8, choices: Vec<Vec<bool>>) -> bool {
    let strand_count = StrandCount::new((half_strands as usize % 3 + 1) * 2);
    let start: Arrangement = (0..strand_count.num_strands())
        .map(|i| Color::new(&i.to_string()))
        .collect();

    let num_rows = choices.len().clamp(1, 4);
    let mut method_rows = Vec::new();
    let mut pattern_rows = Vec::new();
    for row_idx in 0..num_rows {
        let parity = Parity::of_row(row_idx);
        let row_choices = choices.get(row_idx).cloned().unwrap_or_default();
        let method_row: MethodRow = (0..strand_count.num_knots(parity))
            .map(|k| match row_choices.get(k) {
                Some(true) => KnotType::LeftRight,
                _ => KnotType::RightLeft,
            })
            .collect();
        let target: TargetRow = method_row
            .iter()
            .enumerate()
            .map(|(k, knot)| {
                let (l, r) = parity.knot_positions(k);
                knot.visible_color(&start[l], &start[r]).clone()
            })
            .collect();
        method_rows.push(method_row);
        pattern_rows.push(target);
    }
    let pattern = Pattern::new(pattern_rows);

    let solutions = match braider::solve(start, pattern.clone()) {
        Ok(s) => s,
        Err(_) => return false,
    };
    let found = solutions
        .iter()
        .any(|s: &Solution| s.method_rows() == method_rows.as_slice());
    found && solutions.iter().all(|s| s.check(&pattern).is_ok())
}
