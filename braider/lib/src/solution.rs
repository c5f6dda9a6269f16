use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
};

use cordframe::{Arrangement, MethodRow, Pattern};
use itertools::Itertools;
use shortlist::Shortlist;

use crate::score::{self, Score};

/// A complete, closed sequence of knots which produces a [`Pattern`].  `Solution`s can only be
/// created by a search, and always satisfy:
/// - `states[0] == start`, and `states[i + 1]` is `states[i]` after tying `method_rows[i]`
/// - every knot shows the colour which the pattern requires
/// - the last state is equal to `start` (i.e. the braid can be repeated)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    start: Arrangement,
    method_rows: Vec<MethodRow>,
    /// One more than `method_rows`: the start, then the state after each row
    states: Vec<Arrangement>,
    score: Score,
}

impl Solution {
    pub(crate) fn new(method_rows: Vec<MethodRow>, states: Vec<Arrangement>) -> Self {
        debug_assert_eq!(method_rows.len() + 1, states.len());
        Self {
            start: states[0].clone(),
            score: score::score(&method_rows),
            method_rows,
            states,
        }
    }

    /// The arrangement of strands before the first row is tied
    pub fn start(&self) -> &Arrangement {
        &self.start
    }

    /// The arrangement of strands after the last row is tied.  This is always equal to
    /// [`Solution::start`].
    pub fn end(&self) -> &Arrangement {
        self.states.last().unwrap()
    }

    pub fn method_rows(&self) -> &[MethodRow] {
        &self.method_rows
    }

    /// Every arrangement of the strands in this `Solution`: the start, then one after each row.
    pub fn states(&self) -> &[Arrangement] {
        &self.states
    }

    /// The conciseness [`Score`] of this `Solution`.  Lower is better.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Re-checks this `Solution` against a [`Pattern`] by replaying every row from the start,
    /// returning the first thing which is wrong.  This is never needed for `Solution`s straight
    /// out of a search, but is useful for checking results which have been stored elsewhere.
    pub fn check(&self, pattern: &Pattern) -> Result<(), SolutionFault> {
        if self.method_rows.len() != pattern.num_rows() {
            return Err(SolutionFault::RowCount {
                expected: pattern.num_rows(),
                actual: self.method_rows.len(),
            });
        }
        if self.states.first() != Some(&self.start) {
            return Err(SolutionFault::StatePath { row: 0 });
        }

        let mut state = self.start.clone();
        for (row, ((parity, target), method_row)) in
            pattern.parity_rows().zip(&self.method_rows).enumerate()
        {
            if method_row.len() != target.len() {
                return Err(SolutionFault::RowLength { row });
            }
            for (knot_idx, (knot, target_color)) in method_row.iter().zip_eq(target.iter()).enumerate()
            {
                let (l, r) = parity.knot_positions(knot_idx);
                let (Some(left), Some(right)) = (state.get(l), state.get(r)) else {
                    return Err(SolutionFault::RowLength { row });
                };
                if knot.visible_color(left, right) != target_color {
                    return Err(SolutionFault::WrongColor { row, knot_idx });
                }
            }
            state = state
                .apply_row(method_row, parity)
                .map_err(|_| SolutionFault::RowLength { row })?;
            if self.states.get(row + 1) != Some(&state) {
                return Err(SolutionFault::StatePath { row: row + 1 });
            }
        }
        if self.states.len() != self.method_rows.len() + 1 || state != self.start {
            return Err(SolutionFault::NotClosed);
        }
        Ok(())
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] ({})",
            self.method_rows.iter().join(" | "),
            self.score
        )
    }
}

/// The ways that [`Solution::check`] can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionFault {
    RowCount { expected: usize, actual: usize },
    RowLength { row: usize },
    WrongColor { row: usize, knot_idx: usize },
    /// The recorded state after `row` rows isn't what tying the rows produces
    StatePath { row: usize },
    NotClosed,
}

impl Display for SolutionFault {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RowCount { expected, actual } => {
                write!(f, "expected {} rows, found {}", expected, actual)
            }
            Self::RowLength { row } => write!(f, "row {} has the wrong number of knots", row + 1),
            Self::WrongColor { row, knot_idx } => write!(
                f,
                "knot {} of row {} shows the wrong colour",
                knot_idx + 1,
                row + 1
            ),
            Self::StatePath { row } => write!(f, "state after {} rows is wrong", row),
            Self::NotClosed => write!(f, "braid doesn't return to its starting arrangement"),
        }
    }
}

/// Every [`Solution`] found by a search, in the order that they were enumerated, along with the
/// most concise one.
#[derive(Debug, Clone, Default)]
pub struct SolutionSet {
    solutions: Vec<Solution>,
    /// Index of the first `Solution` with the lowest [`Score`]
    best_idx: Option<usize>,
}

impl SolutionSet {
    pub(crate) fn new(solutions: Vec<Solution>) -> Self {
        // `min_by_key` returns the *first* minimum, so ties go to whichever was enumerated first
        let best_idx = solutions
            .iter()
            .enumerate()
            .min_by_key(|(_, s)| s.score())
            .map(|(idx, _)| idx);
        Self {
            solutions,
            best_idx,
        }
    }

    /// The most concise [`Solution`], or `None` if no `Solution`s exist
    pub fn best(&self) -> Option<&Solution> {
        self.best_idx.map(|idx| &self.solutions[idx])
    }

    /// The `n` most concise [`Solution`]s, best first.  `Solution`s with equal [`Score`]s are
    /// returned in the order they were found.
    pub fn most_concise(&self, n: usize) -> Vec<&Solution> {
        /// Orders `Solution`s so that the 'largest' one is the most concise (which is what
        /// `Shortlist` keeps)
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        struct Ranked {
            score: Score,
            idx: usize,
        }

        impl PartialOrd for Ranked {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for Ranked {
            fn cmp(&self, other: &Self) -> Ordering {
                (self.score, self.idx).cmp(&(other.score, other.idx)).reverse()
            }
        }

        if n == 0 {
            return Vec::new();
        }
        let mut shortlist = Shortlist::new(n);
        shortlist.append(self.solutions.iter().enumerate().map(|(idx, s)| Ranked {
            score: s.score(),
            idx,
        }));
        let mut ranked = shortlist.into_sorted_vec();
        // Reverse the sorting so that the best solutions are first
        ranked.reverse();
        ranked
            .into_iter()
            .map(|r| &self.solutions[r.idx])
            .collect_vec()
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.solutions.iter()
    }

    pub fn into_vec(self) -> Vec<Solution> {
        self.solutions
    }
}

impl<'s> IntoIterator for &'s SolutionSet {
    type Item = &'s Solution;
    type IntoIter = std::slice::Iter<'s, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.iter()
    }
}
