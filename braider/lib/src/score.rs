//! The conciseness score used to rank [`Solution`](crate::Solution)s.

use std::{
    fmt::{Debug, Display, Formatter},
    iter::Sum,
    ops::{Add, AddAssign},
};

use cordframe::{Family, MethodRow};
use itertools::Itertools;

/// How hard a braid is to remember and tie.  Lower `Score`s are more concise.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct Score(u32);

impl Score {
    pub const ZERO: Score = Score(0);

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

/// The [`Score`] of one row:
/// - one point for every distinct [`KnotType`](cordframe::KnotType) tied in the row, plus
/// - one extra point if the row mixes swapping knots (`RR`/`LL`) with non-swapping ones
///   (`RL`/`LR`).
///
/// ```
/// use braider::{score, Score};
///
/// let row = "RL RL RL".parse().unwrap();
/// assert_eq!(score::row_score(&row), Score::new(1));
/// let row = "RL LR".parse().unwrap();
/// assert_eq!(score::row_score(&row), Score::new(2));
/// let row = "RR LR RR".parse().unwrap();
/// assert_eq!(score::row_score(&row), Score::new(3));
/// ```
pub fn row_score(method_row: &MethodRow) -> Score {
    let distinct_types = method_row.iter().unique().count() as u32;
    let mixes_families = method_row.uses_family(Family::Swapping)
        && method_row.uses_family(Family::NonSwapping);
    Score(distinct_types + mixes_families as u32)
}

/// The total [`Score`] of a sequence of rows
pub fn score(method_rows: &[MethodRow]) -> Score {
    method_rows.iter().map(row_score).sum()
}

/* ===== FORMATTING ===== */

impl Debug for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Score({})", self.0)
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/* ===== OPERATORS ===== */

impl Add for Score {
    type Output = Score;

    fn add(self, rhs: Score) -> Self::Output {
        Score(self.0 + rhs.0)
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, rhs: Score) {
        self.0 += rhs.0;
    }
}

impl Sum for Score {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Score::ZERO, Add::add)
    }
}
