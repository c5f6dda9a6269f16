//! Error types for the different ways that Braider can fail.

use std::{
    fmt::{Display, Formatter},
    time::Duration,
};

use cordframe::{InvalidStrandCount, PatternError, StrandCount};

/// Alias for `Result<T, braider::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// The different ways that Braider can fail.
///
/// Note that finding no solutions is **not** an error: it's a perfectly valid answer to a
/// question, and is represented by an empty [`SolutionSet`](crate::SolutionSet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /* STRUCTURAL INPUT ERRORS */
    /// The pattern doesn't have any rows
    EmptyPattern,
    /// An odd-numbered row of the pattern has no knots
    EmptyRow { row: usize },
    /// The starting arrangement doesn't have any strands
    EmptyArrangement,
    /// The starting arrangement has an odd number of strands
    OddStrandCount { len: usize },
    /// A row's length is different to the knot count required by the number of strands
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
        strand_count: StrandCount,
    },
    /// Two rows imply different numbers of strands
    InconsistentStrandCount {
        row: usize,
        implied: StrandCount,
        expected: StrandCount,
    },
    /// Some row's length couldn't correspond to any (even) number of strands
    ImpossibleRowLength { row: usize, len: usize },
    /// The explicitly given colour counts don't add up to the number of strands
    PoolSize {
        pool_len: usize,
        strand_count: StrandCount,
    },

    /* SEARCH LIMITS */
    /// Inferring the starting arrangement would need more candidates than allowed
    TooManyCandidates { count: u128, limit: usize },
    /// The search took more steps than allowed by [`Config::step_limit`](crate::Config::step_limit)
    StepLimit(usize),
    /// The search ran for longer than [`Config::time_limit`](crate::Config::time_limit)
    TimeLimit(Duration),
    /// The search was aborted by the caller
    Aborted,
}

impl Error {
    /// Returns `true` if this error was caused by malformed input (i.e. retrying with the same
    /// input will always fail), and `false` if the search was cut short.
    pub fn is_structural(&self) -> bool {
        match self {
            Error::EmptyPattern
            | Error::EmptyRow { .. }
            | Error::EmptyArrangement
            | Error::OddStrandCount { .. }
            | Error::RowLength { .. }
            | Error::InconsistentStrandCount { .. }
            | Error::ImpossibleRowLength { .. }
            | Error::PoolSize { .. } => true,

            Error::TooManyCandidates { .. }
            | Error::StepLimit(_)
            | Error::TimeLimit(_)
            | Error::Aborted => false,
        }
    }

    /// Converts an error from checking an arrangement's [`StrandCount`]
    pub(crate) fn from_start_len(len: usize, error: InvalidStrandCount) -> Self {
        match error {
            InvalidStrandCount::Zero => Error::EmptyArrangement,
            InvalidStrandCount::Odd(_) => Error::OddStrandCount { len },
        }
    }
}

impl From<PatternError> for Error {
    fn from(e: PatternError) -> Self {
        match e {
            PatternError::Empty => Error::EmptyPattern,
            PatternError::EmptyRow { row } => Error::EmptyRow { row },
            PatternError::InvalidStrandCount { row, error } => Error::ImpossibleRowLength {
                row,
                len: match error {
                    InvalidStrandCount::Zero => 0,
                    InvalidStrandCount::Odd(n) => n,
                },
            },
            PatternError::Inconsistent {
                row,
                implied,
                expected,
            } => Error::InconsistentStrandCount {
                row,
                implied,
                expected,
            },
            PatternError::RowLength {
                row,
                expected,
                actual,
                strand_count,
            } => Error::RowLength {
                row,
                expected,
                actual,
                strand_count,
            },
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            /* STRUCTURAL INPUT ERRORS */
            Error::EmptyPattern => write!(f, "Can't braid a pattern with no rows"),
            Error::EmptyRow { row } => write!(f, "Row {} of the pattern has no knots", row + 1),
            Error::EmptyArrangement => write!(f, "The starting arrangement has no strands"),
            Error::OddStrandCount { len } => write!(
                f,
                "The starting arrangement has {} strands, but the number of strands must be even",
                len
            ),
            Error::RowLength {
                row,
                expected,
                actual,
                strand_count,
            } => write!(
                f,
                "Row {} of the pattern has {} knots, but a row there needs {} knots for {}",
                row + 1,
                actual,
                expected,
                strand_count
            ),
            Error::InconsistentStrandCount {
                row,
                implied,
                expected,
            } => write!(
                f,
                "Row {} of the pattern implies {}, but the rows before it imply {}",
                row + 1,
                implied,
                expected
            ),
            Error::ImpossibleRowLength { row, len } => write!(
                f,
                "Row {} of the pattern would need {} strands, which can't be braided",
                row + 1,
                len
            ),
            Error::PoolSize {
                pool_len,
                strand_count,
            } => write!(
                f,
                "The colour counts add up to {} strands, but the pattern needs {}",
                pool_len, strand_count
            ),

            /* SEARCH LIMITS */
            Error::TooManyCandidates { count, limit } => write!(
                f,
                "Inferring the start would search {} arrangements, but the limit is {}.  \
Consider giving a starting arrangement or colour counts.",
                count, limit
            ),
            Error::StepLimit(limit) => write!(
                f,
                "Step limit of {} reached.  You can set it higher with `--step-limit <n>`.",
                limit
            ),
            Error::TimeLimit(limit) => write!(f, "Time limit of {:?} reached", limit),
            Error::Aborted => write!(f, "Search aborted"),
        }
    }
}

impl std::error::Error for Error {}
