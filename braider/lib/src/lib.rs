//! Braider is an exhaustive search engine for friendship-bracelet (and other macramé) braiding
//! patterns.
//!
//! Given a [`Pattern`](cordframe::Pattern) of coloured knots, Braider finds every sequence of
//! knots which produces that pattern **and** leaves the strands in the same order as they started.
//! Such a braid can be tied over and over again, repeating the pattern for as long as the strands
//! last.  Out of all these braids, Braider also picks the most concise one (i.e. the one which is
//! easiest to remember and tie), using the [`Score`] defined in the [`score`] module.
//!
//! # Description
//!
//! Each row of a braid is tied across adjacent pairs of strands.  Rows alternate between tying
//! every pair (`Odd` rows) and tying every pair except the two outermost strands (`Even` rows).
//! Each knot is one of four [`KnotType`](cordframe::KnotType)s, which decide which strand's colour
//! is shown and whether the two strands cross over.
//!
//! The starting order of the strands can either be fixed ([`solve`]), or inferred from the
//! colours of the pattern ([`solve_inferred`]).  In the second case, every distinct ordering of
//! some set of colours is tried separately, which can easily take a very long time.  For control
//! over how long a search is allowed to run for, build a [`Search`] with a custom [`Config`].
//!
//! Braider doesn't try to be clever: it always explores the whole search space, so that every
//! valid braid is found.  The search is split into independent jobs which are run in parallel,
//! but the results are always returned in the same order regardless of how many threads are used.

#![deny(clippy::all)]
#![deny(rustdoc::broken_intra_doc_links, rustdoc::private_intra_doc_links)]

mod candidates;
mod error;
mod parameters;
mod row_solver;
pub mod score;
mod search;
mod solution;

pub use error::{Error, Result};
pub use parameters::{Parameters, StartState};
pub use score::Score;
pub use search::{solve, solve_inferred, Config, Progress, Search, Update};
pub use solution::{Solution, SolutionFault, SolutionSet};
