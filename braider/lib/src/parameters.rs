//! Parameters which describe *what* Braider should search for.  Compare this to
//! [`Config`](crate::Config), which determines *how* the search is run.

use cordframe::{Arrangement, Color, Pattern};

/// A fully specified braiding problem: the [`Pattern`] to produce, and what is known about the
/// arrangement of strands before the first row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameters {
    pub pattern: Pattern,
    pub start: StartState,
}

impl Parameters {
    /// Search for braids which start (and finish) at exactly the given [`Arrangement`]
    pub fn fixed(start: Arrangement, pattern: Pattern) -> Self {
        Self {
            pattern,
            start: StartState::Fixed(start),
        }
    }

    /// Search for braids from every plausible starting [`Arrangement`]
    pub fn inferred(pattern: Pattern) -> Self {
        Self {
            pattern,
            start: StartState::Inferred { color_counts: None },
        }
    }

    pub fn is_inferred(&self) -> bool {
        matches!(self.start, StartState::Inferred { .. })
    }
}

/// What is known about the strands before the first row is tied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartState {
    /// The strands start in exactly this order, and every braid must return to it
    Fixed(Arrangement),
    /// The starting order is unknown, so every distinct ordering of some multiset of colours is
    /// tried.
    Inferred {
        /// How many strands of each colour there are.  If `None`, the pattern's colours are
        /// repeated cyclically until every strand is filled (see
        /// [`ColorPool::cyclic`](cordframe::ColorPool::cyclic)).
        color_counts: Option<Vec<(Color, usize)>>,
    },
}
