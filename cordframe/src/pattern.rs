//! Target colour patterns, made of one [`TargetRow`] per row of knots.

use std::{
    fmt::{Display, Formatter},
    ops::Deref,
};

use itertools::Itertools;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{strand_count::InvalidStrandCount, Arrangement, Color, Parity, StrandCount};

/// The colours that should be visible on each knot of one row, from left to right.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetRow {
    colors: Vec<Color>,
}

impl TargetRow {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }
}

impl Deref for TargetRow {
    type Target = [Color];

    fn deref(&self) -> &Self::Target {
        &self.colors
    }
}

impl FromIterator<Color> for TargetRow {
    fn from_iter<T: IntoIterator<Item = Color>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Display for TargetRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.colors.iter().join(" "))
    }
}

/// A complete target pattern: the visible colours of every knot in every row.  Row `i` has
/// [`Parity::of_row`]`(i)`, so rows alternate between `Odd` (full width) and `Even` (offset by
/// one strand).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    rows: Vec<TargetRow>,
}

impl Pattern {
    pub fn new(rows: Vec<TargetRow>) -> Self {
        Self { rows }
    }

    /// Builds a `Pattern` from rows of colour names.  Mostly useful for tests and examples.
    ///
    /// ```
    /// use cordframe::Pattern;
    ///
    /// let pattern = Pattern::from_names(&[&["R", "G"], &["B"]]);
    /// assert_eq!(pattern.num_rows(), 2);
    /// assert_eq!(pattern.to_string(), "R G\nB");
    /// ```
    pub fn from_names(rows: &[&[&str]]) -> Self {
        rows.iter()
            .map(|row| row.iter().map(|name| Color::new(name)).collect())
            .collect()
    }

    pub fn rows(&self) -> &[TargetRow] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// An [`Iterator`] over every row paired with its [`Parity`]
    pub fn parity_rows(&self) -> impl Iterator<Item = (Parity, &TargetRow)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(|(idx, row)| (Parity::of_row(idx), row))
    }

    /// Every distinct [`Color`] used anywhere in this `Pattern`, sorted by name
    pub fn colors(&self) -> Vec<Color> {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .unique()
            .cloned()
            .sorted()
            .collect_vec()
    }

    /// Infers the [`StrandCount`] from the lengths of the rows.  Every row has to imply the same
    /// count under its [`Parity`], otherwise no braid could possibly produce this `Pattern`.
    ///
    /// ```
    /// use cordframe::{Pattern, PatternError, StrandCount};
    ///
    /// let pattern = Pattern::from_names(&[&["R", "W", "R"], &["R", "R"]]);
    /// assert_eq!(pattern.infer_strand_count(), Ok(StrandCount::new(6)));
    ///
    /// let pattern = Pattern::from_names(&[&["R", "G"], &["B", "B"]]);
    /// assert!(matches!(
    ///     pattern.infer_strand_count(),
    ///     Err(PatternError::Inconsistent { row: 1, .. })
    /// ));
    /// ```
    pub fn infer_strand_count(&self) -> Result<StrandCount, PatternError> {
        let mut inferred: Option<StrandCount> = None;
        for (row_idx, (parity, row)) in self.parity_rows().enumerate() {
            if row.is_empty() && parity == Parity::Odd {
                return Err(PatternError::EmptyRow { row: row_idx });
            }
            let implied = StrandCount::from_row_length(row.len(), parity)
                .map_err(|error| PatternError::InvalidStrandCount { row: row_idx, error })?;
            match inferred {
                None => inferred = Some(implied),
                Some(expected) if expected != implied => {
                    return Err(PatternError::Inconsistent {
                        row: row_idx,
                        implied,
                        expected,
                    })
                }
                Some(_) => {}
            }
        }
        inferred.ok_or(PatternError::Empty)
    }

    /// Checks that every row has exactly the number of knots required by `strand_count`
    pub fn check_strand_count(&self, strand_count: StrandCount) -> Result<(), PatternError> {
        if self.rows.is_empty() {
            return Err(PatternError::Empty);
        }
        for (row_idx, (parity, row)) in self.parity_rows().enumerate() {
            let expected = strand_count.num_knots(parity);
            if row.len() != expected {
                return Err(PatternError::RowLength {
                    row: row_idx,
                    expected,
                    actual: row.len(),
                    strand_count,
                });
            }
        }
        Ok(())
    }

    /// Returns every [`Color`] in this `Pattern` which doesn't appear in `start`.  No braid
    /// starting from `start` could ever show these colours.  Each one is paired with the colour
    /// from `start` with the closest name (if there is one), which is usually what was meant.
    pub fn missing_colors(&self, start: &Arrangement) -> Vec<(Color, Option<Color>)> {
        let present = start.iter().unique().collect_vec();
        self.colors()
            .into_iter()
            .filter(|c| !present.contains(&c))
            .map(|c| {
                let suggestion = present
                    .iter()
                    .min_by_key(|p| edit_distance::edit_distance(c.name(), p.name()))
                    .map(|p| (*p).clone());
                (c, suggestion)
            })
            .collect_vec()
    }
}

impl Deref for Pattern {
    type Target = [TargetRow];

    fn deref(&self) -> &Self::Target {
        &self.rows
    }
}

impl FromIterator<TargetRow> for Pattern {
    fn from_iter<T: IntoIterator<Item = TargetRow>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rows.iter().join("\n"))
    }
}

/// The ways that a [`Pattern`] can be structurally invalid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternError {
    /// The `Pattern` has no rows
    Empty,
    /// An `Odd` row has no knots, which would mean braiding zero strands
    EmptyRow { row: usize },
    /// Some row's length doesn't correspond to any valid [`StrandCount`]
    InvalidStrandCount {
        row: usize,
        error: InvalidStrandCount,
    },
    /// Two rows imply different numbers of strands
    Inconsistent {
        row: usize,
        implied: StrandCount,
        expected: StrandCount,
    },
    /// A row doesn't have the number of knots required by a given [`StrandCount`]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
        strand_count: StrandCount,
    },
}

impl Display for PatternError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Pattern has no rows"),
            Self::EmptyRow { row } => write!(f, "Row {} has no knots", row + 1),
            Self::InvalidStrandCount { row, error } => write!(f, "Row {}: {}", row + 1, error),
            Self::Inconsistent {
                row,
                implied,
                expected,
            } => write!(
                f,
                "Row {} implies {}, but previous rows imply {}",
                row + 1,
                implied,
                expected
            ),
            Self::RowLength {
                row,
                expected,
                actual,
                strand_count,
            } => write!(
                f,
                "Row {} has {} knots, but {} row of {} needs {}",
                row + 1,
                actual,
                match Parity::of_row(*row) {
                    Parity::Odd => "an odd",
                    Parity::Even => "an even",
                },
                strand_count,
                expected
            ),
        }
    }
}

impl std::error::Error for PatternError {}

#[cfg(feature = "serde")]
impl Serialize for TargetRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.colors.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for TargetRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Color>::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rows.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<TargetRow>::deserialize(deserializer).map(Self::new)
    }
}
