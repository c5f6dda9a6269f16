//! The left-to-right order of strand colours at one point in a braid.

use std::{
    convert::TryFrom,
    fmt::{Debug, Display, Formatter},
    ops::Deref,
    str::FromStr,
};

use itertools::Itertools;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    color::EmptyColorName, strand_count::InvalidStrandCount, Color, MethodRow, Parity,
    StrandCount,
};

/// An owned, immutable sequence of [`Color`]s, one for each strand from left to right.
///
/// Tying a row of knots never mutates an `Arrangement`; [`Arrangement::apply_row`] returns a new
/// one instead.  Nothing requires an `Arrangement` to have a valid [`StrandCount`] (so that input
/// can be parsed before it's validated), but [`Arrangement::strand_count`] will only succeed if
/// it does.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Arrangement {
    colors: Vec<Color>,
}

impl Arrangement {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    /// Parse a string into an `Arrangement`.  Colours are separated by commas and/or whitespace.
    ///
    /// ```
    /// use cordframe::{Arrangement, Color};
    ///
    /// let arr = Arrangement::parse("R, B G,Y").unwrap();
    /// assert_eq!(arr.len(), 4);
    /// assert_eq!(arr[2], Color::new("G"));
    /// assert_eq!(arr.to_string(), "R B G Y");
    /// ```
    pub fn parse(s: &str) -> Result<Self, EmptyColorName> {
        s.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|tok| !tok.is_empty())
            .map(Color::from_str)
            .collect()
    }

    /// The [`StrandCount`] of this `Arrangement`, or an error if it has an odd number of strands
    /// (or none at all)
    pub fn strand_count(&self) -> Result<StrandCount, InvalidStrandCount> {
        StrandCount::try_from(self.colors.len())
    }

    /// Ties one row of knots across this `Arrangement`, returning the resulting `Arrangement`.
    ///
    /// Knot `i` of the row joins the strands at [`Parity::knot_positions`]`(i)`, and keeps or
    /// swaps them according to the [`KnotRule`](crate::KnotRule) of `method_row[i]`.  Any strand
    /// not covered by a knot (the outermost strands of an `Even` row) is carried through
    /// unchanged.  This fails if the row needs strands that don't exist, or if the row doesn't
    /// cover exactly the strands which its [`Parity`] says it should.
    ///
    /// ```
    /// use cordframe::{Arrangement, MethodRow, Parity};
    ///
    /// let start = Arrangement::parse("R B G Y").unwrap();
    /// let row: MethodRow = "RR RL".parse().unwrap();
    /// assert_eq!(start.apply_row(&row, Parity::Odd).unwrap().to_string(), "B R G Y");
    ///
    /// let row: MethodRow = "LL".parse().unwrap();
    /// assert_eq!(start.apply_row(&row, Parity::Even).unwrap().to_string(), "R G B Y");
    /// ```
    pub fn apply_row(
        &self,
        method_row: &MethodRow,
        parity: Parity,
    ) -> Result<Arrangement, TransitionError> {
        let num_strands = self.colors.len();
        let mut next = Vec::with_capacity(num_strands);

        // Leading strand which isn't part of any knot
        let first = parity.first_position();
        if first > 0 {
            next.extend(self.colors.first().cloned());
        }
        // Knotted pairs
        for (knot_idx, knot) in method_row.iter().enumerate() {
            let (l, r) = parity.knot_positions(knot_idx);
            let (left, right) = match (self.colors.get(l), self.colors.get(r)) {
                (Some(left), Some(right)) => (left.clone(), right.clone()),
                _ => {
                    return Err(TransitionError::PairOutOfRange {
                        knot_idx,
                        num_strands,
                    })
                }
            };
            let (new_left, new_right) = knot.apply(left, right);
            next.push(new_left);
            next.push(new_right);
        }
        // Trailing strand which isn't part of any knot
        let covered = first + 2 * method_row.len();
        if parity == Parity::Even && covered < num_strands {
            next.extend(self.colors.last().cloned());
        }

        if next.len() != num_strands {
            return Err(TransitionError::WrongLength {
                expected: num_strands,
                actual: next.len(),
            });
        }
        Ok(Self::new(next))
    }

    pub fn as_slice(&self) -> &[Color] {
        &self.colors
    }

    pub fn into_vec(self) -> Vec<Color> {
        self.colors
    }
}

impl Deref for Arrangement {
    type Target = [Color];

    fn deref(&self) -> &Self::Target {
        &self.colors
    }
}

impl FromIterator<Color> for Arrangement {
    fn from_iter<T: IntoIterator<Item = Color>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl FromStr for Arrangement {
    type Err = EmptyColorName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Debug for Arrangement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Arrangement({})", self)
    }
}

impl Display for Arrangement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.colors.iter().join(" "))
    }
}

/// The ways that [`Arrangement::apply_row`] can fail.  Neither of these can happen if the
/// [`MethodRow`] has the number of knots required by the [`Arrangement`]'s [`StrandCount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// Some knot needed a strand past the right-hand end of the [`Arrangement`]
    PairOutOfRange { knot_idx: usize, num_strands: usize },
    /// The row didn't cover every strand
    WrongLength { expected: usize, actual: usize },
}

impl Display for TransitionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PairOutOfRange {
                knot_idx,
                num_strands,
            } => write!(
                f,
                "Knot #{} runs off the end of an arrangement of {} strands",
                knot_idx + 1,
                num_strands
            ),
            Self::WrongLength { expected, actual } => write!(
                f,
                "Row produced {} strands, but should have produced {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for TransitionError {}

#[cfg(feature = "serde")]
impl Serialize for Arrangement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.colors.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Arrangement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Color>::deserialize(deserializer).map(Self::new)
    }
}

//////////////////
// TESTING CODE //
//////////////////

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

#[cfg(test)]
impl Arbitrary for Arrangement {
    fn arbitrary(gen: &mut Gen) -> Self {
        // Small, even numbers of strands drawn from a small palette, so that colours repeat
        let num_strands = (usize::arbitrary(gen) % 5 + 1) * 2;
        let palette = ["R", "W", "B", "G"];
        (0..num_strands)
            .map(|_| Color::new(gen.choose(&palette).unwrap()))
            .collect()
    }
}
