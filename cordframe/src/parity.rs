use std::ops::Not;

use self::Parity::{Even, Odd};

/// The parity of a row of knots.  Rows are counted from one, so the first row of a pattern (at
/// index `0`) is an `Odd` row.
///
/// - `Odd` rows knot every strand: knot `i` joins strands `2i` and `2i + 1`.
/// - `Even` rows are offset by one, leaving the outermost strand on each side untouched: knot `i`
///   joins strands `2i + 1` and `2i + 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parity {
    Odd,
    Even,
}

impl Parity {
    /// Returns the `Parity` of the row at a given (0-indexed) position in a pattern.
    ///
    /// # Example
    ///
    /// ```
    /// use cordframe::Parity;
    ///
    /// assert_eq!(Parity::of_row(0), Parity::Odd);
    /// assert_eq!(Parity::of_row(1), Parity::Even);
    /// assert_eq!(Parity::of_row(6), Parity::Odd);
    /// ```
    pub fn of_row(index: usize) -> Self {
        if index % 2 == 0 {
            Odd
        } else {
            Even
        }
    }

    /// The index of the left-most strand consumed by the first knot of a row with this `Parity`
    #[inline(always)]
    pub fn first_position(self) -> usize {
        match self {
            Odd => 0,
            Even => 1,
        }
    }

    /// The (left, right) strand positions consumed by the `knot_idx`th knot of a row
    #[inline(always)]
    pub fn knot_positions(self, knot_idx: usize) -> (usize, usize) {
        let left = self.first_position() + 2 * knot_idx;
        (left, left + 1)
    }

    /// The `Parity` of the row directly after this one
    pub fn next(self) -> Self {
        !self
    }
}

impl Not for Parity {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Odd => Even,
            Even => Odd,
        }
    }
}

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

#[cfg(test)]
impl Arbitrary for Parity {
    fn arbitrary(gen: &mut Gen) -> Self {
        if bool::arbitrary(gen) {
            Odd
        } else {
            Even
        }
    }
}
