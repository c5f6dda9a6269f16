//! The number of strands in a bracelet, which must be even and non-zero.

use std::{
    convert::TryFrom,
    fmt::{Debug, Display, Formatter},
};

use crate::Parity;

/// A newtype over [`usize`] that represents the number of strands being braided.  All
/// `StrandCount`s are even and non-zero; this means that every `Odd` row always has `n / 2`
/// knots and every `Even` row has `n / 2 - 1` knots.
///
/// ```
/// use cordframe::{Parity, StrandCount};
/// use std::convert::TryFrom;
///
/// let six = StrandCount::try_from(6).unwrap();
/// assert_eq!(six.num_knots(Parity::Odd), 3);
/// assert_eq!(six.num_knots(Parity::Even), 2);
/// assert!(StrandCount::try_from(5).is_err());
/// assert!(StrandCount::try_from(0).is_err());
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct StrandCount(usize);

impl StrandCount {
    /// Creates a new `StrandCount`.
    ///
    /// # Panics
    ///
    /// Panics if `num_strands` is odd or zero.
    #[track_caller]
    pub fn new(num_strands: usize) -> Self {
        match Self::try_from(num_strands) {
            Ok(n) => n,
            Err(e) => panic!("{}", e),
        }
    }

    /// Returns the `StrandCount` implied by a row of `num_knots` knots with a given [`Parity`],
    /// or an error if no valid `StrandCount` could produce that row.
    ///
    /// ```
    /// use cordframe::{Parity, StrandCount};
    ///
    /// assert_eq!(StrandCount::from_row_length(2, Parity::Odd), Ok(StrandCount::new(4)));
    /// assert_eq!(StrandCount::from_row_length(1, Parity::Even), Ok(StrandCount::new(4)));
    /// // An empty `Even` row is what two strands look like
    /// assert_eq!(StrandCount::from_row_length(0, Parity::Even), Ok(StrandCount::new(2)));
    /// assert!(StrandCount::from_row_length(0, Parity::Odd).is_err());
    /// ```
    pub fn from_row_length(num_knots: usize, parity: Parity) -> Result<Self, InvalidStrandCount> {
        Self::try_from(match parity {
            Parity::Odd => num_knots * 2,
            Parity::Even => (num_knots + 1) * 2,
        })
    }

    /// The number of strands represented by this `StrandCount`
    #[inline(always)]
    pub fn num_strands(self) -> usize {
        self.0
    }

    /// The number of knots tied in a row of a given [`Parity`]
    #[inline(always)]
    pub fn num_knots(self, parity: Parity) -> usize {
        match parity {
            Parity::Odd => self.0 / 2,
            Parity::Even => self.0 / 2 - 1,
        }
    }
}

impl TryFrom<usize> for StrandCount {
    type Error = InvalidStrandCount;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Err(InvalidStrandCount::Zero),
            n if n % 2 != 0 => Err(InvalidStrandCount::Odd(n)),
            n => Ok(Self(n)),
        }
    }
}

impl Debug for StrandCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "StrandCount({})", self.0)
    }
}

impl Display for StrandCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} strands", self.0)
    }
}

/// The ways that a number can fail to be a [`StrandCount`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidStrandCount {
    Zero,
    Odd(usize),
}

impl Display for InvalidStrandCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Zero => write!(f, "Can't braid zero strands"),
            Self::Odd(n) => write!(f, "Can't braid an odd number of strands ({})", n),
        }
    }
}

impl std::error::Error for InvalidStrandCount {}
