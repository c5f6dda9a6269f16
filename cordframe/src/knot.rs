//! The four ways of tying two adjacent strands together, and rows made out of them.

use std::{
    fmt::{Display, Formatter},
    ops::Deref,
    str::FromStr,
};

use itertools::Itertools;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Deserializer, Serialize, Serializer};

use self::KnotType::{LeftLeft, LeftRight, RightLeft, RightRight};

/// One of the two strands that go into a knot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Picks the value on this `Side` of a `(left, right)` pair
    #[inline(always)]
    pub fn select<T>(self, left: T, right: T) -> T {
        match self {
            Side::Left => left,
            Side::Right => right,
        }
    }
}

/// The effect of tying a knot: which strand's colour ends up visible, and whether the two strands
/// cross over each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KnotRule {
    pub color_selector: Side,
    pub swaps: bool,
}

/// Whether or not a knot makes its two strands change places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Swapping,
    NonSwapping,
}

/// The four types of knot.  Each is named after the directions of its two half-hitches (so a
/// `RightRight` knot is a forward knot, made with the left strand twice going right).
///
/// | Knot         | Visible colour | Strands swap? |
/// |--------------|----------------|---------------|
/// | `RightRight` | left strand    | yes           |
/// | `LeftLeft`   | right strand   | yes           |
/// | `RightLeft`  | left strand    | no            |
/// | `LeftRight`  | right strand   | no            |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KnotType {
    RightRight,
    LeftLeft,
    RightLeft,
    LeftRight,
}

impl KnotType {
    /// Every `KnotType`, in the order that searches try them
    pub const ALL: [KnotType; 4] = [RightRight, LeftLeft, RightLeft, LeftRight];

    /// The [`KnotRule`] describing what this `KnotType` does
    #[inline(always)]
    pub fn rule(self) -> KnotRule {
        match self {
            RightRight => KnotRule {
                color_selector: Side::Left,
                swaps: true,
            },
            LeftLeft => KnotRule {
                color_selector: Side::Right,
                swaps: true,
            },
            RightLeft => KnotRule {
                color_selector: Side::Left,
                swaps: false,
            },
            LeftRight => KnotRule {
                color_selector: Side::Right,
                swaps: false,
            },
        }
    }

    /// An [`Iterator`] over every `KnotType` along with its [`KnotRule`], in the same order as
    /// [`KnotType::ALL`]
    pub fn rules() -> impl Iterator<Item = (KnotType, KnotRule)> {
        Self::ALL.into_iter().map(|k| (k, k.rule()))
    }

    pub fn family(self) -> Family {
        if self.rule().swaps {
            Family::Swapping
        } else {
            Family::NonSwapping
        }
    }

    /// The colour which is shown by tying this knot over strands coloured `left` and `right`
    ///
    /// ```
    /// use cordframe::KnotType;
    ///
    /// assert_eq!(KnotType::RightRight.visible_color(&'R', &'W'), &'R');
    /// assert_eq!(KnotType::LeftRight.visible_color(&'R', &'W'), &'W');
    /// ```
    #[inline(always)]
    pub fn visible_color<'c, C>(self, left: &'c C, right: &'c C) -> &'c C {
        self.rule().color_selector.select(left, right)
    }

    /// Returns the `(left, right)` pair of strands after tying this knot
    ///
    /// ```
    /// use cordframe::KnotType;
    ///
    /// assert_eq!(KnotType::LeftLeft.apply('R', 'W'), ('W', 'R'));
    /// assert_eq!(KnotType::RightLeft.apply('R', 'W'), ('R', 'W'));
    /// ```
    #[inline(always)]
    pub fn apply<C>(self, left: C, right: C) -> (C, C) {
        if self.rule().swaps {
            (right, left)
        } else {
            (left, right)
        }
    }

    /// The short ASCII name of this `KnotType` (e.g. `"RR"`)
    pub fn abbreviation(self) -> &'static str {
        match self {
            RightRight => "RR",
            LeftLeft => "LL",
            RightLeft => "RL",
            LeftRight => "LR",
        }
    }

    /// The name of this `KnotType` as it's usually written on Chinese braiding charts (e.g.
    /// `"右右"`)
    pub fn hanzi(self) -> &'static str {
        match self {
            RightRight => "右右",
            LeftLeft => "左左",
            RightLeft => "右左",
            LeftRight => "左右",
        }
    }

    /// The name of this `KnotType` in a given [`KnotNotation`]
    pub fn name(self, notation: KnotNotation) -> &'static str {
        match notation {
            KnotNotation::Abbreviated => self.abbreviation(),
            KnotNotation::Hanzi => self.hanzi(),
        }
    }
}

impl Display for KnotType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl FromStr for KnotType {
    type Err = KnotParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| {
                s.eq_ignore_ascii_case(k.abbreviation())
                    || s == k.hanzi()
                    || s.eq_ignore_ascii_case(&format!("{:?}", k))
            })
            .ok_or_else(|| KnotParseError(s.to_owned()))
    }
}

/// The error returned when a string isn't the name of any [`KnotType`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnotParseError(pub String);

impl Display for KnotParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} isn't a knot type.  Expected one of `RR`, `LL`, `RL` or `LR`",
            self.0
        )
    }
}

impl std::error::Error for KnotParseError {}

/// The different ways of writing [`KnotType`]s
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KnotNotation {
    /// `RR`, `LL`, `RL`, `LR`
    #[default]
    Abbreviated,
    /// `右右`, `左左`, `右左`, `左右`
    Hanzi,
}

impl FromStr for KnotNotation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "abbreviated" | "ascii" => Self::Abbreviated,
            "hanzi" | "chinese" => Self::Hanzi,
            _ => {
                return Err(format!(
                    "Unknown notation {:?}. Expected `abbreviated` or `hanzi`.",
                    s
                ))
            }
        })
    }
}

/// The [`KnotType`]s tied in one row of a pattern, from left to right.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MethodRow {
    knots: Vec<KnotType>,
}

impl MethodRow {
    pub fn new(knots: Vec<KnotType>) -> Self {
        Self { knots }
    }

    /// Returns `true` if at least one knot of the given [`Family`] is tied in this row
    pub fn uses_family(&self, family: Family) -> bool {
        self.knots.iter().any(|k| k.family() == family)
    }

    /// Writes this row in the given [`KnotNotation`], with knots separated by spaces
    pub fn to_string_with(&self, notation: KnotNotation) -> String {
        self.knots.iter().map(|k| k.name(notation)).join(" ")
    }

    pub fn into_vec(self) -> Vec<KnotType> {
        self.knots
    }
}

impl Deref for MethodRow {
    type Target = [KnotType];

    fn deref(&self) -> &Self::Target {
        &self.knots
    }
}

impl FromIterator<KnotType> for MethodRow {
    fn from_iter<T: IntoIterator<Item = KnotType>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Display for MethodRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_with(KnotNotation::Abbreviated))
    }
}

impl FromStr for MethodRow {
    type Err = KnotParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|tok| !tok.is_empty())
            .map(KnotType::from_str)
            .collect()
    }
}

#[cfg(feature = "serde")]
impl Serialize for KnotType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.abbreviation())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for KnotType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde_crate::de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl Serialize for MethodRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.knots.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for MethodRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<KnotType>::deserialize(deserializer).map(Self::new)
    }
}

//////////////////
// TESTING CODE //
//////////////////

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

#[cfg(test)]
impl Arbitrary for KnotType {
    fn arbitrary(gen: &mut Gen) -> Self {
        *gen.choose(&Self::ALL).unwrap()
    }
}
