//! An opaque symbol for the colour of a single strand.

use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
    sync::Arc,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Deserializer, Serialize, Serializer};

/// The colour of a strand.  `Color`s are completely opaque: two `Color`s are either equal or
/// they aren't.  Internally, the name is reference-counted so that cloning a `Color` (which happens
/// every time an [`Arrangement`](crate::Arrangement) is transformed) never allocates.
///
/// `Color`s implement [`Ord`] (by name), but this is only used to make the order in which things
/// are enumerated reproducible.  Nothing about braiding depends on it.
///
/// ```
/// use cordframe::Color;
///
/// let red = Color::new("R");
/// assert_eq!(red, Color::new("R"));
/// assert_ne!(red, Color::new("W"));
/// assert_eq!(red.to_string(), "R");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Color {
    name: Arc<str>,
}

impl Color {
    /// Creates a new `Color` with the given name.  Leading and trailing whitespace is removed.
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name.trim()),
        }
    }

    /// The name of this `Color`, with surrounding whitespace trimmed
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for Color {
    type Err = EmptyColorName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            Err(EmptyColorName)
        } else {
            Ok(Self::new(s))
        }
    }
}

impl From<&str> for Color {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl Debug for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Color({})", self.name)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The error returned when parsing a [`Color`] from an empty (or whitespace-only) string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyColorName;

impl Display for EmptyColorName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Colour names can't be empty")
    }
}

impl std::error::Error for EmptyColorName {}

#[cfg(feature = "serde")]
impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde_crate::de::Error::custom)
    }
}
