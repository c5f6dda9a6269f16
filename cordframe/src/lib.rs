//! Idiomatic Rust representations of the primitives used to describe friendship-bracelet (and
//! other macramé) braiding patterns: strand [`Color`]s, [`Arrangement`]s of strands, the four
//! [`KnotType`]s, and the target [`Pattern`]s that a braid should produce.

#![deny(clippy::all)]

mod arrangement;
mod color;
mod knot;
mod parity;
mod pattern;
mod pool;
mod strand_count;

// Re-export useful data types into the top level of the crate
pub use arrangement::{Arrangement, TransitionError};
pub use color::{Color, EmptyColorName};
pub use knot::{Family, KnotNotation, KnotParseError, KnotRule, KnotType, MethodRow, Side};
pub use parity::Parity;
pub use pattern::{Pattern, PatternError, TargetRow};
pub use pool::{Arrangements, ColorPool};
pub use strand_count::{InvalidStrandCount, StrandCount};
