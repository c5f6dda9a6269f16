use std::fmt::{Display, Formatter};

use number_prefix::NumberPrefix;

/// Wrapper over a [`usize`] which is [`Display`]ed with an SI prefix once it gets large enough to
/// be hard to read (e.g. `123`, `45.6K`, `7.89M`).  Used for the step/solution counts in progress
/// lines, which can grow very quickly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BigNumInt(pub usize);

impl Display for BigNumInt {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match NumberPrefix::decimal(self.0 as f64) {
            NumberPrefix::Standalone(n) => write!(f, "{}", n as usize),
            NumberPrefix::Prefixed(prefix, n) => {
                // `NumberPrefix` uses a lower-case `k` for thousands, which looks odd next to `M`
                // and `G`
                write!(f, "{:.1}{}", n, prefix.symbol().to_uppercase())
            }
        }
    }
}
