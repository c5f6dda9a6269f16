//! Multisets of [`Color`]s, and the distinct [`Arrangement`]s they can be laid out in.

use std::fmt::{Display, Formatter};

use factorial::Factorial;
use itertools::Itertools;

use crate::{Arrangement, Color, StrandCount};

/// A multiset of strand [`Color`]s, stored sorted so that every distinct ordering can be
/// enumerated in lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColorPool {
    /// Always sorted
    colors: Vec<Color>,
}

impl ColorPool {
    /// Creates a `ColorPool` containing exactly the given colours
    pub fn new(mut colors: Vec<Color>) -> Self {
        colors.sort();
        Self { colors }
    }

    /// Fills `strand_count` strands by cycling through `colors` in order.  For example, the
    /// colours `B G R` over 4 strands gives the pool `{B, B, G, R}`.
    ///
    /// This is a coverage heuristic: it makes sure every colour gets at least one strand (if
    /// there are enough strands) and spreads the rest as evenly as possible.  It doesn't know the
    /// real colour counts, so it can miss valid starting arrangements.  Use
    /// [`ColorPool::from_counts`] if the counts are known.
    ///
    /// ```
    /// use cordframe::{Color, ColorPool, StrandCount};
    ///
    /// let colors = [Color::new("B"), Color::new("G"), Color::new("R")];
    /// let pool = ColorPool::cyclic(&colors, StrandCount::new(4));
    /// assert_eq!(pool.to_string(), "{B, B, G, R}");
    /// ```
    pub fn cyclic(colors: &[Color], strand_count: StrandCount) -> Self {
        Self::new(
            colors
                .iter()
                .cycle()
                .take(strand_count.num_strands())
                .cloned()
                .collect_vec(),
        )
    }

    /// Creates a `ColorPool` from explicit `(colour, count)` pairs
    pub fn from_counts(counts: &[(Color, usize)]) -> Self {
        Self::new(
            counts
                .iter()
                .flat_map(|(c, n)| std::iter::repeat(c.clone()).take(*n))
                .collect_vec(),
        )
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The number of distinct [`Arrangement`]s of this pool: `n! / (k_1! k_2! ... k_m!)` for `m`
    /// colours with multiplicities `k_i`.  Saturates at [`u128::MAX`] if this is too large to
    /// represent.
    ///
    /// ```
    /// use cordframe::{Color, ColorPool};
    ///
    /// let pool = ColorPool::from_counts(&[(Color::new("R"), 4), (Color::new("W"), 2)]);
    /// assert_eq!(pool.num_arrangements(), 15);
    /// ```
    pub fn num_arrangements(&self) -> u128 {
        let Some(numerator) = (self.colors.len() as u128).checked_factorial() else {
            return u128::MAX;
        };
        let denominator = self
            .colors
            .iter()
            .dedup_with_count()
            .map(|(count, _)| (count as u128).factorial())
            .product::<u128>();
        numerator / denominator
    }

    /// An [`Iterator`] over every distinct ordering of this pool, in lexicographic order
    ///
    /// ```
    /// use cordframe::{Color, ColorPool};
    ///
    /// let pool = ColorPool::from_counts(&[(Color::new("R"), 2), (Color::new("W"), 1)]);
    /// let arrangements: Vec<String> = pool.arrangements().map(|a| a.to_string()).collect();
    /// assert_eq!(arrangements, vec!["R R W", "R W R", "W R R"]);
    /// ```
    pub fn arrangements(&self) -> Arrangements {
        Arrangements {
            next: Some(self.colors.clone()),
        }
    }
}

impl Display for ColorPool {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.colors.iter().join(", "))
    }
}

/// [`Iterator`] returned by [`ColorPool::arrangements`]
#[derive(Debug, Clone)]
pub struct Arrangements {
    next: Option<Vec<Color>>,
}

impl Iterator for Arrangements {
    type Item = Arrangement;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut successor = current.clone();
        if next_permutation(&mut successor) {
            self.next = Some(successor);
        }
        Some(Arrangement::new(current))
    }
}

/// Rearranges `v` into the lexicographically next permutation, returning `false` (and leaving `v`
/// untouched) if `v` is already the last one.  Equal elements are never swapped with each other,
/// so starting from a sorted slice visits every distinct permutation exactly once.
fn next_permutation<T: Ord>(v: &mut [T]) -> bool {
    // Find the longest non-increasing suffix
    let Some(pivot) = (1..v.len()).rev().find(|&i| v[i - 1] < v[i]).map(|i| i - 1) else {
        return false;
    };
    // Swap the pivot with the right-most element which is larger than it, then reverse the
    // suffix back into increasing order.  `v[pivot + 1]` is always larger than the pivot, so the
    // search can't fail.
    let successor = (pivot + 1..v.len())
        .rev()
        .find(|&i| v[i] > v[pivot])
        .unwrap_or(pivot + 1);
    v.swap(pivot, successor);
    v[pivot + 1..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(counts: &[(&str, usize)]) -> ColorPool {
        ColorPool::from_counts(
            &counts
                .iter()
                .map(|(name, n)| (Color::new(name), *n))
                .collect_vec(),
        )
    }

    #[test]
    fn next_permutation_ints() {
        let mut v = [1, 2, 3];
        let mut perms = vec![v];
        while next_permutation(&mut v) {
            perms.push(v);
        }
        assert_eq!(
            perms,
            vec![
                [1, 2, 3],
                [1, 3, 2],
                [2, 1, 3],
                [2, 3, 1],
                [3, 1, 2],
                [3, 2, 1]
            ]
        );
        let mut empty: [u8; 0] = [];
        assert!(!next_permutation(&mut empty));
    }

    #[test]
    fn next_permutation_with_repeats() {
        let mut v = vec![1, 1, 2, 2];
        let mut seen = vec![v.clone()];
        while next_permutation(&mut v) {
            seen.push(v.clone());
        }
        assert_eq!(
            seen,
            vec![
                vec![1, 1, 2, 2],
                vec![1, 2, 1, 2],
                vec![1, 2, 2, 1],
                vec![2, 1, 1, 2],
                vec![2, 1, 2, 1],
                vec![2, 2, 1, 1],
            ]
        );
        // The last permutation is left as it is
        assert_eq!(v, vec![2, 2, 1, 1]);
    }

    #[test]
    fn arrangements_match_count() {
        #[track_caller]
        fn check(counts: &[(&str, usize)]) {
            let pool = pool(counts);
            let arrangements = pool.arrangements().collect_vec();
            assert_eq!(arrangements.len() as u128, pool.num_arrangements());
            // All distinct and in increasing order
            assert!(arrangements.windows(2).all(|w| w[0] < w[1]));
        }

        check(&[("R", 1)]);
        check(&[("R", 4), ("W", 2)]);
        check(&[("B", 2), ("G", 1), ("R", 1)]);
        check(&[("A", 1), ("B", 1), ("C", 1), ("D", 1), ("E", 1)]);
        check(&[("R", 3), ("W", 3), ("B", 2)]);
    }

    #[test]
    fn cyclic() {
        #[track_caller]
        fn check(names: &[&str], strands: usize, exp: &str) {
            let colors = names.iter().map(|n| Color::new(n)).collect_vec();
            let pool = ColorPool::cyclic(&colors, StrandCount::new(strands));
            assert_eq!(pool.to_string(), exp);
        }

        check(&["B", "G", "R"], 4, "{B, B, G, R}");
        check(&["R", "W"], 6, "{R, R, R, W, W, W}");
        check(&["A", "B", "C", "D", "E"], 2, "{A, B}");
    }

    #[test]
    fn huge_pools_saturate() {
        let colors = (0..40).map(|i| Color::new(&i.to_string())).collect_vec();
        assert_eq!(ColorPool::new(colors).num_arrangements(), u128::MAX);
    }
}
