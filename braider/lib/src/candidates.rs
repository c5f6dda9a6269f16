//! Candidate starting arrangements, for when the caller doesn't know how the strands start.

use cordframe::{Arrangement, Color, ColorPool, Pattern, StrandCount};
use knotwork_utils::BigNumInt;

use crate::{Error, Result};

/// Candidate counts above this get a warning, since each one is a full search
const LARGE_CANDIDATE_COUNT: u128 = 100_000;

/// The strand colours which will be permuted to find starting arrangements
#[derive(Debug, Clone)]
pub(crate) struct Candidates {
    pool: ColorPool,
    /// Number of distinct arrangements of `pool`, saturating at `u128::MAX`
    count: u128,
}

impl Candidates {
    /// Decide which colours to give the strands.  If `color_counts` is given, those are used
    /// verbatim (and must fill exactly `strand_count` strands).  Otherwise, the colours of the
    /// pattern are repeated cyclically.
    pub fn new(
        pattern: &Pattern,
        strand_count: StrandCount,
        color_counts: Option<&[(Color, usize)]>,
        candidate_limit: Option<usize>,
    ) -> Result<Self> {
        let pool = match color_counts {
            Some(counts) => {
                let pool = ColorPool::from_counts(counts);
                if pool.len() != strand_count.num_strands() {
                    return Err(Error::PoolSize {
                        pool_len: pool.len(),
                        strand_count,
                    });
                }
                warn_about_missing_colors(pattern, &pool);
                pool
            }
            None => ColorPool::cyclic(&pattern.colors(), strand_count),
        };

        let count = pool.num_arrangements();
        log::info!(
            "Trying {} starting arrangements of {}",
            big_count(count),
            pool
        );
        if let Some(limit) = candidate_limit {
            if count > limit as u128 {
                return Err(Error::TooManyCandidates { count, limit });
            }
        }
        if count > LARGE_CANDIDATE_COUNT {
            log::warn!(
                "{} starting arrangements will each be searched separately; this may take a very long time",
                big_count(count)
            );
        }

        Ok(Self { pool, count })
    }

    /// The number of candidates, saturating at `usize::MAX`
    pub fn len(&self) -> usize {
        usize::try_from(self.count).unwrap_or(usize::MAX)
    }

    /// Every candidate starting [`Arrangement`], in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = Arrangement> + Send + 'static {
        self.pool.arrangements()
    }
}

fn warn_about_missing_colors(pattern: &Pattern, pool: &ColorPool) {
    // The first arrangement contains every colour in the pool
    let Some(arrangement) = pool.arrangements().next() else {
        return;
    };
    for (color, suggestion) in pattern.missing_colors(&arrangement) {
        match suggestion {
            Some(s) => log::warn!(
                "Colour {} is in the pattern but has no strands (did you mean {}?)",
                color,
                s
            ),
            None => log::warn!("Colour {} is in the pattern but has no strands", color),
        }
    }
}

fn big_count(count: u128) -> String {
    match usize::try_from(count) {
        Ok(c) => BigNumInt(c).to_string(),
        Err(_) => "more than 2^64".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    fn counts(pairs: &[(&str, usize)]) -> Vec<(Color, usize)> {
        pairs.iter().map(|(n, c)| (Color::new(n), *c)).collect_vec()
    }

    #[test]
    fn cyclic_pool() {
        let pattern = Pattern::from_names(&[&["R", "G"], &["B"]]);
        let candidates = Candidates::new(&pattern, StrandCount::new(4), None, None).unwrap();
        assert_eq!(candidates.len(), 12);
        let all = candidates.iter().map(|a| a.to_string()).collect_vec();
        assert_eq!(all.len(), 12);
        assert_eq!(all[0], "B B G R");
        assert_eq!(all[11], "R G B B");
    }

    #[test]
    fn explicit_counts() {
        let pattern = Pattern::from_names(&[&["R", "W", "R"], &["R", "R"]]);
        let c = counts(&[("R", 4), ("W", 2)]);
        let candidates = Candidates::new(&pattern, StrandCount::new(6), Some(&c), None).unwrap();
        assert_eq!(candidates.len(), 15);
        assert!(candidates
            .iter()
            .any(|a| a == Arrangement::parse("R R W W R R").unwrap()));
    }

    #[test]
    fn wrong_pool_size() {
        let pattern = Pattern::from_names(&[&["R", "W", "R"]]);
        let c = counts(&[("R", 4)]);
        assert_eq!(
            Candidates::new(&pattern, StrandCount::new(6), Some(&c), None).unwrap_err(),
            Error::PoolSize {
                pool_len: 4,
                strand_count: StrandCount::new(6)
            }
        );
    }

    #[test]
    fn candidate_limit() {
        let pattern = Pattern::from_names(&[&["R", "G"], &["B"]]);
        assert_eq!(
            Candidates::new(&pattern, StrandCount::new(4), None, Some(11)).unwrap_err(),
            Error::TooManyCandidates {
                count: 12,
                limit: 11
            }
        );
        assert!(Candidates::new(&pattern, StrandCount::new(4), None, Some(12)).is_ok());
    }
}
