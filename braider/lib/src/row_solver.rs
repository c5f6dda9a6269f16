//! Enumeration of every way to tie a single row of a pattern.

use cordframe::{Arrangement, KnotType, MethodRow, Parity, TargetRow};
use itertools::Itertools;

/// One way of tying a row: the knots used and the arrangement they leave the strands in
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RowChoice {
    pub method_row: MethodRow,
    pub next: Arrangement,
}

/// Lazily finds every [`MethodRow`] which makes the knots of a row show the colours in `target`,
/// when tied on strands arranged as `state`.  The choices are yielded in a fixed order: the first
/// knot varies slowest, and the [`KnotType`]s at each knot are tried in the order of
/// [`KnotType::ALL`].
///
/// If any knot can't show its target colour (or the row doesn't fit onto the strands), no choices
/// are yielded.
pub(crate) fn solve_row<'s>(
    state: &'s Arrangement,
    target: &TargetRow,
    parity: Parity,
) -> impl Iterator<Item = RowChoice> + Send + 's {
    let knot_rows: Box<dyn Iterator<Item = Vec<KnotType>> + Send> =
        match knot_options(state, target, parity) {
            None => Box::new(std::iter::empty()),
            // A row with no knots can be tied in exactly one way
            Some(options) if options.is_empty() => Box::new(std::iter::once(Vec::new())),
            Some(options) => Box::new(
                options
                    .into_iter()
                    .map(Vec::into_iter)
                    .multi_cartesian_product(),
            ),
        };

    knot_rows.filter_map(move |knots| {
        let method_row = MethodRow::new(knots);
        // A failed transition means the row doesn't fit, so the branch is dropped
        let next = state.apply_row(&method_row, parity).ok()?;
        Some(RowChoice { method_row, next })
    })
}

/// The number of [`MethodRow`]s which [`solve_row`] will yield, saturating at `usize::MAX`
pub(crate) fn num_choices(state: &Arrangement, target: &TargetRow, parity: Parity) -> usize {
    match knot_options(state, target, parity) {
        Some(options) => options
            .iter()
            .fold(1usize, |total, knots| total.saturating_mul(knots.len())),
        None => 0,
    }
}

/// For each knot in the row, the [`KnotType`]s which would show the right colour.  Returns `None`
/// if some knot has no such `KnotType`.
fn knot_options(
    state: &Arrangement,
    target: &TargetRow,
    parity: Parity,
) -> Option<Vec<Vec<KnotType>>> {
    let strand_count = state.strand_count().ok()?;
    if strand_count.num_knots(parity) != target.len() {
        return None;
    }

    let mut options = Vec::with_capacity(target.len());
    for (knot_idx, target_color) in target.iter().enumerate() {
        let (l, r) = parity.knot_positions(knot_idx);
        let (left, right) = (state.get(l)?, state.get(r)?);
        let admissible: Vec<KnotType> = KnotType::rules()
            .filter(|(_, rule)| rule.color_selector.select(left, right) == target_color)
            .map(|(knot, _)| knot)
            .collect();
        if admissible.is_empty() {
            return None; // This colour can't be made at this knot
        }
        options.push(admissible);
    }
    Some(options)
}
