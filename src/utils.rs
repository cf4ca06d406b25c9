//! Assorted utilities and helpers.

use crate::alphabet::Symbol;
use crate::scoring::Score;

/// Subproblems where either side has at most this many residues are handed
/// to the full-matrix engine by [`crate::dc::DcEngine`].
///
/// One residue is the smallest cutoff that still terminates: splitting a
/// single residue in half would leave the same subproblem on one side.
pub const DEFAULT_BASE_CASE_LEN: usize = 1;

/// Pick a base-case cutoff for a working-memory budget of `max_cells` DP
/// cells on inputs whose longer side is `longest`.
///
/// A base case of `b` residues against `longest` residues costs about
/// `(b + 1) * (longest + 1)` cells, so this returns the largest such `b`,
/// never below [`DEFAULT_BASE_CASE_LEN`].
#[inline]
pub fn base_case_len_for_budget(max_cells: usize, longest: usize) -> usize {
    (max_cells / (longest + 1))
        .saturating_sub(1)
        .max(DEFAULT_BASE_CASE_LEN)
}

/// Owned reversed copy of a symbol slice.
#[inline]
pub fn reversed(symbols: &[Symbol]) -> Vec<Symbol> {
    symbols.iter().rev().copied().collect()
}

/// Every index of `values` equal to their maximum, ascending.
pub fn argmax_all(values: &[Score]) -> Vec<usize> {
    let Some(&best) = values.iter().max() else {
        return Vec::new();
    };
    values
        .iter()
        .enumerate()
        .filter_map(|(idx, &v)| (v == best).then_some(idx))
        .collect()
}
