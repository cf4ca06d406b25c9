//! Linear-space score sweeps.
//!
//! Each sweep walks the rows of a virtual DP matrix of `x` (rows) against
//! `y` (columns) with two row buffers, so it needs O(len(y)) memory no
//! matter how long `x` is. The divide-and-conquer engine uses them to find
//! middle nodes, local end nodes and local start nodes without ever
//! materializing the full matrix.

use std::collections::BTreeSet;

use crate::alignment::Mode;
use crate::alphabet::Symbol;
use crate::scoring::{Score, ScoringModel};

/// Cells of a local sweep that reach the best score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalPeaks {
    /// Best local score; 0 if no positive-scoring local alignment exists.
    pub max: Score,
    /// Every `(x prefix, y prefix)` cell scoring `max`, row-major order.
    /// Empty when `max` is 0.
    pub cells: Vec<(usize, usize)>,
}

/// Row 0 of the matrix.
fn init_row(scoring: &ScoringModel, mode: Mode, y: &[Symbol], row: &mut [Score]) {
    row[0] = 0;
    for j in 1..=y.len() {
        row[j] = match mode {
            Mode::Global => row[j - 1] + scoring.indel(y[j - 1]),
            Mode::Local => 0,
        };
    }
}

/// Build the row for residue `xi` from the previous row.
#[inline]
fn fill_row(
    scoring: &ScoringModel,
    mode: Mode,
    xi: Symbol,
    y: &[Symbol],
    prev: &[Score],
    cur: &mut [Score],
) {
    let indel_x = scoring.indel(xi);
    cur[0] = match mode {
        Mode::Global => prev[0] + indel_x,
        Mode::Local => 0,
    };
    for j in 1..=y.len() {
        let yj = y[j - 1];
        let diag = prev[j - 1] + scoring.match_score(xi, yj);
        let up = prev[j] + indel_x; // gap in y
        let left = cur[j - 1] + scoring.indel(yj); // gap in x
        let best = diag.max(up).max(left);
        cur[j] = if mode.is_local() { best.max(0) } else { best };
    }
}

/// Last row of the DP matrix of `x` against `y`: entry `j` is the optimal
/// score of `x` against `y[..j]`.
pub fn last_row(scoring: &ScoringModel, mode: Mode, x: &[Symbol], y: &[Symbol]) -> Vec<Score> {
    let mut prev = vec![0; y.len() + 1];
    let mut curr = vec![0; y.len() + 1];
    init_row(scoring, mode, y, &mut prev);
    for &xi in x {
        fill_row(scoring, mode, xi, y, &prev, &mut curr);
        std::mem::swap(&mut prev, &mut curr);
    }
    prev
}

/// Walk the global matrix of `x` against `y` row by row, handing each
/// finished row to `visit` along with its index (row 0 included).
pub fn global_rows<F>(scoring: &ScoringModel, x: &[Symbol], y: &[Symbol], mut visit: F)
where
    F: FnMut(usize, &[Score]),
{
    let mut prev = vec![0; y.len() + 1];
    let mut curr = vec![0; y.len() + 1];
    init_row(scoring, Mode::Global, y, &mut prev);
    visit(0, &prev);
    for (i, &xi) in x.iter().enumerate() {
        fill_row(scoring, Mode::Global, xi, y, &prev, &mut curr);
        visit(i + 1, &curr);
        std::mem::swap(&mut prev, &mut curr);
    }
}

/// Best local score of `x` against `y` and every cell reaching it.
pub fn local_peaks(scoring: &ScoringModel, x: &[Symbol], y: &[Symbol]) -> LocalPeaks {
    let mut prev = vec![0; y.len() + 1];
    let mut curr = vec![0; y.len() + 1];
    let mut peaks = LocalPeaks::default();

    for (i, &xi) in x.iter().enumerate() {
        fill_row(scoring, Mode::Local, xi, y, &prev, &mut curr);
        for (j, &v) in curr.iter().enumerate().skip(1) {
            if v > peaks.max {
                peaks.max = v;
                peaks.cells.clear();
                peaks.cells.push((i + 1, j));
            } else if v == peaks.max && v > 0 {
                peaks.cells.push((i + 1, j));
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    peaks
}

/// Subset of the interior `candidates` that are terminal in the local
/// matrix of `x` against `y`: every predecessor candidate is negative, so
/// the cell sits on the zero floor with no backpointer.
///
/// Only rows up to the last candidate row are swept.
pub fn local_terminal_cells(
    scoring: &ScoringModel,
    x: &[Symbol],
    y: &[Symbol],
    candidates: &BTreeSet<(usize, usize)>,
) -> BTreeSet<(usize, usize)> {
    let mut terminal = BTreeSet::new();
    let Some(&(last_row, _)) = candidates.last() else {
        return terminal;
    };
    debug_assert!(candidates.iter().all(|&(i, j)| i > 0 && j > 0));

    let mut prev = vec![0; y.len() + 1];
    let mut curr = vec![0; y.len() + 1];
    for i in 1..=last_row.min(x.len()) {
        let xi = x[i - 1];
        fill_row(scoring, Mode::Local, xi, y, &prev, &mut curr);
        for &(_, j) in candidates.range((i, 1)..=(i, usize::MAX)) {
            let yj = y[j - 1];
            let diag = prev[j - 1] + scoring.match_score(xi, yj);
            let up = prev[j] + scoring.indel(xi);
            let left = curr[j - 1] + scoring.indel(yj);
            if diag < 0 && up < 0 && left < 0 {
                terminal.insert((i, j));
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    terminal
}
