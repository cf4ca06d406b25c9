//! Linear-space divide-and-conquer alignment (Hirschberg style).
//!
//! Global alignment splits the first sequence `x` at `xmid = len(x) / 2` and
//! runs two linear-space sweeps: `x[..xmid]` forward against `y`, and
//! `x[xmid..]` reversed against `y` reversed. Adding the two score vectors
//! gives, for every column `j`, the best score of an alignment that crosses
//! row `xmid` at `j`. Every maximizing `j` is a middle node; each is
//! recursed on independently and the halves are joined by cross product,
//! so co-optimal alignments are never lost. Subproblems where either side
//! is at most `base_case_len` residues long go to [`DpEngine`].
//!
//! Local alignment first finds its windows:
//! 1. a local sweep over the full inputs yields the optimum and every end
//!    node reaching it,
//! 2. per end node, a global sweep over the reversed prefixes scores every
//!    cell as a window start,
//! 3. interior starts are kept when their window reaches the optimum and
//!    full backtracking would stop there (no backpointer in the local
//!    matrix),
//! 4. border starts have no backpointers but must leave the border with
//!    their first column; they are kept per first column, as a window
//!    opening one step inside with that column as its [`Lead`],
//!
//! then aligns every window globally with the recursion above.

use std::collections::BTreeSet;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::alignment::{Alignment, AlignmentSet, Mode};
use crate::alphabet::Symbol;
use crate::blocks::{Lead, Window};
use crate::dp::DpEngine;
use crate::scoring::{Score, ScoringModel};
use crate::sweep;
use crate::traits::Aligner;
use crate::utils::{argmax_all, reversed, DEFAULT_BASE_CASE_LEN};

/// Split points chosen for one recursion step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiddleNodes {
    /// Row of `x` the split crosses.
    pub xmid: usize,
    /// Optimal global score of `x` against `y`.
    pub score: Score,
    /// Every column of `y` an optimal alignment crosses `xmid` at.
    pub ymids: Vec<usize>,
}

/// Linear-space exhaustive aligner.
///
/// ```
/// use dc_align::{Aligner, DcEngine, DpEngine, Mode, ScoringModel};
///
/// let scoring = ScoringModel::simple(2, -1, -1);
/// let dc = DcEngine::new(&scoring, Mode::Global).align("CTATGCCA", "CCTACA").unwrap();
/// let dp = DpEngine::new(&scoring, Mode::Global).align("CTATGCCA", "CCTACA").unwrap();
/// assert_eq!(dc, dp);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DcEngine<'a> {
    scoring: &'a ScoringModel,
    mode: Mode,
    base_case_len: usize,
}

impl<'a> DcEngine<'a> {
    /// Engine with the smallest base case ([`DEFAULT_BASE_CASE_LEN`]).
    pub fn new(scoring: &'a ScoringModel, mode: Mode) -> Self {
        Self::with_base_case_len(scoring, mode, DEFAULT_BASE_CASE_LEN)
    }

    pub fn global(scoring: &'a ScoringModel) -> Self {
        Self::new(scoring, Mode::Global)
    }

    pub fn local(scoring: &'a ScoringModel) -> Self {
        Self::new(scoring, Mode::Local)
    }

    /// Engine that hands subproblems with at most `base_case_len` residues on
    /// either side to the full-matrix engine.
    ///
    /// # Panics
    /// Panics if `base_case_len == 0`.
    pub fn with_base_case_len(scoring: &'a ScoringModel, mode: Mode, base_case_len: usize) -> Self {
        assert!(base_case_len > 0, "base_case_len must be positive");
        Self {
            scoring,
            mode,
            base_case_len,
        }
    }

    pub fn base_case_len(&self) -> usize {
        self.base_case_len
    }

    /// Middle nodes of the global alignment of `x` (length >= 2) against `y`.
    pub fn middle_nodes(&self, x: &[Symbol], y: &[Symbol]) -> MiddleNodes {
        debug_assert!(x.len() >= 2);
        let xmid = x.len() / 2;
        let score_l = sweep::last_row(self.scoring, Mode::Global, &x[..xmid], y);
        let score_r = sweep::last_row(
            self.scoring,
            Mode::Global,
            &reversed(&x[xmid..]),
            &reversed(y),
        );
        let n = y.len();
        let combined: Vec<Score> = (0..=n).map(|j| score_l[j] + score_r[n - j]).collect();
        let ymids = argmax_all(&combined);
        MiddleNodes {
            xmid,
            score: combined[ymids[0]],
            ymids,
        }
    }

    /// Every optimal global alignment of `x` against `y`.
    pub fn align_global(&self, x: &[Symbol], y: &[Symbol]) -> AlignmentSet {
        self.align_helper(x, y, 0)
    }

    fn align_helper(&self, x: &[Symbol], y: &[Symbol], depth: usize) -> AlignmentSet {
        let alphabet = self.scoring.alphabet();
        if x.is_empty() {
            let score = y.iter().map(|&s| self.scoring.indel(s)).sum();
            let alignment = Alignment::all_gap_first(alphabet.decode(y), alphabet.gap_char());
            return AlignmentSet::from_alignments(score, [alignment]);
        }
        if y.is_empty() {
            let score = x.iter().map(|&s| self.scoring.indel(s)).sum();
            let alignment = Alignment::all_gap_second(alphabet.decode(x), alphabet.gap_char());
            return AlignmentSet::from_alignments(score, [alignment]);
        }
        if x.len() <= self.base_case_len || y.len() <= self.base_case_len {
            return DpEngine::global(self.scoring).align_symbols(x, y);
        }

        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("dc_split", depth, xlen = x.len(), ylen = y.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let nodes = self.middle_nodes(x, y);
        #[cfg(feature = "tracing")]
        tracing::trace!(
            xmid = nodes.xmid,
            score = nodes.score,
            middle_nodes = nodes.ymids.len(),
            "middle nodes"
        );

        self.join_middle_nodes(x, y, &nodes, depth)
    }

    /// Align both halves around one middle node and join them.
    fn split_at(
        &self,
        x: &[Symbol],
        y: &[Symbol],
        xmid: usize,
        ymid: usize,
        depth: usize,
    ) -> AlignmentSet {
        let (left, right) = self.recurse_halves(
            (&x[..xmid], &y[..ymid]),
            (&x[xmid..], &y[ymid..]),
            depth + 1,
        );
        AlignmentSet::concat_all(&left, &right)
    }

    #[cfg(feature = "parallel")]
    fn recurse_halves(
        &self,
        left: (&[Symbol], &[Symbol]),
        right: (&[Symbol], &[Symbol]),
        depth: usize,
    ) -> (AlignmentSet, AlignmentSet) {
        rayon::join(
            || self.align_helper(left.0, left.1, depth),
            || self.align_helper(right.0, right.1, depth),
        )
    }

    #[cfg(not(feature = "parallel"))]
    fn recurse_halves(
        &self,
        left: (&[Symbol], &[Symbol]),
        right: (&[Symbol], &[Symbol]),
        depth: usize,
    ) -> (AlignmentSet, AlignmentSet) {
        (
            self.align_helper(left.0, left.1, depth),
            self.align_helper(right.0, right.1, depth),
        )
    }

    #[cfg(feature = "parallel")]
    fn join_middle_nodes(
        &self,
        x: &[Symbol],
        y: &[Symbol],
        nodes: &MiddleNodes,
        depth: usize,
    ) -> AlignmentSet {
        nodes
            .ymids
            .par_iter()
            .map(|&ymid| self.split_at(x, y, nodes.xmid, ymid, depth))
            .reduce(|| AlignmentSet::new(nodes.score), AlignmentSet::union)
    }

    #[cfg(not(feature = "parallel"))]
    fn join_middle_nodes(
        &self,
        x: &[Symbol],
        y: &[Symbol],
        nodes: &MiddleNodes,
        depth: usize,
    ) -> AlignmentSet {
        nodes
            .ymids
            .iter()
            .map(|&ymid| self.split_at(x, y, nodes.xmid, ymid, depth))
            .fold(AlignmentSet::new(nodes.score), AlignmentSet::union)
    }

    /// Local optimum and every window an optimal local alignment spans. No
    /// windows when the optimum is 0.
    ///
    /// Per end node, one global sweep over the reversed prefixes scores every
    /// cell as a window start. An interior start qualifies when its window
    /// reaches the maximum and the cell is terminal in the local matrix. A
    /// start on the border qualifies through each first column that steps
    /// off the border and still reaches the maximum.
    pub fn local_windows(&self, seq1: &[Symbol], seq2: &[Symbol]) -> (Score, Vec<Window>) {
        let peaks = sweep::local_peaks(self.scoring, seq1, seq2);
        if peaks.max <= 0 {
            return (0, Vec::new());
        }
        // Every end node shares the same maximum.
        let max = peaks.max;

        let mut windows = Vec::new();
        let mut interior = Vec::new();
        for &(e1, e2) in &peaks.cells {
            let end = (e1, e2);
            let rev1 = reversed(&seq1[..e1]);
            let rev2 = reversed(&seq2[..e2]);
            sweep::global_rows(self.scoring, &rev1, &rev2, |a, row| {
                let p = e1 - a;
                if p == 0 {
                    return;
                }
                for (b, &best) in row.iter().enumerate() {
                    let q = e2 - b;
                    if q == 0 {
                        continue;
                    }
                    // best: optimal global score from (p, q) to the end node.
                    if best == max {
                        interior.push(Window::new((p, q), end));
                    }
                    let leads = [
                        (Lead::Pair, p == 1 || q == 1),
                        (Lead::GapInSecond, p == 1),
                        (Lead::GapInFirst, q == 1),
                    ];
                    for (lead, off_border) in leads {
                        if off_border
                            && best + self.lead_column(lead, seq1, seq2, (p, q)).2 == max
                        {
                            windows.push(Window::with_lead(lead, (p, q), end));
                        }
                    }
                }
            });
        }

        let starts: BTreeSet<_> = interior.iter().map(|w| w.start).collect();
        let terminal = sweep::local_terminal_cells(self.scoring, seq1, seq2, &starts);
        interior.retain(|w| terminal.contains(&w.start));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            max,
            end_nodes = peaks.cells.len(),
            interior_candidates = starts.len(),
            interior_starts = interior.len(),
            border_starts = windows.len(),
            "local windows"
        );
        windows.extend(interior);
        (max, windows)
    }

    /// Residues and score of the `lead` column entering `start`.
    fn lead_column(
        &self,
        lead: Lead,
        seq1: &[Symbol],
        seq2: &[Symbol],
        (p, q): (usize, usize),
    ) -> (u8, u8, Score) {
        let alphabet = self.scoring.alphabet();
        let gap = alphabet.gap_char();
        match lead {
            Lead::Pair => {
                let (a, b) = (seq1[p - 1], seq2[q - 1]);
                let score = self.scoring.match_score(a, b);
                (alphabet.char_of(a), alphabet.char_of(b), score)
            }
            Lead::GapInSecond => {
                let a = seq1[p - 1];
                (alphabet.char_of(a), gap, self.scoring.indel(a))
            }
            Lead::GapInFirst => {
                let b = seq2[q - 1];
                (gap, alphabet.char_of(b), self.scoring.indel(b))
            }
        }
    }

    /// Every optimal alignment spanning `window`, lead column included.
    fn align_window(&self, seq1: &[Symbol], seq2: &[Symbol], window: &Window) -> AlignmentSet {
        let body = self.align_global(&seq1[window.first_range()], &seq2[window.second_range()]);
        let Some(lead) = window.lead else {
            return body;
        };
        let (first, second, score) = self.lead_column(lead, seq1, seq2, window.start);
        let column = Alignment::new(String::from(first as char), String::from(second as char));
        AlignmentSet::concat_all(&AlignmentSet::from_alignments(score, [column]), &body)
    }

    fn align_local(&self, seq1: &[Symbol], seq2: &[Symbol]) -> AlignmentSet {
        let (max, windows) = self.local_windows(seq1, seq2);
        self.align_windows(seq1, seq2, max, &windows)
    }

    #[cfg(feature = "parallel")]
    fn align_windows(
        &self,
        seq1: &[Symbol],
        seq2: &[Symbol],
        max: Score,
        windows: &[Window],
    ) -> AlignmentSet {
        windows
            .par_iter()
            .map(|w| self.align_window(seq1, seq2, w))
            .reduce(|| AlignmentSet::new(max), AlignmentSet::union)
    }

    #[cfg(not(feature = "parallel"))]
    fn align_windows(
        &self,
        seq1: &[Symbol],
        seq2: &[Symbol],
        max: Score,
        windows: &[Window],
    ) -> AlignmentSet {
        windows
            .iter()
            .map(|w| self.align_window(seq1, seq2, w))
            .fold(AlignmentSet::new(max), AlignmentSet::union)
    }
}

impl Aligner for DcEngine<'_> {
    fn scoring(&self) -> &ScoringModel {
        self.scoring
    }

    fn mode(&self) -> Mode {
        self.mode
    }

    fn align_symbols(&self, seq1: &[Symbol], seq2: &[Symbol]) -> AlignmentSet {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "dc_align",
            len1 = seq1.len(),
            len2 = seq2.len(),
            local = self.mode.is_local(),
            base_case_len = self.base_case_len
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        match self.mode {
            Mode::Global => self.align_global(seq1, seq2),
            Mode::Local => self.align_local(seq1, seq2),
        }
    }
}
