//! Full-matrix exhaustive alignment.
//!
//! [`DpEngine`] fills an `(len(seq2) + 1) x (len(seq1) + 1)` score matrix
//! together with a [`Backpointers`] flag set per cell, then walks every
//! backpointer path from the optimal cell(s) back to a terminal cell. Rows
//! index `seq2` and columns index `seq1`.
//!
//! Memory is quadratic; [`crate::dc::DcEngine`] produces the same output in
//! linear space and calls back into this engine for its base cases.

use std::fmt;

use crate::alignment::{Alignment, AlignmentSet, Mode};
use crate::alphabet::{Alphabet, Symbol};
use crate::backpointer::Backpointers;
use crate::scoring::{Score, ScoringModel};
use crate::traits::Aligner;

/// Score matrix and backpointer matrix of one DP computation.
#[derive(Debug, Clone)]
pub struct DpMatrix {
    mode: Mode,
    rows: usize,
    cols: usize,
    scores: Vec<Score>,
    pointers: Vec<Backpointers>,
}

impl DpMatrix {
    /// `len(seq2) + 1`.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// `len(seq1) + 1`.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    fn idx(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }

    /// Score of aligning `seq2[..i]` against `seq1[..j]` (best suffix ending
    /// there in local mode).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Score {
        self.scores[self.idx(i, j)]
    }

    #[inline]
    pub fn backpointers(&self, i: usize, j: usize) -> Backpointers {
        self.pointers[self.idx(i, j)]
    }

    pub fn max_score(&self) -> Score {
        self.scores.iter().copied().max().unwrap_or(0)
    }

    /// Bottom-right cell for global alignment, matrix maximum for local.
    pub fn optimum(&self) -> Score {
        match self.mode {
            Mode::Global => self.get(self.rows - 1, self.cols - 1),
            Mode::Local => self.max_score(),
        }
    }

    /// Cells backtracking starts from.
    ///
    /// Local mode returns nothing when the maximum is 0: the empty alignment
    /// is optimal and there is no positive-scoring path to report.
    pub fn start_cells(&self) -> Vec<(usize, usize)> {
        match self.mode {
            Mode::Global => vec![(self.rows - 1, self.cols - 1)],
            Mode::Local => {
                let max = self.max_score();
                if max <= 0 {
                    return Vec::new();
                }
                (0..self.rows)
                    .flat_map(|i| (0..self.cols).map(move |j| (i, j)))
                    .filter(|&(i, j)| self.get(i, j) == max)
                    .collect()
            }
        }
    }

    /// Backpointer grid, one row per line, `s` marking terminal cells.
    pub fn backtrack_grid(&self) -> String {
        let mut out = String::new();
        for i in 0..self.rows {
            for j in 0..self.cols {
                let cell = self.backpointers(i, j).to_string();
                out.push_str(&format!("{cell:<4}"));
            }
            out.truncate(out.trim_end().len());
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for DpMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            for j in 0..self.cols {
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{:>4}", self.get(i, j))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Partially built alignment on the backtracking work list; rows are kept
/// reversed.
#[derive(Clone, Default)]
struct Partial {
    i: usize,
    j: usize,
    first: Vec<u8>,
    second: Vec<u8>,
}

impl Partial {
    fn at((i, j): (usize, usize)) -> Self {
        Self {
            i,
            j,
            ..Self::default()
        }
    }

    fn step(&mut self, flag: Backpointers, alphabet: &Alphabet, seq1: &[Symbol], seq2: &[Symbol]) {
        let gap = alphabet.gap_char();
        if flag == Backpointers::DIAG {
            self.first.push(alphabet.char_of(seq1[self.j - 1]));
            self.second.push(alphabet.char_of(seq2[self.i - 1]));
            self.i -= 1;
            self.j -= 1;
        } else if flag == Backpointers::UP {
            self.first.push(gap);
            self.second.push(alphabet.char_of(seq2[self.i - 1]));
            self.i -= 1;
        } else {
            self.first.push(alphabet.char_of(seq1[self.j - 1]));
            self.second.push(gap);
            self.j -= 1;
        }
    }
}

/// Exhaustive full-matrix aligner.
///
/// ```
/// use dc_align::{Aligner, DpEngine, Mode, ScoringModel};
///
/// let scoring = ScoringModel::simple(1, -1, -1);
/// let alignments = DpEngine::new(&scoring, Mode::Global).align("AA", "A").unwrap();
/// assert_eq!(alignments.score(), 0);
/// assert_eq!(alignments.len(), 2); // "-A" and "A-" against "AA"
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DpEngine<'a> {
    scoring: &'a ScoringModel,
    mode: Mode,
}

impl<'a> DpEngine<'a> {
    pub fn new(scoring: &'a ScoringModel, mode: Mode) -> Self {
        Self { scoring, mode }
    }

    pub fn global(scoring: &'a ScoringModel) -> Self {
        Self::new(scoring, Mode::Global)
    }

    pub fn local(scoring: &'a ScoringModel) -> Self {
        Self::new(scoring, Mode::Local)
    }

    /// Fill the score and backpointer matrices.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            level = "trace",
            skip_all,
            fields(rows = seq2.len() + 1, cols = seq1.len() + 1)
        )
    )]
    pub fn build_matrix(&self, seq1: &[Symbol], seq2: &[Symbol]) -> DpMatrix {
        let sc = self.scoring;
        let rows = seq2.len() + 1;
        let cols = seq1.len() + 1;
        let mut scores: Vec<Score> = vec![0; rows * cols];
        let mut pointers = vec![Backpointers::NONE; rows * cols];

        // Local mode leaves row and column 0 at zero with no flags.
        if self.mode == Mode::Global {
            for j in 1..cols {
                scores[j] = scores[j - 1] + sc.indel(seq1[j - 1]);
                pointers[j] = Backpointers::LEFT;
            }
            for i in 1..rows {
                scores[i * cols] = scores[(i - 1) * cols] + sc.indel(seq2[i - 1]);
                pointers[i * cols] = Backpointers::UP;
            }
        }

        for i in 1..rows {
            let a = seq2[i - 1];
            let indel_a = sc.indel(a);
            for j in 1..cols {
                let b = seq1[j - 1];
                let diag = scores[(i - 1) * cols + j - 1] + sc.match_score(a, b);
                let up = scores[(i - 1) * cols + j] + indel_a;
                let left = scores[i * cols + j - 1] + sc.indel(b);
                let mut best = diag.max(up).max(left);
                if self.mode.is_local() {
                    best = best.max(0);
                }
                scores[i * cols + j] = best;
                pointers[i * cols + j] = Backpointers::matching(best, diag, up, left);
            }
        }

        DpMatrix {
            mode: self.mode,
            rows,
            cols,
            scores,
            pointers,
        }
    }

    /// Enumerate every backpointer path from the start cell(s) of `matrix`
    /// to a terminal cell.
    ///
    /// `matrix` must come from [`DpEngine::build_matrix`] on the same
    /// sequences.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip_all, fields(optimum = matrix.optimum()))
    )]
    pub fn find_alignments(
        &self,
        matrix: &DpMatrix,
        seq1: &[Symbol],
        seq2: &[Symbol],
    ) -> AlignmentSet {
        debug_assert_eq!(matrix.rows(), seq2.len() + 1);
        debug_assert_eq!(matrix.cols(), seq1.len() + 1);

        let alphabet = self.scoring.alphabet();
        let starts = matrix.start_cells();
        if starts.is_empty() {
            return AlignmentSet::new(0);
        }

        let mut out = AlignmentSet::new(matrix.optimum());
        let mut stack: Vec<Partial> = starts.into_iter().map(Partial::at).collect();
        while let Some(mut partial) = stack.pop() {
            let flags = matrix.backpointers(partial.i, partial.j);
            if flags.is_terminal() {
                out.insert(Alignment::from_reversed(&partial.first, &partial.second));
                continue;
            }
            let steps: Vec<Backpointers> = flags.iter().collect();
            for (k, &flag) in steps.iter().enumerate() {
                let mut next = if k + 1 == steps.len() {
                    std::mem::take(&mut partial)
                } else {
                    partial.clone()
                };
                next.step(flag, alphabet, seq1, seq2);
                stack.push(next);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(alignments = out.len(), "backtracking complete");
        out
    }
}

impl Aligner for DpEngine<'_> {
    fn scoring(&self) -> &ScoringModel {
        self.scoring
    }

    fn mode(&self) -> Mode {
        self.mode
    }

    fn align_symbols(&self, seq1: &[Symbol], seq2: &[Symbol]) -> AlignmentSet {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!(
            "dp_align",
            len1 = seq1.len(),
            len2 = seq2.len(),
            local = self.mode.is_local()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let matrix = self.build_matrix(seq1, seq2);
        self.find_alignments(&matrix, seq1, seq2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(s: &str) -> Vec<Symbol> {
        Alphabet::nucleotide().encode(s).unwrap().into_symbols()
    }

    fn pairs(set: &AlignmentSet) -> Vec<(&str, &str)> {
        set.iter().map(|a| (a.first(), a.second())).collect()
    }

    #[test]
    fn global_matrix_and_flags() {
        let sc = ScoringModel::simple(1, -1, -1);
        let dp = DpEngine::global(&sc);
        let m = dp.build_matrix(&enc("AC"), &enc("AC"));
        assert_eq!((m.rows(), m.cols()), (3, 3));
        let scores: Vec<Score> = (0..3)
            .flat_map(|i| (0..3).map(move |j| (i, j)))
            .map(|(i, j)| m.get(i, j))
            .collect();
        assert_eq!(scores, vec![0, -1, -2, -1, 1, 0, -2, 0, 2]);
        assert!(m.backpointers(0, 0).is_terminal());
        assert_eq!(m.backpointers(0, 2), Backpointers::LEFT);
        assert_eq!(m.backpointers(2, 0), Backpointers::UP);
        assert_eq!(m.backpointers(1, 2), Backpointers::LEFT);
        assert_eq!(m.backpointers(2, 1), Backpointers::UP);
        assert_eq!(m.backpointers(2, 2), Backpointers::DIAG);
        assert_eq!(m.optimum(), 2);
    }

    #[test]
    fn local_matrix_has_terminal_borders() {
        let sc = ScoringModel::simple(1, -1, -1);
        let m = DpEngine::local(&sc).build_matrix(&enc("AC"), &enc("GC"));
        for k in 0..3 {
            assert_eq!(m.get(0, k), 0);
            assert_eq!(m.get(k, 0), 0);
            assert!(m.backpointers(0, k).is_terminal());
            assert!(m.backpointers(k, 0).is_terminal());
        }
        // G vs A: every candidate negative, floor at zero without flags.
        assert_eq!(m.get(1, 1), 0);
        assert!(m.backpointers(1, 1).is_terminal());
        assert_eq!(m.max_score(), 1);
        assert_eq!(m.start_cells(), vec![(2, 2)]);
    }

    #[test]
    fn enumerates_every_tie() {
        let sc = ScoringModel::simple(1, -1, -1);
        let set = DpEngine::global(&sc).align("AA", "A").unwrap();
        assert_eq!(set.score(), 0);
        assert_eq!(pairs(&set), vec![("AA", "-A"), ("AA", "A-")]);
    }

    #[test]
    fn unique_global_alignment() {
        let sc = ScoringModel::simple(1, -1, -1);
        let set = DpEngine::global(&sc).align("AC", "A").unwrap();
        assert_eq!(pairs(&set), vec![("AC", "A-")]);
        assert_eq!(set.score(), 0);
    }

    #[test]
    fn empty_inputs() {
        let sc = ScoringModel::simple(1, -1, -1);
        let dp = DpEngine::global(&sc);
        let both = dp.align("", "").unwrap();
        assert_eq!(pairs(&both), vec![("", "")]);
        assert_eq!(both.score(), 0);

        let one = dp.align("", "ACGT").unwrap();
        assert_eq!(pairs(&one), vec![("----", "ACGT")]);
        assert_eq!(one.score(), -4);

        assert!(DpEngine::local(&sc).align("", "ACGT").unwrap().is_empty());
    }

    #[test]
    fn local_substring_and_dedup() {
        let sc = ScoringModel::simple(2, -5, -5);
        let set = DpEngine::local(&sc).align("GTC", "AAAAGTCAAAA").unwrap();
        assert_eq!(pairs(&set), vec![("GTC", "GTC")]);
        assert_eq!(set.score(), 6);

        // Two end cells, one distinct alignment.
        let set = DpEngine::local(&sc).align("A", "CAGA").unwrap();
        assert_eq!(pairs(&set), vec![("A", "A")]);
    }

    #[test]
    fn local_without_positive_score_is_empty() {
        let sc = ScoringModel::simple(2, -5, -5);
        let set = DpEngine::local(&sc).align("AAA", "CCC").unwrap();
        assert!(set.is_empty());
        assert_eq!(set.score(), 0);
    }

    #[test]
    fn invalid_symbol_fails_fast() {
        let sc = ScoringModel::default();
        assert!(DpEngine::global(&sc).align("ACGU", "ACG").is_err());
    }

    #[test]
    fn renders_grids() {
        let sc = ScoringModel::simple(1, -1, -1);
        let m = DpEngine::global(&sc).build_matrix(&enc("A"), &enc("A"));
        assert_eq!(m.to_string(), "   0   -1\n  -1    1\n");
        assert_eq!(m.backtrack_grid(), "s   →\n↓   ↘\n");
    }
}
