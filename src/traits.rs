//! The engine interface shared by the full-matrix and divide-and-conquer
//! aligners.
//!
//! Both engines consume the same inputs:
//! - a [`ScoringModel`] (symmetric residue/gap score table),
//! - an alignment [`Mode`] (global or local),
//! - two ungapped sequences,
//!
//! and must return the same [`AlignmentSet`]: every alignment achieving the
//! optimal score, deduplicated and sorted. Callers can swap one engine for
//! the other without observing a difference in output, only in memory use.

use crate::alignment::{AlignmentSet, Mode};
use crate::alphabet::{Sequence, Symbol};
use crate::error::Result;
use crate::scoring::ScoringModel;

/// An exhaustive optimal pairwise aligner.
pub trait Aligner {
    /// Scoring model the engine aligns under.
    fn scoring(&self) -> &ScoringModel;

    /// Global or local.
    fn mode(&self) -> Mode;

    /// Align two symbol slices already encoded against
    /// [`Aligner::scoring`]'s alphabet.
    ///
    /// Requirements:
    /// - every symbol must be a residue index of that alphabet (no gaps);
    ///   [`Aligner::align_sequences`] checks this before calling in.
    ///
    /// Returns the set of all optimal alignments of `seq1` against `seq2`;
    /// `first` rows align `seq1`, `second` rows align `seq2`.
    fn align_symbols(&self, seq1: &[Symbol], seq2: &[Symbol]) -> AlignmentSet;

    /// Align pre-encoded sequences after checking they belong to the
    /// scoring alphabet.
    fn align_sequences(&self, seq1: &Sequence, seq2: &Sequence) -> Result<AlignmentSet> {
        let alphabet = self.scoring().alphabet();
        alphabet.validate(seq1)?;
        alphabet.validate(seq2)?;
        Ok(self.align_symbols(seq1, seq2))
    }

    /// Encode two residue strings and align them.
    ///
    /// Fails with [`crate::AlignError::InvalidSymbol`] before any matrix work
    /// if either string holds a character outside the alphabet.
    fn align(&self, seq1: &str, seq2: &str) -> Result<AlignmentSet> {
        let alphabet = self.scoring().alphabet();
        let seq1 = alphabet.encode(seq1)?;
        let seq2 = alphabet.encode(seq2)?;
        Ok(self.align_symbols(&seq1, &seq2))
    }
}
