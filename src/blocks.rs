//! Sequence windows used by local divide-and-conquer alignment.
//!
//! A `Window` pairs a half-open range `[start, end)` over each input
//! sequence: one start node and one end node of a local alignment.
//!
//! A local alignment that begins on row 0 or column 0 of the local matrix
//! must leave that border with its first column. Such windows open one step
//! inside the border and carry the [`Lead`] column that steps in.

use std::ops::Range;

/// First column of a local alignment that starts on the matrix border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lead {
    /// Residue pair `seq1[p-1]` / `seq2[q-1]`.
    Pair,
    /// `seq1[p-1]` over a gap.
    GapInSecond,
    /// A gap over `seq2[q-1]`.
    GapInFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Window {
    /// Column stepping into `start` from the border, if any.
    pub lead: Option<Lead>,
    /// Prefix lengths `(seq1, seq2)` at which the window opens.
    pub start: (usize, usize),
    /// Prefix lengths `(seq1, seq2)` at which the window closes.
    pub end: (usize, usize),
}

impl Window {
    /// # Panics
    /// Panics if `start` lies after `end` on either sequence.
    pub fn new(start: (usize, usize), end: (usize, usize)) -> Self {
        assert!(
            start.0 <= end.0 && start.1 <= end.1,
            "window start {start:?} lies after end {end:?}"
        );
        Self {
            lead: None,
            start,
            end,
        }
    }

    /// Window opening at interior cell `start`, entered by `lead`.
    ///
    /// # Panics
    /// Panics if `start` is on the border or lies after `end`.
    pub fn with_lead(lead: Lead, start: (usize, usize), end: (usize, usize)) -> Self {
        assert!(
            start.0 > 0 && start.1 > 0,
            "lead window must open inside the border"
        );
        Self {
            lead: Some(lead),
            ..Self::new(start, end)
        }
    }

    /// Cell the alignment really starts at: `start`, or the border cell the
    /// lead column steps in from.
    pub fn origin(&self) -> (usize, usize) {
        let (p, q) = self.start;
        match self.lead {
            None => self.start,
            Some(Lead::Pair) => (p - 1, q - 1),
            Some(Lead::GapInSecond) => (p - 1, q),
            Some(Lead::GapInFirst) => (p, q - 1),
        }
    }

    #[inline]
    pub fn first_range(&self) -> Range<usize> {
        self.start.0..self.end.0
    }

    #[inline]
    pub fn second_range(&self) -> Range<usize> {
        self.start.1..self.end.1
    }

    /// Residues of the first sequence covered.
    #[inline]
    pub fn first_len(&self) -> usize {
        self.end.0 - self.start.0
    }

    /// Residues of the second sequence covered.
    #[inline]
    pub fn second_len(&self) -> usize {
        self.end.1 - self.start.1
    }

    /// True if the window covers nothing on both sequences.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first_len() == 0 && self.second_len() == 0
    }
}
