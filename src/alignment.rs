//! Alignment values produced by both engines.

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

use crate::error::{AlignError, Result};
use crate::scoring::{Score, ScoringModel};

/// Whether alignments span both sequences end to end or only their best
/// scoring substrings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Needleman-Wunsch style, end to end.
    #[default]
    Global,
    /// Smith-Waterman style, best scoring substrings.
    Local,
}

impl Mode {
    #[inline]
    pub fn is_local(self) -> bool {
        matches!(self, Mode::Local)
    }
}

/// Two equal-length gapped rows: `first` aligns the first input sequence,
/// `second` the second one.
///
/// Ordering is lexicographic on `(first, second)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Alignment {
    first: String,
    second: String,
}

impl Alignment {
    /// # Panics
    /// Panics if the rows differ in length.
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        let first = first.into();
        let second = second.into();
        assert_eq!(
            first.len(),
            second.len(),
            "aligned rows must have equal length"
        );
        Self { first, second }
    }

    /// Build from reversed row bytes, as accumulated by backtracking.
    pub(crate) fn from_reversed(first_rev: &[u8], second_rev: &[u8]) -> Self {
        debug_assert_eq!(first_rev.len(), second_rev.len());
        Self {
            first: first_rev.iter().rev().map(|&b| b as char).collect(),
            second: second_rev.iter().rev().map(|&b| b as char).collect(),
        }
    }

    /// Gap in `second` against every character of `text`.
    pub(crate) fn all_gap_second(text: String, gap: u8) -> Self {
        let second = (gap as char).to_string().repeat(text.len());
        Self {
            first: text,
            second,
        }
    }

    /// Gap in `first` against every character of `text`.
    pub(crate) fn all_gap_first(text: String, gap: u8) -> Self {
        let first = (gap as char).to_string().repeat(text.len());
        Self {
            first,
            second: text,
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    pub fn into_parts(self) -> (String, String) {
        (self.first, self.second)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    /// `self` followed by `other`, column-wise.
    pub fn concat(&self, other: &Alignment) -> Alignment {
        let mut first = String::with_capacity(self.len() + other.len());
        first.push_str(&self.first);
        first.push_str(&other.first);
        let mut second = String::with_capacity(self.len() + other.len());
        second.push_str(&self.second);
        second.push_str(&other.second);
        Alignment { first, second }
    }

    /// Swap the rows.
    pub fn mirrored(&self) -> Alignment {
        Alignment {
            first: self.second.clone(),
            second: self.first.clone(),
        }
    }

    /// `first` with gaps removed.
    pub fn ungapped_first(&self, gap: char) -> String {
        self.first.chars().filter(|&c| c != gap).collect()
    }

    /// `second` with gaps removed.
    pub fn ungapped_second(&self, gap: char) -> String {
        self.second.chars().filter(|&c| c != gap).collect()
    }

    /// Sum of column scores under `scoring`. A gap/gap column scores the
    /// table's gap/gap entry.
    pub fn rescore(&self, scoring: &ScoringModel) -> Result<Score> {
        let alphabet = scoring.alphabet();
        let lookup = |ch: u8, position: usize| {
            alphabet.index_of(ch).ok_or(AlignError::InvalidSymbol {
                symbol: ch as char,
                position,
            })
        };
        self.first
            .bytes()
            .zip(self.second.bytes())
            .enumerate()
            .try_fold(0, |acc, (position, (a, b))| -> Result<Score> {
                Ok(acc + scoring.score(lookup(a, position)?, lookup(b, position)?))
            })
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   {}", self.first)?;
        write!(f, "   {}", self.second)
    }
}

/// Deduplicated, lexicographically ordered set of co-optimal alignments and
/// the score they share.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentSet {
    score: Score,
    alignments: BTreeSet<Alignment>,
}

impl AlignmentSet {
    /// An empty set carrying `score`.
    pub fn new(score: Score) -> Self {
        Self {
            score,
            alignments: BTreeSet::new(),
        }
    }

    pub fn from_alignments<I: IntoIterator<Item = Alignment>>(
        score: Score,
        alignments: I,
    ) -> Self {
        Self {
            score,
            alignments: alignments.into_iter().collect(),
        }
    }

    /// The optimal score every member achieves.
    pub fn score(&self) -> Score {
        self.score
    }

    pub fn len(&self) -> usize {
        self.alignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alignments.is_empty()
    }

    pub fn contains(&self, alignment: &Alignment) -> bool {
        self.alignments.contains(alignment)
    }

    /// Members in sorted order.
    pub fn iter(&self) -> btree_set::Iter<'_, Alignment> {
        self.alignments.iter()
    }

    pub fn first(&self) -> Option<&Alignment> {
        self.alignments.first()
    }

    pub fn to_vec(&self) -> Vec<Alignment> {
        self.alignments.iter().cloned().collect()
    }

    /// Every member with its rows swapped.
    pub fn mirrored(&self) -> AlignmentSet {
        AlignmentSet {
            score: self.score,
            alignments: self.alignments.iter().map(Alignment::mirrored).collect(),
        }
    }

    pub(crate) fn insert(&mut self, alignment: Alignment) -> bool {
        self.alignments.insert(alignment)
    }

    /// Union of two sets of the same optimum.
    pub(crate) fn union(mut self, mut other: AlignmentSet) -> AlignmentSet {
        debug_assert!(
            self.is_empty() || other.is_empty() || self.score == other.score,
            "merging sets of different optima"
        );
        if other.alignments.len() > self.alignments.len() {
            std::mem::swap(&mut self.alignments, &mut other.alignments);
        }
        self.alignments.append(&mut other.alignments);
        self
    }

    /// Column-wise cross product of `left` and `right`.
    pub(crate) fn concat_all(left: &AlignmentSet, right: &AlignmentSet) -> AlignmentSet {
        let mut out = AlignmentSet::new(left.score + right.score);
        for l in left {
            for r in right {
                out.insert(l.concat(r));
            }
        }
        out
    }
}

impl<'a> IntoIterator for &'a AlignmentSet {
    type Item = &'a Alignment;
    type IntoIter = btree_set::Iter<'a, Alignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.alignments.iter()
    }
}

impl IntoIterator for AlignmentSet {
    type Item = Alignment;
    type IntoIter = btree_set::IntoIter<Alignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.alignments.into_iter()
    }
}

impl fmt::Display for AlignmentSet {
    /// One block per alignment followed by a count line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, alignment) in self.alignments.iter().enumerate() {
            writeln!(f, "   alignment {}:", idx + 1)?;
            writeln!(f, "{alignment}")?;
        }
        write!(f, "   {} alignment(s) total.", self.alignments.len())
    }
}
