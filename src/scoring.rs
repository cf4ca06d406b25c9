//! Symmetric substitution/indel score tables.
//!
//! A [`ScoringModel`] is a square table over the residues of an
//! [`Alphabet`] plus the gap. Row/column `gap` holds the indel score of each
//! residue; the gap/gap entry is unused. Both engines only read it.
//!
//! Tables come from three scalars ([`ScoringModel::simple`]) or from a
//! whitespace-delimited text file:
//!
//! ```text
//!         A       C       G       T       -
//! A       1       -1      -2      -3      -4
//! C       -1      6       -3      -4      -5
//! G       -2      -3      5       -5      -6
//! T       -3      -4      -5      4       -1
//! -       -4      -5      -6      -1
//! ```
//!
//! The gap/gap entry may be left out and reads as 0.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::alphabet::{Alphabet, Symbol};
use crate::error::{AlignError, Result};

/// Accumulated alignment score. Table entries are `i32`; sums over long
/// sequences are carried in 64 bits so they cannot overflow.
pub type Score = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringModel {
    alphabet: Alphabet,
    dim: usize,
    /// Row-major `dim x dim` table.
    table: Vec<i32>,
}

impl ScoringModel {
    /// Nucleotide table with a uniform match score on the diagonal, a uniform
    /// mismatch score elsewhere and one indel score for every residue.
    pub fn simple(match_score: i32, mismatch_score: i32, indel_score: i32) -> Self {
        Self::simple_for(Alphabet::nucleotide(), match_score, mismatch_score, indel_score)
    }

    /// [`ScoringModel::simple`] over an arbitrary alphabet.
    pub fn simple_for(
        alphabet: Alphabet,
        match_score: i32,
        mismatch_score: i32,
        indel_score: i32,
    ) -> Self {
        let dim = alphabet.table_dim();
        let gap = dim - 1;
        let mut table = vec![mismatch_score; dim * dim];
        for i in 0..dim {
            table[i * dim + i] = match_score;
            table[i * dim + gap] = indel_score;
            table[gap * dim + i] = indel_score;
        }
        table[gap * dim + gap] = 0;
        Self {
            alphabet,
            dim,
            table,
        }
    }

    /// Build from explicit rows ordered like the alphabet, gap last.
    ///
    /// # Errors
    ///
    /// [`AlignError::MalformedScoreTable`] if the table is not
    /// `(len + 1) x (len + 1)` or is not symmetric.
    pub fn from_table(alphabet: Alphabet, rows: Vec<Vec<i32>>) -> Result<Self> {
        let dim = alphabet.table_dim();
        if rows.len() != dim {
            return Err(AlignError::MalformedScoreTable(format!(
                "expected {dim} rows, found {}",
                rows.len()
            )));
        }
        let mut table = Vec::with_capacity(dim * dim);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != dim {
                return Err(AlignError::MalformedScoreTable(format!(
                    "row {idx} has {} columns, expected {dim}",
                    row.len()
                )));
            }
            table.extend(row);
        }

        let model = Self {
            alphabet,
            dim,
            table,
        };
        if let Some((a, b)) = model.first_asymmetry() {
            return Err(AlignError::MalformedScoreTable(format!(
                "score({}, {}) = {} but score({}, {}) = {}",
                model.alphabet.char_of(a) as char,
                model.alphabet.char_of(b) as char,
                model.score(a, b),
                model.alphabet.char_of(b) as char,
                model.alphabet.char_of(a) as char,
                model.score(b, a),
            )));
        }
        Ok(model)
    }

    /// Parse a nucleotide table in the text format shown in the module docs.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        Self::from_reader_for(Alphabet::nucleotide(), reader)
    }

    /// Parse a table whose header must name `alphabet`'s residues in order,
    /// followed by its gap character.
    ///
    /// Blank lines are skipped and anything after the last table row is
    /// ignored.
    pub fn from_reader_for<R: BufRead>(alphabet: Alphabet, reader: R) -> Result<Self> {
        let dim = alphabet.table_dim();
        let mut expected_labels: Vec<u8> = alphabet.residues().to_vec();
        expected_labels.push(alphabet.gap_char());

        let mut lines = reader.lines();
        let mut next_line = move || -> Result<Option<String>> {
            for line in lines.by_ref() {
                let line = line?;
                if !line.trim().is_empty() {
                    return Ok(Some(line));
                }
            }
            Ok(None)
        };

        let header = next_line()?
            .ok_or_else(|| AlignError::MalformedScoreTable("empty score table".into()))?;
        let labels: Vec<&str> = header.split_whitespace().collect();
        if !labels_match(&labels, &expected_labels) {
            return Err(AlignError::MalformedScoreTable(format!(
                "header {labels:?} does not match alphabet {:?}",
                String::from_utf8_lossy(&expected_labels)
            )));
        }

        let mut rows = Vec::with_capacity(dim);
        for (row_idx, &label) in expected_labels.iter().enumerate() {
            let line = next_line()?.ok_or_else(|| {
                AlignError::MalformedScoreTable(format!(
                    "expected {dim} rows, found {row_idx}"
                ))
            })?;
            let mut fields = line.split_whitespace();
            let row_label = fields.next().unwrap_or_default();
            if row_label.as_bytes() != [label] {
                return Err(AlignError::MalformedScoreTable(format!(
                    "row {row_idx} is labelled {row_label:?}, expected {:?}",
                    label as char
                )));
            }
            let mut row = fields
                .map(|field| {
                    field.parse::<i32>().map_err(|_| {
                        AlignError::MalformedScoreTable(format!(
                            "row {:?}: {field:?} is not an integer score",
                            label as char
                        ))
                    })
                })
                .collect::<Result<Vec<i32>>>()?;
            // gap/gap may be omitted
            if row_idx == dim - 1 && row.len() == dim - 1 {
                row.push(0);
            }
            rows.push(row);
        }

        Self::from_table(alphabet, rows)
    }

    /// Read a nucleotide table from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Score of aligning `a` against `b`; either may be the gap.
    #[inline]
    pub fn score(&self, a: Symbol, b: Symbol) -> Score {
        Score::from(self.table[a as usize * self.dim + b as usize])
    }

    /// Match/mismatch score of two residues.
    #[inline]
    pub fn match_score(&self, a: Symbol, b: Symbol) -> Score {
        self.score(a, b)
    }

    /// Score of `a` aligned against a gap.
    #[inline]
    pub fn indel(&self, a: Symbol) -> Score {
        Score::from(self.table[a as usize * self.dim + self.dim - 1])
    }

    pub fn is_symmetric(&self) -> bool {
        self.first_asymmetry().is_none()
    }

    /// Rows of the table in alphabet order, gap last.
    pub fn rows(&self) -> impl Iterator<Item = &[i32]> {
        self.table.chunks(self.dim)
    }

    fn first_asymmetry(&self) -> Option<(Symbol, Symbol)> {
        for a in 0..self.dim {
            for b in (a + 1)..self.dim {
                if self.table[a * self.dim + b] != self.table[b * self.dim + a] {
                    return Some((a as Symbol, b as Symbol));
                }
            }
        }
        None
    }
}

impl Default for ScoringModel {
    /// +1 match, -1 mismatch, -1 indel over nucleotides.
    fn default() -> Self {
        Self::simple(1, -1, -1)
    }
}

fn labels_match(labels: &[&str], expected: &[u8]) -> bool {
    labels.len() == expected.len()
        && labels
            .iter()
            .zip(expected)
            .all(|(label, &ch)| label.as_bytes() == [ch])
}
