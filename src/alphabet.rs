//! Residue alphabets and index-encoded sequences.
//!
//! Scores are looked up by symbol index, so sequences are encoded once up
//! front. Index `0..len` are the residues in alphabet order and index `len`
//! is the gap.

use std::ops::Deref;

use crate::error::{AlignError, Result};

/// Index of a residue (or the gap) inside an [`Alphabet`].
pub type Symbol = u8;

const UNMAPPED: u8 = u8::MAX;

/// An ordered set of residue characters plus a distinguished gap character.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    residues: Vec<u8>,
    gap: u8,
    lookup: [u8; 256],
}

impl Alphabet {
    /// Build an alphabet from residue characters and a gap character.
    ///
    /// # Errors
    ///
    /// Returns [`AlignError::MalformedScoreTable`] if the alphabet is empty,
    /// holds duplicates or non-graphic ASCII characters, contains the gap, or
    /// is too large to index with a [`Symbol`].
    pub fn new(residues: &[u8], gap: u8) -> Result<Self> {
        if residues.is_empty() {
            return Err(AlignError::MalformedScoreTable(
                "alphabet must contain at least one residue".into(),
            ));
        }
        if residues.len() >= UNMAPPED as usize {
            return Err(AlignError::MalformedScoreTable(format!(
                "alphabet of {} residues is too large",
                residues.len()
            )));
        }
        if !gap.is_ascii_graphic() {
            return Err(AlignError::MalformedScoreTable(format!(
                "gap character {:?} is not printable ASCII",
                gap as char
            )));
        }

        let mut lookup = [UNMAPPED; 256];
        for (idx, &residue) in residues.iter().enumerate() {
            if !residue.is_ascii_graphic() {
                return Err(AlignError::MalformedScoreTable(format!(
                    "residue {:?} is not printable ASCII",
                    residue as char
                )));
            }
            if residue == gap {
                return Err(AlignError::MalformedScoreTable(format!(
                    "residue {:?} collides with the gap character",
                    residue as char
                )));
            }
            if lookup[residue as usize] != UNMAPPED {
                return Err(AlignError::MalformedScoreTable(format!(
                    "residue {:?} listed twice",
                    residue as char
                )));
            }
            lookup[residue as usize] = idx as u8;
        }

        Ok(Self {
            residues: residues.to_vec(),
            gap,
            lookup,
        })
    }

    /// `A C G T` with `-` as the gap.
    pub fn nucleotide() -> Self {
        let mut lookup = [UNMAPPED; 256];
        for (idx, &residue) in b"ACGT".iter().enumerate() {
            lookup[residue as usize] = idx as u8;
        }
        Self {
            residues: b"ACGT".to_vec(),
            gap: b'-',
            lookup,
        }
    }

    /// Number of residues, excluding the gap.
    #[inline]
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    /// Always false for a constructed alphabet; present for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Side length of a score table over this alphabet (residues plus gap).
    #[inline]
    pub fn table_dim(&self) -> usize {
        self.residues.len() + 1
    }

    /// Index of the gap symbol.
    #[inline]
    pub fn gap(&self) -> Symbol {
        self.residues.len() as Symbol
    }

    #[inline]
    pub fn gap_char(&self) -> u8 {
        self.gap
    }

    pub fn residues(&self) -> &[u8] {
        &self.residues
    }

    /// Index of `ch`, treating the gap character as the gap symbol.
    #[inline]
    pub fn index_of(&self, ch: u8) -> Option<Symbol> {
        if ch == self.gap {
            return Some(self.gap());
        }
        match self.lookup[ch as usize] {
            UNMAPPED => None,
            idx => Some(idx),
        }
    }

    /// Character for a symbol index; the gap index maps to the gap character.
    ///
    /// # Panics
    /// Panics if `symbol` is larger than the gap index.
    #[inline]
    pub fn char_of(&self, symbol: Symbol) -> u8 {
        if symbol == self.gap() {
            self.gap
        } else {
            self.residues[symbol as usize]
        }
    }

    /// Encode a residue string. Gaps are rejected: sequences are ungapped.
    pub fn encode(&self, text: &str) -> Result<Sequence> {
        let mut symbols = Vec::with_capacity(text.len());
        for (position, ch) in text.chars().enumerate() {
            let idx = u8::try_from(ch)
                .ok()
                .filter(|&b| b != self.gap)
                .and_then(|b| match self.lookup[b as usize] {
                    UNMAPPED => None,
                    idx => Some(idx),
                });
            match idx {
                Some(idx) => symbols.push(idx),
                None => return Err(AlignError::InvalidSymbol { symbol: ch, position }),
            }
        }
        Ok(Sequence(symbols))
    }

    /// Render symbols back to text.
    pub fn decode(&self, symbols: &[Symbol]) -> String {
        symbols.iter().map(|&s| self.char_of(s) as char).collect()
    }

    /// Check that every symbol of an already encoded sequence is a residue
    /// of this alphabet.
    pub fn validate(&self, symbols: &[Symbol]) -> Result<()> {
        match symbols.iter().position(|&s| s >= self.gap()) {
            Some(position) => Err(AlignError::ForeignSymbol {
                index: symbols[position],
                position,
            }),
            None => Ok(()),
        }
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::nucleotide()
    }
}

impl std::fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Alphabet")
            .field("residues", &String::from_utf8_lossy(&self.residues))
            .field("gap", &(self.gap as char))
            .finish()
    }
}

/// An ungapped, immutable, index-encoded sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Sequence(Vec<Symbol>);

impl Sequence {
    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn into_symbols(self) -> Vec<Symbol> {
        self.0
    }
}

impl Deref for Sequence {
    type Target = [Symbol];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[Symbol]> for Sequence {
    fn as_ref(&self) -> &[Symbol] {
        &self.0
    }
}
