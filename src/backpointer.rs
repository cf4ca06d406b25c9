//! Per-cell backpointer flags.
//!
//! A cell keeps one bit for every predecessor that reaches its optimal
//! value. Ties are never broken, which is what lets backtracking enumerate
//! every co-optimal alignment.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::scoring::Score;

/// Set of up to three transitions into a DP cell, packed in the low 3 bits.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Backpointers(u8);

impl Backpointers {
    pub const NONE: Self = Self(0);
    /// From `(i-1, j-1)`: match or mismatch.
    pub const DIAG: Self = Self(0b001);
    /// From `(i-1, j)`: gap in the first sequence.
    pub const UP: Self = Self(0b010);
    /// From `(i, j-1)`: gap in the second sequence.
    pub const LEFT: Self = Self(0b100);

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    #[inline]
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// A cell without flags ends backtracking.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        self.0 == 0
    }

    /// Flags set on this cell, in `DIAG`, `UP`, `LEFT` order.
    pub fn iter(self) -> impl Iterator<Item = Backpointers> {
        [Self::DIAG, Self::UP, Self::LEFT]
            .into_iter()
            .filter(move |&flag| self.contains(flag))
    }

    /// Flags for every candidate equal to `best`.
    #[inline]
    pub fn matching(best: Score, diag: Score, up: Score, left: Score) -> Self {
        let mut flags = Self::NONE;
        if diag == best {
            flags.insert(Self::DIAG);
        }
        if up == best {
            flags.insert(Self::UP);
        }
        if left == best {
            flags.insert(Self::LEFT);
        }
        flags
    }
}

impl BitOr for Backpointers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Backpointers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Backpointers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Backpointers({self})")
    }
}

impl fmt::Display for Backpointers {
    /// Arrows for the set flags, `s` for a terminal cell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_terminal() {
            return f.write_str("s");
        }
        if self.contains(Self::LEFT) {
            f.write_str("→")?;
        }
        if self.contains(Self::UP) {
            f.write_str("↓")?;
        }
        if self.contains(Self::DIAG) {
            f.write_str("↘")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_combine() {
        let mut b = Backpointers::NONE;
        assert!(b.is_terminal());
        b.insert(Backpointers::UP);
        b |= Backpointers::DIAG;
        assert!(b.contains(Backpointers::UP));
        assert!(b.contains(Backpointers::DIAG));
        assert!(!b.contains(Backpointers::LEFT));
        assert!(!b.contains(Backpointers::NONE));
        assert_eq!(b.bits(), 0b011);
        assert_eq!(
            b.iter().collect::<Vec<_>>(),
            vec![Backpointers::DIAG, Backpointers::UP]
        );
    }

    #[test]
    fn matching_keeps_every_tie() {
        let all = Backpointers::matching(3, 3, 3, 3);
        assert_eq!(all, Backpointers::DIAG | Backpointers::UP | Backpointers::LEFT);
        assert_eq!(Backpointers::matching(0, -1, -2, -3), Backpointers::NONE);
        assert_eq!(Backpointers::matching(5, 1, 5, 2), Backpointers::UP);
    }

    #[test]
    fn renders_like_a_backtrack_grid() {
        assert_eq!(Backpointers::NONE.to_string(), "s");
        assert_eq!((Backpointers::DIAG | Backpointers::LEFT).to_string(), "→↘");
    }
}
