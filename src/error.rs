//! Error types for alignment input validation.
//!
//! Every error here is a structural problem with the caller's input and is
//! reported before any matrix work starts. Ties between optimal alignments
//! are not errors.

use thiserror::Error;

/// Errors raised while building scoring models or encoding sequences.
#[derive(Debug, Error)]
pub enum AlignError {
    /// A sequence character is not part of the alphabet.
    #[error("invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    /// A pre-encoded sequence holds an index outside the alphabet it is
    /// being aligned under (it was encoded against a different alphabet).
    #[error("symbol index {index} at position {position} is outside the alphabet")]
    ForeignSymbol { index: u8, position: usize },

    /// Wrongly sized, non-square or non-symmetric score table, or an
    /// alphabet that cannot index one.
    #[error("malformed score table: {0}")]
    MalformedScoreTable(String),

    /// I/O error while reading a score table file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AlignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = AlignError::InvalidSymbol {
            symbol: 'N',
            position: 3,
        };
        assert_eq!(err.to_string(), "invalid symbol 'N' at position 3");

        let err = AlignError::MalformedScoreTable("expected 5 rows, found 4".into());
        assert!(err.to_string().contains("expected 5 rows"));
    }

    #[test]
    fn io_errors_convert() {
        fn read() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        assert!(matches!(read(), Err(AlignError::Io(_))));
    }
}
