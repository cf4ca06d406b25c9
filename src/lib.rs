//! Exhaustive optimal pairwise sequence alignment.
//!
//! This crate enumerates **every** alignment that reaches the optimal score
//! for two sequences over a small alphabet, in global (Needleman-Wunsch) or
//! local (Smith-Waterman) mode, under any symmetric integer scoring table.
//!
//! ## Engines
//! - [`DpEngine`] fills the full score matrix plus a multi-flag backpointer
//!   matrix and walks every optimal backtrack path. Quadratic memory.
//! - [`DcEngine`] finds split points with linear-space score sweeps
//!   (Hirschberg) and keeps every tied split point, recursing until the
//!   subproblems are small enough for [`DpEngine`].
//!
//! Both implement [`Aligner`] and return identical [`AlignmentSet`]s:
//! deduplicated, sorted lexicographically on `(first, second)`.
//!
//! ## Quick start
//! ```
//! use dc_align::{Aligner, DcEngine, Mode, ScoringModel};
//!
//! let scoring = ScoringModel::simple(2, -5, -5);
//! let set = DcEngine::new(&scoring, Mode::Local)
//!     .align("GTC", "AAAAGTCAAAA")
//!     .unwrap();
//! assert_eq!(set.score(), 6);
//! assert_eq!(set.len(), 1);
//! let best = set.first().unwrap();
//! assert_eq!((best.first(), best.second()), ("GTC", "GTC"));
//! ```
//!
//! ## Scoring
//! [`ScoringModel::simple`] covers uniform match/mismatch/indel schemes;
//! [`ScoringModel::from_file`] reads a whitespace-delimited table whose
//! header names the residue columns followed by the gap.
//!
//! ## Features
//! - `parallel`: run independent recursion branches and local windows on
//!   the rayon thread pool.
//! - `tracing`: emit spans and events for matrix builds, backtracking and
//!   every recursion level.

pub mod alignment;
pub mod alphabet;
pub mod backpointer;
pub mod blocks;
pub mod builder;
pub mod dc;
pub mod dp;
pub mod error;
pub mod scoring;
pub mod sweep;
pub mod traits;
pub mod utils;

pub use crate::alignment::{Alignment, AlignmentSet, Mode};
pub use crate::alphabet::{Alphabet, Sequence, Symbol};
pub use crate::builder::AlignerBuilder;
pub use crate::dc::DcEngine;
pub use crate::dp::DpEngine;
pub use crate::error::{AlignError, Result};
pub use crate::scoring::{Score, ScoringModel};
pub use crate::traits::Aligner;
