//! Example: local alignment under a score table read from disk.
//!
//! Run with:
//! `cargo run --example score_file`
//!
//! The table rewards C/C and G/G matches heavily and charges only -1 for
//! gapping a T.

use dc_align::{Aligner, DcEngine, DpEngine, Mode, ScoringModel};

fn main() -> dc_align::Result<()> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/data/score_matrix.txt");
    let scoring = ScoringModel::from_file(path)?;

    for row in scoring.rows() {
        println!("{row:?}");
    }

    let (seq1, seq2) = ("ACGTCGA", "TCGCGAT");
    let dc = DcEngine::new(&scoring, Mode::Local).align(seq1, seq2)?;
    let dp = DpEngine::new(&scoring, Mode::Local).align(seq1, seq2)?;
    assert_eq!(dc, dp);

    println!("local score {} for {seq1} / {seq2}", dc.score());
    print!("{dc}");
    Ok(())
}
