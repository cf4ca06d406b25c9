//! Example: print every optimal alignment of two sequences.
//!
//! Run with:
//! `cargo run --example align -- GATTACA GCATGCT`
//! `cargo run --example align -- --local --engine dp GTC AAAAGTCAAAA`
//! `cargo run --example align -- --matrix demos/data/score_matrix.txt ACGT AGT`
//!
//! Without `--matrix` the scoring is +1 match, -1 mismatch, -1 indel.

use std::env;
use std::process;

use dc_align::{Aligner, AlignerBuilder, Mode, ScoringModel};

enum EngineKind {
    Dp,
    Dc,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("align: {err}");
        process::exit(2);
    }
}

fn run() -> Result<(), String> {
    let mut mode = Mode::Global;
    let mut engine = EngineKind::Dc;
    let mut matrix = None;
    let mut base_case = None;
    let mut seqs = Vec::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--local" => mode = Mode::Local,
            "--global" => mode = Mode::Global,
            "--engine" => {
                engine = match args.next().as_deref() {
                    Some("dp") => EngineKind::Dp,
                    Some("dc") => EngineKind::Dc,
                    other => return Err(format!("unknown engine {other:?}, expected dp or dc")),
                }
            }
            "--matrix" => {
                matrix = Some(args.next().ok_or("missing path after --matrix")?);
            }
            "--base-case" => {
                let value = args.next().ok_or("missing value after --base-case")?;
                base_case = Some(
                    value
                        .parse::<usize>()
                        .map_err(|_| "base case must be a positive integer".to_string())?,
                );
            }
            _ => seqs.push(arg),
        }
    }
    let [seq1, seq2] = <[String; 2]>::try_from(seqs)
        .map_err(|_| "expected exactly two sequences".to_string())?;

    let scoring = match matrix {
        Some(path) => ScoringModel::from_file(&path).map_err(|e| e.to_string())?,
        None => ScoringModel::simple(1, -1, -1),
    };

    let mut builder = AlignerBuilder::new(&scoring).mode(mode);
    if let Some(b) = base_case {
        builder = builder.with_base_case_len(b);
    }
    let set = match engine {
        EngineKind::Dp => builder.build_dp().align(&seq1, &seq2),
        EngineKind::Dc => builder.build_dc().align(&seq1, &seq2),
    }
    .map_err(|e| e.to_string())?;

    println!("optimal score: {}", set.score());
    print!("{set}");
    Ok(())
}
