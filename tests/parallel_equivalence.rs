#![cfg(feature = "parallel")]

use dc_align::{Aligner, DcEngine, DpEngine, Mode, ScoringModel};
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_dna(rng: &mut StdRng, len: usize) -> String {
    const ALPHABET: &[u8] = b"ACGT";
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

fn substituted(rng: &mut StdRng, seq: &str) -> String {
    const ALPHABET: &[u8] = b"ACGT";
    seq.chars()
        .map(|c| {
            if rng.gen_range(0..10) == 0 {
                ALPHABET[rng.gen_range(0..ALPHABET.len())] as char
            } else {
                c
            }
        })
        .collect()
}

#[test]
fn parallel_recursion_matches_full_matrix_on_medium_inputs() {
    let sc = ScoringModel::simple(2, -3, -4);
    let mut rng = StdRng::seed_from_u64(7);
    for len in [50usize, 120, 200] {
        let a = random_dna(&mut rng, len);
        let b = substituted(&mut rng, &a);
        for mode in [Mode::Global, Mode::Local] {
            let dp = DpEngine::new(&sc, mode).align(&a, &b).unwrap();
            let dc = DcEngine::new(&sc, mode).align(&a, &b).unwrap();
            assert_eq!(dp, dc, "len {len} {mode:?}");
        }
    }
}

proptest! {
    #[test]
    fn parallel_runs_are_deterministic(
        a in "[ACGT]{0,10}",
        b in "[ACGT]{0,10}",
        local in any::<bool>(),
    ) {
        let sc = ScoringModel::simple(1, -1, -1);
        let mode = if local { Mode::Local } else { Mode::Global };
        let dc = DcEngine::new(&sc, mode);
        let first = dc.align(&a, &b).unwrap();
        for _ in 0..3 {
            prop_assert_eq!(&dc.align(&a, &b).unwrap(), &first);
        }
        prop_assert_eq!(DpEngine::new(&sc, mode).align(&a, &b).unwrap(), first);
    }
}
