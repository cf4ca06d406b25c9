#![cfg(feature = "heavy")]
use dc_align::{sweep, Aligner, DcEngine, DpEngine, Mode, ScoringModel};
use rand::{rngs::StdRng, Rng, SeedableRng};

const ALPHABET: &[u8] = b"ACGT";

fn random_dna(rng: &mut StdRng, len: usize) -> String {
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

fn substituted(rng: &mut StdRng, seq: &str) -> String {
    seq.chars()
        .map(|c| {
            if rng.gen_range(0..20) == 0 {
                ALPHABET[rng.gen_range(0..ALPHABET.len())] as char
            } else {
                c
            }
        })
        .collect()
}

#[test]
fn heavy_engines_agree_on_long_copies() {
    let sc = ScoringModel::simple(2, -3, -4);
    let mut rng = StdRng::seed_from_u64(123);
    let a = random_dna(&mut rng, 2_000);
    let b = substituted(&mut rng, &a);
    for mode in [Mode::Global, Mode::Local] {
        let dp = DpEngine::new(&sc, mode).align(&a, &b).unwrap();
        let dc = DcEngine::new(&sc, mode).align(&a, &b).unwrap();
        assert_eq!(dp, dc);
    }
}

#[test]
fn heavy_divide_and_conquer_without_full_matrix() {
    let sc = ScoringModel::simple(2, -3, -4);
    let mut rng = StdRng::seed_from_u64(321);
    let a = random_dna(&mut rng, 20_000);
    let b = substituted(&mut rng, &a);
    let set = DcEngine::new(&sc, Mode::Global).align(&a, &b).unwrap();

    let alphabet = sc.alphabet();
    let x = alphabet.encode(&a).unwrap();
    let y = alphabet.encode(&b).unwrap();
    let last = sweep::last_row(&sc, Mode::Global, &x, &y);
    assert_eq!(set.score(), last[y.len()]);
    assert!(!set.is_empty());
    for alignment in &set {
        assert_eq!(alignment.rescore(&sc).unwrap(), set.score());
    }
}
