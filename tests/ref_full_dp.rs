use dc_align::{Aligner, Alphabet, DcEngine, DpEngine, Mode, Score, ScoringModel};
use proptest::prelude::*;

const LABELS: &[u8] = b"ACGT-";

type Table = [[i32; 5]; 5];

fn idx(c: u8) -> usize {
    LABELS.iter().position(|&x| x == c).unwrap()
}

fn simple_table(ms: i32, mm: i32, indel: i32) -> Table {
    let mut t = [[mm; 5]; 5];
    for i in 0..4 {
        t[i][i] = ms;
        t[i][4] = indel;
        t[4][i] = indel;
    }
    t[4][4] = 0;
    t
}

fn model(t: &Table) -> ScoringModel {
    let rows = t.iter().map(|r| r.to_vec()).collect();
    ScoringModel::from_table(Alphabet::nucleotide(), rows).unwrap()
}

/// Plain two-dimensional DP over characters, score only. Local mode keeps
/// row 0 and column 0 at zero.
fn reference_score(t: &Table, a: &str, b: &str, local: bool) -> Score {
    let s = |x: usize, y: usize| Score::from(t[x][y]);
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut dp: Vec<Vec<Score>> = vec![vec![0; b.len() + 1]; a.len() + 1];
    let mut best = 0;
    for i in 0..=a.len() {
        for j in 0..=b.len() {
            if (i == 0 && j == 0) || (local && (i == 0 || j == 0)) {
                continue;
            }
            let mut v = if local { 0 } else { Score::MIN };
            if i > 0 && j > 0 {
                v = v.max(dp[i - 1][j - 1] + s(idx(a[i - 1]), idx(b[j - 1])));
            }
            if i > 0 {
                v = v.max(dp[i - 1][j] + s(idx(a[i - 1]), 4));
            }
            if j > 0 {
                v = v.max(dp[i][j - 1] + s(4, idx(b[j - 1])));
            }
            dp[i][j] = v;
            best = best.max(v);
        }
    }
    if local {
        best
    } else {
        dp[a.len()][b.len()]
    }
}

/// Symmetric table with arbitrary substitution and indel scores, free and
/// rewarded gaps included.
fn table_strategy() -> impl Strategy<Value = Table> {
    (
        prop::collection::vec(-4i32..=5, 10),
        prop::collection::vec(-3i32..=2, 4),
    )
        .prop_map(|(upper, indels)| {
            let mut t = [[0i32; 5]; 5];
            let mut k = 0;
            for i in 0..4 {
                for j in i..4 {
                    t[i][j] = upper[k];
                    t[j][i] = upper[k];
                    k += 1;
                }
                t[i][4] = indels[i];
                t[4][i] = indels[i];
            }
            t
        })
}

fn simple_strategy() -> impl Strategy<Value = Table> {
    (1i32..5, -4i32..=0, -3i32..=2).prop_map(|(ms, mm, indel)| simple_table(ms, mm, indel))
}

#[test]
fn free_gaps_stop_at_the_matrix_border() {
    let t = simple_table(2, -1, 0);
    let sc = model(&t);
    let dp = DpEngine::new(&sc, Mode::Local).align("AC", "C").unwrap();
    let dc = DcEngine::new(&sc, Mode::Local).align("AC", "C").unwrap();
    assert_eq!(dp, dc);
    assert_eq!(dc.len(), 1);
    assert_eq!(dc.score(), reference_score(&t, "AC", "C", true));
}

proptest! {
    #[test]
    fn global_engines_agree(a in "[ACGT]{0,7}", b in "[ACGT]{0,7}", t in simple_strategy()) {
        let sc = model(&t);
        let dp = DpEngine::new(&sc, Mode::Global).align(&a, &b).unwrap();
        let dc = DcEngine::new(&sc, Mode::Global).align(&a, &b).unwrap();
        prop_assert_eq!(&dp, &dc);
        prop_assert_eq!(dp.score(), reference_score(&t, &a, &b, false));
    }

    #[test]
    fn local_engines_agree(a in "[ACGT]{0,7}", b in "[ACGT]{0,7}", t in simple_strategy()) {
        let sc = model(&t);
        let dp = DpEngine::new(&sc, Mode::Local).align(&a, &b).unwrap();
        let dc = DcEngine::new(&sc, Mode::Local).align(&a, &b).unwrap();
        prop_assert_eq!(&dp, &dc);
        prop_assert_eq!(dp.score(), reference_score(&t, &a, &b, true));
    }

    #[test]
    fn engines_agree_under_arbitrary_tables(
        a in "[ACGT]{0,6}",
        b in "[ACGT]{0,6}",
        t in table_strategy(),
        local in any::<bool>(),
    ) {
        let sc = model(&t);
        let mode = if local { Mode::Local } else { Mode::Global };
        let dp = DpEngine::new(&sc, mode).align(&a, &b).unwrap();
        let dc = DcEngine::new(&sc, mode).align(&a, &b).unwrap();
        prop_assert_eq!(&dp, &dc);
        prop_assert_eq!(dp.score(), reference_score(&t, &a, &b, local));
    }

    #[test]
    fn base_case_cutoff_does_not_change_output(
        a in "[ACGT]{0,8}",
        b in "[ACGT]{0,8}",
        base in 1usize..5,
        local in any::<bool>(),
    ) {
        let sc = ScoringModel::simple(2, -1, -2);
        let mode = if local { Mode::Local } else { Mode::Global };
        let dp = DpEngine::new(&sc, mode).align(&a, &b).unwrap();
        let dc = DcEngine::with_base_case_len(&sc, mode, base).align(&a, &b).unwrap();
        prop_assert_eq!(dp, dc);
    }

    #[test]
    fn members_rescore_to_optimum(a in "[ACGT]{0,7}", b in "[ACGT]{0,7}", t in table_strategy()) {
        let sc = model(&t);
        for mode in [Mode::Global, Mode::Local] {
            let set = DcEngine::new(&sc, mode).align(&a, &b).unwrap();
            for alignment in &set {
                prop_assert_eq!(alignment.rescore(&sc).unwrap(), set.score());
            }
        }
    }
}
