use dc_align::{AlignError, Aligner, AlignmentSet, DcEngine, DpEngine, Mode, ScoringModel};
use proptest::prelude::*;

fn both(sc: &ScoringModel, mode: Mode, a: &str, b: &str) -> (AlignmentSet, AlignmentSet) {
    (
        DpEngine::new(sc, mode).align(a, b).unwrap(),
        DcEngine::new(sc, mode).align(a, b).unwrap(),
    )
}

fn no_gap_gap_column(first: &str, second: &str) -> bool {
    first
        .bytes()
        .zip(second.bytes())
        .all(|(x, y)| !(x == b'-' && y == b'-'))
}

#[test]
fn invalid_symbol_rejected_by_both_engines() {
    let sc = ScoringModel::default();
    for mode in [Mode::Global, Mode::Local] {
        let err = DpEngine::new(&sc, mode).align("ACGN", "ACG").unwrap_err();
        assert!(matches!(
            err,
            AlignError::InvalidSymbol {
                symbol: 'N',
                position: 3
            }
        ));
        let err = DcEngine::new(&sc, mode).align("ACG", "A-G").unwrap_err();
        assert!(matches!(
            err,
            AlignError::InvalidSymbol {
                symbol: '-',
                position: 1
            }
        ));
    }
}

#[test]
fn lower_case_is_not_a_residue() {
    let sc = ScoringModel::default();
    let err = DcEngine::new(&sc, Mode::Global).align("acgt", "ACGT").unwrap_err();
    assert!(matches!(err, AlignError::InvalidSymbol { symbol: 'a', .. }));
}

#[test]
fn local_without_positive_score_is_empty() {
    let sc = ScoringModel::simple(2, -5, -5);
    let (dp, dc) = both(&sc, Mode::Local, "AAAA", "CCCC");
    assert!(dp.is_empty());
    assert_eq!(dp.score(), 0);
    assert_eq!(dp, dc);
}

proptest! {
    #[test]
    fn global_members_spell_the_inputs(a in "[ACGT]{0,8}", b in "[ACGT]{0,8}") {
        let sc = ScoringModel::simple(2, -1, -1);
        let (dp, dc) = both(&sc, Mode::Global, &a, &b);
        prop_assert_eq!(&dp, &dc);
        prop_assert!(!dc.is_empty());
        for alignment in &dc {
            prop_assert_eq!(alignment.first().len(), alignment.second().len());
            prop_assert_eq!(alignment.ungapped_first('-'), a.clone());
            prop_assert_eq!(alignment.ungapped_second('-'), b.clone());
            prop_assert!(no_gap_gap_column(alignment.first(), alignment.second()));
        }
    }

    #[test]
    fn local_members_are_substrings(a in "[ACGT]{0,8}", b in "[ACGT]{0,8}") {
        let sc = ScoringModel::simple(2, -1, -2);
        let (dp, dc) = both(&sc, Mode::Local, &a, &b);
        prop_assert_eq!(&dp, &dc);
        prop_assert_eq!(dc.is_empty(), dc.score() == 0);
        for alignment in &dc {
            prop_assert!(!alignment.is_empty());
            prop_assert!(a.contains(&alignment.ungapped_first('-')));
            prop_assert!(b.contains(&alignment.ungapped_second('-')));
            prop_assert!(no_gap_gap_column(alignment.first(), alignment.second()));
        }
    }

    #[test]
    fn alignment_is_idempotent(a in "[ACGT]{0,8}", b in "[ACGT]{0,8}", local in any::<bool>()) {
        let sc = ScoringModel::simple(1, -1, -1);
        let mode = if local { Mode::Local } else { Mode::Global };
        let dc = DcEngine::new(&sc, mode);
        prop_assert_eq!(dc.align(&a, &b).unwrap(), dc.align(&a, &b).unwrap());
    }

    #[test]
    fn swapping_inputs_mirrors_the_set(
        a in "[ACGT]{0,8}",
        b in "[ACGT]{0,8}",
        local in any::<bool>(),
    ) {
        let sc = ScoringModel::simple(3, -2, -2);
        let mode = if local { Mode::Local } else { Mode::Global };
        for engine in [
            Box::new(DpEngine::new(&sc, mode)) as Box<dyn Aligner + '_>,
            Box::new(DcEngine::new(&sc, mode)),
        ] {
            let forward = engine.align(&a, &b).unwrap();
            let backward = engine.align(&b, &a).unwrap();
            prop_assert_eq!(forward.mirrored(), backward);
        }
    }
}
