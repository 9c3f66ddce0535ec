//! Decoder scenarios: the outcome vector of a known defective set must come
//! back as exactly that set, through both the general and the specific
//! decoders.

use mtss::{decode_specific, Cff, CffMatrix, CffMethod, MatrixKind};

/// Outcome vector for a defective column set: a row tests positive when it
/// contains any defective column.
fn outcome(cff: &Cff, defectives: &[usize]) -> Vec<bool> {
    let dense = cff.matrix(MatrixKind::List).to_dense();
    (0..cff.t())
        .map(|r| defectives.iter().any(|&c| dense[r][c - 1] == 1))
        .collect()
}

fn assert_locates(cff: &Cff, defectives: &[usize]) {
    let y = outcome(cff, defectives);

    let specific = decode_specific(cff, &y).unwrap();
    assert!(specific.located, "specific decoder capacity ({defectives:?})");
    let mut columns = specific.columns.clone();
    columns.sort_unstable();
    assert_eq!(columns, defectives, "specific decoder");

    for kind in [MatrixKind::List, MatrixKind::Compact] {
        let general = cff.matrix(kind).find_defectives(&y, cff.d());
        assert!(general.located, "general decoder capacity ({kind:?})");
        assert_eq!(general.columns, defectives, "general decoder via {kind:?}");
    }
}

#[test]
fn sperner_locates_any_single_column() {
    let cff = CffMethod::Sperner.build(1, 4).unwrap();
    assert_eq!(cff.t(), 4);
    for column in 1..=4 {
        assert_locates(&cff, &[column]);
    }

    let cff = CffMethod::Sperner.build(1, 40).unwrap();
    for column in [1usize, 17, 40] {
        assert_locates(&cff, &[column]);
    }
}

#[test]
fn sperner_reports_ambiguity_beyond_capacity() {
    let cff = CffMethod::Sperner.build(1, 10).unwrap();
    let y = outcome(&cff, &[2, 7]);
    let result = decode_specific(&cff, &y).unwrap();
    assert!(!result.located);
    for column in [2usize, 7] {
        assert!(result.columns.contains(&column));
    }
}

#[test]
fn sts_locates_pairs() {
    let cff = CffMethod::Sts.build(2, 7).unwrap();
    assert_locates(&cff, &[1, 4]);
    assert_locates(&cff, &[2, 6]);
    assert_locates(&cff, &[3]);

    let cff = CffMethod::Sts.build(2, 25).unwrap();
    assert_locates(&cff, &[5, 19]);
    assert_locates(&cff, &[24]);
}

#[test]
fn rs_locates_up_to_d() {
    let cff = CffMethod::ReedSolomon.build(2, 100).unwrap();
    assert_locates(&cff, &[5, 50]);
    assert_locates(&cff, &[99, 100]);
    assert_locates(&cff, &[37]);

    let cff = CffMethod::ReedSolomon.build(3, 50).unwrap();
    assert_locates(&cff, &[7, 23, 41]);
    assert_locates(&cff, &[1, 2]);
}

#[test]
fn empty_outcome_means_no_defectives() {
    for cff in [
        CffMethod::Sperner.build(1, 12).unwrap(),
        CffMethod::Sts.build(2, 9).unwrap(),
        CffMethod::ReedSolomon.build(2, 64).unwrap(),
    ] {
        let y = vec![false; cff.t()];
        let result = decode_specific(&cff, &y).unwrap();
        assert!(result.columns.is_empty());
        assert!(result.located);

        let general = cff.matrix(MatrixKind::Compact).find_defectives(&y, cff.d());
        assert!(general.columns.is_empty());
        assert!(general.located);
    }
}

#[test]
fn general_decoder_is_construction_agnostic() {
    // the general decoder needs no structure knowledge, only the matrix
    for (cff, defectives) in [
        (CffMethod::Sperner.build(1, 30).unwrap(), vec![11usize]),
        (CffMethod::Sts.build(2, 15).unwrap(), vec![3usize, 14]),
        (CffMethod::ReedSolomon.build(2, 80).unwrap(), vec![8usize, 64]),
    ] {
        let y = outcome(&cff, &defectives);
        for kind in [MatrixKind::List, MatrixKind::Compact] {
            let result = cff.matrix(kind).find_defectives(&y, cff.d());
            assert_eq!(result.columns, defectives);
            assert!(result.located);
        }
    }
}
