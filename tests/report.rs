use epoxy::prelude::*;


#[test]
fn report_counts_extensions_per_lf() {
    let train = LabelMatrix::from_rows(&[
        vec![ 1,  1, 0],
        vec![-1,  1, 0],
    ]).unwrap();
    let target = LabelMatrix::from_rows(&[
        vec![0,  0, 0],
        vec![0, -1, 0],
        vec![1,  0, 0],
        vec![0,  0, 1],
    ]).unwrap();
    let sim = SimilarityMatrix::from_rows(&[
        vec![0.9, 0.1],
        vec![0.2, 0.8],
        vec![0.5, 0.5],
        vec![0.4, 0.3],
    ]).unwrap();

    let neighbors = find_neighbors(&train, &target, &sim).unwrap();
    let (extended, report) = VoteExtender::init(&neighbors)
        .thresholds([0.25, 0.25, 0.0])
        .extend_with_report(&target)
        .unwrap();

    assert_eq!(extended.to_rows(), vec![
        vec![ 1, 1, 0],
        vec![-1, -1, 0],
        vec![ 1, 1, 0],
        vec![ 1, 1, 1],
    ]);

    let lfs = report.lfs();
    assert_eq!(lfs.len(), 3);
    assert_eq!(report.n_item(), 4);

    // LF 0: rows 0, 1, 3 abstain.
    assert_eq!(lfs[0].name, "LF [0]");
    assert_eq!(lfs[0].n_abstain, 3);
    assert_eq!(lfs[0].n_positive, 2);
    assert_eq!(lfs[0].n_negative, 1);
    assert!((lfs[0].coverage_before - 0.25).abs() < 1e-12);
    assert!((lfs[0].coverage_after - 1.0).abs() < 1e-12);

    // LF 1 only votes +1 on the training set.
    assert_eq!(lfs[1].n_abstain, 3);
    assert_eq!(lfs[1].n_positive, 3);
    assert_eq!(lfs[1].n_negative, 0);

    // LF 2 never votes on the training set.
    assert_eq!(lfs[2].n_abstain, 3);
    assert_eq!(lfs[2].n_extended(), 0);

    assert_eq!(report.n_extended(), 6);
    assert_eq!(report.n_remaining_abstains(), 3);

    let text = report.to_string();
    assert!(text.contains("LF [0]"));
    assert!(text.ends_with("extended: 6, still abstain: 3"));
}


#[test]
fn compare_needs_matching_shapes() {
    let a = LabelMatrix::from_rows(&[vec![0, 0]]).unwrap();
    let b = LabelMatrix::from_rows(&[vec![0, 0], vec![1, 1]]).unwrap();

    let err = ExtensionReport::compare(&a, &b).unwrap_err();
    assert!(matches!(
        err,
        EpoxyError::MatrixShapeMismatch { expected: (1, 2), actual: (2, 2) }
    ));
}


#[test]
fn empty_target_has_empty_report() {
    let train = LabelMatrix::from_rows(&[vec![1, -1]]).unwrap();
    let target = LabelMatrix::from_columns(&[Vec::<i64>::new(), Vec::new()])
        .unwrap();
    let sim = SimilarityMatrix::from_shape_vec((0, 1), Vec::new()).unwrap();

    let neighbors = find_neighbors(&train, &target, &sim).unwrap();
    let (extended, report) = VoteExtender::init(&neighbors)
        .thresholds([0.5, 0.5])
        .extend_with_report(&target)
        .unwrap();

    assert_eq!(extended.shape(), (0, 2));
    assert_eq!(report.n_extended(), 0);
    assert_eq!(report.lfs()[0].coverage_before, 0.0);
}
