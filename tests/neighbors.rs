use epoxy::prelude::*;
use epoxy::NO_NEIGHBOR_SENTINEL;


// Three training items, two LFs.
//
//          LF 0   LF 1
// train 0   +1     -1
// train 1   +1      0
// train 2   -1     +1
fn train() -> LabelMatrix {
    LabelMatrix::from_rows(&[
        vec![ 1, -1],
        vec![ 1,  0],
        vec![-1,  1],
    ]).unwrap()
}


#[test]
fn closest_precedents_of_a_single_item() {
    let train = train();
    let target = LabelMatrix::from_rows(&[vec![0, 0]]).unwrap();
    let sim = SimilarityMatrix::from_rows(&[vec![0.9, 0.1, 0.2]]).unwrap();

    let neighbors = find_neighbors(&train, &target, &sim).unwrap();
    assert_eq!(neighbors.n_lf(), 2);
    assert_eq!(neighbors.n_target(), 1);

    let lf0 = neighbors.column(0);
    assert_eq!(lf0.abstains, vec![0]);
    assert_eq!(lf0.closest_positive, vec![Some(0.9)]);
    assert_eq!(lf0.closest_negative, vec![Some(0.2)]);

    let lf1 = neighbors.column(1);
    assert_eq!(lf1.abstains, vec![0]);
    assert_eq!(lf1.closest_positive, vec![Some(0.2)]);
    assert_eq!(lf1.closest_negative, vec![Some(0.9)]);
}


#[test]
fn only_abstentions_are_searched() {
    let train = train();
    let target = LabelMatrix::from_rows(&[
        vec![ 1,  0],
        vec![ 0, -1],
        vec![ 0,  0],
    ]).unwrap();
    let sim = SimilarityMatrix::from_rows(&[
        vec![0.1, 0.2, 0.3],
        vec![0.6, 0.4, 0.5],
        vec![0.0, 0.7, 0.8],
    ]).unwrap();

    let neighbors = find_neighbors(&train, &target, &sim).unwrap();

    let lf0 = neighbors.column(0);
    assert_eq!(lf0.abstains, vec![1, 2]);
    assert_eq!(lf0.closest_positive, vec![Some(0.6), Some(0.7)]);
    assert_eq!(lf0.closest_negative, vec![Some(0.5), Some(0.8)]);

    let lf1 = neighbors.column(1);
    assert_eq!(lf1.abstains, vec![0, 2]);
    assert_eq!(lf1.closest_positive, vec![Some(0.3), Some(0.8)]);
    assert_eq!(lf1.closest_negative, vec![Some(0.1), Some(0.0)]);

    let rows = lf1.iter().map(|(row, _, _)| row).collect::<Vec<_>>();
    assert_eq!(rows, vec![0, 2]);
}


#[test]
fn missing_polarity_has_no_neighbor() {
    // LF 0 never votes -1, LF 1 never votes +1.
    let train = LabelMatrix::from_rows(&[
        vec![1,  0],
        vec![0, -1],
    ]).unwrap();
    let target = LabelMatrix::from_rows(&[vec![0, 0], vec![0, 0]]).unwrap();
    let sim = SimilarityMatrix::from_rows(&[
        vec![0.4, 0.6],
        vec![0.9, 0.2],
    ]).unwrap();

    let neighbors = find_neighbors(&train, &target, &sim).unwrap();

    let lf0 = neighbors.column(0);
    assert_eq!(lf0.closest_positive, vec![Some(0.4), Some(0.9)]);
    assert_eq!(lf0.closest_negative, vec![None, None]);
    assert_eq!(
        lf0.closest_negative_or_sentinel(),
        vec![NO_NEIGHBOR_SENTINEL; 2]
    );

    let lf1 = neighbors.column(1);
    assert_eq!(lf1.closest_positive, vec![None, None]);
    assert_eq!(lf1.closest_negative, vec![Some(0.6), Some(0.2)]);
    assert_eq!(lf1.closest_positive_or_sentinel(), vec![-1.0, -1.0]);
    assert_eq!(lf1.closest_negative_or_sentinel(), vec![0.6, 0.2]);
}


#[test]
fn lf_without_abstentions_is_empty() {
    let train = train();
    let target = LabelMatrix::from_rows(&[vec![1, 0], vec![-1, 0]]).unwrap();
    let sim = SimilarityMatrix::from_rows(&[
        vec![0.1, 0.2, 0.3],
        vec![0.4, 0.5, 0.6],
    ]).unwrap();

    let neighbors = find_neighbors(&train, &target, &sim).unwrap();
    assert!(neighbors.column(0).is_empty());
    assert_eq!(neighbors.column(1).len(), 2);
}


#[test]
fn parallel_and_sequential_agree() {
    let train = LabelMatrix::from_rows(&[
        vec![ 1, -1,  0,  1],
        vec![ 0,  1, -1, -1],
        vec![-1,  0,  1,  0],
        vec![ 1,  1, -1,  0],
    ]).unwrap();
    let target = LabelMatrix::from_rows(&[
        vec![0, 0, 0, 0],
        vec![1, 0, 0, 0],
        vec![0, 0, 1, 0],
    ]).unwrap();
    let sim = SimilarityMatrix::from_rows(&[
        vec![0.3, 0.1, 0.9, 0.4],
        vec![0.2, 0.8, 0.5, 0.7],
        vec![0.6, 0.6, 0.1, 0.0],
    ]).unwrap();

    let par = NeighborFinder::init(&train, &target, &sim)
        .parallel(true)
        .find()
        .unwrap();
    let seq = NeighborFinder::init(&train, &target, &sim)
        .parallel(false)
        .find()
        .unwrap();
    assert_eq!(par, seq);
}


#[test]
fn mismatched_lf_count_fails() {
    let train = train();
    let target = LabelMatrix::from_rows(&[vec![0, 0, 0]]).unwrap();
    let sim = SimilarityMatrix::from_rows(&[vec![0.9, 0.1, 0.2]]).unwrap();

    let err = find_neighbors(&train, &target, &sim).unwrap_err();
    assert!(matches!(
        err,
        EpoxyError::LfCountMismatch { train: 2, target: 3 }
    ));
    assert!(err.to_string().contains("number of labeling functions"));
}


#[test]
fn mismatched_similarity_shape_fails() {
    let train = train();
    let target = LabelMatrix::from_rows(&[vec![0, 0]]).unwrap();

    // Transposed: 3 x 1 instead of 1 x 3.
    let sim = SimilarityMatrix::from_rows(&[
        vec![0.9], vec![0.1], vec![0.2],
    ]).unwrap();

    let err = find_neighbors(&train, &target, &sim).unwrap_err();
    match err {
        EpoxyError::SimilarityShapeMismatch { expected, actual } => {
            assert_eq!(expected, (1, 3));
            assert_eq!(actual, (3, 1));
        },
        other => panic!("unexpected error: {other}"),
    }
}


#[test]
fn from_parts_and_decompose() {
    let neighbors = Neighbors::from_parts(
        vec![vec![0, 2], vec![]],
        vec![vec![Some(0.5), None], vec![]],
        vec![vec![Some(0.1), Some(0.3)], vec![]],
        3,
    ).unwrap();
    assert_eq!(neighbors.n_lf(), 2);
    assert_eq!(neighbors.n_target(), 3);

    let (abstains, pos, neg) = neighbors.decompose();
    assert_eq!(abstains, vec![vec![0, 2], vec![]]);
    assert_eq!(pos, vec![vec![Some(0.5), None], vec![]]);
    assert_eq!(neg, vec![vec![Some(0.1), Some(0.3)], vec![]]);

    let err = Neighbors::from_parts(
        vec![vec![0, 2]],
        vec![vec![Some(0.5)]],
        vec![vec![Some(0.1), Some(0.3)]],
        3,
    ).unwrap_err();
    assert!(matches!(
        err,
        EpoxyError::MisalignedNeighbors {
            column: 0, abstains: 2, positive: 1, negative: 2,
        }
    ));

    let err = Neighbors::from_parts(
        vec![vec![0]],
        vec![],
        vec![vec![Some(0.1)]],
        1,
    ).unwrap_err();
    assert!(matches!(
        err,
        EpoxyError::NeighborCountMismatch { expected: 1, actual: 0 }
    ));
}
