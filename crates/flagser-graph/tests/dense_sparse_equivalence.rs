use flagser_graph::{
    canonical_hash, extract_graph, DenseMatrix, EdgeList, FlagMatrix, IngestOptions, SparseMatrix,
};
use proptest::prelude::*;

fn cell_strategy() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        2 => Just(None),
        1 => Just(Some(0.0)),
        2 => (0.0f64..10.0).prop_map(Some),
    ]
}

fn matrices(n: usize, cells: &[Option<f64>]) -> (FlagMatrix<f64>, FlagMatrix<f64>) {
    let mut dense = DenseMatrix::filled(n, f64::INFINITY);
    let mut sparse = SparseMatrix::new(n, n);
    // Store entries in reverse so the sparse path has to sort them.
    for idx in (0..n * n).rev() {
        let (row, col) = (idx / n, idx % n);
        if let Some(value) = cells[idx] {
            dense.set(row, col, value).unwrap();
            sparse.push(row, col, value).unwrap();
        } else if row == col {
            dense.set(row, col, 0.0).unwrap();
        }
    }
    (dense.into(), sparse.into())
}

proptest! {
    #[test]
    fn equivalent_matrices_ingest_identically(
        (n, cells) in (1usize..8).prop_flat_map(|n| (Just(n), prop::collection::vec(cell_strategy(), n * n)))
    ) {
        let (dense, sparse) = matrices(n, &cells);
        let opts = IngestOptions::default();
        let a = extract_graph(&dense, &opts).unwrap();
        let b = extract_graph(&sparse, &opts).unwrap();
        prop_assert_eq!(canonical_hash(&a), canonical_hash(&b));
        prop_assert_eq!(a, b);
    }
}

#[test]
fn explicit_sparse_zero_is_an_edge_but_missing_entry_is_not() {
    let sparse = SparseMatrix::from_triplets(3, 3, vec![(0, 1, 0.0)]).unwrap();
    let graph = extract_graph(&sparse.into(), &IngestOptions::default()).unwrap();
    assert_eq!(graph.edges(), &EdgeList::Weighted(vec![(0, 1, 0.0)]));

    let dense = DenseMatrix::filled(3, 0.0);
    let graph = extract_graph(&dense.into(), &IngestOptions::default()).unwrap();
    assert_eq!(graph.num_edges(), 6);
}

#[test]
fn duplicate_sparse_entries_are_rejected() {
    let sparse = SparseMatrix::from_triplets(2, 2, vec![(0, 1, 1.0), (0, 1, 2.0)]).unwrap();
    let err = extract_graph(&sparse.into(), &IngestOptions::default()).unwrap_err();
    assert_eq!(err.code(), "duplicate-entry");
}
