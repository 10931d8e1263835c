use flagser_complex::{count_simplices, enumerate_complex, euler_characteristic};
use flagser_core::params::ResourceLimits;
use flagser_graph::{gen_complete, gen_erdos_renyi, FilteredDigraph};
use proptest::prelude::*;

fn binomial(n: u64, k: u64) -> u64 {
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

fn falling_factorial(n: u64, k: u64) -> u64 {
    (0..k).map(|i| n - i).product()
}

#[test]
fn complete_undirected_graph_counts_are_binomial() {
    for n in 1..=7u64 {
        let graph = gen_complete(n as usize, false).unwrap();
        let digraph = FilteredDigraph::build(&graph, false, None).unwrap();
        let counts = count_simplices(&digraph, None);
        let expected: Vec<u64> = (0..n).map(|k| binomial(n, k + 1)).collect();
        assert_eq!(counts, expected, "n = {n}");
        // A full simplex is contractible.
        assert_eq!(euler_characteristic(&counts), 1);
    }
}

#[test]
fn complete_directed_graph_counts_are_ordered_selections() {
    for n in 1..=5u64 {
        let graph = gen_complete(n as usize, false).unwrap();
        let digraph = FilteredDigraph::build(&graph, true, None).unwrap();
        let counts = count_simplices(&digraph, None);
        let expected: Vec<u64> = (0..n).map(|k| falling_factorial(n, k + 1)).collect();
        assert_eq!(counts, expected, "n = {n}");
    }
}

#[test]
fn dimension_cutoff_bounds_enumeration() {
    let graph = gen_complete(8, false).unwrap();
    let digraph = FilteredDigraph::build(&graph, false, None).unwrap();
    let complex = enumerate_complex(&digraph, Some(2), &ResourceLimits::default()).unwrap();
    assert_eq!(complex.cell_counts(), vec![8, 28, 56]);
}

proptest! {
    #[test]
    fn stored_and_counted_cells_agree(seed in any::<u64>(), n in 1usize..10, p in 0.0f64..0.8, directed in any::<bool>()) {
        let graph = gen_erdos_renyi(n, p, directed, seed).unwrap();
        let digraph = FilteredDigraph::build(&graph, directed, None).unwrap();
        let complex = enumerate_complex(&digraph, None, &ResourceLimits::default()).unwrap();
        let mut stored = complex.cell_counts();
        while stored.len() > 1 && stored.last() == Some(&0) {
            stored.pop();
        }
        prop_assert_eq!(stored, count_simplices(&digraph, None));
    }

    #[test]
    fn every_face_of_a_simplex_is_enumerated(seed in any::<u64>(), n in 1usize..9, p in 0.2f64..0.9) {
        let graph = gen_erdos_renyi(n, p, true, seed).unwrap();
        let digraph = FilteredDigraph::build(&graph, true, None).unwrap();
        let mut complex = enumerate_complex(&digraph, None, &ResourceLimits::default()).unwrap();
        flagser_complex::assign_filtration(
            &mut complex,
            &digraph,
            flagser_core::FiltrationKind::Max,
            &flagser_core::FiltrationOptions::default(),
        ).unwrap();
        for dimension in 1..complex.arenas().len() {
            let arena = &complex.arenas()[dimension];
            let faces = &complex.arenas()[dimension - 1];
            for (position, simplex) in arena.simplices().enumerate() {
                for skip in 0..simplex.len() {
                    let face: Vec<usize> = simplex.iter().enumerate()
                        .filter(|(i, _)| *i != skip).map(|(_, v)| *v).collect();
                    let face_position = faces.position(&face);
                    prop_assert!(face_position.is_some());
                    prop_assert!(faces.filtration(face_position.unwrap()) <= arena.filtration(position));
                }
            }
        }
    }
}
