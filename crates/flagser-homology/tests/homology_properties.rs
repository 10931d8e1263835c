use flagser_core::params::{Approximation, FlagserParams};
use flagser_graph::gen_erdos_renyi;
use flagser_homology::{compute_homology, count_cells};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn betti_numbers_sum_to_the_euler_characteristic(
        n in 1usize..9,
        p in 0.1f64..0.7,
        directed in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let graph = gen_erdos_renyi(n, p, directed, seed).unwrap();
        let params = FlagserParams { directed, ..FlagserParams::default() };
        let result = compute_homology(&graph, &params).unwrap();
        let alternating: i64 = result
            .betti_numbers()
            .iter()
            .enumerate()
            .map(|(d, &b)| if d % 2 == 0 { b as i64 } else { -(b as i64) })
            .sum();
        prop_assert_eq!(alternating, result.euler_characteristic);
    }

    #[test]
    fn persistence_is_never_negative(
        n in 1usize..9,
        p in 0.1f64..0.7,
        seed in any::<u64>(),
    ) {
        let graph = gen_erdos_renyi(n, p, true, seed).unwrap();
        let result = compute_homology(&graph, &FlagserParams::default()).unwrap();
        for summary in &result.dimensions {
            for pair in &summary.diagram.pairs {
                prop_assert!(pair.persistence() >= 0.0);
            }
            prop_assert_eq!(summary.diagram.essential().count() as u64, summary.betti);
        }
    }

    #[test]
    fn reported_counts_match_counting(
        n in 1usize..9,
        p in 0.1f64..0.7,
        seed in any::<u64>(),
    ) {
        let graph = gen_erdos_renyi(n, p, true, seed).unwrap();
        let result = compute_homology(&graph, &FlagserParams::default()).unwrap();
        prop_assert_eq!(result.cell_counts(), count_cells(&graph, true).unwrap());
    }

    #[test]
    fn generous_approximation_is_exact(
        n in 1usize..8,
        p in 0.1f64..0.7,
        seed in any::<u64>(),
    ) {
        let graph = gen_erdos_renyi(n, p, true, seed).unwrap();
        let exact = compute_homology(&graph, &FlagserParams::default()).unwrap();
        let params = FlagserParams {
            approximation: Approximation::Bounded(1_000_000),
            ..FlagserParams::default()
        };
        prop_assert_eq!(compute_homology(&graph, &params).unwrap(), exact);
    }
}
