use flagser_core::errors::{ErrorInfo, FlagserError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::graph::{EdgeList, FlagGraph};

/// Generates an Erdős–Rényi graph with uniform edge weights in `[0, 1)`.
///
/// In undirected mode each unordered pair is drawn once and stored as `(low, high)`.
pub fn gen_erdos_renyi(
    n_vertices: usize,
    edge_probability: f64,
    directed: bool,
    seed: u64,
) -> Result<FlagGraph, FlagserError> {
    if !(0.0..=1.0).contains(&edge_probability) {
        return Err(FlagserError::InvalidParameter(
            ErrorInfo::new("invalid-probability", "edge probability must lie in [0, 1]")
                .with_parameter("edge_probability", edge_probability),
        ));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = Vec::new();
    for source in 0..n_vertices {
        for target in 0..n_vertices {
            if source == target || (!directed && target < source) {
                continue;
            }
            if rng.gen_bool(edge_probability) {
                edges.push((source, target, rng.gen::<f64>()));
            }
        }
    }
    FlagGraph::new(vec![0.0; n_vertices], EdgeList::Weighted(edges))
}

/// Generates the complete graph on `n_vertices` vertices with every ordered pair as an edge.
///
/// Weighted graphs give edge `(s, t)` the weight `s + t`, unweighted graphs carry no weights.
pub fn gen_complete(n_vertices: usize, weighted: bool) -> Result<FlagGraph, FlagserError> {
    let pairs = (0..n_vertices)
        .flat_map(|s| (0..n_vertices).filter(move |&t| t != s).map(move |t| (s, t)));
    let edges = if weighted {
        EdgeList::Weighted(pairs.map(|(s, t)| (s, t, (s + t) as f64)).collect())
    } else {
        EdgeList::Unweighted(pairs.collect())
    };
    FlagGraph::new(vec![0.0; n_vertices], edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_graph() {
        let a = gen_erdos_renyi(12, 0.3, true, 7).unwrap();
        let b = gen_erdos_renyi(12, 0.3, true, 7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn undirected_generator_stores_low_high_pairs() {
        let graph = gen_erdos_renyi(10, 0.5, false, 3).unwrap();
        assert!(graph.edges().iter().all(|(s, t, _)| s < t));
    }

    #[test]
    fn complete_graph_has_every_ordered_pair() {
        let graph = gen_complete(5, false).unwrap();
        assert_eq!(graph.num_edges(), 20);
    }
}
