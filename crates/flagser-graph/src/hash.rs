use sha2::{Digest, Sha256};

use crate::graph::{EdgeList, FlagGraph};

/// Computes the canonical structural hash for the provided graph.
///
/// Edge order does not affect the hash; weights are hashed bitwise.
pub fn canonical_hash(graph: &FlagGraph) -> String {
    let mut hasher = Sha256::new();
    hasher.update((graph.num_vertices() as u64).to_le_bytes());
    for weight in graph.vertex_weights() {
        hasher.update(weight.to_bits().to_le_bytes());
    }

    match graph.edges() {
        EdgeList::Weighted(edges) => {
            hasher.update(b"edges:weighted");
            let mut sorted: Vec<(usize, usize, u64)> = edges
                .iter()
                .map(|&(s, t, w)| (s, t, w.to_bits()))
                .collect();
            sorted.sort_unstable();
            hasher.update((sorted.len() as u64).to_le_bytes());
            for (source, target, bits) in sorted {
                hasher.update((source as u64).to_le_bytes());
                hasher.update((target as u64).to_le_bytes());
                hasher.update(bits.to_le_bytes());
            }
        }
        EdgeList::Unweighted(edges) => {
            hasher.update(b"edges:unweighted");
            let mut sorted = edges.clone();
            sorted.sort_unstable();
            hasher.update((sorted.len() as u64).to_le_bytes());
            for (source, target) in sorted {
                hasher.update((source as u64).to_le_bytes());
                hasher.update((target as u64).to_le_bytes());
            }
        }
    }

    format!("{:x}", hasher.finalize())
}
