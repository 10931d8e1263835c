//! Result bundle returned by a homology computation.

use serde::{Deserialize, Serialize};

/// Birth and death of a homology class. Essential classes die at `+inf`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "RawPair", from = "RawPair")]
pub struct PersistencePair {
    /// Filtration value at which the class appears.
    pub birth: f64,
    /// Filtration value at which the class dies.
    pub death: f64,
}

impl PersistencePair {
    /// Creates a pair with a finite death.
    pub fn finite(birth: f64, death: f64) -> Self {
        Self { birth, death }
    }

    /// Creates an essential pair.
    pub fn essential(birth: f64) -> Self {
        Self {
            birth,
            death: f64::INFINITY,
        }
    }

    /// Returns whether the class never dies.
    pub fn is_essential(&self) -> bool {
        self.death.is_infinite()
    }

    /// Lifetime of the class.
    pub fn persistence(&self) -> f64 {
        self.death - self.birth
    }
}

// JSON has no infinity, so essential deaths travel as `null`.
#[derive(Serialize, Deserialize)]
struct RawPair {
    birth: f64,
    death: Option<f64>,
}

impl From<PersistencePair> for RawPair {
    fn from(pair: PersistencePair) -> Self {
        RawPair {
            birth: pair.birth,
            death: pair.death.is_finite().then_some(pair.death),
        }
    }
}

impl From<RawPair> for PersistencePair {
    fn from(raw: RawPair) -> Self {
        PersistencePair {
            birth: raw.birth,
            death: raw.death.unwrap_or(f64::INFINITY),
        }
    }
}

/// Persistence diagram of one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PersistenceDiagram {
    /// Pairs in the order they were extracted.
    pub pairs: Vec<PersistencePair>,
}

impl PersistenceDiagram {
    /// Number of pairs in the diagram.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns whether the diagram is empty.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs with a finite death.
    pub fn finite(&self) -> impl Iterator<Item = &PersistencePair> {
        self.pairs.iter().filter(|pair| !pair.is_essential())
    }

    /// Pairs that never die.
    pub fn essential(&self) -> impl Iterator<Item = &PersistencePair> {
        self.pairs.iter().filter(|pair| pair.is_essential())
    }

    /// Diagram as `[birth, death]` rows.
    pub fn as_rows(&self) -> Vec<[f64; 2]> {
        self.pairs.iter().map(|pair| [pair.birth, pair.death]).collect()
    }
}

/// Everything reported for a single dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionSummary {
    /// Homology dimension.
    pub dimension: usize,
    /// Number of simplices of this dimension.
    pub cell_count: u64,
    /// Number of essential classes.
    pub betti: u64,
    /// Persistence pairs of this dimension.
    pub diagram: PersistenceDiagram,
}

/// Result bundle of a homology computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomologyResult {
    /// Per-dimension summaries in increasing dimension.
    pub dimensions: Vec<DimensionSummary>,
    /// Alternating sum of cell counts over the whole complex.
    pub euler_characteristic: i64,
    /// Whether any column was skipped by the approximation policy.
    pub approximate: bool,
}

impl HomologyResult {
    /// Summary of a given dimension, if it was reported.
    pub fn dimension(&self, dim: usize) -> Option<&DimensionSummary> {
        self.dimensions.iter().find(|summary| summary.dimension == dim)
    }

    /// Persistence diagrams, one per reported dimension.
    pub fn dgms(&self) -> Vec<Vec<[f64; 2]>> {
        self.dimensions
            .iter()
            .map(|summary| summary.diagram.as_rows())
            .collect()
    }

    /// Cell counts, one per reported dimension.
    pub fn cell_counts(&self) -> Vec<u64> {
        self.dimensions.iter().map(|summary| summary.cell_count).collect()
    }

    /// Betti numbers, one per reported dimension.
    pub fn betti_numbers(&self) -> Vec<u64> {
        self.dimensions.iter().map(|summary| summary.betti).collect()
    }

    /// Euler characteristic repeated for every reported dimension.
    pub fn euler(&self) -> Vec<i64> {
        vec![self.euler_characteristic; self.dimensions.len()]
    }
}
