use std::collections::HashMap;

use flagser_core::errors::{ErrorInfo, FlagserError};

/// Simplices of a single dimension together with their filtration values.
///
/// Vertices are stored flat, `dimension + 1` per simplex. Every dimension owns
/// its arena exclusively, so arenas can be built, reduced and dropped
/// independently of each other.
#[derive(Debug, Clone)]
pub struct SimplexArena {
    dimension: usize,
    vertices: Vec<usize>,
    filtration: Vec<f64>,
    index: HashMap<Vec<usize>, usize>,
}

impl SimplexArena {
    /// Creates an empty arena for the given dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vertices: Vec::new(),
            filtration: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Dimension of every simplex in the arena.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of stored simplices.
    pub fn len(&self) -> usize {
        self.filtration.len()
    }

    /// Returns whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.filtration.is_empty()
    }

    /// Appends a simplex with filtration value zero.
    pub fn push(&mut self, simplex: &[usize]) -> Result<(), FlagserError> {
        debug_assert_eq!(simplex.len(), self.dimension + 1);
        self.vertices
            .try_reserve(simplex.len())
            .and_then(|_| self.filtration.try_reserve(1))
            .map_err(|err| {
                FlagserError::ResourceExhausted(
                    ErrorInfo::new("allocation-failed", err.to_string())
                        .with_context("dimension", self.dimension.to_string())
                        .with_context("cells", self.len().to_string()),
                )
            })?;
        self.index.insert(simplex.to_vec(), self.len());
        self.vertices.extend_from_slice(simplex);
        self.filtration.push(0.0);
        Ok(())
    }

    /// Vertices of the simplex at `position`.
    pub fn simplex(&self, position: usize) -> &[usize] {
        let width = self.dimension + 1;
        &self.vertices[position * width..(position + 1) * width]
    }

    /// Iterates over the simplices in storage order.
    pub fn simplices(&self) -> impl Iterator<Item = &[usize]> {
        self.vertices.chunks_exact(self.dimension + 1)
    }

    /// Filtration value of the simplex at `position`.
    pub fn filtration(&self, position: usize) -> f64 {
        self.filtration[position]
    }

    /// Filtration values in storage order.
    pub fn filtration_values(&self) -> &[f64] {
        &self.filtration
    }

    pub(crate) fn set_filtration(&mut self, values: Vec<f64>) {
        debug_assert_eq!(values.len(), self.len());
        self.filtration = values;
    }

    /// Position of a simplex in storage order.
    pub fn position(&self, simplex: &[usize]) -> Option<usize> {
        self.index.get(simplex).copied()
    }

    fn build_index(&mut self) {
        let index: HashMap<Vec<usize>, usize> = self
            .simplices()
            .enumerate()
            .map(|(position, simplex)| (simplex.to_vec(), position))
            .collect();
        self.index = index;
    }

    /// Stable-sorts the simplices by filtration value and rebuilds the lookup table.
    ///
    /// Ties keep enumeration order, which makes the column order deterministic.
    pub fn sort_by_filtration(&mut self) {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by(|&a, &b| self.filtration[a].total_cmp(&self.filtration[b]));
        let width = self.dimension + 1;
        let mut vertices = Vec::with_capacity(self.vertices.len());
        let mut filtration = Vec::with_capacity(self.filtration.len());
        for position in order {
            vertices.extend_from_slice(&self.vertices[position * width..(position + 1) * width]);
            filtration.push(self.filtration[position]);
        }
        self.vertices = vertices;
        self.filtration = filtration;
        self.build_index();
    }
}
